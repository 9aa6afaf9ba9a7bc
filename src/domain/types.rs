//! Shared domain types.
//!
//! Tables are plain column vectors so each stage can borrow the x-column and
//! hand back a new y-column without copying the grid more than once.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::PdfError;

/// A sampled probability density: rows of `(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfTable {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl PdfTable {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, PdfError> {
        if x.len() != y.len() {
            return Err(PdfError::InvalidArgument(format!(
                "x and y columns differ in length ({} vs {})",
                x.len(),
                y.len()
            )));
        }
        Ok(Self { x, y })
    }

    pub fn from_rows(rows: &[(f64, f64)]) -> Self {
        let (x, y) = rows.iter().copied().unzip();
        Self { x, y }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Replace the y-column, keeping the grid.
    pub fn with_y(self, y: Vec<f64>) -> Result<Self, PdfError> {
        Self::new(self.x, y)
    }

    /// True when x is strictly increasing.
    pub fn is_strictly_increasing(&self) -> bool {
        self.x.windows(2).all(|w| w[0] < w[1])
    }
}

/// Change-of-variable factor applied to the trailing rows (`rows[1..]`).
#[derive(Debug, Clone, PartialEq)]
pub enum Jacobian {
    Unit,
    PerBin(Vec<f64>),
}

impl Jacobian {
    /// `1/x` evaluated on the trailing rows, for tables whose x-axis is a log quantity.
    pub fn log_axis(table: &PdfTable) -> Self {
        Jacobian::PerBin(table.x().iter().skip(1).map(|x| 1.0 / x).collect())
    }

    pub fn at(&self, i: usize) -> f64 {
        match self {
            Jacobian::Unit => 1.0,
            Jacobian::PerBin(values) => values[i],
        }
    }
}

/// How the sweep chooses a jacobian for each category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum JacobianPolicy {
    /// Always the scalar `1.0`, whatever the variable.
    Unit,
    /// `1/x` when the variable name contains `log`, else `1.0`.
    LogAware,
}

impl JacobianPolicy {
    pub fn jacobian_for(self, variable: &str, table: &PdfTable) -> Jacobian {
        match self {
            JacobianPolicy::Unit => Jacobian::Unit,
            JacobianPolicy::LogAware if variable.contains("log") => Jacobian::log_axis(table),
            JacobianPolicy::LogAware => Jacobian::Unit,
        }
    }
}

/// Region around the peak, bounded by the nearest threshold crossings.
///
/// A side without any crossing is infinite and carries no index. A low-side
/// crossing at row 0 keeps its index but the bound is still `-inf`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub low: f64,
    pub high: f64,
    pub low_index: Option<usize>,
    pub high_index: Option<usize>,
}

impl Bracket {
    pub fn has_crossing(&self) -> bool {
        self.low_index.is_some() || self.high_index.is_some()
    }
}

/// Full analyzer output: the relative-difference curve and the bracket derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Divergence {
    pub relative_diff: Vec<f64>,
    pub crossings: Vec<usize>,
    pub bracket: Bracket,
}

/// A physical category and the variable name used in its file names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub variable: String,
}

impl Category {
    pub fn new(name: impl Into<String>, variable: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variable: variable.into(),
        }
    }
}

/// The set of categories and redshift indices a sweep iterates over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub redshifts: Vec<u32>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            categories: vec![
                Category::new("Convergence", "kappa"),
                Category::new("Magnification", "log_mu"),
                Category::new("Shear", "log_gamma"),
            ],
            redshifts: (1..=5).collect(),
        }
    }
}

/// Simulation variant tag as it appears in file names (`dm`, `bao`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant(pub String);

impl Variant {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A full sweep's configuration as understood by the pipeline.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub base_path: PathBuf,
    pub box_id: String,
    pub resolution: String,
    pub threshold: f64,
    pub catalog: Catalog,
    pub jacobian: JacobianPolicy,
    pub reference: Variant,
    pub other: Variant,
}

impl SweepConfig {
    /// `{base}/{box}/{category}/{variable}_hr_{variant}_{resolution}_pdf_z{z}.txt`
    pub fn pdf_path(&self, category: &Category, variant: &Variant, redshift: u32) -> PathBuf {
        pdf_path(
            &self.base_path,
            &self.box_id,
            category,
            variant.as_str(),
            &self.resolution,
            redshift,
        )
    }
}

pub fn pdf_path(
    base: &Path,
    box_id: &str,
    category: &Category,
    variant: &str,
    resolution: &str,
    redshift: u32,
) -> PathBuf {
    base.join(box_id).join(&category.name).join(format!(
        "{}_hr_{}_{}_pdf_z{}.txt",
        category.variable, variant, resolution, redshift
    ))
}

/// Configuration for comparing one explicit pair of files.
#[derive(Debug, Clone)]
pub struct PairConfig {
    pub reference: PathBuf,
    pub other: PathBuf,
    pub threshold: f64,
    pub log_axis: bool,
}
