//! Relative difference between two smoothed PDFs and the divergence-free bracket
//! around the reference peak.
//!
//! ```text
//! d_i = 2 |a_i - b_i| / |a_i + b_i|
//! ```
//!
//! `d_i` lies in `[0, 2]` for non-negative densities. Zero-over-zero bins are
//! set to exactly `0`; a non-zero difference over a zero sum saturates to
//! `f64::MAX` so it still counts as a crossing.
//!
//! The low side of the bracket is open (`-inf`) both when no crossing lies
//! below the peak and when the nearest one is row 0. The high side is open only
//! when no crossing lies above the peak.
//!
//! Both tables are assumed to share the same x-grid. Only their row counts are
//! checked; misaligned grids give meaningless brackets.

use crate::domain::{Bracket, Divergence, PdfTable};
use crate::error::PdfError;

/// Element-wise relative difference, sanitized.
pub fn relative_difference(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter()
        .zip(b)
        .map(|(ya, yb)| sanitize(2.0 * (ya - yb).abs() / (ya + yb).abs()))
        .collect()
}

fn sanitize(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else if v == f64::INFINITY {
        f64::MAX
    } else if v == f64::NEG_INFINITY {
        f64::MIN
    } else {
        v
    }
}

/// Indices whose relative difference is strictly above `threshold`, ascending.
pub fn crossings(relative_diff: &[f64], threshold: f64) -> Vec<usize> {
    relative_diff
        .iter()
        .enumerate()
        .filter(|(_, d)| **d > threshold)
        .map(|(i, _)| i)
        .collect()
}

/// Compare `reference` against `other` and bracket the reference peak.
pub fn analyze(
    reference: &PdfTable,
    other: &PdfTable,
    peak_index: usize,
    threshold: f64,
) -> Result<Divergence, PdfError> {
    if reference.len() != other.len() {
        return Err(PdfError::InvalidArgument(format!(
            "PDFs differ in row count ({} vs {})",
            reference.len(),
            other.len()
        )));
    }
    if peak_index >= reference.len() {
        return Err(PdfError::InvalidArgument(format!(
            "peak index {peak_index} is out of range for {} rows",
            reference.len()
        )));
    }

    let relative_diff = relative_difference(reference.y(), other.y());
    let crossings = crossings(&relative_diff, threshold);

    let below = crossings.iter().copied().filter(|&i| i < peak_index);
    let above = crossings.iter().copied().filter(|&i| i > peak_index);
    let low_index = nearest_to(below, peak_index);
    let high_index = nearest_to(above, peak_index);

    let x = reference.x();
    let bracket = Bracket {
        low: match low_index {
            Some(i) if i > 0 => x[i],
            _ => f64::NEG_INFINITY,
        },
        high: high_index.map_or(f64::INFINITY, |i| x[i]),
        low_index,
        high_index,
    };

    Ok(Divergence {
        relative_diff,
        crossings,
        bracket,
    })
}

/// First index with the smallest distance to `target`.
fn nearest_to(indices: impl Iterator<Item = usize>, target: usize) -> Option<usize> {
    indices.min_by_key(|&i| i.abs_diff(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(y: &[f64]) -> PdfTable {
        let x = (0..y.len()).map(|i| i as f64 * 0.5).collect();
        PdfTable::new(x, y.to_vec()).unwrap()
    }

    #[test]
    fn crossing_only_at_peak_gives_open_bracket() {
        let a = PdfTable::from_rows(&[
            (0.0, 0.0),
            (1.0, 1.0),
            (2.0, 4.0),
            (3.0, 1.0),
            (4.0, 0.0),
        ]);
        let b = PdfTable::from_rows(&[
            (0.0, 0.0),
            (1.0, 1.0),
            (2.0, 0.0),
            (3.0, 1.0),
            (4.0, 0.0),
        ]);

        let out = analyze(&a, &b, 2, 0.5).unwrap();
        assert_eq!(out.relative_diff, vec![0.0, 0.0, 2.0, 0.0, 0.0]);
        assert_eq!(out.crossings, vec![2]);
        assert_eq!(out.bracket.low, f64::NEG_INFINITY);
        assert_eq!(out.bracket.high, f64::INFINITY);
        assert!(!out.bracket.has_crossing());
    }

    #[test]
    fn zero_over_zero_is_exactly_zero() {
        let d = relative_difference(&[0.0, 0.0, 1.0], &[0.0, -0.0, 1.0]);
        assert_eq!(d, vec![0.0, 0.0, 0.0]);
        assert!(d.iter().all(|v| !v.is_nan()));
    }

    #[test]
    fn nonzero_over_zero_saturates() {
        let d = relative_difference(&[1.0], &[-1.0]);
        assert_eq!(d, vec![f64::MAX]);
        assert_eq!(crossings(&d, 0.5), vec![0]);
    }

    #[test]
    fn picks_nearest_crossing_each_side() {
        //        0    1    2    3    4    5    6    7    8
        let a = table(&[1.0, 1.0, 1.0, 1.0, 5.0, 1.0, 1.0, 1.0, 1.0]);
        let b = table(&[3.0, 3.0, 1.0, 1.0, 5.0, 1.0, 1.0, 3.0, 3.0]);

        let out = analyze(&a, &b, 4, 0.5).unwrap();
        assert_eq!(out.crossings, vec![0, 1, 7, 8]);
        assert_eq!(out.bracket.low_index, Some(1));
        assert_eq!(out.bracket.high_index, Some(7));
        assert_eq!(out.bracket.low, 0.5);
        assert_eq!(out.bracket.high, 3.5);
    }

    #[test]
    fn one_sided_crossing() {
        let a = table(&[1.0, 1.0, 5.0, 1.0, 1.0]);
        let b = table(&[1.0, 1.0, 5.0, 1.0, 4.0]);

        let out = analyze(&a, &b, 2, 0.5).unwrap();
        assert_eq!(out.bracket.low, f64::NEG_INFINITY);
        assert_eq!(out.bracket.low_index, None);
        assert_eq!(out.bracket.high, 2.0);
    }

    #[test]
    fn crossing_at_first_row_opens_low_side() {
        let a = table(&[1.0, 1.0, 5.0, 1.0]);
        let b = table(&[4.0, 1.0, 5.0, 1.0]);

        let out = analyze(&a, &b, 2, 0.5).unwrap();
        assert_eq!(out.bracket.low_index, Some(0));
        assert_eq!(out.bracket.low, f64::NEG_INFINITY);
        assert_eq!(out.bracket.high, f64::INFINITY);
        assert!(out.bracket.has_crossing());
    }

    #[test]
    fn crossing_at_last_row_is_reported() {
        let a = table(&[1.0, 5.0, 1.0, 1.0]);
        let b = table(&[1.0, 5.0, 1.0, 4.0]);

        let out = analyze(&a, &b, 1, 0.5).unwrap();
        assert_eq!(out.bracket.high_index, Some(3));
        assert_eq!(out.bracket.high, 1.5);
        assert_eq!(out.bracket.low, f64::NEG_INFINITY);
    }

    #[test]
    fn threshold_is_strict() {
        // d = 2 * 1 / 3 = 0.666..; equal threshold is not a crossing.
        let d = relative_difference(&[2.0], &[1.0]);
        assert!(crossings(&d, d[0]).is_empty());
    }

    #[test]
    fn rejects_mismatched_rows_and_bad_peak() {
        let a = table(&[1.0, 2.0, 1.0]);
        let b = table(&[1.0, 2.0]);
        assert!(matches!(analyze(&a, &b, 1, 0.5), Err(PdfError::InvalidArgument(_))));
        assert!(matches!(analyze(&a, &a, 3, 0.5), Err(PdfError::InvalidArgument(_))));
    }
}
