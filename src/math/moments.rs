//! Weighted moments and smoothing bandwidth.
//!
//! Each trailing row `i+1` contributes
//!
//! ```text
//! w_i = y[i+1] * jac[i] * (x[i+1] - x[i])
//! ```
//!
//! i.e. right-hand values over forward differences. Mean and standard deviation
//! of `x[i+1]` under these weights define a one-sigma window around the mean;
//! its length in bins, divided by 10, is the smoothing bandwidth.

use crate::domain::{Jacobian, PdfTable};
use crate::error::PdfError;

/// Bins per unit of bandwidth.
pub const BINS_PER_BANDWIDTH: i64 = 10;

/// Weighted mean and standard deviation of a PDF's x-axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    pub mean: f64,
    pub std: f64,
}

/// Compute the weighted mean/std of `table` under `jacobian`.
pub fn weighted_moments(table: &PdfTable, jacobian: &Jacobian) -> Result<Moments, PdfError> {
    let n = table.len();
    if n < 2 {
        return Err(PdfError::InvalidArgument(format!(
            "moment estimation needs at least 2 rows, got {n}"
        )));
    }
    if let Jacobian::PerBin(values) = jacobian {
        if values.len() != n - 1 {
            return Err(PdfError::InvalidArgument(format!(
                "jacobian has {} entries, expected {}",
                values.len(),
                n - 1
            )));
        }
    }

    let x = table.x();
    let y = table.y();

    let mut sum_w = 0.0;
    let mut sum_wx = 0.0;
    let mut sum_wx2 = 0.0;
    for i in 0..n - 1 {
        let w = y[i + 1] * jacobian.at(i) * (x[i + 1] - x[i]);
        let xi = x[i + 1];
        sum_w += w;
        sum_wx += xi * w;
        sum_wx2 += xi * xi * w;
    }

    if sum_w == 0.0 || !sum_w.is_finite() {
        return Err(PdfError::Domain(format!(
            "total weight is {sum_w}; weighted mean is undefined"
        )));
    }

    let mean = sum_wx / sum_w;
    let var = sum_wx2 / sum_w - mean * mean;
    if !mean.is_finite() || !var.is_finite() {
        return Err(PdfError::Domain("weighted moments are not finite".to_string()));
    }
    if var < 0.0 {
        return Err(PdfError::Domain(format!("weighted variance is negative ({var:e})")));
    }

    Ok(Moments {
        mean,
        std: var.sqrt(),
    })
}

/// Index of the value closest to `target`; the first one wins on ties.
///
/// Returns 0 when `values` is empty.
pub fn nearest_index(values: &[f64], target: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, v) in values.iter().enumerate() {
        let dist = (v - target).abs();
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

/// Signed bin distance between the rows nearest `mean - std` and `mean + std`.
pub fn width_in_bins(table: &PdfTable, jacobian: &Jacobian) -> Result<i64, PdfError> {
    let m = weighted_moments(table, jacobian)?;
    let lower = nearest_index(table.x(), m.mean - m.std);
    let upper = nearest_index(table.x(), m.mean + m.std);
    Ok(upper as i64 - lower as i64)
}

/// Smoothing bandwidth in bins: floor of the one-sigma width over 10.
///
/// The result is not clamped and may be zero or negative.
pub fn estimate_width(table: &PdfTable, jacobian: &Jacobian) -> Result<i64, PdfError> {
    Ok(bandwidth_from_bins(width_in_bins(table, jacobian)?))
}

/// Floor division toward negative infinity.
pub fn bandwidth_from_bins(bins: i64) -> i64 {
    bins.div_euclid(BINS_PER_BANDWIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle(step: f64, half_width: f64, center: f64) -> PdfTable {
        let n = (2.0 * half_width / step).round() as usize + 1;
        let rows: Vec<(f64, f64)> = (0..n)
            .map(|i| {
                let x = i as f64 * step;
                (x, (half_width - (x - center).abs()).max(0.0))
            })
            .collect();
        PdfTable::from_rows(&rows)
    }

    #[test]
    fn symmetric_triangle_regression() {
        let table = triangle(0.01, 2.0, 2.0);
        let m = weighted_moments(&table, &Jacobian::Unit).unwrap();
        assert_relative_eq!(m.mean, 2.0, epsilon = 1e-9);
        assert_relative_eq!(m.std, 0.66665_f64.sqrt(), epsilon = 1e-9);

        assert_eq!(width_in_bins(&table, &Jacobian::Unit).unwrap(), 164);
        assert_eq!(estimate_width(&table, &Jacobian::Unit).unwrap(), 16);
    }

    #[test]
    fn coarse_triangle_gives_unit_bandwidth() {
        let table = triangle(0.1, 2.0, 2.0);
        assert_eq!(width_in_bins(&table, &Jacobian::Unit).unwrap(), 16);
        assert_eq!(estimate_width(&table, &Jacobian::Unit).unwrap(), 1);
    }

    #[test]
    fn all_zero_density_is_domain_error() {
        let table = PdfTable::from_rows(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let err = estimate_width(&table, &Jacobian::Unit).unwrap_err();
        assert!(matches!(err, PdfError::Domain(_)));
    }

    #[test]
    fn negative_variance_is_domain_error() {
        let table = PdfTable::from_rows(&[(0.0, 0.0), (1.0, -0.4), (2.0, 1.0), (3.0, -0.4)]);
        let err = weighted_moments(&table, &Jacobian::Unit).unwrap_err();
        assert!(matches!(err, PdfError::Domain(msg) if msg.contains("negative")));
    }

    #[test]
    fn jacobian_length_is_checked() {
        let table = PdfTable::from_rows(&[(1.0, 0.0), (2.0, 1.0), (3.0, 1.0)]);
        let err = weighted_moments(&table, &Jacobian::PerBin(vec![1.0; 3])).unwrap_err();
        assert!(matches!(err, PdfError::InvalidArgument(_)));
    }

    #[test]
    fn jacobian_reweights_trailing_rows() {
        // Uniform density on x = 1..4; a 1/x jacobian pulls the mean toward small x.
        let table = PdfTable::from_rows(&[(1.0, 1.0), (2.0, 1.0), (3.0, 1.0), (4.0, 1.0)]);
        let flat = weighted_moments(&table, &Jacobian::Unit).unwrap();
        let log = weighted_moments(&table, &Jacobian::log_axis(&table)).unwrap();
        assert_relative_eq!(flat.mean, 3.0, epsilon = 1e-12);
        assert_relative_eq!(log.mean, 3.0 / (0.5 + 1.0 / 3.0 + 0.25), epsilon = 1e-12);
        assert!(log.mean < flat.mean);
    }

    #[test]
    fn nearest_index_prefers_first_on_ties() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(nearest_index(&xs, 1.5), 1);
        assert_eq!(nearest_index(&xs, -10.0), 0);
        assert_eq!(nearest_index(&xs, 2.9), 3);
    }

    #[test]
    fn nearest_index_of_empty_slice_is_zero() {
        assert_eq!(nearest_index(&[], 1.0), 0);
    }

    #[test]
    fn bandwidth_floors_toward_negative_infinity() {
        assert_eq!(bandwidth_from_bins(164), 16);
        assert_eq!(bandwidth_from_bins(9), 0);
        assert_eq!(bandwidth_from_bins(-5), -1);
        assert_eq!(bandwidth_from_bins(-10), -1);
        assert_eq!(bandwidth_from_bins(-11), -2);
    }
}
