//! Centered moving-average smoothing.
//!
//! Output has the input's length. Bins outside the series count as zero, so the
//! first and last `half` outputs are pulled toward zero (same as a "same"-mode
//! convolution with a box kernel).

use crate::domain::PdfTable;
use crate::error::PdfError;

/// Smooth `series` with a centered window of `width` bins.
///
/// Even widths are bumped to the next odd width.
pub fn smooth(series: &[f64], width: i64) -> Result<Vec<f64>, PdfError> {
    if width < 1 {
        return Err(PdfError::InvalidArgument(format!(
            "smoothing width must be at least 1, got {width}"
        )));
    }
    let width = (if width % 2 == 0 { width + 1 } else { width }) as usize;
    let half = (width - 1) / 2;
    let n = series.len();
    let scale = 1.0 / width as f64;

    let out = (0..n)
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half + 1).min(n);
            series[lo..hi].iter().sum::<f64>() * scale
        })
        .collect();

    Ok(out)
}

/// Smooth the y-column of `table`, keeping its grid.
pub fn smooth_table(table: PdfTable, width: i64) -> Result<PdfTable, PdfError> {
    let y = smooth(table.y(), width)?;
    table.with_y(y)
}

/// Clamp an estimated bandwidth to a usable window (at least 1 bin).
pub fn smoothing_window(bandwidth: i64) -> i64 {
    bandwidth.max(1)
}
