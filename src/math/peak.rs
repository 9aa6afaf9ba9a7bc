use crate::domain::PdfTable;
use crate::error::PdfError;

/// Index of the largest y-value; the lowest index wins on ties. NaN rows are never chosen.
pub fn find_peak(table: &PdfTable) -> Result<usize, PdfError> {
    if table.is_empty() {
        return Err(PdfError::InvalidArgument(
            "cannot locate the peak of an empty table".to_string(),
        ));
    }

    let mut best = 0;
    let mut best_val = f64::NEG_INFINITY;
    for (i, &v) in table.y().iter().enumerate() {
        if v > best_val {
            best = i;
            best_val = v;
        }
    }
    Ok(best)
}
