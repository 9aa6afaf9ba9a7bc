//! Read catalog JSON files.
//!
//! A catalog replaces the built-in category/redshift enumeration:
//!
//! ```json
//! { "categories": [{ "name": "Convergence", "variable": "kappa" }], "redshifts": [1, 2] }
//! ```

use std::fs::File;
use std::path::Path;

use crate::domain::Catalog;
use crate::error::AppError;

/// Read and validate a catalog JSON file.
pub fn read_catalog_json(path: &Path) -> Result<Catalog, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to open catalog JSON '{}': {e}", path.display()),
        )
    })?;
    let catalog: Catalog = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid catalog JSON: {e}")))?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

pub fn validate_catalog(catalog: &Catalog) -> Result<(), AppError> {
    if catalog.categories.is_empty() {
        return Err(AppError::new(2, "Catalog must list at least one category."));
    }
    if catalog.redshifts.is_empty() {
        return Err(AppError::new(2, "Catalog must list at least one redshift."));
    }
    Ok(())
}
