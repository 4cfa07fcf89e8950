// ============================================================
// COLUMN RESOLVER
// ============================================================
// Locate semantically-named columns in an uploaded dataset

use crate::domain::dataset::TabularDataset;
use crate::domain::error::{AppError, Result};

/// Case-insensitive substring identifying the address column
pub const ADDRESS_COLUMN_HINT: &str = "addressstreet";

/// Case-insensitive substring identifying the customer-id column
pub const CUSTOMER_ID_COLUMN_HINT: &str = "unitcustomerid";

/// Columns the pipeline operates on
#[derive(Debug, Clone)]
pub struct ResolvedColumns {
    pub address_column: String,

    /// Absence disables customer-company accumulation
    pub customer_id_column: Option<String>,
}

/// Resolve the address and customer-id columns from the dataset schema.
/// A missing address column fails the run; the customer-id column is
/// optional. When several columns match a hint, the first in original
/// column order wins.
pub fn resolve_columns(dataset: &TabularDataset) -> Result<ResolvedColumns> {
    let address_column = find_column_containing(dataset, ADDRESS_COLUMN_HINT).ok_or_else(|| {
        AppError::SchemaError("AddressStreet column not found in uploaded file".to_string())
    })?;

    Ok(ResolvedColumns {
        address_column,
        customer_id_column: find_column_containing(dataset, CUSTOMER_ID_COLUMN_HINT),
    })
}

/// First column whose name, lowercased, contains `hint`
pub fn find_column_containing(dataset: &TabularDataset, hint: &str) -> Option<String> {
    dataset
        .columns()
        .iter()
        .find(|column| column.to_lowercase().contains(hint))
        .map(|column| column.to_string())
}

/// The exclusion identifier column is always the first column by
/// position; this is a fixed convention, not a search.
pub fn username_column(dataset: &TabularDataset) -> Option<String> {
    dataset.columns().first().map(|column| column.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::{Cell, Row};

    fn dataset(columns: &[&str]) -> TabularDataset {
        let cells = columns.iter().map(|c| Cell::new(*c, "")).collect();
        TabularDataset::new(vec![Row::new(cells)])
    }

    #[test]
    fn test_resolves_address_column_case_insensitively() {
        let data = dataset(&["Username", "Property addressstreet 1", "City"]);
        let columns = resolve_columns(&data).unwrap();
        assert_eq!(columns.address_column, "Property addressstreet 1");
    }

    #[test]
    fn test_missing_address_column_is_schema_error() {
        let data = dataset(&["Username", "City"]);
        assert!(matches!(
            resolve_columns(&data),
            Err(AppError::SchemaError(_))
        ));
    }

    #[test]
    fn test_customer_id_column_is_optional() {
        let data = dataset(&["Username", "AddressStreet"]);
        let columns = resolve_columns(&data).unwrap();
        assert!(columns.customer_id_column.is_none());

        let data = dataset(&["Username", "AddressStreet", "UnitCustomerID"]);
        let columns = resolve_columns(&data).unwrap();
        assert_eq!(columns.customer_id_column.as_deref(), Some("UnitCustomerID"));
    }

    #[test]
    fn test_first_match_wins_on_multiple_candidates() {
        let data = dataset(&["OldAddressStreet", "AddressStreet"]);
        let columns = resolve_columns(&data).unwrap();
        assert_eq!(columns.address_column, "OldAddressStreet");
    }

    #[test]
    fn test_username_column_is_first_by_position() {
        let data = dataset(&["Email", "AddressStreet"]);
        assert_eq!(username_column(&data).as_deref(), Some("Email"));
        assert!(username_column(&TabularDataset::default()).is_none());
    }
}
