// ============================================================
// LOOKUP TABLE TYPES
// ============================================================
// Wire-compatible shapes for the persisted lookup tables

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Derived column: company id
pub const COMPANY_COLUMN: &str = "Company";

/// Derived column: company display name
pub const COMPANY_NAME_COLUMN: &str = "Company Name";

/// Derived column: lifestyle stage tag
pub const LIFESTYLE_STAGE_COLUMN: &str = "Lifestyle Stage";

/// Tag written to the lifestyle-stage column on a mapping hit
pub const WORKER_TAG: &str = "Worker";

/// Company metadata stored per address.
///
/// Field names follow the stored JSON format so data files remain
/// interchangeable with previously persisted tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyMapping {
    #[serde(rename = "Company")]
    pub company: String,

    #[serde(rename = "Company Name")]
    pub company_name: String,
}

impl CompanyMapping {
    pub fn new(company: impl Into<String>, company_name: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            company_name: company_name.into(),
        }
    }
}

/// Trimmed address (exact match, case-sensitive) → company metadata
pub type AddressTable = BTreeMap<String, CompanyMapping>;

/// Customer id (verbatim, not normalized) → company name.
/// Accumulated as a side effect of enrichment, never edited by hand.
pub type CustomerCompanyTable = BTreeMap<String, String>;

/// Trimmed, lowercased identifiers, deduplicated and kept sorted
pub type ExclusionList = Vec<String>;
