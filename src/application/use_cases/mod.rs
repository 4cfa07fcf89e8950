pub mod column_resolver;
pub mod enrichment;
pub mod exclusion_admin;
pub mod exclusion_filter;
pub mod mapping_admin;
pub mod processing;
