pub mod use_cases;

pub use use_cases::enrichment::EnrichmentUseCase;
pub use use_cases::exclusion_admin::ExclusionAdminUseCase;
pub use use_cases::exclusion_filter::ExclusionFilterUseCase;
pub use use_cases::mapping_admin::MappingAdminUseCase;
pub use use_cases::processing::ProcessingUseCase;
