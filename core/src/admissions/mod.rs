//! College admissions processing
//!
//! Lookup tables and tools for applicant queries, application record
//! loading, and the sequential processing pipeline.

pub mod application;
pub mod catalog;
pub mod pipeline;

pub use application::{
    load_application, load_application_from_files, load_application_set, Application, Documents,
};
pub use catalog::{
    FaqDatabase, FaqSearchTool, ProgramCatalog, ProgramInfo, ProgramInfoTool, ADMISSIONS_CONTACT,
};
pub use pipeline::{
    AdmissionPipeline, ApplicationOutcome, CommunicationManager, DocumentProcessor,
    EligibilityCriteria, EligibilityDecision, EligibilityEvaluator, Evaluation, ExtractedData,
    Notification, QueryHandler,
};
