//! IFC to INLE conversion: source mapping, variant generation and the
//! per-file pipeline tying them together.

pub mod pipeline;
pub mod schema_mapper;
pub mod target;
pub mod variants;

pub use pipeline::{BatchReport, ConversionPipeline, ConversionReport, FailedConversion};
pub use schema_mapper::{ParseOutcome, SchemaMapper};
pub use target::{TargetClass, TargetVocabulary};
pub use variants::{NameTemplate, VariantGenerator};
