//! Error types for configuration, graph I/O, per-record faults and conversions.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Fatal configuration problems. A run cannot start (or continue) with these.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML configuration could not be parsed
    #[error("failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// The mapping table header lacks a required column
    #[error("mapping table is missing column `{0}`")]
    MissingColumn(String),

    /// A mapping table row is malformed
    #[error("mapping table line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    /// A base IRI cannot be used as a namespace
    #[error("invalid base IRI for `{field}`: {value}")]
    InvalidIri { field: &'static str, value: String },

    /// No lexical analyzer is known under this model name
    #[error("unknown NLP model: {0}")]
    UnknownNlpModel(String),

    /// A structural class the destination vocabulary must define is absent
    #[error("destination vocabulary does not define {0}")]
    MissingVocabularyClass(String),
}

/// Errors raised while loading or persisting an RDF graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The file could not be read or written
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid RDF in the detected format
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// The file extension does not name a supported RDF format
    #[error("unsupported RDF format for {}", path.display())]
    UnsupportedFormat { path: PathBuf },
}

/// Recoverable faults on a single class or instance. The conversion logs them,
/// skips the affected record and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordFault {
    /// A retained class is unknown to the source graph
    #[error("no class {class}")]
    ClassNotFound { class: String },

    /// A retained class exists but nothing is typed by it
    #[error("no instance of type {class}")]
    NoInstances { class: String },

    /// An instance lacks the mandatory root name
    #[error("instance {instance} of {class} has no root name")]
    MissingRootName { class: String, instance: String },

    /// The target class is not defined by the destination vocabulary
    #[error("target class {class} for {instance} is not defined in the destination vocabulary")]
    UnknownTargetClass { class: String, instance: String },
}

/// Stage of a single file conversion, reported when that conversion fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Housekeeping,
    MappingTableLoad,
    SourceParse,
    SourceNormalize,
    DestinationLoad,
    VariantGeneration,
    DestinationPersist,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Housekeeping => "housekeeping",
            Stage::MappingTableLoad => "mapping-table load",
            Stage::SourceParse => "source parse",
            Stage::SourceNormalize => "source normalize",
            Stage::DestinationLoad => "destination load",
            Stage::VariantGeneration => "variant generation",
            Stage::DestinationPersist => "destination persist",
        };
        f.write_str(name)
    }
}

/// A failed file conversion.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Graph I/O failed during a stage
    #[error("{stage} failed for {}: {source}", path.display())]
    Graph {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: GraphError,
    },

    /// Configuration (mapping table, seeds) was unusable
    #[error("{stage} failed: {source}")]
    Config {
        stage: Stage,
        #[source]
        source: ConfigError,
    },
}

impl ConversionError {
    pub fn stage(&self) -> Stage {
        match self {
            ConversionError::Graph { stage, .. } | ConversionError::Config { stage, .. } => *stage,
        }
    }
}
