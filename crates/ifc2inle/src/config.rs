//! Converter configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! usable configuration for the IFC2x3 TC1 vocabulary.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::nlp;

/// Base IRIs, seed files and naming conventions for one run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Canonical IFC vocabulary IRI source files are normalized to
    pub ifc_iri: String,

    /// INLE names vocabulary IRI
    pub nln_iri: String,

    /// EXPRESS vocabulary IRI (holds `hasString`)
    pub express_iri: String,

    /// Destination seed graph (INLE structure and class-level synonyms)
    pub inle_file: PathBuf,

    /// Optional IFC vocabulary graph, used for class lookup and subclass closure
    pub ifc_file: Option<PathBuf>,

    /// Lexical analyzer model name
    pub nlp_model: String,

    /// Class mapping table (`Class;Keep;MapTo;ExtraVariant`)
    pub mapping_file: PathBuf,

    /// Suffix marking a source copy, e.g. `duplex_ifc.ttl`
    pub source_suffix: String,

    /// Suffix marking a converted output, e.g. `duplex_inle.ttl`
    pub target_suffix: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            ifc_iri: "https://standards.buildingsmart.org/IFC/DEV/IFC2x3/TC1/OWL#".to_string(),
            nln_iri: "http://www.semanticweb.org/ontologies/2023/6/NLnames#".to_string(),
            express_iri: "https://w3id.org/express#".to_string(),
            inle_file: PathBuf::from("INLE.ttl"),
            ifc_file: None,
            nlp_model: nlp::DEFAULT_MODEL.to_string(),
            mapping_file: PathBuf::from("ifcTargetList.csv"),
            source_suffix: "_ifc".to_string(),
            target_suffix: "_inle".to_string(),
        }
    }
}

impl ConverterConfig {
    /// Load configuration from a TOML file.
    ///
    /// Relative paths inside the file are resolved against the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: ConverterConfig = toml::from_str(&contents)?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        config.inle_file = resolve_path(base, &config.inle_file);
        config.mapping_file = resolve_path(base, &config.mapping_file);
        config.ifc_file = config.ifc_file.map(|p| resolve_path(base, &p));

        config.validate()?;
        Ok(config)
    }

    /// Check base IRIs and the NLP model name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_namespace("ifc_iri", &self.ifc_iri)?;
        check_namespace("nln_iri", &self.nln_iri)?;
        check_namespace("express_iri", &self.express_iri)?;
        if !nlp::is_known_model(&self.nlp_model) {
            return Err(ConfigError::UnknownNlpModel(self.nlp_model.clone()));
        }
        Ok(())
    }
}

/// A namespace IRI must have a scheme and end with `#` or `/`.
fn check_namespace(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let has_scheme = value
        .split_once(':')
        .is_some_and(|(scheme, rest)| {
            !scheme.is_empty()
                && scheme.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
                && !rest.is_empty()
        });
    let terminated = value.ends_with('#') || value.ends_with('/');
    if has_scheme && terminated && !value.contains(char::is_whitespace) {
        Ok(())
    } else {
        Err(ConfigError::InvalidIri {
            field,
            value: value.to_string(),
        })
    }
}

/// Strip an optional `file://` prefix and anchor relative paths at `base`.
fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    let stripped = raw.strip_prefix("file://").unwrap_or(&raw);
    let candidate = PathBuf::from(stripped);
    if candidate.is_absolute() {
        candidate
    } else {
        base.join(candidate)
    }
}
