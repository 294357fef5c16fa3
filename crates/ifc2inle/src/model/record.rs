//! Records projected out of the source graph.

use serde::Serialize;

/// One retained source instance, ready for conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRecord {
    /// Destination class name (the `MapTo` column, or the source class itself)
    pub target_class: String,
    /// Most specific asserted type of the source instance
    pub source_type_iri: String,
    /// Mandatory display name (`name_IfcRoot`)
    pub root_name: String,
    pub object_type: Option<String>,
    pub tag: Option<String>,
    /// Mapping table row that selected the instance
    pub source_class: String,
    /// Source instance identifier, for diagnostics
    pub instance: String,
}
