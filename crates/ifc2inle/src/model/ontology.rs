//! RDF vocabulary constants for the source (IFC) and destination (INLE) graphs.
//!
//! - `ifc:` prefix -- IFC2x3 OWL vocabulary (base IRI is configurable, see
//!   [`ConverterConfig`](crate::config::ConverterConfig))
//! - `express:` prefix -- EXPRESS wrappers carrying literal values
//! - `nln:` prefix -- INLE natural-language names vocabulary
//!
//! The IFC and INLE namespaces are configurable, so only local names live here
//! for them.

/// Standard RDF/RDFS/OWL/XSD namespace URIs
pub mod standard {
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const RDFS_CLASS: &str = "http://www.w3.org/2000/01/rdf-schema#Class";
    pub const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
    pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
    pub const OWL_THING: &str = "http://www.w3.org/2002/07/owl#Thing";
    pub const OWL_NAMED_INDIVIDUAL: &str = "http://www.w3.org/2002/07/owl#NamedIndividual";
    pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const XSD_DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
}

/// IFC local names (joined to the configured IFC base IRI).
pub mod ifc {
    pub const PREFIX: &str = "ifc";

    /// Class used to detect which namespace a source file was exported with.
    pub const APPLICATION: &str = "IfcApplication";

    pub const NAME_IFC_ROOT: &str = "name_IfcRoot";
    pub const OBJECT_TYPE_IFC_OBJECT: &str = "objectType_IfcObject";
    pub const TAG_IFC_ELEMENT: &str = "tag_IfcElement";
}

/// EXPRESS local names (joined to the configured EXPRESS base IRI).
pub mod express {
    pub const PREFIX: &str = "express";
    pub const HAS_STRING: &str = "hasString";
}

/// INLE local names (joined to the configured names base IRI).
pub mod nln {
    pub const PREFIX: &str = "nln";

    // Classes
    /// Prefix every target class carries, e.g. `NLName_IfcWall`.
    pub const CLASS_PREFIX: &str = "NLName_";
    pub const INSTANCE_NAME: &str = "NLName_InstanceName";
    pub const VARIANT: &str = "NLName_Variant";

    // Properties
    pub const HAS_STRING: &str = "hasString";
    pub const HAS_NAME_TYPE: &str = "hasNLNameType";
    pub const HAS_SCORE: &str = "hasscore";
    pub const HAS_VARIANT: &str = "hasvariant";

    // Individual prefixes
    pub const INSTANCE_NAME_PREFIX: &str = "nln_InstanceName_";
    pub const VARIANT_PREFIX: &str = "nln_Variant_";

    // Name type individuals
    pub const TYPE_ORIGINAL: &str = "nlntype_original";
    pub const TYPE_SPLIT: &str = "nlntype_split";
    pub const TYPE_COMPRESSION: &str = "nlntype_compression";
    pub const TYPE_LEMMA: &str = "nlntype_lemma";
    pub const TYPE_SYNONYM: &str = "nlntype_synonym";
}
