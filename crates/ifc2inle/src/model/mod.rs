pub mod iri;
pub mod mapping;
pub mod ontology;
pub mod record;
pub mod variant;
