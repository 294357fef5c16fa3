//! Convert IFC building models (as RDF) into INLE natural-language name graphs.
//!
//! Every retained IFC instance gets an instance name in the destination
//! vocabulary plus a set of scored name variants (split, compressed,
//! lemmatized and synonym forms) for natural-language lookup.

pub mod config;
pub mod conversion;
pub mod emitter;
pub mod error;
pub mod graph;
pub mod model;
pub mod nlp;
pub mod similarity;
