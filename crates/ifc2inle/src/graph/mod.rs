//! In-memory RDF graph used for both the IFC source and the INLE destination.
//!
//! The graph keeps triples in insertion order (so enumeration is
//! deterministic for a given file) and indexes them by subject.

pub mod loader;
pub mod writer;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use crate::model::ontology::standard;

/// Serialization formats the converter reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    NTriples,
    Turtle,
}

impl RdfFormat {
    /// Detect the format from a file extension (`.nt`, `.ttl`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "nt" | "ntriples" => Some(RdfFormat::NTriples),
            "ttl" | "turtle" => Some(RdfFormat::Turtle),
            _ => None,
        }
    }

    /// Parse a user-supplied format name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "ntriples" | "nt" => Some(RdfFormat::NTriples),
            "turtle" | "ttl" => Some(RdfFormat::Turtle),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            RdfFormat::NTriples => "nt",
            RdfFormat::Turtle => "ttl",
        }
    }
}

/// A literal value. Plain `xsd:string` literals carry no datatype.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    pub value: String,
    pub datatype: Option<String>,
    pub language: Option<String>,
}

/// A node of the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Iri(String),
    BlankNode(String),
    Literal(Literal),
}

impl Term {
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    /// A plain string literal.
    pub fn string(value: impl Into<String>) -> Self {
        Term::Literal(Literal {
            value: value.into(),
            datatype: None,
            language: None,
        })
    }

    pub fn typed(value: impl Into<String>, datatype: &str) -> Self {
        Term::Literal(Literal {
            value: value.into(),
            datatype: Some(datatype.to_string()),
            language: None,
        })
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Term::Literal(lit) => Some(&lit.value),
            _ => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::BlankNode(id) => write!(f, "_:{id}"),
            Term::Literal(lit) => write!(f, "\"{}\"", lit.value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: Term,
    pub predicate: String,
    pub object: Term,
}

/// Triple store with subject index and namespace prefixes.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    triples: Vec<Triple>,
    seen: HashSet<Triple>,
    by_subject: HashMap<Term, Vec<usize>>,
    prefixes: Vec<(String, String)>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    pub fn prefixes(&self) -> &[(String, String)] {
        &self.prefixes
    }

    /// Register a namespace prefix used when the graph is written as Turtle.
    pub fn add_prefix(&mut self, prefix: &str, iri: &str) {
        match self.prefixes.iter_mut().find(|(p, _)| p == prefix) {
            Some(entry) => entry.1 = iri.to_string(),
            None => self.prefixes.push((prefix.to_string(), iri.to_string())),
        }
    }

    /// Insert a triple. Returns `false` if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        if self.seen.contains(&triple) {
            return false;
        }
        self.by_subject
            .entry(triple.subject.clone())
            .or_default()
            .push(self.triples.len());
        self.seen.insert(triple.clone());
        self.triples.push(triple);
        true
    }

    pub fn add(&mut self, subject: Term, predicate: &str, object: Term) -> bool {
        self.insert(Triple {
            subject,
            predicate: predicate.to_string(),
            object,
        })
    }

    /// Whether `iri` occurs anywhere in the graph (subject, predicate or object).
    pub fn contains_iri(&self, iri: &str) -> bool {
        self.triples.iter().any(|t| {
            t.subject.as_iri() == Some(iri) || t.predicate == iri || t.object.as_iri() == Some(iri)
        })
    }

    /// Whether `node` is the subject of at least one triple.
    pub fn has_subject(&self, node: &Term) -> bool {
        self.by_subject.contains_key(node)
    }

    /// Objects of `subject predicate ?o`, in insertion order.
    pub fn objects<'a>(&'a self, subject: &Term, predicate: &str) -> Vec<&'a Term> {
        self.by_subject
            .get(subject)
            .map(|indices| {
                indices
                    .iter()
                    .map(|&i| &self.triples[i])
                    .filter(|t| t.predicate == predicate)
                    .map(|t| &t.object)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// First object of `subject predicate ?o`.
    pub fn object<'a>(&'a self, subject: &Term, predicate: &str) -> Option<&'a Term> {
        self.objects(subject, predicate).into_iter().next()
    }

    /// Subjects of `?s predicate object`, in insertion order.
    pub fn subjects<'a>(&'a self, predicate: &str, object: &Term) -> Vec<&'a Term> {
        self.triples
            .iter()
            .filter(|t| t.predicate == predicate && &t.object == object)
            .map(|t| &t.subject)
            .collect()
    }

    /// Asserted `rdf:type` IRIs of a node.
    pub fn types_of(&self, subject: &Term) -> Vec<&str> {
        self.objects(subject, standard::RDF_TYPE)
            .into_iter()
            .filter_map(Term::as_iri)
            .collect()
    }

    pub fn has_type(&self, subject: &Term, class_iri: &str) -> bool {
        self.types_of(subject).contains(&class_iri)
    }

    /// Nodes directly typed by `class_iri`, in insertion order.
    pub fn instances_of(&self, class_iri: &str) -> Vec<Term> {
        self.subjects(standard::RDF_TYPE, &Term::iri(class_iri))
            .into_iter()
            .cloned()
            .collect()
    }

    /// Whether `iri` is declared as a class (`owl:Class`, `rdfs:Class`, or has
    /// a `rdfs:subClassOf` assertion).
    pub fn is_class(&self, iri: &str) -> bool {
        let node = Term::iri(iri);
        self.has_type(&node, standard::OWL_CLASS)
            || self.has_type(&node, standard::RDFS_CLASS)
            || !self.objects(&node, standard::RDFS_SUBCLASS_OF).is_empty()
    }

    /// Whether `sub` is `sup` or one of its (transitive) subclasses.
    pub fn is_subclass_of(&self, sub: &str, sup: &str) -> bool {
        let mut stack = vec![sub.to_string()];
        let mut visited = HashSet::new();
        while let Some(current) = stack.pop() {
            if current == sup {
                return true;
            }
            if !visited.insert(current.clone()) {
                continue;
            }
            for parent in self.objects(&Term::iri(current), standard::RDFS_SUBCLASS_OF) {
                if let Some(iri) = parent.as_iri() {
                    stack.push(iri.to_string());
                }
            }
        }
        false
    }

    /// Every IRI node ending with `suffix` (the `*suffix` search of ontology stores).
    pub fn search_iri_suffix(&self, suffix: &str) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut found = Vec::new();
        for t in &self.triples {
            for iri in [t.subject.as_iri(), t.object.as_iri()].into_iter().flatten() {
                if iri.ends_with(suffix) && seen.insert(iri) {
                    found.push(iri);
                }
            }
        }
        found
    }

    /// Type a node as an instance of `class_iri`.
    pub fn create_instance(&mut self, class_iri: &str, iri: &str) -> Term {
        let node = Term::iri(iri);
        self.add(node.clone(), standard::RDF_TYPE, Term::iri(class_iri));
        node
    }

    /// Append a property value (properties are multi-valued).
    pub fn set_property(&mut self, subject: &Term, predicate: &str, value: Term) {
        self.add(subject.clone(), predicate, value);
    }

    /// Rewrite every IRI in namespace `from` into namespace `to`.
    ///
    /// Returns the number of triples that changed.
    pub fn rebase_namespace(&mut self, from: &str, to: &str) -> usize {
        if from == to {
            return 0;
        }
        let rebase = |iri: &str| -> Option<String> {
            iri.strip_prefix(from).map(|local| format!("{to}{local}"))
        };
        let rebase_term = |term: &Term| -> Option<Term> {
            match term {
                Term::Iri(iri) => rebase(iri).map(Term::Iri),
                Term::Literal(lit) => lit.datatype.as_deref().and_then(|dt| rebase(dt)).map(|dt| {
                    Term::Literal(Literal {
                        datatype: Some(dt),
                        ..lit.clone()
                    })
                }),
                Term::BlankNode(_) => None,
            }
        };

        let mut changed = 0;
        let old = std::mem::take(&mut self.triples);
        self.seen.clear();
        self.by_subject.clear();
        for triple in old {
            let subject = rebase_term(&triple.subject);
            let predicate = rebase(&triple.predicate);
            let object = rebase_term(&triple.object);
            if subject.is_some() || predicate.is_some() || object.is_some() {
                changed += 1;
            }
            self.insert(Triple {
                subject: subject.unwrap_or(triple.subject),
                predicate: predicate.unwrap_or(triple.predicate),
                object: object.unwrap_or(triple.object),
            });
        }
        for (_, iri) in self.prefixes.iter_mut() {
            if iri == from {
                *iri = to.to_string();
            }
        }
        changed
    }
}
