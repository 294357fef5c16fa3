//! Source-side mapping: normalize an IFC graph's base IRI and project the
//! instances of retained classes into [`SourceRecord`]s.

use std::collections::VecDeque;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::ConverterConfig;
use crate::error::{GraphError, RecordFault};
use crate::graph::writer::save_graph;
use crate::graph::{Graph, RdfFormat, Term};
use crate::model::iri::{local_name, split_iri};
use crate::model::mapping::{ClassMappingEntry, ClassMappingTable};
use crate::model::ontology::{express, ifc, standard};
use crate::model::record::SourceRecord;

/// Records projected from one source graph, plus the faults met on the way.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub records: Vec<SourceRecord>,
    pub faults: Vec<RecordFault>,
}

/// Reads IFC source graphs through a class mapping table.
#[derive(Debug, Clone)]
pub struct SchemaMapper<'a> {
    table: &'a ClassMappingTable,
    ifc_iri: &'a str,
    express_iri: &'a str,
    schema: Option<&'a Graph>,
}

impl<'a> SchemaMapper<'a> {
    pub fn new(table: &'a ClassMappingTable, config: &'a ConverterConfig) -> Self {
        Self {
            table,
            ifc_iri: &config.ifc_iri,
            express_iri: &config.express_iri,
            schema: None,
        }
    }

    /// Also consult an IFC vocabulary graph for class existence and the
    /// subclass hierarchy.
    pub fn with_schema(mut self, schema: Option<&'a Graph>) -> Self {
        self.schema = schema;
        self
    }

    /// Namespace the source graph uses for the IFC vocabulary, found through
    /// the `IfcApplication` class every IFC export instantiates.
    pub fn detect_namespace(graph: &Graph) -> Option<String> {
        let mut fallback = None;
        for iri in graph.search_iri_suffix(ifc::APPLICATION) {
            if local_name(iri) != ifc::APPLICATION {
                continue;
            }
            let (namespace, _) = split_iri(iri);
            if graph.is_class(iri) || !graph.instances_of(iri).is_empty() {
                return Some(namespace.to_string());
            }
            fallback.get_or_insert_with(|| namespace.to_string());
        }
        fallback
    }

    /// Rewrite the source namespace to the configured IFC IRI in memory.
    ///
    /// Returns whether anything changed.
    pub fn normalize_base_iri(&self, graph: &mut Graph) -> bool {
        let Some(namespace) = Self::detect_namespace(graph) else {
            debug!("no IfcApplication class, base IRI left as is");
            return false;
        };
        if namespace == self.ifc_iri {
            return false;
        }
        let changed = graph.rebase_namespace(&namespace, self.ifc_iri);
        info!(from = %namespace, to = %self.ifc_iri, triples = changed, "rebased source namespace");
        changed > 0
    }

    /// Normalize the base IRI and, when it changed, save the source back to
    /// `path` in its own format. Running it twice changes nothing the second
    /// time.
    pub fn update_base_iri(&self, graph: &mut Graph, path: &Path) -> Result<bool, GraphError> {
        if !self.normalize_base_iri(graph) {
            return Ok(false);
        }
        let format = RdfFormat::from_path(path).ok_or_else(|| GraphError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        save_graph(graph, path, format)?;
        Ok(true)
    }

    /// Project every instance of every retained class, subclass instances
    /// included.
    pub fn parse(&self, graph: &Graph) -> ParseOutcome {
        let mut outcome = ParseOutcome::default();

        for entry in self.table.entries() {
            if !entry.keep {
                info!(class = %entry.source_class, "ignoring class");
                continue;
            }

            let class_iri = format!("{}{}", self.ifc_iri, entry.source_class);
            if !self.class_known(graph, &class_iri) {
                let fault = RecordFault::ClassNotFound {
                    class: entry.source_class.clone(),
                };
                warn!(class = %entry.source_class, "{fault}");
                outcome.faults.push(fault);
                continue;
            }

            let instances = self.instances(graph, &class_iri);
            if instances.is_empty() {
                let fault = RecordFault::NoInstances {
                    class: entry.source_class.clone(),
                };
                warn!(class = %entry.source_class, "{fault}");
                outcome.faults.push(fault);
                continue;
            }

            if let Some(map_to) = &entry.map_to {
                info!(class = %entry.source_class, target = %map_to, "class is mapped");
            }
            debug!(class = %entry.source_class, instances = instances.len(), "projecting instances");

            for instance in &instances {
                match self.project(graph, entry, &class_iri, instance) {
                    Ok(record) => outcome.records.push(record),
                    Err(fault) => {
                        warn!(class = %entry.source_class, instance = %node_id(instance), "{fault}");
                        outcome.faults.push(fault);
                    }
                }
            }
        }
        outcome
    }

    fn project(
        &self,
        graph: &Graph,
        entry: &ClassMappingEntry,
        class_iri: &str,
        instance: &Term,
    ) -> Result<SourceRecord, RecordFault> {
        let root_name = self
            .string_value(graph, instance, ifc::NAME_IFC_ROOT)
            .ok_or_else(|| RecordFault::MissingRootName {
                class: entry.source_class.clone(),
                instance: node_id(instance),
            })?;

        Ok(SourceRecord {
            target_class: entry.target_class().to_string(),
            source_type_iri: self.most_specific_type(graph, instance, class_iri),
            root_name,
            object_type: self.string_value(graph, instance, ifc::OBJECT_TYPE_IFC_OBJECT),
            tag: self.string_value(graph, instance, ifc::TAG_IFC_ELEMENT),
            source_class: entry.source_class.clone(),
            instance: node_id(instance),
        })
    }

    /// String value of an IFC attribute: either a literal, or a node carrying
    /// `express:hasString`.
    fn string_value(&self, graph: &Graph, node: &Term, attribute: &str) -> Option<String> {
        let property = format!("{}{}", self.ifc_iri, attribute);
        let has_string = format!("{}{}", self.express_iri, express::HAS_STRING);
        let value = graph.object(node, &property)?;
        match value {
            Term::Literal(lit) => Some(lit.value.clone()),
            node => graph
                .object(node, &has_string)
                .and_then(Term::as_literal)
                .map(str::to_string),
        }
    }

    /// The asserted type no other asserted type specializes; ties go to the
    /// first one asserted.
    fn most_specific_type(&self, graph: &Graph, instance: &Term, class_iri: &str) -> String {
        let types: Vec<&str> = graph
            .types_of(instance)
            .into_iter()
            .filter(|t| *t != standard::OWL_NAMED_INDIVIDUAL && *t != standard::OWL_THING)
            .collect();
        types
            .iter()
            .find(|t| {
                !types
                    .iter()
                    .any(|other| other != *t && self.is_subclass(graph, other, t))
            })
            .map(|t| t.to_string())
            .unwrap_or_else(|| class_iri.to_string())
    }

    /// Instances of a class in graph order: direct ones first, then those of
    /// its subclasses. A subclass instance that also carries a type with a
    /// row of its own in the table is left to that row.
    fn instances(&self, graph: &Graph, class_iri: &str) -> Vec<Term> {
        let mut instances = graph.instances_of(class_iri);
        for sub in self.subclasses(graph, class_iri) {
            for instance in graph.instances_of(&sub) {
                if instances.contains(&instance) || self.has_own_row(graph, &instance, class_iri) {
                    continue;
                }
                instances.push(instance);
            }
        }
        instances
    }

    /// Transitive subclasses of `class_iri` known to the source graph or the
    /// schema, nearest first.
    fn subclasses(&self, graph: &Graph, class_iri: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        let mut queue = VecDeque::from([class_iri.to_string()]);
        while let Some(current) = queue.pop_front() {
            let node = Term::iri(current);
            for g in std::iter::once(graph).chain(self.schema) {
                for sub in g.subjects(standard::RDFS_SUBCLASS_OF, &node) {
                    let Some(iri) = sub.as_iri() else { continue };
                    if iri != class_iri && !found.iter().any(|f| f == iri) {
                        found.push(iri.to_string());
                        queue.push_back(iri.to_string());
                    }
                }
            }
        }
        found
    }

    fn has_own_row(&self, graph: &Graph, instance: &Term, class_iri: &str) -> bool {
        graph.types_of(instance).into_iter().any(|t| {
            t != class_iri
                && t.strip_prefix(self.ifc_iri)
                    .is_some_and(|local| self.table.get(local).is_some())
        })
    }

    fn is_subclass(&self, graph: &Graph, sub: &str, sup: &str) -> bool {
        graph.is_subclass_of(sub, sup) || self.schema.is_some_and(|s| s.is_subclass_of(sub, sup))
    }

    fn class_known(&self, graph: &Graph, class_iri: &str) -> bool {
        graph.contains_iri(class_iri) || self.schema.is_some_and(|s| s.contains_iri(class_iri))
    }
}

/// Identifier of a node for diagnostics.
fn node_id(node: &Term) -> String {
    match node {
        Term::Iri(iri) => iri.clone(),
        other => other.to_string(),
    }
}
