//! Destination vocabulary: the target classes, structural classes and name
//! types an INLE seed graph defines.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use crate::error::ConfigError;
use crate::graph::{Graph, Term};
use crate::model::iri::IriMinter;
use crate::model::ontology::nln;
use crate::model::variant::VariantCategory;

const CATEGORIES: [VariantCategory; 5] = [
    VariantCategory::Original,
    VariantCategory::Split,
    VariantCategory::Compressed,
    VariantCategory::Lemma,
    VariantCategory::Synonym,
];

/// A destination class instances can be created in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetClass {
    /// Name used by the mapping table, e.g. `IfcBuildingStorey`
    pub name: String,
    /// Full IRI, e.g. `...NLnames#NLName_IfcBuildingStorey`
    pub iri: String,
}

/// Resolved INLE vocabulary for one seed graph.
#[derive(Debug, Clone)]
pub struct TargetVocabulary {
    minter: IriMinter,
    classes: BTreeMap<String, TargetClass>,
    instance_name_class: String,
    variant_class: String,
    name_types: HashMap<VariantCategory, String>,
}

impl TargetVocabulary {
    /// Resolve the vocabulary defined by `seed` in namespace `nln_iri`.
    ///
    /// Fails if the seed does not define the instance-name or variant classes.
    pub fn from_seed(seed: &Graph, nln_iri: &str) -> Result<Self, ConfigError> {
        let minter = IriMinter::new(nln_iri);

        let instance_name_class = minter.term(nln::INSTANCE_NAME);
        let variant_class = minter.term(nln::VARIANT);
        for required in [&instance_name_class, &variant_class] {
            if !seed.is_class(required) {
                return Err(ConfigError::MissingVocabularyClass(required.clone()));
            }
        }

        let class_prefix = minter.term(nln::CLASS_PREFIX);
        let mut classes = BTreeMap::new();
        let mut visited = HashSet::new();
        for triple in seed.triples() {
            let Some(iri) = triple.subject.as_iri() else {
                continue;
            };
            if !visited.insert(iri) || iri == instance_name_class || iri == variant_class {
                continue;
            }
            if let Some(name) = iri.strip_prefix(&class_prefix) {
                if !name.is_empty() && seed.is_class(iri) {
                    classes.insert(
                        name.to_string(),
                        TargetClass {
                            name: name.to_string(),
                            iri: iri.to_string(),
                        },
                    );
                }
            }
        }
        debug!(classes = classes.len(), "destination vocabulary resolved");

        let name_types = CATEGORIES
            .iter()
            .map(|category| {
                let local = category.name_type();
                let iri = seed
                    .search_iri_suffix(local)
                    .first()
                    .map(|iri| iri.to_string())
                    .unwrap_or_else(|| minter.term(local));
                (*category, iri)
            })
            .collect();

        Ok(Self {
            minter,
            classes,
            instance_name_class,
            variant_class,
            name_types,
        })
    }

    pub fn minter(&self) -> &IriMinter {
        &self.minter
    }

    /// Target class for a mapping-table class name.
    pub fn resolve(&self, name: &str) -> Option<&TargetClass> {
        self.classes.get(name)
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn instance_name_class(&self) -> &str {
        &self.instance_name_class
    }

    pub fn variant_class(&self) -> &str {
        &self.variant_class
    }

    /// IRI of the name-type individual for a variant category.
    pub fn name_type(&self, category: VariantCategory) -> &str {
        // every category is filled in by from_seed
        self.name_types
            .get(&category)
            .map(String::as_str)
            .unwrap_or(nln::TYPE_ORIGINAL)
    }

    pub fn property(&self, local: &str) -> String {
        self.minter.term(local)
    }

    /// Display strings of the class-level individuals of `class`.
    ///
    /// Instance names created by a conversion are skipped, and strings are
    /// deduplicated case-insensitively in graph order.
    pub fn synonym_candidates(&self, graph: &Graph, class: &TargetClass) -> Vec<String> {
        let has_string = self.property(nln::HAS_STRING);
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for instance in graph.instances_of(&class.iri) {
            if graph.has_type(&instance, &self.instance_name_class) {
                continue;
            }
            let Some(text) = graph.object(&instance, &has_string).and_then(Term::as_literal) else {
                continue;
            };
            if !text.is_empty() && seen.insert(text.to_lowercase()) {
                candidates.push(text.to_string());
            }
        }
        candidates
    }
}
