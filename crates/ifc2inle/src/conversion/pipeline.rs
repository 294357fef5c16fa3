//! Conversion pipeline: one IFC source file in, one INLE file out.
//!
//! A file conversion runs the stages housekeeping, source parse, source
//! normalize, record projection, variant generation and destination persist.
//! The mapping table, the destination seed and the optional IFC schema are
//! loaded once, when the pipeline is built. Each conversion starts from a
//! fresh copy of the seed.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, error, info, info_span, trace, warn};

use super::schema_mapper::SchemaMapper;
use super::target::{TargetClass, TargetVocabulary};
use super::variants::VariantGenerator;
use crate::config::ConverterConfig;
use crate::error::{ConversionError, GraphError, RecordFault, Stage};
use crate::graph::loader::load_graph;
use crate::graph::writer::save_graph;
use crate::graph::{Graph, RdfFormat, Term};
use crate::model::iri;
use crate::model::mapping::ClassMappingTable;
use crate::model::ontology::{nln, standard};
use crate::model::record::SourceRecord;
use crate::model::variant::NameVariant;
use crate::nlp;
use crate::similarity::JaroWinkler;

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Outcome of one successful file conversion.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionReport {
    /// File the caller asked to convert
    pub input: PathBuf,
    /// Working copy the source graph was read from
    pub source: PathBuf,
    /// Written INLE file
    pub output: PathBuf,
    /// Whether the source namespace was rewritten
    pub normalized: bool,
    /// Records projected from the source
    pub records: usize,
    /// Instance names created
    pub instances: usize,
    /// Variants created
    pub variants: usize,
    /// Triples in the written graph
    pub triples: u64,
    /// Skipped classes and records
    pub faults: Vec<RecordFault>,
    pub elapsed_ms: u128,
}

/// A file whose conversion stopped at some stage.
#[derive(Debug, Clone, Serialize)]
pub struct FailedConversion {
    pub input: PathBuf,
    pub stage: Stage,
    pub error: String,
}

/// Outcome of a batch of conversions.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub converted: Vec<ConversionReport>,
    pub failed: Vec<FailedConversion>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total_records(&self) -> usize {
        self.converted.iter().map(|r| r.records).sum()
    }

    pub fn total_variants(&self) -> usize {
        self.converted.iter().map(|r| r.variants).sum()
    }
}

// ---------------------------------------------------------------------------
// ConversionPipeline
// ---------------------------------------------------------------------------

/// Converts IFC source files into INLE name graphs.
#[derive(Debug)]
pub struct ConversionPipeline {
    config: ConverterConfig,
    table: ClassMappingTable,
    seed: Graph,
    schema: Option<Graph>,
    vocabulary: TargetVocabulary,
    generator: VariantGenerator,
    output_format: RdfFormat,
}

impl ConversionPipeline {
    /// Load the mapping table, the destination seed and the optional IFC
    /// schema named by `config`.
    pub fn new(config: ConverterConfig) -> Result<Self, ConversionError> {
        let table = timed(Stage::MappingTableLoad, || {
            ClassMappingTable::from_file(&config.mapping_file)
        })
        .map_err(|source| ConversionError::Config {
            stage: Stage::MappingTableLoad,
            source,
        })?;
        info!(rows = table.len(), path = %config.mapping_file.display(), "mapping table loaded");

        let seed = timed(Stage::DestinationLoad, || load_graph(&config.inle_file)).map_err(
            |source| ConversionError::Graph {
                stage: Stage::DestinationLoad,
                path: config.inle_file.clone(),
                source,
            },
        )?;

        let schema = match &config.ifc_file {
            Some(path) => Some(load_graph(path).map_err(|source| ConversionError::Graph {
                stage: Stage::SourceParse,
                path: path.clone(),
                source,
            })?),
            None => None,
        };

        let analyzer =
            nlp::analyzer_for_model(&config.nlp_model).map_err(|source| ConversionError::Config {
                stage: Stage::VariantGeneration,
                source,
            })?;
        let generator = VariantGenerator::new(analyzer, Box::new(JaroWinkler::default()));

        Self::from_parts(config, table, seed, schema, generator)
    }

    /// Assemble a pipeline from already loaded parts.
    pub fn from_parts(
        config: ConverterConfig,
        table: ClassMappingTable,
        seed: Graph,
        schema: Option<Graph>,
        generator: VariantGenerator,
    ) -> Result<Self, ConversionError> {
        let vocabulary = TargetVocabulary::from_seed(&seed, &config.nln_iri).map_err(|source| {
            ConversionError::Config {
                stage: Stage::DestinationLoad,
                source,
            }
        })?;
        debug!(
            classes = ?vocabulary.class_names().collect::<Vec<_>>(),
            "destination classes"
        );
        for entry in table.entries().iter().filter(|e| e.keep) {
            if vocabulary.resolve(entry.target_class()).is_none() {
                warn!(
                    class = %entry.source_class,
                    target = %entry.target_class(),
                    "target class is not defined in the destination vocabulary"
                );
            }
        }
        Ok(Self {
            config,
            table,
            seed,
            schema,
            vocabulary,
            generator,
            output_format: RdfFormat::Turtle,
        })
    }

    /// Serialization format of written INLE files.
    pub fn with_output_format(mut self, format: RdfFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Convert every input, continuing past failed files.
    pub fn convert_batch<P: AsRef<Path>>(&self, inputs: &[P]) -> BatchReport {
        let mut batch = BatchReport::default();
        for input in inputs {
            let input = input.as_ref();
            match self.convert_file(input) {
                Ok(report) => batch.converted.push(report),
                Err(e) => {
                    error!(input = %input.display(), stage = %e.stage(), "conversion failed: {e}");
                    batch.failed.push(FailedConversion {
                        input: input.to_path_buf(),
                        stage: e.stage(),
                        error: e.to_string(),
                    });
                }
            }
        }
        batch
    }

    /// Convert one IFC file into its INLE counterpart.
    pub fn convert_file(&self, input: &Path) -> Result<ConversionReport, ConversionError> {
        let span = info_span!("convert", source = %input.display());
        let _guard = span.enter();
        let start = Instant::now();

        let source_path = timed(Stage::Housekeeping, || self.prepare_source(input))?;
        let output = self.target_path(&source_path);

        let mut source = timed(Stage::SourceParse, || load_graph(&source_path)).map_err(
            |source| ConversionError::Graph {
                stage: Stage::SourceParse,
                path: source_path.clone(),
                source,
            },
        )?;
        debug!(triples = source.len(), "source graph loaded");

        let mapper = SchemaMapper::new(&self.table, &self.config).with_schema(self.schema.as_ref());
        let normalized = timed(Stage::SourceNormalize, || {
            mapper.update_base_iri(&mut source, &source_path)
        })
        .map_err(|e| ConversionError::Graph {
            stage: Stage::SourceNormalize,
            path: source_path.clone(),
            source: e,
        })?;

        let outcome = mapper.parse(&source);
        let mut report = ConversionReport {
            input: input.to_path_buf(),
            source: source_path,
            output,
            normalized,
            records: outcome.records.len(),
            faults: outcome.faults,
            ..Default::default()
        };

        let destination = timed(Stage::VariantGeneration, || {
            self.populate(&outcome.records, &mut report)
        });

        report.triples = timed(Stage::DestinationPersist, || {
            save_graph(&destination, &report.output, self.output_format)
        })
        .map_err(|source| ConversionError::Graph {
            stage: Stage::DestinationPersist,
            path: report.output.clone(),
            source,
        })?;

        report.elapsed_ms = start.elapsed().as_millis();
        info!(
            output = %report.output.display(),
            instances = report.instances,
            variants = report.variants,
            faults = report.faults.len(),
            elapsed_ms = report.elapsed_ms,
            "conversion finished"
        );
        Ok(report)
    }

    /// Working copy of `input` to read the source from.
    ///
    /// A file already named `<base><source_suffix>.<ext>` is used as is;
    /// anything else is copied next to itself under that name.
    pub fn prepare_source(&self, input: &Path) -> Result<PathBuf, ConversionError> {
        let housekeeping = |source: std::io::Error| ConversionError::Graph {
            stage: Stage::Housekeeping,
            path: input.to_path_buf(),
            source: GraphError::Io {
                path: input.to_path_buf(),
                source,
            },
        };

        let stem = file_stem(input);
        if stem.ends_with(&self.config.source_suffix) {
            if !input.is_file() {
                return Err(housekeeping(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "source file does not exist",
                )));
            }
            return Ok(input.to_path_buf());
        }

        let mut name = format!("{stem}{}", self.config.source_suffix);
        if let Some(ext) = input.extension().and_then(|e| e.to_str()) {
            name = format!("{name}.{ext}");
        }
        let copy = input.with_file_name(name);
        fs::copy(input, &copy).map_err(housekeeping)?;
        info!(from = %input.display(), to = %copy.display(), "copied source");
        Ok(copy)
    }

    /// Output path for a source working copy: the source suffix is swapped
    /// for the target suffix and the extension follows the output format.
    pub fn target_path(&self, source: &Path) -> PathBuf {
        let stem = file_stem(source);
        let base = stem.strip_suffix(&self.config.source_suffix).unwrap_or(stem);
        source.with_file_name(format!(
            "{base}{}.{}",
            self.config.target_suffix,
            self.output_format.extension()
        ))
    }

    /// Build the destination graph for `records` on a fresh copy of the seed.
    pub fn populate(&self, records: &[SourceRecord], report: &mut ConversionReport) -> Graph {
        let mut graph = self.seed.clone();
        graph.add_prefix(nln::PREFIX, &self.config.nln_iri);
        graph.add_prefix("rdf", standard::RDF);
        graph.add_prefix("owl", standard::OWL);
        graph.add_prefix("xsd", standard::XSD);

        let mut candidates: HashMap<&str, Vec<String>> = HashMap::new();
        for record in records {
            let Some(class) = self.vocabulary.resolve(&record.target_class) else {
                let fault = RecordFault::UnknownTargetClass {
                    class: record.target_class.clone(),
                    instance: record.instance.clone(),
                };
                warn!(class = %record.target_class, instance = %record.instance, "{fault}");
                report.faults.push(fault);
                continue;
            };

            let extra_variant = self
                .table
                .get(&record.source_class)
                .and_then(|entry| self.table.extra_variant_for(&record.target_class, entry));
            let synonyms: &[String] = match extra_variant {
                Some(_) => candidates
                    .entry(class.name.as_str())
                    .or_insert_with(|| self.vocabulary.synonym_candidates(&self.seed, class))
                    .as_slice(),
                None => &[],
            };

            let variants = self
                .generator
                .generate(&record.root_name, extra_variant, synonyms);
            let basename = self.unique_basename(&graph, &record.root_name);
            self.attach(&mut graph, class, record, &basename, &variants);

            debug!(
                instance = %record.instance,
                name = %record.root_name,
                variants = variants.len(),
                "instance name created"
            );
            report.instances += 1;
            report.variants += variants.len();
        }
        graph
    }

    /// Write the instance name and its variants into `graph`.
    fn attach(
        &self,
        graph: &mut Graph,
        class: &TargetClass,
        record: &SourceRecord,
        basename: &str,
        variants: &[NameVariant],
    ) {
        let minter = self.vocabulary.minter();
        let has_string = self.vocabulary.property(nln::HAS_STRING);
        let has_name_type = self.vocabulary.property(nln::HAS_NAME_TYPE);
        let has_score = self.vocabulary.property(nln::HAS_SCORE);
        let has_variant = self.vocabulary.property(nln::HAS_VARIANT);

        let instance = graph.create_instance(&class.iri, &minter.instance_name_iri(basename));
        graph.add(
            instance.clone(),
            standard::RDF_TYPE,
            Term::iri(self.vocabulary.instance_name_class()),
        );
        graph.add(
            instance.clone(),
            standard::RDF_TYPE,
            Term::iri(standard::OWL_NAMED_INDIVIDUAL),
        );
        graph.set_property(&instance, &has_string, Term::string(record.root_name.as_str()));

        for (index, variant) in variants.iter().enumerate() {
            trace!(text = %variant.text, category = %variant.category, score = variant.score, "variant");
            let node = graph.create_instance(
                self.vocabulary.variant_class(),
                &minter.variant_iri(basename, index),
            );
            graph.add(
                node.clone(),
                standard::RDF_TYPE,
                Term::iri(standard::OWL_NAMED_INDIVIDUAL),
            );
            graph.set_property(&node, &has_string, Term::string(variant.text.as_str()));
            graph.set_property(
                &node,
                &has_name_type,
                Term::iri(self.vocabulary.name_type(variant.category)),
            );
            graph.set_property(
                &node,
                &has_score,
                Term::typed(format!("{:.2}", variant.score), standard::XSD_DECIMAL),
            );
            graph.set_property(&instance, &has_variant, node);
        }
    }

    /// Basename for a root name, suffixed `_2`, `_3`, ... when an instance
    /// name with that basename already exists.
    fn unique_basename(&self, graph: &Graph, root_name: &str) -> String {
        let minter = self.vocabulary.minter();
        let base = iri::basename(root_name);
        let taken = |candidate: &str| graph.has_subject(&Term::iri(minter.instance_name_iri(candidate)));

        let mut candidate = base.clone();
        let mut n = 2;
        while taken(&candidate) {
            candidate = format!("{base}_{n}");
            n += 1;
        }
        if candidate != base {
            debug!(name = %root_name, basename = %candidate, "disambiguated duplicate name");
        }
        candidate
    }
}

fn file_stem(path: &Path) -> &str {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or_default()
}

/// Run one stage and log how long it took.
fn timed<T>(stage: Stage, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let value = f();
    info!(%stage, elapsed = ?start.elapsed(), "stage done");
    value
}
