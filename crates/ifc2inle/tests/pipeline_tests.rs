use std::fs;
use std::path::{Path, PathBuf};

use ifc2inle::config::ConverterConfig;
use ifc2inle::conversion::ConversionPipeline;
use ifc2inle::error::{ConfigError, ConversionError, RecordFault, Stage};
use ifc2inle::graph::loader::load_graph;
use ifc2inle::graph::{Graph, RdfFormat, Term};
use ifc2inle::model::ontology::standard;

const NLN: &str = "http://www.semanticweb.org/ontologies/2023/6/NLnames#";
const OLD_IFC: &str = "http://ifcowl.openbimstandards.org/IFC2X3_TC1#";

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Copy the fixtures into a scratch directory.
fn workspace() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in ["INLE.ttl", "ifcTargetList.csv", "duplex.ttl", "converter.toml"] {
        fs::copy(fixture(name), dir.path().join(name)).unwrap();
    }
    dir
}

fn config_in(dir: &Path) -> ConverterConfig {
    ConverterConfig {
        inle_file: dir.join("INLE.ttl"),
        mapping_file: dir.join("ifcTargetList.csv"),
        ..ConverterConfig::default()
    }
}

fn nln(local: &str) -> String {
    format!("{NLN}{local}")
}

fn node(local: &str) -> Term {
    Term::iri(nln(local))
}

fn literal_of(graph: &Graph, subject: &Term, predicate: &str) -> Option<String> {
    graph
        .object(subject, &nln(predicate))
        .and_then(Term::as_literal)
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Single file
// ---------------------------------------------------------------------------

#[test]
fn converts_fixture_model() {
    let dir = workspace();
    let pipeline = ConversionPipeline::new(config_in(dir.path())).unwrap();
    let report = pipeline.convert_file(&dir.path().join("duplex.ttl")).unwrap();

    assert_eq!(report.source, dir.path().join("duplex_ifc.ttl"));
    assert_eq!(report.output, dir.path().join("duplex_inle.ttl"));
    assert!(report.normalized);
    assert_eq!(report.records, 3);
    assert_eq!(report.instances, 3);
    assert_eq!(report.variants, 6);
    assert_eq!(report.faults.len(), 3);
    assert!(report.output.is_file());
}

#[test]
fn output_holds_instance_names_and_variants() {
    let dir = workspace();
    let pipeline = ConversionPipeline::new(config_in(dir.path())).unwrap();
    let report = pipeline.convert_file(&dir.path().join("duplex.ttl")).unwrap();
    let graph = load_graph(&report.output).unwrap();

    let storey = node("nln_InstanceName_Level1");
    assert!(graph.has_type(&storey, &nln("NLName_IfcBuildingStorey")));
    assert!(graph.has_type(&storey, &nln("NLName_InstanceName")));
    assert!(graph.has_type(&storey, standard::OWL_NAMED_INDIVIDUAL));
    assert_eq!(literal_of(&graph, &storey, "hasString").as_deref(), Some("Level 1"));

    let variants: Vec<&Term> = graph.objects(&storey, &nln("hasvariant"));
    assert_eq!(
        variants,
        vec![&node("nln_Variant_Level1_0"), &node("nln_Variant_Level1_1")]
    );

    let original = node("nln_Variant_Level1_0");
    assert!(graph.has_type(&original, &nln("NLName_Variant")));
    assert_eq!(literal_of(&graph, &original, "hasString").as_deref(), Some("level 1"));
    assert_eq!(
        graph.object(&original, &nln("hasNLNameType")),
        Some(&node("nlntype_original"))
    );
    assert_eq!(
        graph.object(&original, &nln("hasscore")),
        Some(&Term::typed("1.00", standard::XSD_DECIMAL))
    );

    let synonym = node("nln_Variant_Level1_1");
    assert_eq!(literal_of(&graph, &synonym, "hasString").as_deref(), Some("Floor 1"));
    assert_eq!(
        graph.object(&synonym, &nln("hasNLNameType")),
        Some(&node("nlntype_synonym"))
    );
    assert_eq!(
        graph.object(&synonym, &nln("hasscore")),
        Some(&Term::typed("0.62", standard::XSD_DECIMAL))
    );
}

#[test]
fn mapped_class_and_duplicate_names() {
    let dir = workspace();
    let pipeline = ConversionPipeline::new(config_in(dir.path())).unwrap();
    let report = pipeline.convert_file(&dir.path().join("duplex.ttl")).unwrap();
    let graph = load_graph(&report.output).unwrap();

    let first = node("nln_InstanceName_Wall-Ext_01");
    let second = node("nln_InstanceName_Wall-Ext_01_2");
    for wall in [&first, &second] {
        assert!(graph.has_type(wall, &nln("NLName_IfcWall")));
        assert_eq!(literal_of(&graph, wall, "hasString").as_deref(), Some("Wall-Ext_01"));
    }

    let split = node("nln_Variant_Wall-Ext_01_1");
    assert_eq!(literal_of(&graph, &split, "hasString").as_deref(), Some("wall ext 01"));
    assert_eq!(
        graph.object(&split, &nln("hasNLNameType")),
        Some(&node("nlntype_split"))
    );
    assert_eq!(graph.objects(&second, &nln("hasvariant")).len(), 2);
}

#[test]
fn seed_content_is_preserved() {
    let dir = workspace();
    let pipeline = ConversionPipeline::new(config_in(dir.path())).unwrap();
    let report = pipeline.convert_file(&dir.path().join("duplex.ttl")).unwrap();

    let seed = load_graph(&dir.path().join("INLE.ttl")).unwrap();
    let output = load_graph(&report.output).unwrap();
    for triple in seed.triples() {
        assert!(
            output.triples().contains(triple),
            "seed triple missing from output: {triple:?}"
        );
    }
}

#[test]
fn faults_are_reported_in_table_order() {
    let dir = workspace();
    let pipeline = ConversionPipeline::new(config_in(dir.path())).unwrap();
    let report = pipeline.convert_file(&dir.path().join("duplex.ttl")).unwrap();
    assert_eq!(
        report.faults,
        vec![
            RecordFault::MissingRootName {
                class: "IfcWall".to_string(),
                instance: "http://linkedbuildingdata.net/ifc/resources/duplex/IfcWall_40"
                    .to_string(),
            },
            RecordFault::NoInstances {
                class: "IfcSlab".to_string()
            },
            RecordFault::ClassNotFound {
                class: "IfcWindow".to_string()
            },
        ]
    );
}

#[test]
fn housekeeping_keeps_original_untouched() {
    let dir = workspace();
    let original = fs::read_to_string(dir.path().join("duplex.ttl")).unwrap();
    let pipeline = ConversionPipeline::new(config_in(dir.path())).unwrap();
    pipeline.convert_file(&dir.path().join("duplex.ttl")).unwrap();

    assert_eq!(fs::read_to_string(dir.path().join("duplex.ttl")).unwrap(), original);
    let copy = fs::read_to_string(dir.path().join("duplex_ifc.ttl")).unwrap();
    assert!(!copy.contains(OLD_IFC));
}

#[test]
fn suffixed_source_is_used_in_place() {
    let dir = workspace();
    fs::rename(dir.path().join("duplex.ttl"), dir.path().join("duplex_ifc.ttl")).unwrap();
    let pipeline = ConversionPipeline::new(config_in(dir.path())).unwrap();
    let report = pipeline
        .convert_file(&dir.path().join("duplex_ifc.ttl"))
        .unwrap();
    assert_eq!(report.source, dir.path().join("duplex_ifc.ttl"));
    assert_eq!(report.output, dir.path().join("duplex_inle.ttl"));
    assert!(!dir.path().join("duplex_ifc_ifc.ttl").exists());
}

#[test]
fn conversion_is_repeatable() {
    let dir = workspace();
    let pipeline = ConversionPipeline::new(config_in(dir.path())).unwrap();
    let input = dir.path().join("duplex.ttl");
    let first = pipeline.convert_file(&input).unwrap();
    let first_text = fs::read_to_string(&first.output).unwrap();
    let second = pipeline.convert_file(&input).unwrap();
    assert_eq!(fs::read_to_string(&second.output).unwrap(), first_text);
    assert_eq!(first.variants, second.variants);
}

#[test]
fn ntriples_output_format() {
    let dir = workspace();
    let pipeline = ConversionPipeline::new(config_in(dir.path()))
        .unwrap()
        .with_output_format(RdfFormat::NTriples);
    let report = pipeline.convert_file(&dir.path().join("duplex.ttl")).unwrap();
    assert_eq!(report.output, dir.path().join("duplex_inle.nt"));
    let graph = load_graph(&report.output).unwrap();
    assert!(graph.has_subject(&node("nln_InstanceName_Level1")));
}

#[test]
fn unknown_target_class_is_a_record_fault() {
    let dir = workspace();
    fs::write(
        dir.path().join("ifcTargetList.csv"),
        "Class;Keep;MapTo;ExtraVariant\nIfcBuildingStorey;1;IfcSpace;\n",
    )
    .unwrap();
    let pipeline = ConversionPipeline::new(config_in(dir.path())).unwrap();
    let report = pipeline.convert_file(&dir.path().join("duplex.ttl")).unwrap();

    assert_eq!(report.records, 1);
    assert_eq!(report.instances, 0);
    assert!(matches!(
        report.faults.as_slice(),
        [RecordFault::UnknownTargetClass { class, .. }] if class == "IfcSpace"
    ));
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn missing_mapping_table_fails_at_load() {
    let dir = workspace();
    fs::remove_file(dir.path().join("ifcTargetList.csv")).unwrap();
    let err = ConversionPipeline::new(config_in(dir.path())).unwrap_err();
    assert_eq!(err.stage(), Stage::MappingTableLoad);
}

#[test]
fn seed_without_structural_classes_is_rejected() {
    let dir = workspace();
    fs::write(
        dir.path().join("INLE.ttl"),
        format!("<{NLN}NLName_InstanceName> a <http://www.w3.org/2002/07/owl#Class> .\n"),
    )
    .unwrap();
    let err = ConversionPipeline::new(config_in(dir.path())).unwrap_err();
    assert_eq!(err.stage(), Stage::DestinationLoad);
    assert!(matches!(
        err,
        ConversionError::Config {
            source: ConfigError::MissingVocabularyClass(_),
            ..
        }
    ));
}

#[test]
fn batch_continues_past_failed_files() {
    let dir = workspace();
    fs::write(dir.path().join("broken.ttl"), "this is not turtle").unwrap();
    fs::write(dir.path().join("model.rdf"), "<rdf:RDF/>").unwrap();
    let pipeline = ConversionPipeline::new(config_in(dir.path())).unwrap();

    let batch = pipeline.convert_batch(&[
        dir.path().join("missing.ttl"),
        dir.path().join("broken.ttl"),
        dir.path().join("model.rdf"),
        dir.path().join("duplex.ttl"),
    ]);

    assert!(!batch.is_success());
    assert_eq!(batch.converted.len(), 1);
    let stages: Vec<Stage> = batch.failed.iter().map(|f| f.stage).collect();
    assert_eq!(
        stages,
        vec![Stage::Housekeeping, Stage::SourceParse, Stage::SourceParse]
    );
    assert!(!dir.path().join("broken_inle.ttl").exists());
    assert_eq!(batch.total_variants(), 6);
}

#[test]
fn batch_report_serializes() {
    let dir = workspace();
    let pipeline = ConversionPipeline::new(config_in(dir.path())).unwrap();
    let batch = pipeline.convert_batch(&[dir.path().join("duplex.ttl")]);
    let json = serde_json::to_value(&batch).unwrap();
    assert_eq!(json["converted"][0]["records"], 3);
    assert_eq!(json["converted"][0]["faults"][0]["kind"], "missing_root_name");
    assert!(json["failed"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn config_file_paths_resolve_against_its_directory() {
    let dir = workspace();
    let config = ConverterConfig::from_file(dir.path().join("converter.toml")).unwrap();
    assert_eq!(config.inle_file, dir.path().join("INLE.ttl"));
    assert_eq!(config.mapping_file, dir.path().join("ifcTargetList.csv"));

    let pipeline = ConversionPipeline::new(config).unwrap();
    let report = pipeline.convert_file(&dir.path().join("duplex.ttl")).unwrap();
    assert_eq!(report.instances, 3);
}
