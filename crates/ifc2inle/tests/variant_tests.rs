use ifc2inle::conversion::variants::SEPARATORS;
use ifc2inle::conversion::VariantGenerator;
use ifc2inle::model::variant::{NameVariant, VariantCategory};
use ifc2inle::nlp::{LexicalAnalyzer, RuleBasedAnalyzer};
use ifc2inle::similarity::JaroWinkler;

fn generator() -> VariantGenerator {
    VariantGenerator::new(
        Box::new(RuleBasedAnalyzer::new()),
        Box::new(JaroWinkler::default()),
    )
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn of_category(variants: &[NameVariant], category: VariantCategory) -> Vec<&NameVariant> {
    variants.iter().filter(|v| v.category == category).collect()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn separators_produce_split_variant() {
    let variants = generator().generate("Wall-Ext_01", None, &[]);
    assert_eq!(
        variants,
        vec![
            NameVariant::new("wall-ext_01", VariantCategory::Original, 1.0),
            NameVariant::new("wall ext 01", VariantCategory::Split, 0.93),
        ]
    );
}

#[test]
fn synonym_substitutes_class_level_names() {
    let variants = generator().generate("Level 1", Some("synonym"), &strings(&["Level", "Floor"]));
    assert_eq!(
        variants,
        vec![
            NameVariant::new("level 1", VariantCategory::Original, 1.0),
            NameVariant::new("Floor 1", VariantCategory::Synonym, 0.62),
        ]
    );
}

#[test]
fn noise_words_are_compressed_away() {
    let variants = generator().generate("Stairs-01 of the building", None, &[]);
    let texts: Vec<(&str, VariantCategory)> =
        variants.iter().map(|v| (v.text.as_str(), v.category)).collect();
    assert_eq!(
        texts,
        vec![
            ("stairs-01 of the building", VariantCategory::Original),
            ("stairs 01 of the building", VariantCategory::Split),
            ("stairs 01 of building", VariantCategory::Compressed),
            ("stair 01 of the building", VariantCategory::Lemma),
        ]
    );
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

const NAMES: &[&str] = &[
    "Wall-Ext_01",
    "Level 1",
    "Basic Wall:Exterior - 300mm",
    "There is a door and the window",
    "M_Single-Flush:0915 x 2134mm",
    "Stairs/Landings",
    "",
];

#[test]
fn exactly_one_original_with_full_score() {
    let gen = generator();
    for name in NAMES {
        let variants = gen.generate(name, None, &[]);
        let originals = of_category(&variants, VariantCategory::Original);
        assert_eq!(originals.len(), 1, "{name}");
        assert_eq!(originals[0].text, name.to_lowercase());
        assert_eq!(originals[0].score, 1.0);
        assert_eq!(variants[0].category, VariantCategory::Original);
    }
}

#[test]
fn normalized_name_has_no_split_variant() {
    let variants = generator().generate("wall ext 01", None, &[]);
    assert!(of_category(&variants, VariantCategory::Split).is_empty());
}

#[test]
fn derived_texts_are_unique() {
    let gen = generator();
    for name in NAMES {
        let variants = gen.generate(name, None, &[]);
        let mut texts: Vec<&str> = variants.iter().map(|v| v.text.as_str()).collect();
        let before = texts.len();
        texts.sort_unstable();
        texts.dedup();
        assert_eq!(texts.len(), before, "{name}");
    }
}

#[test]
fn compressed_tokens_come_from_split_tokens() {
    let gen = generator();
    let analyzer = RuleBasedAnalyzer::new();
    for name in NAMES {
        let normalized: String = name
            .to_lowercase()
            .chars()
            .map(|c| if SEPARATORS.contains(&c) { ' ' } else { c })
            .collect();
        let split_tokens: Vec<String> =
            analyzer.analyze(&normalized).into_iter().map(|t| t.text).collect();

        let variants = gen.generate(name, None, &[]);
        for compressed in of_category(&variants, VariantCategory::Compressed) {
            for token in compressed.text.split(' ') {
                assert!(
                    split_tokens.iter().any(|t| t == token),
                    "{token} of {name} not in split tokens {split_tokens:?}"
                );
            }
        }
    }
}

#[test]
fn scores_have_two_decimals_and_stay_in_range() {
    let gen = generator();
    for name in NAMES {
        for variant in gen.generate(name, Some("synonym"), &strings(&["Wall", "Level"])) {
            assert!((0.0..=1.0).contains(&variant.score));
            let scaled = variant.score * 100.0;
            assert!((scaled - scaled.round()).abs() < 1e-9, "{}", variant.score);
        }
    }
}

#[test]
fn generation_is_deterministic() {
    let gen = generator();
    for name in NAMES {
        assert_eq!(gen.generate(name, None, &[]), gen.generate(name, None, &[]));
    }
}

// ---------------------------------------------------------------------------
// Synonym stage
// ---------------------------------------------------------------------------

#[test]
fn no_synonyms_without_extra_variant_kind() {
    let candidates = strings(&["Level", "Floor"]);
    let gen = generator();
    assert!(of_category(&gen.generate("Level 1", None, &candidates), VariantCategory::Synonym).is_empty());
    assert!(of_category(&gen.generate("Level 1", Some("  "), &candidates), VariantCategory::Synonym).is_empty());
}

#[test]
fn ambiguous_template_yields_no_synonyms() {
    let variants = generator().generate(
        "Level Floor",
        Some("synonym"),
        &strings(&["Level", "Floor", "Storey"]),
    );
    assert!(of_category(&variants, VariantCategory::Synonym).is_empty());
}

#[test]
fn unmatched_name_yields_no_synonyms() {
    let variants = generator().generate("Roof", Some("synonym"), &strings(&["Level", "Floor"]));
    assert!(of_category(&variants, VariantCategory::Synonym).is_empty());
}

#[test]
fn every_other_candidate_becomes_a_synonym() {
    let variants = generator().generate(
        "Level 2",
        Some("synonym"),
        &strings(&["Floor", "Level", "Storey"]),
    );
    let synonyms: Vec<&str> = of_category(&variants, VariantCategory::Synonym)
        .iter()
        .map(|v| v.text.as_str())
        .collect();
    assert_eq!(synonyms, vec!["Floor 2", "Storey 2"]);
}
