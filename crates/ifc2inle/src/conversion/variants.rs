//! Name variant generation.
//!
//! A raw display name is expanded, in order, into its ORIGINAL form, a SPLIT
//! form (separators replaced and tokenized), a COMPRESSED form (noise words
//! dropped), a LEMMA form and, when the record's class asks for it, SYNONYM
//! forms built from the class-level names of the destination vocabulary.
//! Every variant is scored against the original with the configured
//! [`SimilarityScorer`], rounded to two decimals.

use std::fmt;

use crate::model::variant::{NameVariant, VariantCategory};
use crate::nlp::{self, LexicalAnalyzer};
use crate::similarity::{round_score, SimilarityScorer};

/// Characters replaced by a space before tokenization.
pub const SEPARATORS: [char; 5] = ['-', '_', ':', '/', ' '];

// ---------------------------------------------------------------------------
// NameTemplate
// ---------------------------------------------------------------------------

/// A name with one synonym-candidate occurrence cut out, e.g. `%s 1` for
/// `level 1` and the candidate `Level`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTemplate {
    prefix: String,
    suffix: String,
}

impl NameTemplate {
    /// Build a template from `name` (already lowercased) when exactly one
    /// candidate occurs in it, case-insensitively.
    ///
    /// Returns the template and the index of the matched candidate.
    pub fn find(name: &str, candidates: &[String]) -> Option<(NameTemplate, usize)> {
        let mut matched = candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_empty() && name.contains(&c.to_lowercase()));
        let (index, candidate) = matched.next()?;
        if matched.next().is_some() {
            return None;
        }

        let needle = candidate.to_lowercase();
        let start = name.find(&needle)?;
        let template = NameTemplate {
            prefix: name[..start].to_string(),
            suffix: name[start + needle.len()..].to_string(),
        };
        Some((template, index))
    }

    /// Substitute `value` into the template.
    pub fn fill(&self, value: &str) -> String {
        format!("{}{}{}", self.prefix, value, self.suffix)
    }
}

impl fmt::Display for NameTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%s{}", self.prefix, self.suffix)
    }
}

// ---------------------------------------------------------------------------
// VariantGenerator
// ---------------------------------------------------------------------------

/// Derives scored name variants from a raw display name.
pub struct VariantGenerator {
    analyzer: Box<dyn LexicalAnalyzer>,
    scorer: Box<dyn SimilarityScorer>,
}

impl VariantGenerator {
    pub fn new(analyzer: Box<dyn LexicalAnalyzer>, scorer: Box<dyn SimilarityScorer>) -> Self {
        Self { analyzer, scorer }
    }

    /// Generate the variants of `raw_name`.
    ///
    /// SYNONYM variants are produced only when `extra_variant` names a kind;
    /// `candidates` are then the class-level names to substitute.
    pub fn generate(
        &self,
        raw_name: &str,
        extra_variant: Option<&str>,
        candidates: &[String],
    ) -> Vec<NameVariant> {
        let original = raw_name.to_lowercase();
        let mut variants = vec![NameVariant::new(
            original.clone(),
            VariantCategory::Original,
            1.0,
        )];

        let normalized: String = original
            .chars()
            .map(|c| if SEPARATORS.contains(&c) { ' ' } else { c })
            .collect();
        let tokens = self.analyzer.analyze(&normalized);

        let split = nlp::join_texts(&tokens);
        self.push_derived(&mut variants, &original, split.clone(), VariantCategory::Split, None);

        let compressed = nlp::join_texts(nlp::compress(&tokens));
        self.push_derived(
            &mut variants,
            &original,
            compressed,
            VariantCategory::Compressed,
            Some(&split),
        );

        let lemma = nlp::join_lemmas(&tokens);
        self.push_derived(&mut variants, &original, lemma, VariantCategory::Lemma, Some(&split));

        if extra_variant.is_some_and(|kind| !kind.trim().is_empty()) {
            variants.extend(self.synonyms(&original, candidates));
        }
        variants
    }

    /// Score a candidate against the original name.
    pub fn score(&self, original: &str, candidate: &str) -> f64 {
        round_score(self.scorer.similarity(original, candidate))
    }

    /// Add a derived variant unless it is identical to the original, repeats
    /// the split text, or repeats an earlier variant.
    fn push_derived(
        &self,
        variants: &mut Vec<NameVariant>,
        original: &str,
        text: String,
        category: VariantCategory,
        split: Option<&str>,
    ) {
        let score = self.score(original, &text);
        if score == 1.0 || split == Some(text.as_str()) || variants.iter().any(|v| v.text == text) {
            return;
        }
        variants.push(NameVariant::new(text, category, score));
    }

    fn synonyms(&self, original: &str, candidates: &[String]) -> Vec<NameVariant> {
        let Some((template, matched)) = NameTemplate::find(original, candidates) else {
            return Vec::new();
        };
        candidates
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != matched)
            .map(|(_, candidate)| {
                let text = template.fill(candidate);
                let score = self.score(original, &text);
                NameVariant::new(text, VariantCategory::Synonym, score)
            })
            .collect()
    }
}

impl fmt::Debug for VariantGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantGenerator").finish_non_exhaustive()
    }
}
