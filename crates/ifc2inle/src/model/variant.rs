//! Generated name variants.

use std::fmt;

use serde::Serialize;

use super::ontology::nln;

/// How a variant was derived from the original name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantCategory {
    Original,
    Split,
    Compressed,
    Lemma,
    Synonym,
}

impl VariantCategory {
    /// Local name of the INLE name-type individual for this category.
    pub fn name_type(self) -> &'static str {
        match self {
            VariantCategory::Original => nln::TYPE_ORIGINAL,
            VariantCategory::Split => nln::TYPE_SPLIT,
            VariantCategory::Compressed => nln::TYPE_COMPRESSION,
            VariantCategory::Lemma => nln::TYPE_LEMMA,
            VariantCategory::Synonym => nln::TYPE_SYNONYM,
        }
    }
}

impl fmt::Display for VariantCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VariantCategory::Original => "original",
            VariantCategory::Split => "split",
            VariantCategory::Compressed => "compressed",
            VariantCategory::Lemma => "lemma",
            VariantCategory::Synonym => "synonym",
        };
        f.write_str(name)
    }
}

/// An alternate rendering of a name with its similarity to the original.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameVariant {
    pub text: String,
    pub category: VariantCategory,
    pub score: f64,
}

impl NameVariant {
    pub fn new(text: impl Into<String>, category: VariantCategory, score: f64) -> Self {
        Self {
            text: text.into(),
            category,
            score,
        }
    }
}
