//! Lexical analysis: tokenization, part-of-speech tagging and lemmatization.
//!
//! The converter only needs three things from an NLP toolkit: token texts,
//! Penn Treebank tags (to drop noise words) and lemmas. [`LexicalAnalyzer`] is
//! that contract; [`RuleBasedAnalyzer`] is the bundled English implementation.

pub mod lemmatizer;
pub mod tagger;
pub mod tokenizer;

use std::fmt;

use crate::error::ConfigError;

/// Model name of the bundled rule-based English analyzer.
pub const DEFAULT_MODEL: &str = "en-rules";

const KNOWN_MODELS: &[&str] = &[DEFAULT_MODEL];

/// Penn Treebank part-of-speech tags produced by the analyzers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    /// Noun, singular or mass
    Nn,
    /// Noun, plural
    Nns,
    /// Cardinal number
    Cd,
    /// Determiner
    Dt,
    /// Predeterminer
    Pdt,
    /// Coordinating conjunction
    Cc,
    /// Existential "there"
    Ex,
    /// Modal
    Md,
    /// Personal pronoun
    Prp,
    /// Possessive pronoun
    PrpS,
    /// Verb, base form
    Vb,
    /// Verb, 3rd person singular present
    Vbz,
    /// Verb, non-3rd person singular present
    Vbp,
    /// Verb, past tense
    Vbd,
    /// Verb, past participle
    Vbn,
    /// Adjective
    Jj,
    /// Adverb
    Rb,
    /// Preposition or subordinating conjunction
    In,
    /// "to"
    To,
    /// Opening bracket
    Lrb,
    /// Closing bracket
    Rrb,
    /// Other punctuation
    Punct,
}

impl PosTag {
    /// Tags whose tokens carry no naming information and are dropped when a
    /// name is compressed.
    pub const NOISE: [PosTag; 7] = [
        PosTag::Vbz,
        PosTag::Cc,
        PosTag::Dt,
        PosTag::Ex,
        PosTag::Md,
        PosTag::Pdt,
        PosTag::Prp,
    ];

    pub fn is_noise(self) -> bool {
        Self::NOISE.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PosTag::Nn => "NN",
            PosTag::Nns => "NNS",
            PosTag::Cd => "CD",
            PosTag::Dt => "DT",
            PosTag::Pdt => "PDT",
            PosTag::Cc => "CC",
            PosTag::Ex => "EX",
            PosTag::Md => "MD",
            PosTag::Prp => "PRP",
            PosTag::PrpS => "PRP$",
            PosTag::Vb => "VB",
            PosTag::Vbz => "VBZ",
            PosTag::Vbp => "VBP",
            PosTag::Vbd => "VBD",
            PosTag::Vbn => "VBN",
            PosTag::Jj => "JJ",
            PosTag::Rb => "RB",
            PosTag::In => "IN",
            PosTag::To => "TO",
            PosTag::Lrb => "-LRB-",
            PosTag::Rrb => "-RRB-",
            PosTag::Punct => ".",
        }
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One analyzed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub tag: PosTag,
    pub lemma: String,
}

/// Tokenize, tag and lemmatize a string.
pub trait LexicalAnalyzer {
    fn analyze(&self, text: &str) -> Vec<Token>;
}

/// Tokens that survive noise filtering, in their original order.
pub fn compress(tokens: &[Token]) -> Vec<&Token> {
    tokens.iter().filter(|t| !t.tag.is_noise()).collect()
}

/// Join token texts with single spaces.
pub fn join_texts<'a, I>(tokens: I) -> String
where
    I: IntoIterator<Item = &'a Token>,
{
    tokens
        .into_iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Join token lemmas with single spaces.
pub fn join_lemmas<'a, I>(tokens: I) -> String
where
    I: IntoIterator<Item = &'a Token>,
{
    tokens
        .into_iter()
        .map(|t| t.lemma.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn is_known_model(name: &str) -> bool {
    KNOWN_MODELS.contains(&name)
}

/// Build the analyzer registered under `name`.
pub fn analyzer_for_model(name: &str) -> Result<Box<dyn LexicalAnalyzer>, ConfigError> {
    match name {
        DEFAULT_MODEL => Ok(Box::new(RuleBasedAnalyzer::new())),
        other => Err(ConfigError::UnknownNlpModel(other.to_string())),
    }
}

/// Deterministic English analyzer built from closed-class word lists and
/// suffix rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedAnalyzer;

impl RuleBasedAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl LexicalAnalyzer for RuleBasedAnalyzer {
    fn analyze(&self, text: &str) -> Vec<Token> {
        let words = tokenizer::tokenize(text);
        let tags = tagger::tag(&words);
        words
            .into_iter()
            .zip(tags)
            .map(|(text, tag)| {
                let lemma = lemmatizer::lemmatize(&text, tag);
                Token { text, tag, lemma }
            })
            .collect()
    }
}
