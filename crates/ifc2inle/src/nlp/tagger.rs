//! Part-of-speech tagger: closed-class word lists, a little left/right
//! context, then suffix rules for open-class words.

use super::PosTag;

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "another", "some",
    "any", "no", "either", "neither",
];
const PREDETERMINERS: &[&str] = &["all", "both", "half", "such", "quite"];
const CONJUNCTIONS: &[&str] = &["and", "or", "but", "nor", "yet", "plus", "&"];
const MODALS: &[&str] = &[
    "can", "could", "may", "might", "must", "shall", "should", "will", "would",
];
const PERSONAL_PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them",
];
const POSSESSIVE_PRONOUNS: &[&str] = &["my", "your", "his", "her", "its", "our", "their"];
const PREPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "from", "into", "onto", "over", "under",
    "between", "above", "below", "within", "without", "through", "per", "via", "about",
    "against", "along", "behind", "beside", "near", "across", "after", "before", "during",
    "inside", "outside", "than", "upon",
];
const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "twenty", "hundred", "thousand",
];
const ADVERBS: &[&str] = &["not", "also", "only", "very", "too", "again", "here", "up", "down", "out", "off"];

const VBZ_WORDS: &[&str] = &["is", "has", "does", "contains", "includes", "goes"];
const VBP_WORDS: &[&str] = &["are", "am", "have", "do"];
const VBD_WORDS: &[&str] = &["was", "were", "had", "did"];
const VBN_WORDS: &[&str] = &["been", "built", "made", "done"];

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ical", "ial"];

/// Tag every token of a sentence.
pub fn tag(tokens: &[String]) -> Vec<PosTag> {
    let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
    let mut tags: Vec<PosTag> = Vec::with_capacity(lowered.len());
    for (i, word) in lowered.iter().enumerate() {
        let next = lowered.get(i + 1).map(String::as_str);
        let prev = tags.last().copied();
        tags.push(tag_word(word, prev, next));
    }
    tags
}

fn tag_word(word: &str, prev: Option<PosTag>, next: Option<&str>) -> PosTag {
    if let Some(tag) = punctuation(word) {
        return tag;
    }
    if is_number(word) || NUMBER_WORDS.contains(&word) {
        return PosTag::Cd;
    }
    if PREDETERMINERS.contains(&word) {
        return match next {
            Some(n) if DETERMINERS.contains(&n) || POSSESSIVE_PRONOUNS.contains(&n) => PosTag::Pdt,
            _ if word == "such" => PosTag::Jj,
            _ if word == "quite" => PosTag::Rb,
            _ => PosTag::Dt,
        };
    }
    if word == "there" {
        return match next {
            Some(n) if is_be_form(n) || MODALS.contains(&n) => PosTag::Ex,
            _ => PosTag::Rb,
        };
    }
    if word == "to" {
        return PosTag::To;
    }
    if word == "'s" {
        return PosTag::Vbz;
    }

    let lexicon: [(&[&str], PosTag); 12] = [
        (DETERMINERS, PosTag::Dt),
        (CONJUNCTIONS, PosTag::Cc),
        (MODALS, PosTag::Md),
        (PERSONAL_PRONOUNS, PosTag::Prp),
        (POSSESSIVE_PRONOUNS, PosTag::PrpS),
        (PREPOSITIONS, PosTag::In),
        (ADVERBS, PosTag::Rb),
        (VBZ_WORDS, PosTag::Vbz),
        (VBP_WORDS, PosTag::Vbp),
        (VBD_WORDS, PosTag::Vbd),
        (VBN_WORDS, PosTag::Vbn),
        (&["be"], PosTag::Vb),
    ];
    if let Some((_, tag)) = lexicon.iter().find(|(words, _)| words.contains(&word)) {
        return *tag;
    }

    // third person verbs after a subject pronoun or existential "there"
    if matches!(prev, Some(PosTag::Prp) | Some(PosTag::Ex)) && word.len() > 2 && word.ends_with('s') {
        return PosTag::Vbz;
    }
    if matches!(prev, Some(PosTag::Md) | Some(PosTag::To)) {
        return PosTag::Vb;
    }

    suffix_tag(word)
}

fn suffix_tag(word: &str) -> PosTag {
    let len = word.chars().count();
    if len > 4 && word.ends_with("ly") {
        return PosTag::Rb;
    }
    if len > 4 && word.ends_with("ed") {
        return PosTag::Vbn;
    }
    if len > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        return PosTag::Jj;
    }
    if len > 3
        && word.ends_with('s')
        && !["ss", "us", "is"].iter().any(|s| word.ends_with(s))
        && word.chars().all(char::is_alphabetic)
    {
        return PosTag::Nns;
    }
    PosTag::Nn
}

fn punctuation(word: &str) -> Option<PosTag> {
    if word.chars().any(char::is_alphanumeric) {
        return None;
    }
    Some(match word {
        "(" | "[" | "{" => PosTag::Lrb,
        ")" | "]" | "}" => PosTag::Rrb,
        "&" => PosTag::Cc,
        _ => PosTag::Punct,
    })
}

fn is_number(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_ascii_digit())
        && word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
}

fn is_be_form(word: &str) -> bool {
    matches!(word, "is" | "are" | "was" | "were" | "be" | "'s")
}
