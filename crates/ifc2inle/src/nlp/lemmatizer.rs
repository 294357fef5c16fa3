//! Rule-based English lemmatizer driven by the token's part-of-speech tag.

use super::PosTag;

const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("feet", "foot"),
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("people", "person"),
    ("shelves", "shelf"),
    ("halves", "half"),
    ("leaves", "leaf"),
    ("analyses", "analysis"),
    ("axes", "axis"),
];

const IRREGULAR_VERBS: &[(&str, &str)] = &[
    ("is", "be"),
    ("are", "be"),
    ("am", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("'s", "be"),
    ("has", "have"),
    ("had", "have"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("goes", "go"),
    ("built", "build"),
    ("made", "make"),
];

const PRONOUNS: &[(&str, &str)] = &[
    ("me", "i"),
    ("him", "he"),
    ("us", "we"),
    ("them", "they"),
];

/// Lemma of `word` given its tag. Words are lowercased first.
pub fn lemmatize(word: &str, tag: PosTag) -> String {
    let word = word.to_lowercase();
    match tag {
        PosTag::Nns => lookup(IRREGULAR_NOUNS, &word).unwrap_or_else(|| plural_noun(&word)),
        PosTag::Vbz => lookup(IRREGULAR_VERBS, &word).unwrap_or_else(|| third_person(&word)),
        PosTag::Vbp | PosTag::Vbd | PosTag::Vb => lookup(IRREGULAR_VERBS, &word).unwrap_or(word),
        PosTag::Vbn => lookup(IRREGULAR_VERBS, &word).unwrap_or_else(|| past_participle(&word)),
        PosTag::Prp => lookup(PRONOUNS, &word).unwrap_or(word),
        _ => word,
    }
}

fn lookup(table: &[(&str, &str)], word: &str) -> Option<String> {
    table
        .iter()
        .find(|(form, _)| *form == word)
        .map(|(_, lemma)| lemma.to_string())
}

fn plural_noun(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies").filter(|s| s.len() > 1) {
        return format!("{stem}y");
    }
    if let Some(stem) = word.strip_suffix("sses") {
        return format!("{stem}ss");
    }
    for suffix in ["ches", "shes", "xes", "zzes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    word.strip_suffix('s').unwrap_or(word).to_string()
}

fn third_person(word: &str) -> String {
    for suffix in ["ches", "shes", "sses", "xes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if let Some(stem) = word.strip_suffix("ies").filter(|s| s.len() > 1) {
        return format!("{stem}y");
    }
    word.strip_suffix('s').unwrap_or(word).to_string()
}

fn past_participle(word: &str) -> String {
    let Some(stem) = word.strip_suffix("ed") else {
        return word.to_string();
    };
    if let Some(base) = stem.strip_suffix('i') {
        return format!("{base}y");
    }
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    // fitted -> fit, but keep double l/s/f/z (installed, passed)
    if n >= 3 && chars[n - 1] == chars[n - 2] && !"lsfz".contains(chars[n - 1]) && !is_vowel(chars[n - 1]) {
        return chars[..n - 1].iter().collect();
    }
    // placed -> place, located -> locate, glazed -> glaze
    let silent_e = ["c", "g", "v", "z", "at", "it", "ur", "ut"];
    if n >= 2 && !stem.ends_with("ss") && silent_e.iter().any(|s| stem.ends_with(s)) {
        return format!("{stem}e");
    }
    stem.to_string()
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_nouns() {
        assert_eq!(lemmatize("Stairs", PosTag::Nns), "stair");
        assert_eq!(lemmatize("stories", PosTag::Nns), "story");
        assert_eq!(lemmatize("storeys", PosTag::Nns), "storey");
        assert_eq!(lemmatize("benches", PosTag::Nns), "bench");
        assert_eq!(lemmatize("glasses", PosTag::Nns), "glass");
        assert_eq!(lemmatize("feet", PosTag::Nns), "foot");
    }

    #[test]
    fn test_verbs() {
        assert_eq!(lemmatize("is", PosTag::Vbz), "be");
        assert_eq!(lemmatize("contains", PosTag::Vbz), "contain");
        assert_eq!(lemmatize("fitted", PosTag::Vbn), "fit");
        assert_eq!(lemmatize("installed", PosTag::Vbn), "install");
        assert_eq!(lemmatize("placed", PosTag::Vbn), "place");
        assert_eq!(lemmatize("located", PosTag::Vbn), "locate");
        assert_eq!(lemmatize("glazed", PosTag::Vbn), "glaze");
        assert_eq!(lemmatize("passed", PosTag::Vbn), "pass");
    }

    #[test]
    fn test_other_tags_are_lowercased_only() {
        assert_eq!(lemmatize("Wall", PosTag::Nn), "wall");
        assert_eq!(lemmatize("01", PosTag::Cd), "01");
    }
}
