//! Whitespace tokenizer that also splits off brackets, quotes, trailing
//! punctuation, possessive clitics and unit suffixes (`138mm` -> `138 mm`).

const OPENERS: &[char] = &['(', '[', '{', '"', '\'', '`'];
const CLOSERS: &[char] = &[')', ']', '}', '"', '\'', ',', ';', '!', '?', '%', '.'];

/// Split `text` into token texts.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for chunk in text.split_whitespace() {
        split_chunk(chunk, &mut tokens);
    }
    tokens
}

fn split_chunk(chunk: &str, out: &mut Vec<String>) {
    let mut rest = chunk;

    while let Some(c) = rest.chars().next() {
        if rest.len() > c.len_utf8() && OPENERS.contains(&c) {
            out.push(c.to_string());
            rest = &rest[c.len_utf8()..];
        } else {
            break;
        }
    }

    let mut trailing = Vec::new();
    while let Some(c) = rest.chars().next_back() {
        if rest.len() > c.len_utf8() && CLOSERS.contains(&c) {
            trailing.push(c.to_string());
            rest = &rest[..rest.len() - c.len_utf8()];
        } else {
            break;
        }
    }

    if let Some(stem) = rest.strip_suffix("'s").filter(|s| !s.is_empty()) {
        push_word(stem, out);
        out.push("'s".to_string());
    } else if !rest.is_empty() {
        push_word(rest, out);
    }

    out.extend(trailing.into_iter().rev());
}

/// Push a word, splitting a number immediately followed by a unit.
fn push_word(word: &str, out: &mut Vec<String>) {
    let digits_end = word
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.' || *c == ','))
        .map(|(i, _)| i)
        .unwrap_or(word.len());
    let (number, unit) = word.split_at(digits_end);
    let is_unit = !unit.is_empty() && unit.chars().all(|c| c.is_alphabetic());
    if number.chars().next().is_some_and(|c| c.is_ascii_digit()) && is_unit {
        out.push(number.to_string());
        out.push(unit.to_string());
    } else {
        out.push(word.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_whitespace() {
        assert_eq!(tokenize("wall  ext 01"), vec!["wall", "ext", "01"]);
    }

    #[test]
    fn test_splits_brackets() {
        assert_eq!(tokenize("partition (1 hr)"), vec!["partition", "(", "1", "hr", ")"]);
    }

    #[test]
    fn test_splits_units() {
        assert_eq!(tokenize("138mm partition"), vec!["138", "mm", "partition"]);
        assert_eq!(tokenize("level1"), vec!["level1"]);
    }

    #[test]
    fn test_splits_possessive() {
        assert_eq!(tokenize("owner's room"), vec!["owner", "'s", "room"]);
    }

    #[test]
    fn test_keeps_decimal() {
        assert_eq!(tokenize("1.5 m"), vec!["1.5", "m"]);
    }
}
