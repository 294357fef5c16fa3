//! String similarity scoring used to rate name variants.

/// Normalized similarity between two strings, in `[0, 1]`.
pub trait SimilarityScorer {
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// Jaro-Winkler similarity.
#[derive(Debug, Clone, Copy)]
pub struct JaroWinkler {
    /// Weight given to the common prefix
    pub prefix_scale: f64,
    /// Longest prefix that is rewarded
    pub max_prefix: usize,
}

impl Default for JaroWinkler {
    fn default() -> Self {
        Self {
            prefix_scale: 0.1,
            max_prefix: 4,
        }
    }
}

impl SimilarityScorer for JaroWinkler {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let jaro = jaro_similarity(a, b);
        let prefix = a
            .chars()
            .zip(b.chars())
            .take(self.max_prefix)
            .take_while(|(x, y)| x == y)
            .count();
        (jaro + prefix as f64 * self.prefix_scale * (1.0 - jaro)).clamp(0.0, 1.0)
    }
}

/// Plain Jaro similarity.
pub fn jaro_similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let window = (a.len().max(b.len()) / 2).saturating_sub(1);
    let mut a_matched = vec![false; a.len()];
    let mut b_matched = vec![false; b.len()];
    let mut matches = 0usize;

    for (i, ca) in a.iter().enumerate() {
        let lo = i.saturating_sub(window);
        let hi = (i + window + 1).min(b.len());
        for j in lo..hi {
            if !b_matched[j] && b[j] == *ca {
                a_matched[i] = true;
                b_matched[j] = true;
                matches += 1;
                break;
            }
        }
    }
    if matches == 0 {
        return 0.0;
    }

    let a_seq = a.iter().zip(&a_matched).filter(|(_, m)| **m).map(|(c, _)| c);
    let b_seq = b.iter().zip(&b_matched).filter(|(_, m)| **m).map(|(c, _)| c);
    let transpositions = a_seq.zip(b_seq).filter(|(x, y)| x != y).count() / 2;

    let m = matches as f64;
    (m / a.len() as f64 + m / b.len() as f64 + (m - transpositions as f64) / m) / 3.0
}

/// Round a score to two decimals, the precision variants are stored with.
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}
