//! Character-level source/target reconciliation.
//!
//! Newlines in the source correspond to `<sent_br>` tokens in the target.
//! Validation walks both strings with spaces stripped, rebuilding the target
//! without tokens, and accepts only an exact character-for-character match.

/// Sentence-break token embedded in target renderings.
pub const SENT_BR: &str = "<sent_br>";

/// Counts positionwise mismatches between two equal-length char sequences.
///
/// Returns `None` when lengths differ: unequal lengths are a validation
/// failure in their own right, not a distance.
fn mismatches(a: &[char], b: &[char]) -> Option<usize> {
    if a.len() != b.len() {
        return None;
    }
    Some(a.iter().zip(b.iter()).filter(|(c1, c2)| c1 != c2).count())
}

/// Validates that `target` reconstructs `source` once spaces are ignored.
///
/// A `<sent_br>` token consumes a newline at the matching source position;
/// a token with no newline under it is dropped silently. After the target is
/// exhausted, only newlines may remain in the source, and the reconstruction
/// must then equal the space-stripped source exactly (so an unmatched source
/// newline still fails the final comparison).
///
/// Pure: no side effects, inputs untouched.
pub fn validate(source: &str, target: &str) -> bool {
    let source: Vec<char> = source.chars().filter(|c| *c != ' ').collect();
    let target: Vec<char> = target.chars().filter(|c| *c != ' ').collect();
    let token: Vec<char> = SENT_BR.chars().collect();

    let mut s = 0;
    let mut t = 0;
    let mut reconstructed: Vec<char> = Vec::with_capacity(source.len());

    while t < target.len() {
        if target[t..].starts_with(&token[..]) {
            if s < source.len() && source[s] == '\n' {
                reconstructed.push('\n');
                s += 1;
            }
            t += token.len();
        } else {
            if s >= source.len() {
                // source ended before target
                return false;
            }
            reconstructed.push(target[t]);
            if target[t] != source[s] {
                return false;
            }
            s += 1;
            t += 1;
        }
    }

    // only sentence breaks may trail the matched region
    while s < source.len() {
        if source[s] != '\n' {
            return false;
        }
        s += 1;
    }

    mismatches(&source, &reconstructed) == Some(0)
}
