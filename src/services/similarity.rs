//! Title similarity based on edit distance.
//!
//! Distances count insertions, deletions, substitutions and transpositions of
//! adjacent characters (optimal string alignment). Lengths are measured in
//! `char`s, so accented titles are not penalised per UTF-8 byte.

use strsim::osa_distance;

/// Edit distance between `a` and `b`
pub fn edit_distance(a: &str, b: &str) -> usize {
    osa_distance(a, b)
}

/// Normalized similarity in `[0.0, 1.0]`, where `1.0` means identical
///
/// Two empty strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - edit_distance(a, b) as f64 / longest as f64
}
