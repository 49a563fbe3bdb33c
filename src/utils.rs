//! Utility functions for the library.

/// Computes the Levenshtein distance between two words over their bytes.
///
/// Substitution, insertion and deletion all cost one. The computation keeps
/// two rolling rows, so memory is bounded by the shorter input.
///
/// # Arguments
///
/// * `a` - The first word.
/// * `b` - The second word.
///
/// # Returns
///
/// * `u32` - The edit distance. Multibyte characters count per byte, so
///   `levenshtein("café", "cafe")` is 2.
pub fn levenshtein(a: &str, b: &str) -> u32 {
    let (longer, shorter) = if a.len() >= b.len() {
        (a.as_bytes(), b.as_bytes())
    } else {
        (b.as_bytes(), a.as_bytes())
    };
    if shorter.is_empty() {
        return longer.len() as u32;
    }
    let mut previous: Vec<u32> = (0..=shorter.len() as u32).collect();
    let mut current: Vec<u32> = vec![0; shorter.len() + 1];
    for (row, &long_byte) in longer.iter().enumerate() {
        current[0] = row as u32 + 1;
        for (column, &short_byte) in shorter.iter().enumerate() {
            let substitution = previous[column] + u32::from(long_byte != short_byte);
            let insertion = current[column] + 1;
            let deletion = previous[column + 1] + 1;
            current[column + 1] = substitution.min(insertion).min(deletion);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[shorter.len()]
}

/// Collects an iterator of borrowed words into a sorted vector.
/// Hash iteration order is unspecified, so every Debug form goes through this.
pub(crate) fn get_deterministic_display_form_from_words<'a>(
    words: impl Iterator<Item = &'a str>,
) -> Vec<&'a str> {
    let mut a: Vec<_> = words.collect();
    a.sort_unstable();
    a
}
