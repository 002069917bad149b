//! Levenshtein distance with unit-cost insert, delete and substitute.

/// Single-row dynamic-programming Levenshtein. Operates on chars, so
/// inputs are expected to be lowercased by the caller.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a.chars().count();
    }

    let mut cache: Vec<usize> = (1..=b_chars.len()).collect();
    let mut result = 0;
    for (i, a_ch) in a.chars().enumerate() {
        result = i + 1;
        let mut distance_b = i;
        for (j, b_ch) in b_chars.iter().enumerate() {
            let cost = usize::from(a_ch != *b_ch);
            let distance_a = distance_b + cost;
            distance_b = cache[j];
            result = (result + 1).min(distance_a).min(distance_b + 1);
            cache[j] = result;
        }
    }
    result
}
