//! Canonical single-line normalization of raw page text, plus the cheap
//! per-page statistics computed over the normalized form.

/// Normalizes raw page text into a canonical single-line form.
///
/// Every newline becomes a single space and leading/trailing whitespace is
/// stripped. Total over any input (empty maps to empty) and idempotent:
/// `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(raw_text: &str) -> String {
    raw_text.replace('\n', " ").trim().to_string()
}

/// Counts single-space-delimited tokens.
///
/// Splitting on the literal space character means runs of spaces contribute
/// empty tokens, and the empty string counts as one token. The mild
/// over-count is a documented part of the reported statistics and must not
/// be "fixed" to a whitespace split.
pub fn word_count(text: &str) -> usize {
    text.split(' ').count()
}

/// Counts '.'-delimited segments — a crude sentence estimate retained only
/// as a diagnostic next to the segmenter's true count.
pub fn raw_sentence_count(text: &str) -> usize {
    text.split('.').count()
}

/// Heuristic token count: one token per four characters, unrounded.
pub fn token_estimate(char_count: usize) -> f64 {
    char_count as f64 / 4.0
}
