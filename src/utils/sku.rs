//! SKU normalization and string similarity helpers
//!
//! Manufacturer style codes arrive in many shapes: `DD1391-100`, `dd1391 100`,
//! `NIKE DD1391-100 (GS)`, `555088/134`, `GX1234`. Matching against provider
//! catalogs needs a canonical form, so everything funnels through
//! [`normalize_sku_for_matching`] before comparison.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Nike/Jordan style codes with a two-letter prefix: `DD1391-100`
static PREFIXED_STYLE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z]{2}[0-9]{4}[0-9]{3}").expect("valid regex"));

/// Legacy all-numeric Nike/Jordan codes: `555088-134`
static NUMERIC_STYLE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{6}[0-9]{3}").expect("valid regex"));

/// Short alphanumeric codes (Adidas, Yeezy): `GX1234`, `HP7870`
static SHORT_STYLE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z]{2}[0-9]{4}").expect("valid regex"));

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Z0-9]+").expect("valid regex"));

/// Reduces a free-text product code to a canonical SKU for matching
///
/// Uppercases the input, strips separators and noise, then tries to extract a
/// known style-code shape. Falls back to the compacted alphanumeric string when
/// it still looks SKU-like (contains a digit, plausible length). Returns `None`
/// when nothing usable remains.
///
/// # Examples
/// ```
/// use resale_desk::utils::sku::normalize_sku_for_matching;
///
/// assert_eq!(normalize_sku_for_matching("dd1391 100"), Some("DD1391-100".to_string()));
/// assert_eq!(normalize_sku_for_matching("555088/134"), Some("555088-134".to_string()));
/// assert_eq!(normalize_sku_for_matching("Dunk Low"), None);
/// ```
#[must_use]
pub fn normalize_sku_for_matching(raw: &str) -> Option<String> {
    let upper = raw.trim().to_uppercase();
    if upper.is_empty() {
        return None;
    }

    // Compact to bare alphanumerics so "DD1391-100", "DD1391 100" and
    // "DD1391/100" all collapse to "DD1391100" before pattern extraction.
    let compact = NON_ALNUM.replace_all(&upper, "").to_string();
    if compact.is_empty() {
        return None;
    }

    if let Some(m) = PREFIXED_STYLE_CODE.find(&compact) {
        let code = m.as_str();
        return Some(format!("{}-{}", &code[..6], &code[6..]));
    }

    if let Some(m) = NUMERIC_STYLE_CODE.find(&compact) {
        let code = m.as_str();
        return Some(format!("{}-{}", &code[..6], &code[6..]));
    }

    if let Some(m) = SHORT_STYLE_CODE.find(&compact) {
        return Some(m.as_str().to_string());
    }

    // Fallback: keep the compacted string when it still looks like a vendor
    // code (has a digit, not absurdly short or long).
    if compact.len() >= 5 && compact.len() <= 12 && compact.chars().any(|c| c.is_ascii_digit()) {
        return Some(compact);
    }

    None
}

/// Computes the Levenshtein edit distance between two strings
///
/// Standard dynamic-programming implementation over chars; used by the fuzzy
/// SKU matching tier.
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Token-set similarity between two product names, in 0.0..=1.0
///
/// Uppercases, splits on non-alphanumerics and computes the Jaccard index of
/// the token sets. Order-insensitive, so "Jordan 1 Retro High OG" and
/// "Retro High OG Jordan 1" score 1.0.
#[must_use]
pub fn name_similarity(a: &str, b: &str) -> f64 {
    let tokens_a = tokenize(a);
    let tokens_b = tokenize(b);

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();

    intersection as f64 / union as f64
}

fn tokenize(s: &str) -> HashSet<String> {
    s.to_uppercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
