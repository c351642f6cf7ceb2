use unicode_normalization::{UnicodeNormalization as _, char::is_combining_mark};

/// Returns the canonical comparison form of a perk name, tag, or lock/ban entry.
///
/// The text is lowercased, decomposed (Unicode NFD) and stripped of combining marks,
/// so `"Déjà Vu"`, `"DEJA VU"` and `"deja vu"` all map to `"deja vu"`.
///
/// Lowercasing happens before decomposition: some uppercase letters lowercase into a base
/// letter plus a combining mark (`'İ'` → `"i\u{307}"`), and those marks must be stripped
/// in the same pass for the function to be idempotent.
///
/// # Example
///
/// ```
/// use perkwise_catalog::normalize;
///
/// assert_eq!(normalize("Déjà Vu"), "deja vu");
/// assert_eq!(normalize(&normalize("Déjà Vu")), normalize("Déjà Vu"));
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}
