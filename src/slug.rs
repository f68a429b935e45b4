//! Title → filename slug conversion.
//!
//! Every rendered artifact is named after its post's title: markdown files as
//! `{date}-{slug}.md`, site pages as `{slug}.html`. The slug is lowercase
//! ASCII with single hyphens between words:
//!
//! - `"Hello, World!"` → `"hello-world"`
//! - `"Crème Brûlée Recipes"` → `"creme-brulee-recipes"`
//! - `"Save $1,000 on TVs"` → `"save-1000-on-tvs"`
//! - `"Don't Miss"` → `"don-t-miss"`
//! - `"Привет мир"` → `"privet-mir"`
//! - `"Save 20€ today"` → `"save-20eur-today"`
//!
//! Non-ASCII text is transliterated with [`deunicode`], so titles in any
//! script keep a readable slug instead of collapsing to [`EMPTY_SLUG`].
//!
//! ## Collisions
//!
//! Slugs are not unique. Two titles that differ only in punctuation or past
//! the truncation point map to the same slug, and whichever post is written
//! last owns the file.

use deunicode::deunicode_char;

/// Maximum slug length used for every output filename.
pub const SLUG_MAX_LEN: usize = 50;

/// Slug used when a title contains nothing that survives normalization.
pub const EMPTY_SLUG: &str = "untitled";

/// Convert arbitrary title text into a lowercase, hyphen-separated slug of at
/// most `max_len` characters.
///
/// The slug is normalized first and truncated afterwards, so a cut that lands
/// right after a separator leaves a trailing hyphen.
pub fn slug(title: &str, max_len: usize) -> String {
    let chars: Vec<char> = title.chars().collect();
    let mut normalized = String::with_capacity(title.len());
    let mut pending_separator = false;

    let mut push = |c: char, out: &mut String| {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('-');
            }
            pending_separator = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    };

    for (i, &c) in chars.iter().enumerate() {
        if c == ',' && i > 0 && is_digit_at(&chars, i - 1) && is_digit_at(&chars, i + 1) {
            continue;
        }
        // Characters with no ASCII rendering fall through as separators.
        for a in deunicode_char(c).unwrap_or("-").chars() {
            push(a, &mut normalized);
        }
    }

    if normalized.is_empty() {
        return EMPTY_SLUG.chars().take(max_len).collect();
    }
    normalized.chars().take(max_len).collect()
}

fn is_digit_at(chars: &[char], i: usize) -> bool {
    chars.get(i).is_some_and(|c| c.is_ascii_digit())
}
