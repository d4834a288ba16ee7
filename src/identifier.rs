//! Column label normalization.
//!
//! Turns free-form labels such as `Điểm trung bình` or `Số tiền (VNĐ) %` into
//! lowercase snake_case identifiers made only of `[a-z0-9_]`. The steps run in
//! a fixed order:
//!
//! 1. `đ`/`Đ` become `d` (they have no decomposition to ASCII `d`).
//! 2. NFKD decomposition, then every combining mark is dropped.
//! 3. `%` becomes `pc`.
//! 4. Surrounding whitespace is trimmed and the text lowercased.
//! 5. Each run of characters outside `[a-z0-9_]` collapses to one `_`.
//!
//! Normalization never fails and is idempotent. A non-blank label that folds
//! away entirely (a lone combining mark, say) becomes `_`.

use std::{borrow::Cow, sync::OnceLock};

use regex::Regex;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

static NON_WORD_RUN: OnceLock<Regex> = OnceLock::new();

fn non_word_run() -> &'static Regex {
    NON_WORD_RUN.get_or_init(|| Regex::new(r"[^a-z0-9_]+").expect("static pattern compiles"))
}

/// Normalizes a raw column (or schema/table) label into a SQL identifier.
///
/// Labels without any word character collapse to `_`; only blank labels
/// yield an empty string. Callers that need a non-empty name substitute their
/// own default before normalizing.
pub fn normalize(raw: &str) -> String {
    let folded = fold_diacritics(raw).replace('%', "pc");
    let lowered = folded.trim().to_lowercase();
    if lowered.is_empty() && !raw.trim().is_empty() {
        return "_".to_string();
    }
    collapse_non_word(&lowered).into_owned()
}

/// Strips diacritics while keeping base letters, e.g. `Ngày` -> `Ngay`.
pub fn fold_diacritics(raw: &str) -> String {
    raw.chars()
        .map(|ch| match ch {
            'đ' | 'Đ' => 'd',
            other => other,
        })
        .nfkd()
        .filter(|ch| !is_combining_mark(*ch))
        .collect()
}

fn collapse_non_word(value: &str) -> Cow<'_, str> {
    let regex = non_word_run();
    if regex.is_match(value) {
        Cow::Owned(regex.replace_all(value, "_").into_owned())
    } else {
        Cow::Borrowed(value)
    }
}

/// Returns true when `value` is already a well-formed identifier.
pub fn is_identifier(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}
