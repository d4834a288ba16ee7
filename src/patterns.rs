//! Literal date shapes recognised in text samples.

use std::sync::OnceLock;

use regex::RegexSet;

/// Anchored shapes, matched against the trimmed sample. Digits are ASCII only.
const DATE_PATTERNS: &[(&str, &str)] = &[
    ("DD/MM/YYYY", r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$"),
    ("DD-MM-YYYY", r"^[0-9]{2}-[0-9]{2}-[0-9]{4}$"),
    ("DD/MM/YY", r"^[0-9]{2}/[0-9]{2}/[0-9]{2}$"),
    ("DD-MM-YY", r"^[0-9]{2}-[0-9]{2}-[0-9]{2}$"),
    ("YYYY-MM-DD", r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$"),
    ("YYYY/MM/DD", r"^[0-9]{4}/[0-9]{2}/[0-9]{2}$"),
    (
        "YYYY-MM-DD HH:MM:SS",
        r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}$",
    ),
];

static DATE_SET: OnceLock<RegexSet> = OnceLock::new();

fn date_set() -> &'static RegexSet {
    DATE_SET.get_or_init(|| {
        RegexSet::new(DATE_PATTERNS.iter().map(|(_, pattern)| *pattern))
            .expect("static date patterns compile")
    })
}

/// Returns true when the trimmed value has one of the recognised date shapes.
///
/// Only the layout is checked: `99/99/9999` counts as a date.
pub fn is_date_literal(value: &str) -> bool {
    date_set().is_match(value.trim())
}

/// Name of the first shape the value matches, e.g. `DD/MM/YYYY`.
pub fn matching_format(value: &str) -> Option<&'static str> {
    date_set()
        .matches(value.trim())
        .iter()
        .next()
        .map(|idx| DATE_PATTERNS[idx].0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_day_first_layouts() {
        assert!(is_date_literal("01/01/2025"));
        assert!(is_date_literal("31-12-1999"));
        assert!(is_date_literal("01/01/25"));
        assert!(is_date_literal("01-01-25"));
    }

    #[test]
    fn recognises_year_first_layouts() {
        assert!(is_date_literal("2025-01-31"));
        assert!(is_date_literal("2025/01/31"));
        assert!(is_date_literal("2025-01-31 08:15:00"));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert!(is_date_literal("  01/01/2025 "));
    }

    #[test]
    fn partial_or_lenient_shapes_are_rejected() {
        assert!(!is_date_literal("1/1/2025"));
        assert!(!is_date_literal("01/01/2025 extra"));
        assert!(!is_date_literal("2025-01-31T08:15:00"));
        assert!(!is_date_literal("2025-01-31 08:15"));
        assert!(!is_date_literal("01.01.2025"));
        assert!(!is_date_literal("Jan 1 2025"));
        assert!(!is_date_literal("01/01/202"));
        assert!(!is_date_literal(""));
    }

    #[test]
    fn non_ascii_digits_do_not_count() {
        assert!(!is_date_literal("٠١/٠١/٢٠٢٥"));
    }

    #[test]
    fn matching_format_names_the_layout() {
        assert_eq!(matching_format("2025-01-31"), Some("YYYY-MM-DD"));
        assert_eq!(
            matching_format("2025-01-31 08:15:00"),
            Some("YYYY-MM-DD HH:MM:SS")
        );
        assert_eq!(matching_format("hello"), None);
    }
}
