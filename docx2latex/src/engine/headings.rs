//! Section heading detection

use crate::locale::LocaleTable;
use crate::markers::SENTINEL;
use regex::Regex;
use std::sync::LazyLock;

static LEADING_NUMBERING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\d+\s*(?:[.)\-:]|\s)\s*").expect("valid heading numbering regex")
});

/// A cleaned line is a heading when it has letters and is entirely upper-case
pub fn is_heading(line: &str, locale: &LocaleTable) -> bool {
    if line.is_empty() || line == SENTINEL {
        return false;
    }
    if !line.chars().any(char::is_alphabetic) {
        return false;
    }
    locale.casing.upper(line) == line
}

/// Heading title as it appears in the body and the TOC
pub fn heading_title(line: &str, locale: &LocaleTable) -> String {
    locale.casing.upper(line.trim())
}

/// Whether a heading opens the bibliography section (leading numbering ignored)
pub fn is_bibliography_heading(line: &str, locale: &LocaleTable) -> bool {
    let stripped = LEADING_NUMBERING.replace(line.trim(), "");
    locale.casing.upper(stripped.trim()) == locale.casing.upper(locale.bibliography_heading)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;

    #[test]
    fn test_upper_case_lines_are_headings() {
        let en = Locale::En.table();
        assert!(is_heading("INTRODUCTION", en));
        assert!(is_heading("2. RESULTS AND DISCUSSION", en));
        assert!(!is_heading("Introduction", en));
        assert!(!is_heading("---", en));
        assert!(!is_heading("12.5 / 3", en));
        assert!(!is_heading("", en));
    }

    #[test]
    fn test_turkish_dotted_capital_i() {
        let tr = Locale::Tr.table();
        assert!(is_heading("GİRİŞ", tr));
        // Plain `I` is the capital of dotless `ı`, so this is upper-case Turkish too
        assert!(is_heading("DENEYIN AMACI", tr));
        assert!(!is_heading("Giriş", tr));
    }

    #[test]
    fn test_bibliography_heading_ignores_numbering() {
        let en = Locale::En.table();
        assert!(is_bibliography_heading("APPENDIX", en));
        assert!(is_bibliography_heading("5. APPENDIX", en));
        assert!(is_bibliography_heading("5 APPENDIX", en));
        assert!(!is_bibliography_heading("APPENDIX A", en));

        let tr = Locale::Tr.table();
        assert!(is_bibliography_heading("6) KAYNAKÇA", tr));
    }
}
