//! Formula text normalisation

use crate::text::{greek_command, strip_invisible};
use regex::Regex;
use std::sync::LazyLock;

static DISPLAY_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\\\[(.*)\\\]").expect("valid display math regex"));
static DOUBLE_DOLLARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\$\$(.*)\$\$").expect("valid dollar math regex"));
static INLINE_PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\\\((.*)\\\)").expect("valid inline math regex"));

/// Unicode operators that become LaTeX commands
fn operator_command(c: char) -> Option<&'static str> {
    match c {
        '×' => Some(r"\times"),
        '·' => Some(r"\cdot"),
        '∑' => Some(r"\sum"),
        '≤' => Some(r"\leq"),
        '≥' => Some(r"\geq"),
        '≠' => Some(r"\neq"),
        '≈' => Some(r"\approx"),
        _ => None,
    }
}

/// Unicode characters that map onto a plain ASCII character
fn ascii_substitute(c: char) -> Option<char> {
    match c {
        '−' => Some('-'),
        'ˆ' => Some('^'),
        _ => None,
    }
}

/// Normalise a hand-typed formula into LaTeX math
///
/// Greek letters and common operators typed as Unicode become commands;
/// a backslash not followed by a letter is dropped; only printable ASCII
/// survives. Input that is already ASCII LaTeX comes back unchanged apart
/// from whitespace collapsing.
pub fn normalize_equation(raw: &str) -> String {
    let text = strip_invisible(raw)
        .replace("\\𝑝𝑖", "π")
        .replace("𝑝𝑖", "π");

    // Map Unicode to commands; a command directly followed by a letter gets a
    // separator so `πr` does not turn into `\pir`.
    let mut mapped = String::with_capacity(text.len());
    let mut separator: Option<&str> = None;
    for c in text.chars() {
        if let Some(sep) = separator.take() {
            if c.is_ascii_alphabetic() {
                mapped.push_str(sep);
            }
        }
        if let Some(command) = greek_command(c).or_else(|| operator_command(c)) {
            mapped.push_str(command);
            separator = Some(if matches!(c, '×' | '·') { " " } else { "{}" });
        } else if let Some(ascii) = ascii_substitute(c) {
            mapped.push(ascii);
        } else {
            mapped.push(c);
        }
    }

    let collapsed = mapped.split_whitespace().collect::<Vec<_>>().join(" ");
    drop_stray_backslashes(&collapsed).trim().to_string()
}

/// Keep `\command` sequences, drop lone backslashes and non-printable chars
fn drop_stray_backslashes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if chars.peek().is_some_and(|n| n.is_ascii_alphabetic()) {
                out.push('\\');
            }
            continue;
        }
        if (' '..='~').contains(&c) {
            out.push(c);
        }
    }

    out
}

/// Unwrap a converter's LaTeX output: `\[..\]`, `$$..$$` or `\(..\)`
///
/// Returns `None` when no wrapper is present or the math is empty.
pub fn extract_wrapped_math(fragment: &str) -> Option<String> {
    let fragment = fragment.trim();
    [&DISPLAY_BRACKETS, &DOUBLE_DOLLARS, &INLINE_PARENS]
        .into_iter()
        .find_map(|regex| regex.captures(fragment))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|inner| !inner.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_formula_unchanged() {
        for formula in [
            "F = m a",
            r"\frac{1}{2} m v^2 + \sqrt{x_1}",
            r"\omega_n = \sqrt{k/m}",
            r"E = mc^{2}",
        ] {
            assert_eq!(normalize_equation(formula), formula);
        }
    }

    #[test]
    fn test_unicode_greek_and_operators() {
        assert_eq!(normalize_equation("ω = 2πf"), r"\omega = 2\pi{}f");
        assert_eq!(normalize_equation("a×b"), r"a\times b");
        assert_eq!(normalize_equation("x ≤ 5 − y"), r"x \leq 5 - y");
        assert_eq!(normalize_equation("Δ x"), r"\Delta x");
    }

    #[test]
    fn test_math_italic_pi() {
        assert_eq!(normalize_equation("2𝑝𝑖 r"), r"2\pi r");
    }

    #[test]
    fn test_stray_backslash_and_invisible_dropped() {
        // Arrange: `\,` spacing, a zero-width space and a control char
        let raw = "a\\, b\u{200B}\u{0007} + c\\";

        // Act
        let normalized = normalize_equation(raw);

        // Assert
        assert_eq!(normalized, "a, b + c");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(normalize_equation("  x \n=\t 1 "), "x = 1");
    }

    #[test]
    fn test_extract_wrapped_math_shapes() {
        assert_eq!(extract_wrapped_math(r"\[ x^2 \]"), Some("x^2".to_string()));
        assert_eq!(extract_wrapped_math("$$\ny = 1\n$$"), Some("y = 1".to_string()));
        assert_eq!(extract_wrapped_math(r"\(a+b\)"), Some("a+b".to_string()));
    }

    #[test]
    fn test_extract_rejects_bare_or_empty() {
        assert_eq!(extract_wrapped_math("x^2"), None);
        assert_eq!(extract_wrapped_math(r"\[ \]"), None);
        assert_eq!(extract_wrapped_math(""), None);
    }
}
