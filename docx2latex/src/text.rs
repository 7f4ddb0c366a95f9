//! Text clean-up and LaTeX escaping helpers
//!
//! Word documents carry invisible formatting characters, non-breaking spaces
//! and manual line breaks that must be normalised before any marker or
//! caption matching happens. Everything in this module is pure.

/// Greek letters mapped to their LaTeX commands
///
/// Shared by the prose path (wrapped in inline math) and the equation
/// normaliser (inserted verbatim).
pub const GREEK_COMMANDS: &[(char, &str)] = &[
    ('α', r"\alpha"),
    ('β', r"\beta"),
    ('γ', r"\gamma"),
    ('δ', r"\delta"),
    ('Δ', r"\Delta"),
    ('ε', r"\epsilon"),
    ('ϵ', r"\varepsilon"),
    ('ζ', r"\zeta"),
    ('η', r"\eta"),
    ('θ', r"\theta"),
    ('Θ', r"\Theta"),
    ('ι', r"\iota"),
    ('κ', r"\kappa"),
    ('λ', r"\lambda"),
    ('Λ', r"\Lambda"),
    ('μ', r"\mu"),
    ('ν', r"\nu"),
    ('ξ', r"\xi"),
    ('Ξ', r"\Xi"),
    ('π', r"\pi"),
    ('Π', r"\Pi"),
    ('ρ', r"\rho"),
    ('σ', r"\sigma"),
    ('Σ', r"\Sigma"),
    ('τ', r"\tau"),
    ('φ', r"\phi"),
    ('Φ', r"\Phi"),
    ('ϕ', r"\varphi"),
    ('χ', r"\chi"),
    ('ψ', r"\psi"),
    ('Ψ', r"\Psi"),
    ('ω', r"\omega"),
    ('Ω', r"\Omega"),
];

/// Look up the LaTeX command for a Greek letter
pub fn greek_command(c: char) -> Option<&'static str> {
    GREEK_COMMANDS
        .iter()
        .find(|(letter, _)| *letter == c)
        .map(|(_, command)| *command)
}

/// Check whether a character is an invisible Unicode format character
///
/// Covers the format (Cf) characters Word and PDF copy-paste leave behind:
/// soft hyphen, zero-width space/joiners, bidi controls, word joiner and BOM.
fn is_format_char(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}'
            | '\u{0600}'..='\u{0605}'
            | '\u{061C}'
            | '\u{06DD}'
            | '\u{070F}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
    )
}

/// Remove invisible characters and turn non-breaking spaces into spaces
pub fn strip_invisible(s: &str) -> String {
    s.chars()
        .filter(|c| !is_format_char(*c))
        .map(|c| if c == '\u{00A0}' { ' ' } else { c })
        .collect()
}

/// Clean a raw paragraph text into the trimmed line used for matching
pub fn clean_line(s: &str) -> String {
    strip_invisible(s).trim().to_string()
}

/// Split a paragraph containing manual (Shift+Enter) line breaks
///
/// Every line is cleaned and trimmed; empty lines are dropped.
pub fn split_manual_line_breaks(raw: &str) -> Vec<String> {
    raw.lines()
        .map(clean_line)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Escape LaTeX special characters in a single pass
pub fn escape_latex(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '&' => out.push_str(r"\&"),
            '%' => out.push_str(r"\%"),
            '$' => out.push_str(r"\$"),
            '#' => out.push_str(r"\#"),
            '_' => out.push_str(r"\_"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap Greek letters of already-escaped prose in inline math
pub fn greek_to_inline_math(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    for c in escaped.chars() {
        match greek_command(c) {
            Some(command) => {
                out.push_str(r"\(");
                out.push_str(command);
                out.push_str(r"\)");
            }
            None => out.push(c),
        }
    }
    out
}

/// Escape prose for the body: LaTeX escaping followed by Greek mapping
pub fn prose(s: &str) -> String {
    greek_to_inline_math(&escape_latex(s))
}

/// Check whether a line already ends with sentence punctuation
pub fn ends_sentence(s: &str) -> bool {
    s.trim_end()
        .ends_with(['.', '!', '?', ':', ';'])
}
