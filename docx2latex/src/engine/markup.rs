//! LaTeX markup emitters

use crate::document::Table;
use crate::equations::EquationBody;
use crate::markers::MediaKind;
use crate::text::{clean_line, escape_latex, prose};

/// Figure width as a fraction of `\textwidth`
pub fn figure_width(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Figure => "0.5",
        MediaKind::Plot => "0.7",
    }
}

/// Section heading with its TOC anchor
pub fn heading_lines(number: usize, title: &str) -> Vec<String> {
    vec![
        r"\clearpage".to_string(),
        r"\phantomsection".to_string(),
        format!(r"\label{{sec:{number}}}"),
        format!(r"\section*{{{}}}", escape_latex(&format!("{number}. {title}"))),
    ]
}

/// Floating figure; the caption is already formatted
pub fn figure_lines(link: &str, kind: MediaKind, caption: Option<&str>) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        r"\begin{figure}[H]".to_string(),
        r"  \centering".to_string(),
        format!(
            r"  \includegraphics[width={}\textwidth]{{{link}}}",
            figure_width(kind)
        ),
    ];
    if let Some(caption) = caption {
        lines.push(format!(r"  \caption*{{{}}}", prose(caption)));
    }
    lines.push(r"\end{figure}".to_string());
    lines.push(String::new());
    lines
}

/// Floating table with a `tabularx` body; header row in bold
pub fn table_lines(table: &Table, caption: &str) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        r"\begin{table}[H]".to_string(),
        r"  \centering".to_string(),
        format!(r"  \caption*{{{}}}", prose(caption)),
    ];

    let columns = table.column_count();
    if columns > 0 {
        let colspec = format!(
            "|{}|",
            vec![r">{\centering\arraybackslash}X"; columns].join("|")
        );
        lines.push(r"  \fontsize{12}{10}\selectfont".to_string());
        lines.push(r"  \setlength{\tabcolsep}{5pt}".to_string());
        lines.push(format!(r"  \begin{{tabularx}}{{\textwidth}}{{{colspec}}}"));
        lines.push(r"  \hline".to_string());

        for (r, row) in table.rows.iter().enumerate() {
            let cells = row
                .iter()
                .take(columns)
                .map(|cell| {
                    let text = prose(&clean_line(&cell.replace('\n', " ")));
                    if r == 0 {
                        format!(r"\textbf{{{text}}}")
                    } else {
                        text
                    }
                })
                .collect::<Vec<_>>();
            lines.push(format!(r"   {} \\", cells.join(" & ")));
            lines.push(r"  \hline".to_string());
        }

        lines.push(r"  \end{tabularx}".to_string());
    }

    lines.push(r"\end{table}".to_string());
    lines.push(String::new());
    lines
}

/// Body line of an equation environment
pub fn equation_body_line(body: &EquationBody) -> String {
    match body {
        EquationBody::Formula(formula) => formula.clone(),
        EquationBody::Image(link) => {
            format!(r"\makebox[\linewidth]{{\includegraphics[height=1.2cm]{{{link}}}}}")
        }
        EquationBody::Failed { .. } => r"\text{[Equation rendering failed]}".to_string(),
    }
}

/// Numbered equation environment (without the closing `\par`)
pub fn equation_lines(number: usize, body_line: String) -> Vec<String> {
    vec![
        r"\begin{equation}".to_string(),
        format!(r"\tag{{{number}}}"),
        body_line,
        r"\end{equation}".to_string(),
    ]
}
