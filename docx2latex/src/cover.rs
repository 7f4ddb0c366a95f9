//! Cover page generation
//!
//! Fills `<<KEY>>` placeholders of a LaTeX cover template with the locale's
//! labels and the values of a TOML info file. This never touches the
//! conversion engine.
//!
//! Recognised placeholders:
//!
//! | Key | Value |
//! |-----|-------|
//! | `UNIVERSITY_NAME` | `university` from the info file |
//! | `DEPARTMENT_NAME`, `REPORT_TYPE`, `PREPARED_BY`, `NAME_SURNAME`, `STUDENT_ID`, `SUBMISSION_DATE_LABEL` | locale labels |
//! | `LOGO_PATH` | `assets/logo_<lang>.png` |
//! | `COURSE_CODE`, `EXPERIMENT_TITLE`, `SUBMISSION_DATE` | info file values |
//! | `MEMBER_TABLE` | one `name & id \\` row per member |

use crate::locale::Locale;
use crate::text::escape_latex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while generating a cover page
#[derive(Debug, Error)]
pub enum CoverError {
    #[error("Cover template not found: {0}")]
    TemplateMissing(PathBuf),

    #[error("Logo file not found: {0} (expected assets/logo_tr.png and assets/logo_en.png)")]
    LogoMissing(PathBuf),

    #[error("Cover info has no group members")]
    NoMembers,

    #[error("Failed to access {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse cover info: {0}")]
    Parse(#[from] toml::de::Error),
}

/// One group member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Full name
    pub name: String,
    /// Student number
    pub id: String,
}

/// User-supplied cover values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverInfo {
    #[serde(default)]
    pub language: Locale,
    #[serde(default)]
    pub university: String,
    pub course_code: String,
    pub experiment_title: String,
    pub submission_date: String,
    pub members: Vec<Member>,
}

impl CoverInfo {
    /// Load cover values from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CoverError> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| CoverError::Io(path.to_path_buf(), e))?;
        let info: CoverInfo = toml::from_str(&content)?;
        Ok(info)
    }

    /// Member rows for the `MEMBER_TABLE` placeholder
    pub fn member_table(&self) -> String {
        self.members
            .iter()
            .map(|m| format!(r"{} & {} \\", escape_latex(m.name.trim()), escape_latex(m.id.trim())))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Logo link for a language, relative to the template directory
pub fn logo_path(language: Locale) -> String {
    format!("assets/logo_{}.png", language.code())
}

/// Substitute every placeholder of `template`
pub fn fill_template(template: &str, info: &CoverInfo) -> String {
    let labels = &info.language.table().cover;
    let escaped = |s: &str| escape_latex(s.trim());

    let replacements = [
        ("UNIVERSITY_NAME", escaped(&info.university)),
        ("DEPARTMENT_NAME", escaped(labels.department_name)),
        ("REPORT_TYPE", escaped(labels.report_type)),
        ("PREPARED_BY", escaped(labels.prepared_by)),
        ("NAME_SURNAME", escaped(labels.name_surname)),
        ("STUDENT_ID", escaped(labels.student_id)),
        ("SUBMISSION_DATE_LABEL", escaped(labels.submission_date)),
        ("LOGO_PATH", escaped(&logo_path(info.language))),
        ("COURSE_CODE", escaped(&info.course_code)),
        ("EXPERIMENT_TITLE", escaped(&info.experiment_title)),
        ("SUBMISSION_DATE", escaped(&info.submission_date)),
        ("MEMBER_TABLE", info.member_table()),
    ];

    replacements
        .iter()
        .fold(template.to_string(), |filled, (key, value)| {
            filled.replace(&format!("<<{key}>>"), value)
        })
}

/// Generate a cover page next to its template
///
/// # Parameters
/// * `template` - LaTeX template with `<<KEY>>` placeholders
/// * `info` - Cover values
/// * `output` - Where to write the filled template
///
/// # Returns
/// * `Ok(String)` - The logo link that was used
/// * `Err(CoverError)` - Template or logo missing, or the output could not be written
pub fn generate_cover(template: &Path, info: &CoverInfo, output: &Path) -> Result<String, CoverError> {
    if !template.is_file() {
        return Err(CoverError::TemplateMissing(template.to_path_buf()));
    }
    if info.members.is_empty() {
        return Err(CoverError::NoMembers);
    }

    let logo = logo_path(info.language);
    let base = template.parent().unwrap_or_else(|| Path::new("."));
    let logo_file = base.join(&logo);
    if !logo_file.is_file() {
        return Err(CoverError::LogoMissing(logo_file));
    }

    let content =
        fs::read_to_string(template).map_err(|e| CoverError::Io(template.to_path_buf(), e))?;
    let filled = fill_template(&content, info);
    fs::write(output, filled).map_err(|e| CoverError::Io(output.to_path_buf(), e))?;

    log::info!("Cover written to {} (logo {})", output.display(), logo);
    Ok(logo)
}
