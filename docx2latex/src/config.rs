//! Conversion configuration from docx2latex.toml

use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name looked up next to the input document
pub const CONFIG_FILE_NAME: &str = "docx2latex.toml";

/// Main conversion configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Document language; drives every label and marker vocabulary
    pub language: Locale,

    /// Detection branches that can be switched off
    pub features: Features,

    /// Where backing image and plot files are looked up
    pub assets: AssetsConfig,

    /// Output file names
    pub output: OutputConfig,
}

/// Independent feature toggles
///
/// A disabled feature makes its detection branch fall through instead of
/// erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    /// Inline pictures and figure markers
    pub figures: bool,
    /// Tables and table captions
    pub tables: bool,
    /// Native and `$$` equations
    pub equations: bool,
    /// Numbered reference entries after the bibliography heading
    pub bibliography: bool,
    /// Plot insertion markers
    pub plots: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            figures: true,
            tables: true,
            equations: true,
            bibliography: true,
            plots: true,
        }
    }
}

impl std::fmt::Display for Features {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "figures={}, tables={}, equations={}, bib={}, plots={}",
            self.figures, self.tables, self.equations, self.bibliography, self.plots
        )
    }
}

/// Asset lookup configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directories searched for `image{N}` files, relative to the document
    pub image_dirs: Vec<String>,
    /// Directories searched for `plot{N}` files, relative to the document
    pub plot_dirs: Vec<String>,
    /// Extensions tried, in order of preference
    pub extensions: Vec<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            image_dirs: vec!["assets".to_string(), ".".to_string()],
            plot_dirs: vec!["assets/plots".to_string(), ".".to_string()],
            extensions: vec!["png".to_string(), "jpg".to_string(), "jpeg".to_string()],
        }
    }
}

/// Output file configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Converted body
    pub body_file: String,
    /// Table-of-contents fragment
    pub toc_file: String,
    /// Rendered equation images, relative to the output directory
    pub equations_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            body_file: "content.tex".to_string(),
            toc_file: "toc.tex".to_string(),
            equations_dir: "assets/equations".to_string(),
        }
    }
}

impl ConvertConfig {
    /// Load configuration from a docx2latex.toml file
    ///
    /// # Parameters
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ConvertConfig)` - Loaded configuration (missing keys defaulted)
    /// * `Err(ConfigError)` - Error reading or parsing the file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path).map_err(ConfigError::IoError)?;
        let config: ConvertConfig = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }

    /// Load `docx2latex.toml` from `dir` if it exists, defaults otherwise
    pub fn load_or_default(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            log::info!("Loading configuration from {}", path.display());
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;
        fs::write(&path, content).map_err(ConfigError::IoError)?;
        Ok(())
    }
}

/// Errors that can occur when loading or saving configuration
#[derive(Debug)]
#[allow(clippy::enum_variant_names)]
pub enum ConfigError {
    /// IO error when reading or writing file
    IoError(std::io::Error),

    /// Error parsing TOML
    ParseError(toml::de::Error),

    /// Error serializing to TOML
    SerializeError(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "TOML parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "TOML serialize error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_content = r#"
language = "tr"

[features]
tables = false
"#;

        let config: ConvertConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.language, Locale::Tr);
        assert!(!config.features.tables);
        assert!(config.features.figures);
        assert_eq!(config.assets.plot_dirs, vec!["assets/plots", "."]);
        assert_eq!(config.output.body_file, "content.tex");
    }

    #[test]
    fn test_config_roundtrip() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut config = ConvertConfig::default();
        config.features.plots = false;
        config.assets.extensions = vec!["png".to_string()];

        // Act
        config.save(&path).unwrap();
        let loaded = ConvertConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConvertConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config, ConvertConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "language = [").unwrap();
        assert!(matches!(
            ConvertConfig::load(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_features_display() {
        assert_eq!(
            Features::default().to_string(),
            "figures=true, tables=true, equations=true, bib=true, plots=true"
        );
    }
}
