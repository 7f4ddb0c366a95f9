//! Backing asset lookup for `image{N}` and `plot{N}` files

use crate::config::AssetsConfig;
use crate::markers::MediaKind;
use std::path::{Path, PathBuf};

/// Finds externally numbered image and plot files
#[derive(Debug, Clone)]
pub struct AssetResolver {
    base_dir: PathBuf,
    config: AssetsConfig,
}

impl AssetResolver {
    /// Create a resolver rooted at the document's directory
    pub fn new(base_dir: &Path, config: &AssetsConfig) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            config: config.clone(),
        }
    }

    /// File stem for an asset (`image3`, `plot1`)
    pub fn stem(kind: MediaKind, index: usize) -> String {
        match kind {
            MediaKind::Figure => format!("image{index}"),
            MediaKind::Plot => format!("plot{index}"),
        }
    }

    /// Candidate links in lookup order: directories first, then extensions
    pub fn candidates(&self, kind: MediaKind, index: usize) -> Vec<String> {
        let dirs = match kind {
            MediaKind::Figure => &self.config.image_dirs,
            MediaKind::Plot => &self.config.plot_dirs,
        };
        let stem = Self::stem(kind, index);

        dirs.iter()
            .flat_map(|dir| {
                let dir = dir.trim_end_matches(['/', '\\']).replace('\\', "/");
                let stem = &stem;
                self.config.extensions.iter().map(move |ext| {
                    if dir.is_empty() || dir == "." {
                        format!("{stem}.{ext}")
                    } else {
                        format!("{dir}/{stem}.{ext}")
                    }
                })
            })
            .collect()
    }

    /// Resolve the first existing asset; returns the link relative to the document
    pub fn resolve(&self, kind: MediaKind, index: usize) -> Option<String> {
        let found = self
            .candidates(kind, index)
            .into_iter()
            .find(|link| self.base_dir.join(link).is_file());
        if found.is_none() {
            log::debug!(
                "No {} file found under {}",
                Self::stem(kind, index),
                self.base_dir.display()
            );
        }
        found
    }
}
