use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::foundation::error::{SharecardError, SharecardResult};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Fixed inputs of a [`crate::CompositionEngine`].
///
/// The engine never reads process-wide state; everything it touches on disk is named here or in
/// the layout descriptor it is asked to render.
pub struct EngineConfig {
    /// Directory receiving `<output_key>.png` files.
    pub output: PathBuf,
    /// Background template image.
    pub template: PathBuf,
    /// Base directory for relative image and font paths. `None` leaves them relative to the
    /// caller's working directory.
    #[serde(default)]
    pub asset_root: Option<PathBuf>,
}

impl EngineConfig {
    /// Build a config without an asset root.
    pub fn new(output: impl Into<PathBuf>, template: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            template: template.into(),
            asset_root: None,
        }
    }

    /// Set the directory relative asset paths resolve against.
    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.asset_root = Some(root.into());
        self
    }

    /// Read a config from a JSON file.
    pub fn from_json_file(path: &Path) -> SharecardResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open engine config '{}'", path.display()))?;
        serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            SharecardError::serde(format!("parse engine config '{}': {e}", path.display()))
        })
    }

    /// Resolve an image or font path from a layout descriptor.
    pub fn resolve_asset(&self, source: &str) -> PathBuf {
        let p = Path::new(source);
        match &self.asset_root {
            Some(root) if p.is_relative() => root.join(p),
            _ => p.to_path_buf(),
        }
    }

    /// Final artifact path for an output key.
    pub fn output_path_for(&self, output_key: &str) -> PathBuf {
        self.output.join(format!("{output_key}.png"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
