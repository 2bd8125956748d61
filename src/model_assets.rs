//! Location and verification of the bundled model assets.
//!
//! The classifier works fully offline: the ONNX artifact and its label
//! vocabulary are installed into an assets directory ahead of time (by the
//! application installer or a packaging step) and only resolved by path here.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::models::BuiltinModel;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Model assets not installed: {0}")]
    NotInstalled(String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Hash mismatch: expected {expected}, got {actual} for model artifact")]
    HashMismatch { expected: String, actual: String },
}

/// Resolves the on-disk locations of a model's artifact and label file.
#[derive(Debug, Clone)]
pub struct ModelAssets {
    assets_dir: PathBuf,
}

impl ModelAssets {
    /// Creates a `ModelAssets` rooted at the default assets directory.
    pub fn new_default() -> io::Result<Self> {
        Self::new(Self::default_assets_dir())
    }

    /// Returns the default assets directory path.
    pub fn default_assets_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var("HURUF_ASSETS") {
            return PathBuf::from(path);
        }

        // 2. Use platform-specific cache directory
        if let Some(cache_dir) = dirs::cache_dir() {
            return cache_dir.join("huruf").join("assets");
        }

        // 3. Fallback to user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".cache").join("huruf").join("assets");
        }

        // 4. If all else fails, use system temp directory (platform agnostic)
        env::temp_dir().join("huruf").join("assets")
    }

    pub fn new<P: AsRef<Path>>(assets_dir: P) -> io::Result<Self> {
        let assets_dir = assets_dir.as_ref().to_path_buf();
        fs::create_dir_all(&assets_dir)?;
        Ok(Self { assets_dir })
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    pub fn model_path(&self, model: BuiltinModel) -> PathBuf {
        let info = model.info();
        self.assets_dir.join(info.name).join(info.model_file)
    }

    pub fn labels_path(&self, model: BuiltinModel) -> PathBuf {
        let info = model.info();
        self.assets_dir.join(info.name).join(info.labels_file)
    }

    /// Whether both the model artifact and the label file are present.
    pub fn is_installed(&self, model: BuiltinModel) -> bool {
        let model_path = self.model_path(model);
        let labels_path = self.labels_path(model);
        log::info!("Checking installed assets:");
        log::info!("  Model path: {:?} (exists: {})", model_path, model_path.exists());
        log::info!("  Labels path: {:?} (exists: {})", labels_path, labels_path.exists());
        model_path.exists() && labels_path.exists()
    }

    /// Verifies the model artifact against its SHA-256 sidecar file
    /// (`model.onnx.sha256`, first whitespace-separated token).
    ///
    /// Returns `Ok(false)` when no sidecar is present; packaging without a
    /// digest skips verification rather than failing it.
    pub fn verify_model(&self, model: BuiltinModel) -> Result<bool, AssetError> {
        let model_path = self.model_path(model);
        if !model_path.exists() {
            return Err(AssetError::NotInstalled(format!(
                "model artifact not found at {}",
                model_path.display()
            )));
        }

        let sidecar = sidecar_path(&model_path);
        if !sidecar.exists() {
            log::warn!(
                "No digest sidecar at {:?}; skipping model verification",
                sidecar
            );
            return Ok(false);
        }

        let contents = fs::read_to_string(&sidecar)?;
        let expected = contents
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        let actual = file_digest(&model_path)?;
        log::info!("Calculated hash: {}", actual);
        log::info!("Expected hash:   {}", expected);

        if actual != expected {
            return Err(AssetError::HashMismatch { expected, actual });
        }
        Ok(true)
    }
}

fn sidecar_path(model_path: &Path) -> PathBuf {
    let mut file_name = model_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    file_name.push(".sha256");
    model_path.with_file_name(file_name)
}

fn file_digest(path: &Path) -> Result<String, AssetError> {
    let bytes = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_assets_dir() {
        // Test with environment variable
        env::set_var("HURUF_ASSETS", "/tmp/test-huruf-assets");
        let path = ModelAssets::default_assets_dir();
        assert!(path.to_str().unwrap().contains("/tmp/test-huruf-assets"));
        env::remove_var("HURUF_ASSETS");

        // Test without environment variable
        let path = ModelAssets::default_assets_dir();
        assert!(path.to_str().unwrap().contains("huruf"));
    }

    #[test]
    fn test_asset_paths() {
        let assets = ModelAssets::new("/tmp/test-huruf/assets").unwrap();
        let model_path = assets.model_path(BuiltinModel::JawiLetterNet);
        let labels_path = assets.labels_path(BuiltinModel::JawiLetterNet);
        assert!(model_path.ends_with("jawi-letternet/model.onnx"));
        assert!(labels_path.ends_with("jawi-letternet/labels.json"));
    }

    #[test]
    fn test_verify_model_with_sidecar() -> Result<(), AssetError> {
        let dir = env::temp_dir().join("huruf-verify-test").join("jawi-letternet");
        fs::create_dir_all(&dir)?;
        let model_path = dir.join("model.onnx");
        fs::write(&model_path, b"not a real model")?;

        let assets = ModelAssets::new(env::temp_dir().join("huruf-verify-test"))?;

        // No sidecar: verification is skipped, not failed
        let sidecar = dir.join("model.onnx.sha256");
        if sidecar.exists() {
            fs::remove_file(&sidecar)?;
        }
        assert!(!assets.verify_model(BuiltinModel::JawiLetterNet)?);

        // Matching sidecar
        let digest = file_digest(&model_path)?;
        fs::write(&sidecar, format!("{}  model.onnx\n", digest))?;
        assert!(assets.verify_model(BuiltinModel::JawiLetterNet)?);

        // Corrupted artifact
        fs::write(&model_path, b"corrupted data")?;
        assert!(matches!(
            assets.verify_model(BuiltinModel::JawiLetterNet),
            Err(AssetError::HashMismatch { .. })
        ));

        Ok(())
    }
}
