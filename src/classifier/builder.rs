use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::info;

use super::classifier::Classifier;
use super::error::ClassifierError;
use super::interpret::ScoreInterpreter;
use super::preprocess::ImagePreprocessor;
use super::session::ModelSession;
use crate::model_assets::ModelAssets;
use crate::models::BuiltinModel;
use crate::runtime::RuntimeConfig;

/// A builder for constructing a Classifier with a fluent interface.
#[derive(Debug, Default)]
pub struct ClassifierBuilder {
    model_path: Option<PathBuf>,
    vocabulary_path: Option<PathBuf>,
    session: Option<Arc<ModelSession>>,
    runtime_config: RuntimeConfig,
    min_confidence: Option<f32>,
}

impl ClassifierBuilder {
    /// Creates a new empty ClassifierBuilder instance with default
    /// configuration.
    pub fn new() -> Self {
        Self {
            model_path: None,
            vocabulary_path: None,
            session: None,
            runtime_config: RuntimeConfig::default(),
            min_confidence: None,
        }
    }

    /// Sets the runtime configuration for ONNX model execution.
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Resolves a built-in model from the installed asset bundle.
    ///
    /// # Errors
    /// Fails if the model paths are already set, if the assets are not
    /// installed, or if the model artifact fails digest verification.
    pub fn with_model(mut self, model: BuiltinModel) -> Result<Self, ClassifierError> {
        self.ensure_source_unset()?;

        let assets = ModelAssets::new_default().map_err(|e| {
            ClassifierError::Initialization(format!("Failed to resolve assets directory: {}", e))
        })?;

        if !assets.is_installed(model) {
            return Err(ClassifierError::Initialization(format!(
                "Model '{:?}' is not installed under {}. Install the asset bundle first.",
                model,
                assets.assets_dir().display()
            )));
        }

        assets.verify_model(model)?;

        self.model_path = Some(assets.model_path(model));
        self.vocabulary_path = Some(assets.labels_path(model));
        Ok(self)
    }

    /// Sets explicit model and vocabulary paths instead of a built-in model.
    ///
    /// # Errors
    /// Fails if either path is empty, the paths are already set, or either
    /// file does not exist.
    pub fn with_model_files<P: AsRef<Path>, Q: AsRef<Path>>(
        mut self,
        model_path: P,
        vocabulary_path: Q,
    ) -> Result<Self, ClassifierError> {
        let model_path = model_path.as_ref();
        let vocabulary_path = vocabulary_path.as_ref();

        if model_path.as_os_str().is_empty() || vocabulary_path.as_os_str().is_empty() {
            return Err(ClassifierError::Initialization(
                "Model and vocabulary paths cannot be empty".to_string(),
            ));
        }
        self.ensure_source_unset()?;

        if !model_path.exists() {
            return Err(ClassifierError::Initialization(format!(
                "Model file not found: {}",
                model_path.display()
            )));
        }
        if !vocabulary_path.exists() {
            return Err(ClassifierError::Initialization(format!(
                "Vocabulary file not found: {}",
                vocabulary_path.display()
            )));
        }

        self.model_path = Some(model_path.to_path_buf());
        self.vocabulary_path = Some(vocabulary_path.to_path_buf());
        Ok(self)
    }

    /// Uses an externally owned session instead of loading one. The session
    /// is initialized during [`build`](ClassifierBuilder::build) if it is
    /// not Ready yet.
    pub fn with_session(mut self, session: Arc<ModelSession>) -> Result<Self, ClassifierError> {
        self.ensure_source_unset()?;
        self.session = Some(session);
        Ok(self)
    }

    /// Sets a minimum-confidence floor. When the top class scores below it,
    /// the classifier reports `"Unrecognized"` while still carrying the
    /// measured confidence. By default no floor is applied and the best
    /// guess is always returned.
    pub fn with_min_confidence(mut self, threshold: f32) -> Result<Self, ClassifierError> {
        ScoreInterpreter::validate_threshold(threshold)?;
        self.min_confidence = Some(threshold);
        Ok(self)
    }

    /// Builds and returns the final Classifier instance.
    ///
    /// The session is initialized here; the returned classifier is Ready and
    /// can classify immediately.
    ///
    /// # Errors
    /// Fails if no model source was set, or if loading the model artifact or
    /// the label vocabulary fails.
    pub fn build(self) -> Result<Classifier, ClassifierError> {
        let session = match (self.session, self.model_path, self.vocabulary_path) {
            (Some(session), _, _) => session,
            (None, Some(model_path), Some(vocabulary_path)) => Arc::new(ModelSession::new(
                model_path,
                vocabulary_path,
                self.runtime_config,
            )),
            _ => {
                return Err(ClassifierError::Initialization(
                    "A model must be set before building".to_string(),
                ))
            }
        };

        session.initialize()?;
        info!("Classifier built; session ready");

        Ok(Classifier::from_parts(
            session,
            ImagePreprocessor::new(),
            ScoreInterpreter::new(self.min_confidence),
        ))
    }

    fn ensure_source_unset(&self) -> Result<(), ClassifierError> {
        if self.model_path.is_some() || self.vocabulary_path.is_some() || self.session.is_some() {
            return Err(ClassifierError::Initialization(
                "Model source already set".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_without_model_fails() {
        let result = ClassifierBuilder::new().build();
        assert!(matches!(result, Err(ClassifierError::Initialization(_))));
    }

    #[test]
    fn test_missing_model_file_rejected() {
        let result = ClassifierBuilder::new()
            .with_model_files("/nonexistent/model.onnx", "/nonexistent/labels.json");
        assert!(matches!(result, Err(ClassifierError::Initialization(_))));
    }

    #[test]
    fn test_empty_paths_rejected() {
        let result = ClassifierBuilder::new().with_model_files("", "");
        assert!(matches!(result, Err(ClassifierError::Initialization(_))));
    }

    #[test]
    fn test_invalid_min_confidence_rejected() {
        assert!(ClassifierBuilder::new().with_min_confidence(1.2).is_err());
        assert!(ClassifierBuilder::new().with_min_confidence(0.4).is_ok());
    }
}
