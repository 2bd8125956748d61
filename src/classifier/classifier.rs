use std::sync::Arc;

use super::builder::ClassifierBuilder;
use super::error::ClassifierError;
use super::interpret::ScoreInterpreter;
use super::preprocess::ImagePreprocessor;
use super::session::ModelSession;
use super::{Classification, ClassifierInfo};

/// A thread-safe Jawi letterform classifier over a loaded ONNX model.
///
/// One [`classify`](Classifier::classify) call is one sequential pipeline:
/// decode, resize, normalize, forward pass, score interpretation. Run it off
/// any interactive thread; the only blocking points are the native calls.
/// The classifier can be shared across threads with `Arc`; the session
/// serializes forward passes internally.
#[derive(Debug)]
pub struct Classifier {
    session: Arc<ModelSession>,
    preprocessor: ImagePreprocessor,
    interpreter: ScoreInterpreter,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Classifier>();
    }
};

impl Classifier {
    /// Creates a new ClassifierBuilder for fluent construction
    pub fn builder() -> ClassifierBuilder {
        ClassifierBuilder::new()
    }

    pub(crate) fn from_parts(
        session: Arc<ModelSession>,
        preprocessor: ImagePreprocessor,
        interpreter: ScoreInterpreter,
    ) -> Self {
        Self {
            session,
            preprocessor,
            interpreter,
        }
    }

    /// The session backing this classifier.
    pub fn session(&self) -> &Arc<ModelSession> {
        &self.session
    }

    /// Returns information about the classifier's current state
    pub fn info(&self) -> Result<ClassifierInfo, ClassifierError> {
        let vocabulary = self.session.vocabulary()?;
        Ok(ClassifierInfo {
            model_path: self.session.model_path().display().to_string(),
            vocabulary_path: self.session.vocabulary_path().display().to_string(),
            num_classes: vocabulary.len(),
            class_labels: vocabulary.labels().to_vec(),
            input_shape: self.preprocessor.input_shape(),
            min_confidence: self.interpreter.min_confidence(),
        })
    }

    /// Classifies one encoded image, returning the predicted letterform
    /// label and its confidence.
    ///
    /// # Arguments
    /// * `image_bytes` - An encoded still image (JPEG, PNG, ...)
    ///
    /// # Example
    /// ```rust,no_run
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # use huruf::{Classifier, BuiltinModel};
    /// # let classifier = Classifier::builder()
    /// #     .with_model(BuiltinModel::JawiLetterNet)?
    /// #     .build()?;
    /// let bytes = std::fs::read("letter.png")?;
    /// let result = classifier.classify(&bytes)?;
    /// println!("{} ({:?})", result.label, result.confidence);
    /// # Ok(())
    /// # }
    /// ```
    pub fn classify(&self, image_bytes: &[u8]) -> Result<Classification, ClassifierError> {
        let tensor = self.preprocessor.process(image_bytes)?;
        let scores = self.session.run(&tensor)?;
        let vocabulary = self.session.vocabulary()?;
        Ok(self.interpreter.interpret(&scores, &vocabulary))
    }
}
