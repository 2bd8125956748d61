mod builder;
mod classifier;
mod error;
mod inference;
mod interpret;
mod preprocess;
mod session;
mod vocabulary;

pub use builder::ClassifierBuilder;
pub use classifier::Classifier;
pub use error::ClassifierError;
pub use interpret::{resolve_label, select_top1, softmax, ScoreInterpreter};
pub use preprocess::{ImagePreprocessor, InputTensor};
pub use session::ModelSession;
pub use vocabulary::{LabelVocabulary, UNRECOGNIZED_LABEL};

use serde::Serialize;

/// The outcome of classifying one image.
///
/// `label` is either one vocabulary entry or the `"Unrecognized"` sentinel.
/// The result is created fresh per call and never retained by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// The predicted letterform label
    pub label: String,
    /// Probability mass assigned to the top class after softmax, in [0, 1].
    /// `None` when no class could be selected at all.
    pub confidence: Option<f32>,
    /// Index of the predicted class in the vocabulary.
    /// `None` when the label is the `"Unrecognized"` sentinel.
    pub class_index: Option<usize>,
}

/// Information about the current state and configuration of a classifier
#[derive(Debug, Clone)]
pub struct ClassifierInfo {
    /// Path to the ONNX model file
    pub model_path: String,
    /// Path to the label vocabulary file
    pub vocabulary_path: String,
    /// Number of classes the classifier is trained on
    pub num_classes: usize,
    /// Labels of the classes, in model output order
    pub class_labels: Vec<String>,
    /// Input plane dimensions as (height, width)
    pub input_shape: (u32, u32),
    /// Configured minimum-confidence floor, if any
    pub min_confidence: Option<f32>,
}
