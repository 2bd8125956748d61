//! Metadata for the classifier models bundled with the application.

/// The set of models this crate knows how to load from an asset bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinModel {
    /// Convolutional classifier over the six Jawi-specific letters
    /// (Ca, Ga, Nga, Nya, Pa, Va) in their positional forms.
    JawiLetterNet,
}

/// Static facts about a model's input and output contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCharacteristics {
    /// Height of the model's input plane in pixels
    pub input_height: u32,
    /// Width of the model's input plane in pixels
    pub input_width: u32,
    /// Number of classes in the model's output vector
    pub num_classes: usize,
    /// Approximate size of the model artifact on disk
    pub model_size_mb: usize,
}

/// File-layout information for locating a model inside an asset bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    /// Directory name of the model inside the assets directory
    pub name: &'static str,
    /// File name of the ONNX artifact
    pub model_file: &'static str,
    /// File name of the label vocabulary (ordered JSON array of strings)
    pub labels_file: &'static str,
}

impl BuiltinModel {
    pub fn characteristics(&self) -> ModelCharacteristics {
        match self {
            BuiltinModel::JawiLetterNet => ModelCharacteristics {
                input_height: 224,
                input_width: 224,
                num_classes: 22,
                model_size_mb: 9,
            },
        }
    }

    pub fn info(&self) -> ModelInfo {
        match self {
            BuiltinModel::JawiLetterNet => ModelInfo {
                name: "jawi-letternet",
                model_file: "model.onnx",
                labels_file: "labels.json",
            },
        }
    }
}
