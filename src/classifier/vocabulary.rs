use std::fs;
use std::path::Path;

use super::error::ClassifierError;

/// Sentinel label returned when the selected class index falls outside the
/// vocabulary, or when a configured confidence floor is not met.
pub const UNRECOGNIZED_LABEL: &str = "Unrecognized";

/// An ordered, index-aligned list of class names.
///
/// Indices are stable and match the classifier's output ordering exactly.
/// The vocabulary is loaded once at session initialization and immutable
/// thereafter; the `"Unrecognized"` sentinel is not an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelVocabulary {
    labels: Vec<String>,
}

impl LabelVocabulary {
    /// Builds a vocabulary from an already-ordered list of labels.
    pub fn from_labels(labels: Vec<String>) -> Result<Self, ClassifierError> {
        if labels.is_empty() {
            return Err(ClassifierError::Initialization(
                "Label vocabulary must not be empty".into(),
            ));
        }
        if let Some(pos) = labels.iter().position(|l| l.is_empty()) {
            return Err(ClassifierError::Initialization(format!(
                "Label at index {} is empty",
                pos
            )));
        }
        Ok(Self { labels })
    }

    /// Loads the vocabulary from a JSON file holding a flat, ordered array
    /// of strings. Any schema deviation (not an array, non-string elements)
    /// fails here instead of at first use.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            ClassifierError::Initialization(format!(
                "Failed to read label file {}: {}",
                path.display(),
                e
            ))
        })?;
        let labels: Vec<String> = serde_json::from_slice(&bytes).map_err(|e| {
            ClassifierError::Initialization(format!(
                "Label file {} is not a flat JSON array of strings: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_labels(labels)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The label at `index`, or `None` when the index is out of bounds.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_labels_preserves_order() {
        let vocabulary = LabelVocabulary::from_labels(vec![
            "Ca_Isolated".to_string(),
            "Ca_Initial".to_string(),
        ])
        .unwrap();
        assert_eq!(vocabulary.len(), 2);
        assert_eq!(vocabulary.label(0), Some("Ca_Isolated"));
        assert_eq!(vocabulary.label(1), Some("Ca_Initial"));
        assert_eq!(vocabulary.label(2), None);
    }

    #[test]
    fn test_empty_vocabulary_rejected() {
        assert!(matches!(
            LabelVocabulary::from_labels(vec![]),
            Err(ClassifierError::Initialization(_))
        ));
    }

    #[test]
    fn test_empty_label_rejected() {
        let result =
            LabelVocabulary::from_labels(vec!["Ca_Isolated".to_string(), String::new()]);
        assert!(matches!(result, Err(ClassifierError::Initialization(_))));
    }
}
