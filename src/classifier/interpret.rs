use super::error::ClassifierError;
use super::vocabulary::{LabelVocabulary, UNRECOGNIZED_LABEL};
use super::Classification;

/// Converts a vector of raw logits into a probability distribution.
///
/// The maximum logit is subtracted before exponentiating, so the result is
/// identical for any constant shift of the input and never overflows for
/// realistic logit ranges.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    if logits.is_empty() {
        return Vec::new();
    }
    let max_val = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let mut exps = Vec::with_capacity(logits.len());
    let mut sum = 0.0;
    for v in logits {
        let e = (v - max_val).exp();
        exps.push(e);
        sum += e;
    }
    if sum <= 0.0 {
        return vec![0.0; logits.len()];
    }
    exps.iter().map(|e| e / sum).collect()
}

/// Argmax over the probability vector, returning the winning index and its
/// probability. Ties break to the lowest index: a later element only wins
/// with a strictly greater value.
pub fn select_top1(probabilities: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (index, &p) in probabilities.iter().enumerate() {
        match best {
            Some((_, best_p)) if p <= best_p => {}
            _ => best = Some((index, p)),
        }
    }
    best
}

/// Maps a selected class index to its vocabulary entry. An index outside the
/// vocabulary yields the `"Unrecognized"` sentinel instead of an error; a
/// stale model emitting extra classes is a normal (if rare) outcome, not a
/// failure.
pub fn resolve_label(vocabulary: &LabelVocabulary, index: usize) -> String {
    vocabulary
        .label(index)
        .unwrap_or(UNRECOGNIZED_LABEL)
        .to_string()
}

/// Decodes a raw score vector into the final [`Classification`].
///
/// With no confidence floor configured the top-scoring class is always
/// returned, however low its probability; only an out-of-vocabulary index
/// produces the sentinel.
#[derive(Debug, Clone, Default)]
pub struct ScoreInterpreter {
    min_confidence: Option<f32>,
}

impl ScoreInterpreter {
    pub fn new(min_confidence: Option<f32>) -> Self {
        Self { min_confidence }
    }

    pub fn min_confidence(&self) -> Option<f32> {
        self.min_confidence
    }

    /// Validates that a confidence floor is a probability.
    pub fn validate_threshold(threshold: f32) -> Result<(), ClassifierError> {
        if !(0.0..=1.0).contains(&threshold) || !threshold.is_finite() {
            return Err(ClassifierError::Initialization(format!(
                "Minimum confidence must be within [0, 1], got {}",
                threshold
            )));
        }
        Ok(())
    }

    pub fn interpret(
        &self,
        scores: &[f32],
        vocabulary: &LabelVocabulary,
    ) -> Classification {
        let probabilities = softmax(scores);
        let Some((index, confidence)) = select_top1(&probabilities) else {
            return Classification {
                label: UNRECOGNIZED_LABEL.to_string(),
                confidence: None,
                class_index: None,
            };
        };

        match vocabulary.label(index) {
            None => Classification {
                label: UNRECOGNIZED_LABEL.to_string(),
                confidence: None,
                class_index: None,
            },
            Some(label) => {
                if let Some(floor) = self.min_confidence {
                    if confidence < floor {
                        log::info!(
                            "Top class '{}' at {:.3} below confidence floor {:.3}",
                            label,
                            confidence,
                            floor
                        );
                        return Classification {
                            label: UNRECOGNIZED_LABEL.to_string(),
                            confidence: Some(confidence),
                            class_index: None,
                        };
                    }
                }
                Classification {
                    label: label.to_string(),
                    confidence: Some(confidence),
                    class_index: Some(index),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_softmax_sums_to_one() {
        let probabilities = softmax(&[1.0, 2.0, 3.0, 4.0]);
        let sum: f32 = probabilities.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!(probabilities.iter().all(|&p| p > 0.0 && p <= 1.0));
    }

    #[test]
    fn test_softmax_empty() {
        assert!(softmax(&[]).is_empty());
    }

    #[test]
    fn test_top1_tie_breaks_to_lowest_index() {
        let (index, _) = select_top1(&[0.2, 0.4, 0.4]).unwrap();
        assert_eq!(index, 1);
    }

    #[test]
    fn test_resolve_label_out_of_bounds() {
        let vocabulary =
            LabelVocabulary::from_labels(vec!["Ca_Isolated".to_string()]).unwrap();
        assert_eq!(resolve_label(&vocabulary, 0), "Ca_Isolated");
        assert_eq!(resolve_label(&vocabulary, 7), UNRECOGNIZED_LABEL);
    }

    #[test]
    fn test_threshold_validation() {
        assert!(ScoreInterpreter::validate_threshold(0.0).is_ok());
        assert!(ScoreInterpreter::validate_threshold(1.0).is_ok());
        assert!(ScoreInterpreter::validate_threshold(-0.1).is_err());
        assert!(ScoreInterpreter::validate_threshold(1.5).is_err());
        assert!(ScoreInterpreter::validate_threshold(f32::NAN).is_err());
    }
}
