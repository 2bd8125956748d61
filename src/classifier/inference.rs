use std::collections::HashMap;

use ort::session::Session;
use ort::value::Tensor;

use super::error::ClassifierError;
use super::preprocess::InputTensor;

/// Executes one forward pass and reads back the raw score vector.
///
/// The input tensor always has batch dimension 1 and the output must carry
/// exactly one score per vocabulary entry. All intermediate ONNX values are
/// scoped to this call and released on every exit path.
pub(crate) fn execute(
    session: &mut Session,
    tensor: &InputTensor,
    expected_classes: usize,
) -> Result<Vec<f32>, ClassifierError> {
    let input_name = session
        .inputs()
        .first()
        .map(|input| input.name().to_string())
        .ok_or_else(|| ClassifierError::Inference("Model declares no inputs".into()))?;

    let input_dyn = tensor.view().into_dyn();
    let input_values = input_dyn.as_standard_layout().into_owned();
    let input_tensor = Tensor::from_array(input_values)
        .map_err(|e| ClassifierError::Inference(format!("Failed to create input tensor: {}", e)))?;

    let mut input_tensors = HashMap::new();
    input_tensors.insert(input_name.as_str(), input_tensor);

    let outputs = session.run(input_tensors).map_err(|e| {
        log::error!("Model forward pass failed: {}", e);
        ClassifierError::Inference(format!("Failed to run model: {}", e))
    })?;
    let output_tensor = outputs[0].try_extract_tensor::<f32>().map_err(|e| {
        ClassifierError::Inference(format!("Failed to extract output tensor: {}", e))
    })?;

    let scores: Vec<f32> = output_tensor.1.iter().copied().collect();
    check_output_arity(scores.len(), expected_classes)?;
    Ok(scores)
}

/// A score vector whose length differs from the vocabulary indicates a
/// model/vocabulary version skew and must be surfaced, not truncated.
pub(crate) fn check_output_arity(
    actual: usize,
    expected: usize,
) -> Result<(), ClassifierError> {
    if actual != expected {
        log::error!(
            "Output arity mismatch: {} scores for {} classes",
            actual,
            expected
        );
        return Err(ClassifierError::Inference(format!(
            "Model produced {} scores for a vocabulary of {} classes",
            actual, expected
        )));
    }
    Ok(())
}

/// Validates that the model has the expected single-input, single-output
/// classifier structure.
pub(crate) fn validate_model(session: &Session) -> Result<(), ClassifierError> {
    if session.inputs().is_empty() {
        return Err(ClassifierError::Initialization(
            "Model must have at least 1 input for the image tensor".to_string(),
        ));
    }
    if session.outputs().is_empty() {
        return Err(ClassifierError::Initialization(
            "Model must have at least 1 output for class scores".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_arity_match() {
        assert!(check_output_arity(22, 22).is_ok());
    }

    #[test]
    fn test_output_arity_mismatch() {
        let err = check_output_arity(24, 22).unwrap_err();
        assert!(matches!(err, ClassifierError::Inference(_)));
        assert!(err.to_string().contains("24"));
        assert!(err.to_string().contains("22"));
    }
}
