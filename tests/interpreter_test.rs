use huruf::{
    select_top1, softmax, LabelVocabulary, ScoreInterpreter, UNRECOGNIZED_LABEL,
};

fn jawi_vocabulary() -> LabelVocabulary {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/labels.json");
    LabelVocabulary::from_file(path).expect("Failed to load bundled labels")
}

#[test]
fn test_softmax_is_a_distribution() {
    let logits = vec![0.3, -1.2, 4.5, 0.0, 2.2, -7.0];
    let probabilities = softmax(&logits);
    assert_eq!(probabilities.len(), logits.len());
    let sum: f32 = probabilities.iter().sum();
    assert!((sum - 1.0).abs() < 1e-6);
    assert!(probabilities.iter().all(|&p| p > 0.0 && p <= 1.0));
}

#[test]
fn test_softmax_shift_invariance() {
    let logits = vec![-50.0, -12.5, 0.0, 3.7, 50.0];
    let base = softmax(&logits);
    for shift in [-50.0f32, -1.0, 25.0, 50.0] {
        let shifted: Vec<f32> = logits.iter().map(|v| v + shift).collect();
        let probabilities = softmax(&shifted);
        for (a, b) in base.iter().zip(&probabilities) {
            assert!((a - b).abs() < 1e-6, "shift {} changed softmax", shift);
        }
        let sum: f32 = probabilities.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }
}

#[test]
fn test_top1_tie_breaks_to_first_occurrence() {
    let (index, confidence) = select_top1(&[0.1, 0.45, 0.45]).unwrap();
    assert_eq!(index, 1);
    assert!((confidence - 0.45).abs() < 1e-6);
}

#[test]
fn test_out_of_bounds_index_is_unrecognized() {
    let vocabulary = jawi_vocabulary();
    assert_eq!(
        huruf::resolve_label(&vocabulary, vocabulary.len()),
        UNRECOGNIZED_LABEL
    );
    assert_eq!(
        huruf::resolve_label(&vocabulary, usize::MAX),
        UNRECOGNIZED_LABEL
    );
}

#[test]
fn test_synthetic_scores_select_expected_label() {
    let vocabulary = jawi_vocabulary();
    assert_eq!(vocabulary.len(), 22);

    // Maximum at position 5 (Ga_Initial in the bundled vocabulary)
    let mut scores = vec![0.1f32; 22];
    scores[5] = 6.0;
    let expected_confidence = softmax(&scores)[5];

    let interpreter = ScoreInterpreter::new(None);
    let result = interpreter.interpret(&scores, &vocabulary);
    assert_eq!(result.label, "Ga_Initial");
    assert_eq!(result.class_index, Some(5));
    let confidence = result.confidence.unwrap();
    assert!((confidence - expected_confidence).abs() < 1e-6);
}

#[test]
fn test_no_floor_always_returns_best_guess() {
    let vocabulary = jawi_vocabulary();
    // Near-uniform scores: the winner's probability is about 1/22
    let scores = vec![0.0f32; 22];
    let interpreter = ScoreInterpreter::new(None);
    let result = interpreter.interpret(&scores, &vocabulary);
    // Uniform maximum ties break to index 0
    assert_eq!(result.label, "Ca_Isolated");
    assert_eq!(result.class_index, Some(0));
}

#[test]
fn test_confidence_floor_yields_unrecognized() {
    let vocabulary = jawi_vocabulary();
    let scores = vec![0.0f32; 22];
    let interpreter = ScoreInterpreter::new(Some(0.5));
    let result = interpreter.interpret(&scores, &vocabulary);
    assert_eq!(result.label, UNRECOGNIZED_LABEL);
    assert_eq!(result.class_index, None);
    // The measured confidence is still reported
    let confidence = result.confidence.unwrap();
    assert!((confidence - 1.0 / 22.0).abs() < 1e-4);
}

#[test]
fn test_confident_score_passes_floor() {
    let vocabulary = jawi_vocabulary();
    let mut scores = vec![0.0f32; 22];
    scores[21] = 10.0;
    let interpreter = ScoreInterpreter::new(Some(0.5));
    let result = interpreter.interpret(&scores, &vocabulary);
    assert_eq!(result.label, "Va_Final");
    assert_eq!(result.class_index, Some(21));
}
