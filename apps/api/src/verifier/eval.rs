//! Detection-accuracy evaluation over a labeled question set.
//!
//! Runs the full pipeline per question and compares the verdict against the
//! expected label. Sequential on purpose — the pipeline itself is sequential
//! and the course material evaluates it that way.

use serde::{Deserialize, Serialize};

use crate::llm_client::ChatModel;
use crate::verifier::pipeline::verify_hallucination;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledQuestion {
    pub question: String,
    pub expected_hallucination: bool,
}

/// Per-question evaluation record.
#[derive(Debug, Clone, Serialize)]
pub struct CaseOutcome {
    pub question: String,
    pub expected_hallucination: bool,
    pub detected_hallucination: bool,
    pub confidence: f64,
    pub correct: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvalReport {
    pub total: usize,
    pub correct: usize,
    pub accuracy: f64,
    pub cases: Vec<CaseOutcome>,
}

/// Evaluates detection accuracy over `cases`. An empty set scores 0.0.
pub async fn evaluate_detection(cases: &[LabeledQuestion], llm: &dyn ChatModel) -> EvalReport {
    let mut outcomes = Vec::with_capacity(cases.len());

    for case in cases {
        let result = verify_hallucination(&case.question, llm).await;
        outcomes.push(CaseOutcome {
            question: case.question.clone(),
            expected_hallucination: case.expected_hallucination,
            detected_hallucination: result.is_hallucination,
            confidence: result.confidence,
            correct: result.is_hallucination == case.expected_hallucination,
        });
    }

    let correct = outcomes.iter().filter(|o| o.correct).count();
    let accuracy = if outcomes.is_empty() {
        0.0
    } else {
        correct as f64 / outcomes.len() as f64
    };

    EvalReport {
        total: outcomes.len(),
        correct,
        accuracy,
        cases: outcomes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedChat;

    fn labeled(question: &str, expected: bool) -> LabeledQuestion {
        LabeledQuestion {
            question: question.to_string(),
            expected_hallucination: expected,
        }
    }

    #[tokio::test]
    async fn test_evaluate_detection_scores_mixed_set() {
        // Two questions, three pipeline calls each.
        let llm = ScriptedChat::replies([
            // Case 1: fabrication, correctly flagged HIGH.
            "Elena Rodriguez walked on Mars in 2031.",
            "1. Fictional archive",
            "HALLUCINATION_RISK: HIGH\nREASONING: Never happened.",
            // Case 2: known fact, incorrectly flagged MEDIUM.
            "Paris is the capital of France.",
            "1. Encyclopedia Britannica",
            "HALLUCINATION_RISK: MEDIUM\nREASONING: Uncertain sources.",
        ]);

        let cases = [
            labeled("Who was the first person to walk on Mars?", true),
            labeled("What is the capital of France?", false),
        ];

        let report = evaluate_detection(&cases, &llm).await;

        assert_eq!(report.total, 2);
        assert_eq!(report.correct, 1);
        assert_eq!(report.accuracy, 0.5);
        assert!(report.cases[0].correct);
        assert!(!report.cases[1].correct);
    }

    #[tokio::test]
    async fn test_evaluate_detection_empty_set() {
        let llm = ScriptedChat::replies(Vec::<String>::new());
        let report = evaluate_detection(&[], &llm).await;
        assert_eq!(report.total, 0);
        assert_eq!(report.accuracy, 0.0);
    }
}
