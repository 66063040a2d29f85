//! The three-step verification pipeline and its reply parsers.
//!
//! Steps run in strict sequence — each feeds the next — and every step turns a
//! service failure into a degraded in-band value instead of an error, so the
//! final record is always fully populated.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::{ChatModel, ChatParams};
use crate::verifier::prompts::{ANSWER_SYSTEM, SOURCES_SYSTEM, VERIFY_SYSTEM};

/// Final record assembled by `verify_hallucination`. Immutable after
/// construction; one per query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub answer: String,
    pub sources: Vec<String>,
    pub is_hallucination: bool,
    pub confidence: f64,
    pub reasoning: String,
}

/// Outcome of the cross-checking step, before assembly.
#[derive(Debug, Clone)]
struct RiskAssessment {
    is_hallucination: bool,
    confidence: f64,
    reasoning: String,
}

/// Runs the full pipeline: answer → sources → cross-check.
pub async fn verify_hallucination(question: &str, llm: &dyn ChatModel) -> VerificationResult {
    let answer = initial_answer(question, llm).await;
    let sources = request_sources(question, &answer, llm).await;
    let assessment = verify_against_sources(question, &answer, &sources, llm).await;

    VerificationResult {
        answer,
        sources,
        is_hallucination: assessment.is_hallucination,
        confidence: assessment.confidence,
        reasoning: assessment.reasoning,
    }
}

/// Step 1: chain-of-thought answer. Service failure becomes an in-band error
/// string so the rest of the pipeline still runs.
async fn initial_answer(question: &str, llm: &dyn ChatModel) -> String {
    let user = format!("Question: {question}");

    match llm
        .chat(ANSWER_SYSTEM, &user, ChatParams::with_max_tokens(500))
        .await
    {
        Ok(text) => text,
        Err(e) => {
            warn!("answer generation failed: {e}");
            format!("Error getting initial answer: {e}")
        }
    }
}

/// Step 2: citation list. Empty or malformed replies — and service failures —
/// yield an empty sequence.
async fn request_sources(question: &str, answer: &str, llm: &dyn ChatModel) -> Vec<String> {
    let user = format!("Question: {question}\nAnswer: {answer}");

    match llm
        .chat(SOURCES_SYSTEM, &user, ChatParams::with_max_tokens(400))
        .await
    {
        Ok(text) => parse_source_list(&text),
        Err(e) => {
            warn!("source elicitation failed: {e}");
            Vec::new()
        }
    }
}

/// Step 3: rubric assessment. Service failure degrades to the safe default
/// (not a hallucination, confidence 0.0).
async fn verify_against_sources(
    question: &str,
    answer: &str,
    sources: &[String],
    llm: &dyn ChatModel,
) -> RiskAssessment {
    let user = format!(
        "Question: {question}\nAnswer: {answer}\nSources:\n{}",
        format_sources(sources)
    );

    match llm
        .chat(VERIFY_SYSTEM, &user, ChatParams::with_max_tokens(400))
        .await
    {
        Ok(text) => parse_assessment(&text),
        Err(e) => {
            warn!("verification failed: {e}");
            RiskAssessment {
                is_hallucination: false,
                confidence: 0.0,
                reasoning: format!("Error in verification: {e}"),
            }
        }
    }
}

fn format_sources(sources: &[String]) -> String {
    if sources.is_empty() {
        return "(none provided)".to_string();
    }
    sources
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {s}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses a numbered citation list: keeps lines that begin with an ASCII digit
/// or a dash, strips the leading numbering token, preserves reply order and
/// duplicates.
fn parse_source_list(reply: &str) -> Vec<String> {
    let mut sources = Vec::new();

    for line in reply.lines() {
        let line = line.trim();
        let starts_numbered = line
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit() || c == '-');
        if !starts_numbered {
            continue;
        }

        let source = match line.split_once('.') {
            Some((_, rest)) => rest.trim(),
            None => line.trim_start_matches(['-', ' ']),
        };
        sources.push(source.to_string());
    }

    sources
}

/// Parses the labeled assessment block. The three extractions are independent:
/// the risk label sets a (verdict, confidence) bucket, an explicit CONFIDENCE
/// line overrides the bucket confidence when it parses, and REASONING takes
/// the remainder of the reply. No label at all means "not a hallucination" at
/// confidence 0.5. Matching is case-sensitive by contract with the prompt.
fn parse_assessment(reply: &str) -> RiskAssessment {
    let mut is_hallucination = false;
    let mut confidence = 0.5;
    let mut reasoning = reply.trim().to_string();

    if reply.contains("HALLUCINATION_RISK: HIGH") {
        is_hallucination = true;
        confidence = 0.8;
    } else if reply.contains("HALLUCINATION_RISK: MEDIUM") {
        is_hallucination = true;
        confidence = 0.6;
    } else if reply.contains("HALLUCINATION_RISK: LOW") {
        is_hallucination = false;
        confidence = 0.8;
    }

    if let Some(line) = reply.lines().find(|l| l.contains("CONFIDENCE:")) {
        if let Some((_, value)) = line.split_once(':') {
            // Unparseable tokens keep the bucket default.
            if let Ok(parsed) = value.trim().parse::<f64>() {
                confidence = parsed.clamp(0.0, 1.0);
            }
        }
    }

    if let Some(idx) = reply.find("REASONING:") {
        reasoning = reply[idx + "REASONING:".len()..].trim().to_string();
    }

    RiskAssessment {
        is_hallucination,
        confidence,
        reasoning,
    }
}
