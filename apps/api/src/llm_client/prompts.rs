#![allow(dead_code)]

// Shared prompt fragments. Each exercise that needs LLM calls defines its own
// prompts.rs alongside it; this file holds the cross-cutting pieces.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to prompts whose reply is parsed by labeled-field
/// scanning. Field names must appear verbatim, one per line.
pub const LABELED_FIELDS_INSTRUCTION: &str = "\
    Respond using EXACTLY the labeled lines requested, one field per line, \
    with the label spelled verbatim and in upper case. \
    Do not add fields that were not requested.";
