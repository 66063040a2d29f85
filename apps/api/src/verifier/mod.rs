//! Hallucination verifier — three-step verification pipeline over the chat model.
//!
//! Step 1 answers the question with chain-of-thought prompting, step 2 elicits
//! a numbered citation list, step 3 cross-checks the answer against those
//! citations and parses a labeled risk assessment out of the reply. Every step
//! degrades in-band on service failure; callers always get a complete record.

pub mod eval;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
