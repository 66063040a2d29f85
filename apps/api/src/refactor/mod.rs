//! Code refactorer — sends a snippet to the chat model and splits the reply
//! into the refactored code (first fenced block) and the prose explanation.

pub mod handlers;
pub mod prompts;

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::{ChatModel, ChatParams};
use crate::refactor::prompts::REFACTOR_SYSTEM;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefactorResult {
    pub refactored: String,
    pub explanation: String,
}

static FENCED_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```[a-zA-Z0-9_+-]*\n?(.*?)```").expect("valid fence regex"));

/// Refactors `code` via the chat model. Service failure degrades to an empty
/// refactoring with the error as explanation, mirroring the other pipelines.
pub async fn refactor_code(code: &str, llm: &dyn ChatModel) -> RefactorResult {
    let user = format!(
        "Here is the code:\n\n```\n{}\n```\n\n\
         Return *first* the refactored code inside ``` fences, \
         then a plain-text explanation.",
        code.trim()
    );

    let params = ChatParams {
        temperature: 0.0,
        max_tokens: 1000,
    };

    match llm.chat(REFACTOR_SYSTEM, &user, params).await {
        Ok(reply) => split_reply(&reply),
        Err(e) => {
            warn!("refactoring failed: {e}");
            RefactorResult {
                refactored: String::new(),
                explanation: format!("Error refactoring code: {e}"),
            }
        }
    }
}

/// Splits a markdown reply into the first fenced code block and the remaining
/// prose with all fenced blocks removed.
fn split_reply(reply: &str) -> RefactorResult {
    let refactored = FENCED_BLOCK_RE
        .captures(reply)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_default();

    let explanation = FENCED_BLOCK_RE.replace_all(reply, "").trim().to_string();

    RefactorResult {
        refactored,
        explanation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedChat;

    #[test]
    fn test_split_reply_extracts_first_block_and_prose() {
        let reply = "```python\ndef add(a, b):\n    return a + b\n```\n\n\
            - Removed the temporary variable.\n- Added early return.";
        let result = split_reply(reply);
        assert_eq!(result.refactored, "def add(a, b):\n    return a + b");
        assert_eq!(
            result.explanation,
            "- Removed the temporary variable.\n- Added early return."
        );
    }

    #[test]
    fn test_split_reply_strips_all_blocks_from_explanation() {
        let reply = "```\nfirst\n```\nBetween blocks.\n```\nsecond\n```";
        let result = split_reply(reply);
        assert_eq!(result.refactored, "first");
        assert_eq!(result.explanation, "Between blocks.");
    }

    #[test]
    fn test_split_reply_without_fences() {
        let result = split_reply("No code here, only advice.");
        assert!(result.refactored.is_empty());
        assert_eq!(result.explanation, "No code here, only advice.");
    }

    #[tokio::test]
    async fn test_refactor_code_degrades_on_failure() {
        let llm = ScriptedChat::always_failing("rate limited");
        let result = refactor_code("def f(): pass", &llm).await;
        assert!(result.refactored.is_empty());
        assert!(result.explanation.starts_with("Error refactoring code:"));
    }
}
