//! Invoice parser — few-shot JSON extraction over the chat model, followed by
//! strict local validation and a deterministic confidence score.

pub mod handlers;
pub mod parser;
pub mod prompts;
