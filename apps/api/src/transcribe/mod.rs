//! Audio transcription — thin multipart front for the speech-to-text call on
//! `OpenAiClient`. Unlike the chat pipelines there is no sensible in-band
//! degradation for a failed transcription, so errors surface to the caller.

pub mod handlers;
