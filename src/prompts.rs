//! Prompts sent to the vision model for logo detection.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — tightening the instruction (e.g. the
//!    empty-list rule) requires editing exactly one place.
//!
//! 2. **Testability** — unit tests can inspect prompts directly without
//!    spinning up a real model, making prompt regressions easy to catch.

/// System prompt establishing the assistant's role.
pub const SYSTEM_PROMPT: &str = "You are an assistant that detect company logos in slides.";

/// User instruction accompanying each slide image.
///
/// The model is asked for a bracketed comma-separated list and nothing
/// else; the reply is logged verbatim without parsing, so the stricter the
/// instruction the cleaner the log.
pub const USER_INSTRUCTION: &str = "The following image is a slide. \
Give me a list of logos that are present in the slide. \
Generate the list as a string list, for example: [Microsoft,NVIDIA,IBM]. \
In case there are no logos just generate an empty list: []. \
Do not write anything else besides the list content in the response.";
