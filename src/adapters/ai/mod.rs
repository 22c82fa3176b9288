//! Review feedback generator adapters.
//!
//! - `openai_feedback` - OpenAI-compatible chat-completions client
//! - `disabled` - reports the generator as unavailable

mod disabled;
mod openai_feedback;

pub use disabled::DisabledFeedbackGenerator;
pub use openai_feedback::{build_prompt, OpenAiFeedbackConfig, OpenAiFeedbackGenerator};
