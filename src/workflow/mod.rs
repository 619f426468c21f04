pub mod answer_flow;
pub mod capture_ctx;

pub use answer_flow::{AnswerFlow, AnswerSource, Resolution, ResolveStats};
pub use capture_ctx::CaptureCtx;
