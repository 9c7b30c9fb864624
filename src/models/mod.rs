pub mod gemini;
pub mod query;
