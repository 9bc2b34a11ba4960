pub mod core;
pub mod gemini;
pub mod images;
pub mod pdf;
