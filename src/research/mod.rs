pub mod excerpt;
pub mod ideas;
pub mod pipeline;
pub mod types;
