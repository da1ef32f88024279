//! CLI library components for profile2schema.

pub mod logging;
pub mod pipeline;
