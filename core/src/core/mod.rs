pub mod context_data;
pub mod control;

pub use context_data::ContextData;
pub use control::{PipelineControl, PipelineResult};
