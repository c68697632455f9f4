// cartflow/src/pipeline/mod.rs

//! A small asynchronous workflow of named steps. Each step has `before` and
//! `on` handlers that run in registration order against a shared
//! [`ContextData`](crate::core::ContextData).

pub mod definition;
pub mod execution;

pub use definition::{Handler, Pipeline, StepDef};
