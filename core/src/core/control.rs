// cartflow/src/core/control.rs

//! Signals for controlling pipeline flow and the outcome of a pipeline run.

/// Returned by every handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineControl {
  /// Proceed with the remaining handlers and steps.
  Continue,
  /// Halt the run here. No further handlers or steps execute.
  Stop,
}

/// Outcome of a run that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineResult {
  /// Every step ran.
  Completed,
  /// A handler returned [`PipelineControl::Stop`].
  Stopped,
}

impl PipelineControl {
  pub fn is_stop(self) -> bool {
    self == PipelineControl::Stop
  }
}

impl From<PipelineControl> for PipelineResult {
  /// The run outcome implied by the last signal seen.
  fn from(control: PipelineControl) -> Self {
    match control {
      PipelineControl::Continue => PipelineResult::Completed,
      PipelineControl::Stop => PipelineResult::Stopped,
    }
  }
}
