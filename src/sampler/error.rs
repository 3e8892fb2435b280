use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;

use crate::propagate::PropagationError;

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("sampling step must be positive, got {0}")]
    NonPositiveStep(TimeDelta),
    #[error("empty sampling window: {from} is not before {to}")]
    EmptyWindow {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
    #[error("propagation error: {0}")]
    Propagation(#[from] PropagationError),
}
