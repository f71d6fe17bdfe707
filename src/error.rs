use std::fmt;

/// Failure modes surfaced by the detection pipeline itself.
///
/// Accelerator- and model-unavailability are intentionally absent here:
/// per the failure semantics of this engine they degrade silently (a
/// `tracing::warn!` once, an empty result) rather than propagate as
/// errors. Only conditions that make it impossible to produce a plan at
/// all reach this type.
#[derive(Debug)]
pub enum PipelineError {
    /// The input could not be scanned (e.g. a pathological UTF-8 validity
    /// edge case upstream callers are expected not to hit, kept as a
    /// named variant rather than a panic). Carries an `anyhow::Error` so
    /// whatever internal plumbing raised it can attach context via
    /// `anyhow::Context` without this enum needing a variant per cause.
    InputInvalid(anyhow::Error),
    /// A caller-supplied `CancellationToken` was tripped mid-scan.
    Cancelled,
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::InputInvalid(err) => write!(f, "invalid input: {err}"),
            PipelineError::Cancelled => write!(f, "detection cancelled"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<PipelineError> for napi::Error {
    fn from(err: PipelineError) -> Self {
        napi::Error::from_reason(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
