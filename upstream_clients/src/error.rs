use thiserror::Error;

/// Errors raised while constructing a client. Failures at request time map onto the engine's port errors instead,
/// so that the fail-soft handling lives in one place.
#[derive(Debug, Clone, Error)]
pub enum UpstreamClientError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
}
