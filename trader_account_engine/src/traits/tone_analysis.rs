use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ToneAnalysisError {
    #[error("Could not reach the tone analysis service: {0}")]
    Unavailable(String),
    #[error("The tone analysis service returned an unusable response: {0}")]
    InvalidResponse(String),
}

/// The port to the external tone-analysis service.
///
/// The returned string is the name of the best-scoring tone (e.g. `"Anger"`, `"Joy"`). The feedback flow maps a
/// failure from this port onto the `"Unknown"` sentiment, so implementations should just report errors honestly.
#[allow(async_fn_in_trait)]
pub trait ToneAnalysis {
    /// Analyzes the given feedback text and returns the dominant tone.
    async fn analyze(&self, text: &str) -> Result<String, ToneAnalysisError>;
}
