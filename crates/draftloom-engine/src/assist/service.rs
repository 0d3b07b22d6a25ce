/// Tuning for one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Upper bound on the generated text length, in model tokens.
    pub max_length: u32,
    pub temperature: f32,
}

impl GenerationParams {
    /// Defaults for outline generation: short and structural.
    pub fn structure() -> Self {
        Self {
            max_length: 1500,
            temperature: 0.7,
        }
    }

    /// Defaults for content generation: room for several paragraphs per
    /// section.
    pub fn content() -> Self {
        Self {
            max_length: 4000,
            temperature: 0.7,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation service is not configured: {0}")]
    MissingCredentials(String),
    #[error("generation request failed: {0}")]
    RequestFailed(String),
}

/// Boundary to the text generation service.
///
/// Implementations own transport, credentials, and model selection; the
/// engine only hands over an instruction string and reads back the returned
/// blob. This is the single suspension point of the system: implementations
/// may block, and the caller guards against overlapping requests.
pub trait GenerationService {
    fn generate(
        &mut self,
        instruction: &str,
        params: &GenerationParams,
    ) -> Result<String, GenerationError>;
}
