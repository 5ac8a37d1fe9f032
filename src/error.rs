use thiserror::Error;

/// Failures inside the model update service. These never leave
/// [`crate::assistant::Assistant`]; they are logged and replaced by the
/// fallback reply.
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service answered with status {0}")]
    Status(u16),
    #[error("no reply within {0} s")]
    Timeout(u64),
    #[error("reply carried no text")]
    EmptyReply,
    #[error("malformed reply: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("reply model has a blank name or type")]
    IncompleteModel,
    #[error("reply model asks for {key} = {value}, above the sample limit")]
    Oversized { key: &'static str, value: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StudioError {
    #[error("another request is already in progress")]
    Busy,
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("no model named {0:?}")]
    UnknownModel(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("preview size must be between 1 and {max}, got {got}")]
    Size { got: u32, max: u32 },
    #[error("png encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}
