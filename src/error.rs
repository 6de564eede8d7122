use thiserror::Error;

/// Errors raised while building an arm or talking to the session registry.
///
/// Nothing in the per-frame path returns an error; configuration is the only
/// fallible surface.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArmError {
    #[error("[Config] chain must contain at least one segment")]
    EmptyChain,
    #[error("[Config] segment {index} has invalid {field} {value}")]
    InvalidSegment {
        index: usize,
        field: &'static str,
        value: f32,
    },
    #[error("[Config] parameter `{name}` out of range: {value}")]
    InvalidParameter { name: &'static str, value: f32 },
    #[error("[Config] failed to parse JSON: {0}")]
    Config(#[from] serde_json::Error),
    #[error("[Session] no live session with handle {0}")]
    UnknownSession(u32),
}

pub type Result<T> = std::result::Result<T, ArmError>;
