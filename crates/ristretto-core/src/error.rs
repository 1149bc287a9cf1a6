pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("unknown step '{name}'")]
    UnknownStep { name: String },

    #[error("invalid parameter '{param}' for step '{step}': {reason}")]
    InvalidParameter {
        step: String,
        param: String,
        reason: String,
    },

    #[error("step '{step}' produced an empty {width}x{height} region")]
    EmptyRegion {
        step: String,
        width: u32,
        height: u32,
    },

    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },

    #[error("codec error: {0}")]
    Codec(#[from] image::ImageError),

    #[error("malformed pipeline document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn unknown_step(name: impl Into<String>) -> Self {
        Self::UnknownStep { name: name.into() }
    }

    pub fn invalid_parameter(
        step: impl Into<String>,
        param: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            step: step.into(),
            param: param.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            reason: reason.into(),
        }
    }

    /// Name of the step that failed, when the error is attributable to one.
    pub fn step(&self) -> Option<&str> {
        match self {
            Self::UnknownStep { name } => Some(name.as_str()),
            Self::InvalidParameter { step, .. } | Self::EmptyRegion { step, .. } => {
                Some(step.as_str())
            }
            _ => None,
        }
    }
}
