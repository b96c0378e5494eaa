use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthentixError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not decode image: {0}")]
    DecodeFailure(String),

    #[error("Could not render image: {0}")]
    RenderFailure(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Operation not allowed while {phase}")]
    InvalidState { phase: &'static str },

    #[error("Listing already holds the maximum of {limit} images")]
    TooManyImages { limit: usize },

    #[error("Listing image index {index} out of range (total: {total})")]
    ImageIndexOutOfRange { index: usize, total: usize },

    #[error("Store is closed")]
    StoreClosed,

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    #[error("Payload field {field} exceeds {limit} characters")]
    PayloadTooLarge { field: &'static str, limit: usize },

    #[error("Config error: {0}")]
    Config(String),
}

impl AuthentixError {
    /// Short inline message shown next to the upload control.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::DecodeFailure(_) | Self::Io(_) => "Could not load image.",
            Self::RenderFailure(_) => "Could not apply crop.",
            Self::TooManyImages { .. } => "Too many images.",
            _ => "Something went wrong.",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthentixError>;
