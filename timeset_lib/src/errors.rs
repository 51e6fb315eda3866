#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid interval: {end} is not after {start}")]
    InvalidInterval { start: String, end: String },

    #[error("'{text}' does not match format '{format}': {source}")]
    FormatMismatch {
        text: String,
        format: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("unconverted data remains in '{text}' after parsing with format '{format}'")]
    UnconvertedData { text: String, format: String },
}

impl Error {
    /// Whether the error comes from decoding a timestamp rather than from
    /// the interval invariant.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        match self {
            Error::FormatMismatch { .. } | Error::UnconvertedData { .. } => {
                true
            }
            Error::InvalidInterval { .. } => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
