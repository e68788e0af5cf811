//! Error taxonomy shared by every stage of a fetch cycle.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WeatherError>;

/// Failure of one fetch cycle. None of these are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    /// Transport failure or a non-200 HTTP status.
    #[error("Network error: {0}")]
    Network(String),

    /// Permission, fix or reverse-geocoding failure.
    #[error("Location error: {0}")]
    Location(String),

    /// Payload did not match the expected schema.
    #[error("Data error: {0}")]
    Decoding(String),

    /// Request could not be formed or the response was unusable.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Which of the four failure classes an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Network,
    Location,
    Decoding,
    InvalidResponse,
}

impl WeatherError {
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    pub fn location<S: Into<String>>(message: S) -> Self {
        Self::Location(message.into())
    }

    pub fn decoding<S: Into<String>>(message: S) -> Self {
        Self::Decoding(message.into())
    }

    pub fn invalid_response<S: Into<String>>(message: S) -> Self {
        Self::InvalidResponse(message.into())
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::Network(_) => ErrorKind::Network,
            WeatherError::Location(_) => ErrorKind::Location,
            WeatherError::Decoding(_) => ErrorKind::Decoding,
            WeatherError::InvalidResponse(_) => ErrorKind::InvalidResponse,
        }
    }

    /// The cause without the kind prefix, e.g. `"HTTP 500"`.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            WeatherError::Network(m)
            | WeatherError::Location(m)
            | WeatherError::Decoding(m)
            | WeatherError::InvalidResponse(m) => m,
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            WeatherError::Decoding(err.to_string())
        } else if err.is_timeout() {
            WeatherError::Network(format!("request timed out: {err}"))
        } else {
            WeatherError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::Decoding(err.to_string())
    }
}
