use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("{service} request failed: {message}")]
    ServiceError {
        service: &'static str,
        status: Option<u16>,
        message: String,
    },
    #[error("Navigation error: {0}")]
    NavigationError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CheckoutError {
    pub fn service(service: &'static str, status: Option<u16>, message: impl Into<String>) -> Self {
        Self::ServiceError {
            service,
            status,
            message: message.into(),
        }
    }

    /// The message reported to the storefront logger.
    ///
    /// Service errors carry the collaborator's own message; everything else
    /// falls back to the display form.
    pub fn message(&self) -> String {
        match self {
            Self::ServiceError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServiceError { status, .. } => *status,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckoutError>;
