//! Error handling for the AyuSetu service clients

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The only error kind surfaced by domain operations. `Display` is the
    /// static message for the failed operation; the cause stays reachable
    /// through `source()`.
    #[error("{message}")]
    Operation {
        message: &'static str,
        #[source]
        cause: Box<AppError>,
    },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Rejected: {message}")]
    Rejected { message: String },

    #[error("Service unavailable: {service}")]
    ServiceUnavailable { service: String },

    #[error("External service error: {service} - {message}")]
    ExternalService { service: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Timeout error: {operation}")]
    Timeout { operation: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl AppError {
    pub fn operation(message: &'static str, cause: AppError) -> Self {
        Self::Operation {
            message,
            cause: Box::new(cause),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    pub fn service_unavailable(service: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            service: service.into(),
        }
    }

    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalService {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::Timeout {
            operation: operation.into(),
        }
    }

    /// Innermost error behind an `Operation` wrapper, or `self`.
    pub fn root_cause(&self) -> &AppError {
        match self {
            AppError::Operation { cause, .. } => cause.root_cause(),
            other => other,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Operation { .. } => "OPERATION_FAILED",
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::Rejected { .. } => "REJECTED",
            AppError::ServiceUnavailable { .. } => "SERVICE_UNAVAILABLE",
            AppError::ExternalService { .. } => "EXTERNAL_SERVICE_ERROR",
            AppError::Configuration { .. } => "CONFIG_ERROR",
            AppError::Timeout { .. } => "TIMEOUT",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::HttpClient(_) => "HTTP_CLIENT_ERROR",
        }
    }
}

/// Collapses any failure into the generic per-operation error.
pub trait OperationContext<T> {
    fn or_fail(self, message: &'static str) -> Result<T>;
}

impl<T> OperationContext<T> for Result<T> {
    fn or_fail(self, message: &'static str) -> Result<T> {
        self.map_err(|cause| {
            tracing::warn!(
                code = cause.root_cause().error_code(),
                "{}: {}",
                message,
                cause
            );
            AppError::operation(message, cause)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn operation_error_displays_static_message_only() {
        let err: Result<()> = Err(AppError::external_service("abdm", "HTTP 500 - boom"));
        let err = err.or_fail("Failed to fetch languages").unwrap_err();

        assert_eq!(err.to_string(), "Failed to fetch languages");
        assert_eq!(err.error_code(), "OPERATION_FAILED");
        assert_eq!(err.root_cause().error_code(), "EXTERNAL_SERVICE_ERROR");
        assert!(err.source().is_some());
    }

    #[test]
    fn ok_values_pass_through_untouched() {
        let ok: Result<u8> = Ok(7);
        assert_eq!(ok.or_fail("Failed to fetch anything").unwrap(), 7);
    }

    #[test]
    fn root_cause_unwraps_nested_operations() {
        let inner = AppError::operation("Failed to fetch policies", AppError::timeout("insurance"));
        let outer = AppError::operation("Failed to load dashboard", inner);
        assert_eq!(outer.to_string(), "Failed to load dashboard");
        assert!(matches!(outer.root_cause(), AppError::Timeout { .. }));
    }
}
