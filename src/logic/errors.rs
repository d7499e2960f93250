use anyhow::Error;

/// Everything that can end an analysis job, plus the two ways `submit` can
/// refuse to start one.
///
/// Every variant is terminal for the job it is attached to. Nothing here is
/// retried; the user resets and submits again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// Malformed request caught before anything reached the network
    #[error("{0}")]
    Validation(String),

    /// The create-job call failed; no analysis id was ever obtained
    #[error("Analysis submission failed: {0}")]
    Submission(String),

    /// A status fetch failed while the job was running
    #[error("Failed to check analysis status")]
    Polling { detail: String },

    /// Backend reported `status: "failed"`
    #[error("Analysis failed: {0}")]
    JobFailure(String),

    /// Optional poll ceiling was exceeded
    #[error("Analysis timeout - please try again")]
    TimedOut { attempts: u32 },

    /// A job is still submitting or running
    #[error("An analysis is already in progress")]
    InProgress,
}

impl AnalysisError {
    /// Short category label for the results panel header
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Validation(_) => "validation",
            AnalysisError::Submission(_) => "submission",
            AnalysisError::Polling { .. } => "polling",
            AnalysisError::JobFailure(_) => "job",
            AnalysisError::TimedOut { .. } => "timeout",
            AnalysisError::InProgress => "busy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
    ConnectionRefused,
    Timeout,
    Unauthorized, // HTTP 401
    NotFound,     // HTTP 404
    ServerError,  // HTTP 500+
    NetworkError, // DNS, routing, etc.
    Other,
}

/// Classify a transport error for the connection indicator
///
/// Status codes are checked first; otherwise the whole context chain is
/// searched, since our calls always wrap the transport error in context.
pub fn classify_error(error: &Error) -> ErrorType {
    if let Some(http_err) = error.downcast_ref::<crate::api::HttpStatusError>() {
        return classify_status(http_err.status);
    }
    let status = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<reqwest::Error>())
        .and_then(|reqwest_err| reqwest_err.status());
    if let Some(status) = status {
        return classify_status(status.as_u16());
    }

    let chain = format!("{:#}", error).to_lowercase();
    if chain.contains("connection refused") {
        ErrorType::ConnectionRefused
    } else if chain.contains("timeout") || chain.contains("timed out") {
        ErrorType::Timeout
    } else if chain.contains("dns") || chain.contains("network") {
        ErrorType::NetworkError
    } else {
        ErrorType::Other
    }
}

fn classify_status(status: u16) -> ErrorType {
    match status {
        401 => ErrorType::Unauthorized,
        404 => ErrorType::NotFound,
        500..=599 => ErrorType::ServerError,
        _ => ErrorType::Other,
    }
}

/// Format error message for display - show raw error details
pub fn format_error_message(error: &Error) -> String {
    // Our own status errors already carry the backend's detail text
    if let Some(http_err) = error.downcast_ref::<crate::api::HttpStatusError>() {
        return http_err.to_string();
    }

    // Walk the error chain to find reqwest::Error (most informative for network errors)
    let mut current: Option<&dyn std::error::Error> = Some(error.as_ref());

    while let Some(err) = current {
        if let Some(reqwest_err) = err.downcast_ref::<reqwest::Error>() {
            return reqwest_err.to_string();
        }
        current = err.source();
    }

    // Otherwise the deepest cause
    let mut source = error.source();
    let mut deepest = error.to_string();

    while let Some(err) = source {
        deepest = err.to_string();
        source = err.source();
    }

    deepest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::HttpStatusError;

    #[test]
    fn test_classify_connection_refused() {
        let err = anyhow::anyhow!("connection refused (os error 111)");
        assert_eq!(classify_error(&err), ErrorType::ConnectionRefused);
    }

    #[test]
    fn test_classify_timeout() {
        let err = anyhow::anyhow!("request timed out");
        assert_eq!(classify_error(&err), ErrorType::Timeout);
    }

    #[test]
    fn test_classify_dns_error() {
        let err = anyhow::anyhow!("dns lookup failed");
        assert_eq!(classify_error(&err), ErrorType::NetworkError);
    }

    #[test]
    fn test_classify_http_status_error() {
        let err: Error = HttpStatusError {
            status: 500,
            detail: "boom".to_string(),
        }
        .into();
        assert_eq!(classify_error(&err), ErrorType::ServerError);

        let err: Error = HttpStatusError {
            status: 404,
            detail: "File not found".to_string(),
        }
        .into();
        assert_eq!(classify_error(&err), ErrorType::NotFound);
    }

    #[test]
    fn test_classify_looks_through_context() {
        let err = anyhow::anyhow!("tcp connect error: Connection refused (os error 111)")
            .context("Failed to fetch documents");
        assert_eq!(classify_error(&err), ErrorType::ConnectionRefused);

        let err: Error = HttpStatusError {
            status: 401,
            detail: "Not authenticated".to_string(),
        }
        .into();
        let err = err.context("Failed to fetch documents");
        assert_eq!(classify_error(&err), ErrorType::Unauthorized);
    }

    #[test]
    fn test_classify_other_error() {
        let err = anyhow::anyhow!("some random error");
        assert_eq!(classify_error(&err), ErrorType::Other);
    }

    #[test]
    fn test_format_shows_root_cause() {
        let inner = anyhow::anyhow!("tcp connect error");
        let outer = inner.context("Failed to fetch documents");
        assert_eq!(format_error_message(&outer), "tcp connect error");
    }

    #[test]
    fn test_format_keeps_backend_detail() {
        let err: Error = HttpStatusError {
            status: 404,
            detail: "File not found".to_string(),
        }
        .into();
        let err = err.context("Failed to start analysis");
        assert_eq!(format_error_message(&err), "HTTP 404: File not found");
    }

    #[test]
    fn test_analysis_error_messages() {
        assert_eq!(
            AnalysisError::Polling {
                detail: "connection reset".to_string()
            }
            .to_string(),
            "Failed to check analysis status"
        );
        assert_eq!(
            AnalysisError::JobFailure("Unknown error".to_string()).to_string(),
            "Analysis failed: Unknown error"
        );
        assert_eq!(
            AnalysisError::Submission("HTTP 500: boom".to_string()).to_string(),
            "Analysis submission failed: HTTP 500: boom"
        );
        assert_eq!(AnalysisError::TimedOut { attempts: 3 }.kind(), "timeout");
    }
}
