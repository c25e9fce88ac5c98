use thiserror::Error;

const GENERIC_FAILURE: &str = "Could not create the payment link.";
const UNEXPECTED_FAILURE: &str = "Something went wrong while creating the payment link.";
const RETRY_FAILURE: &str = "Could not create the payment link. Please try again later.";
const NETWORK_FAILURE: &str = "Could not reach the server. Please reload and try again.";

/// Errors returned by checkout operations.
///
/// `Display` is the diagnostic form used in logs; [`CheckoutError::user_message`]
/// is what the shopper sees.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("missing amount")]
    MissingAmount,

    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response that is not a conflict.
    #[error("api error (status {status}, code {code:?}): {message:?}")]
    Api {
        status: u16,
        code: Option<i64>,
        message: Option<String>,
    },

    /// A payment link for this order already exists.
    #[error("payment link already exists: {0}")]
    Conflict(String),

    /// HTTP 200 with a non-success envelope code.
    #[error("payment link rejected (code {code}): {message:?}")]
    Rejected { code: i64, message: Option<String> },

    #[error("response has no checkout url: {message:?}")]
    MissingCheckoutUrl { message: Option<String> },

    /// The single conflict retry failed outright.
    #[error("conflict retry failed: {0}")]
    RetryFailed(#[source] Box<CheckoutError>),

    #[error("config error: {0}")]
    Config(String),

    #[error("qr code error: {0}")]
    Qr(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl CheckoutError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, CheckoutError::Conflict(_))
    }

    /// Shopper-facing message. Server-supplied text wins where one exists.
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::MissingAmount => "Please enter an amount.".to_string(),
            CheckoutError::InvalidAmount(_) => "The amount must be a positive whole number.".to_string(),
            CheckoutError::Timeout => "Request timed out. Please reload and try again.".to_string(),
            CheckoutError::Rejected { message, .. }
            | CheckoutError::MissingCheckoutUrl { message } => non_empty(message)
                .unwrap_or(GENERIC_FAILURE)
                .to_string(),
            CheckoutError::Api { message, .. } => non_empty(message)
                .unwrap_or(UNEXPECTED_FAILURE)
                .to_string(),
            CheckoutError::Network(_) => NETWORK_FAILURE.to_string(),
            CheckoutError::RetryFailed(_) => RETRY_FAILURE.to_string(),
            _ => UNEXPECTED_FAILURE.to_string(),
        }
    }
}

fn non_empty(message: &Option<String>) -> Option<&str> {
    message.as_deref().filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_prefers_server_message() {
        let err = CheckoutError::Rejected {
            code: 1001,
            message: Some("Amount too small".to_string()),
        };
        assert_eq!(err.user_message(), "Amount too small");
    }

    #[test]
    fn test_rejected_falls_back_on_blank_message() {
        let err = CheckoutError::Rejected {
            code: 1001,
            message: Some("  ".to_string()),
        };
        assert_eq!(err.user_message(), GENERIC_FAILURE);

        let err = CheckoutError::MissingCheckoutUrl { message: None };
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn test_retry_failure_is_generic() {
        let err = CheckoutError::RetryFailed(Box::new(CheckoutError::Api {
            status: 500,
            code: Some(9999),
            message: Some("boom".to_string()),
        }));
        assert_eq!(err.user_message(), RETRY_FAILURE);
        assert!(!err.is_conflict());
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_network_failure_hides_transport_detail() {
        let err = CheckoutError::Network(
            "request failed: error sending request for url (http://127.0.0.1:1/payments/payos/test)"
                .to_string(),
        );
        assert_eq!(err.user_message(), NETWORK_FAILURE);
        assert!(!err.user_message().contains("127.0.0.1"));
        assert!(err.to_string().contains("127.0.0.1"));
    }
}
