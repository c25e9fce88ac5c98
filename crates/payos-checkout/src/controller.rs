//! The checkout controller: one payment-link request per view, one retry on
//! conflict, and a single outcome.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::api::PaymentApi;
use crate::config::CheckoutConfig;
use crate::error::CheckoutError;
use crate::overlay::QrPayment;
use crate::payment::{PaymentLinkRequest, PaymentLinkResponse};

/// Query parameters of the checkout page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutParams {
    pub amount: Option<String>,
    pub order_id: Option<String>,
}

impl CheckoutParams {
    pub fn new(amount: Option<&str>, order_id: Option<&str>) -> Self {
        Self {
            amount: amount.map(String::from),
            order_id: order_id.map(String::from),
        }
    }

    /// The amount as a positive integer.
    pub fn validate(&self) -> Result<u64, CheckoutError> {
        let raw = self
            .amount
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or(CheckoutError::MissingAmount)?;
        match raw.parse::<u64>() {
            Ok(amount) if amount > 0 => Ok(amount),
            _ => Err(CheckoutError::InvalidAmount(raw.to_string())),
        }
    }
}

/// The single terminal state of a checkout attempt.
#[derive(Debug)]
pub enum CheckoutOutcome {
    /// Show the code in the overlay.
    ShowQr(QrPayment),
    /// No code available: navigate the whole page to the gateway.
    Redirect(String),
    Failed(CheckoutError),
}

/// Cloneable "is this view still mounted" flag.
///
/// The hosting view deactivates it on teardown; results arriving afterwards
/// are dropped rather than applied.
#[derive(Debug, Clone)]
pub struct ActiveView(Arc<AtomicBool>);

impl Default for ActiveView {
    fn default() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }
}

impl ActiveView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn deactivate(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Drives one checkout page view.
///
/// The request latch lives here rather than in reactive state: hosts may
/// invoke [`start`](Self::start) more than once per mount, and only the first
/// valid call reaches the backend.
pub struct CheckoutController<A> {
    api: A,
    config: CheckoutConfig,
    requested: AtomicBool,
    view: ActiveView,
}

impl<A: PaymentApi> CheckoutController<A> {
    pub fn new(api: A, config: CheckoutConfig) -> Self {
        Self {
            api,
            config,
            requested: AtomicBool::new(false),
            view: ActiveView::new(),
        }
    }

    /// Handle the hosting view uses to signal teardown.
    pub fn view(&self) -> ActiveView {
        self.view.clone()
    }

    pub fn has_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Run the checkout for `params`.
    ///
    /// Returns `None` when the call is a duplicate (a request was already
    /// issued by this controller) or when the view was torn down before the
    /// result arrived. Validation failures return immediately without
    /// touching the latch or the network.
    pub async fn start(&self, params: &CheckoutParams) -> Option<CheckoutOutcome> {
        let amount = match params.validate() {
            Ok(amount) => amount,
            Err(e) => {
                tracing::warn!(error = %e, "checkout rejected before request");
                return Some(CheckoutOutcome::Failed(e));
            }
        };

        if self.requested.swap(true, Ordering::SeqCst) {
            tracing::debug!("payment link already requested for this view");
            return None;
        }

        let request = PaymentLinkRequest::new(
            amount,
            params.order_id.as_deref(),
            &self.config.description,
            &self.config.return_url(),
            &self.config.cancel_url(),
        );
        let outcome = self.create(&request).await;

        if !self.view.is_active() {
            tracing::info!("checkout view closed before the payment link arrived");
            return None;
        }
        Some(outcome)
    }

    async fn create(&self, request: &PaymentLinkRequest) -> CheckoutOutcome {
        let endpoint = request.endpoint();
        tracing::info!(endpoint, "creating payment link");

        match self.api.create_payment_link(request).await {
            Ok(resp) => interpret(resp),
            Err(err) if err.is_conflict() => {
                tracing::warn!(endpoint, error = %err, "payment link already exists, retrying once");
                match self.api.create_payment_link(request).await {
                    Ok(resp) => interpret(resp),
                    Err(retry_err) => {
                        tracing::error!(endpoint, error = %retry_err, "conflict retry failed");
                        CheckoutOutcome::Failed(CheckoutError::RetryFailed(Box::new(retry_err)))
                    }
                }
            }
            Err(err) => {
                tracing::error!(endpoint, error = %err, "payment link creation failed");
                CheckoutOutcome::Failed(err)
            }
        }
    }
}

/// Map a 2xx envelope to an outcome.
pub fn interpret(resp: PaymentLinkResponse) -> CheckoutOutcome {
    if !resp.is_success() {
        tracing::error!(code = resp.code, message = ?resp.message, "payment link rejected");
        return CheckoutOutcome::Failed(CheckoutError::Rejected {
            code: resp.code,
            message: resp.message,
        });
    }

    let Some(checkout_url) = resp.checkout_url() else {
        tracing::error!(message = ?resp.message, "payment link response has no checkout url");
        return CheckoutOutcome::Failed(CheckoutError::MissingCheckoutUrl {
            message: resp.message,
        });
    };

    match resp.qr_code() {
        Some(qr_code) => {
            let order_code = resp.order_code().map(String::from);
            tracing::info!(order_code = ?order_code, "payment link created with qr code");
            CheckoutOutcome::ShowQr(QrPayment {
                qr_code: qr_code.to_string(),
                checkout_url: checkout_url.to_string(),
                order_code,
            })
        }
        None => {
            tracing::info!(checkout_url, "payment link has no qr code, redirecting");
            CheckoutOutcome::Redirect(checkout_url.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::PaymentLinkResult;

    fn success(checkout_url: Option<&str>, qr_code: Option<&str>) -> PaymentLinkResponse {
        PaymentLinkResponse {
            code: 1000,
            message: Some("ok".to_string()),
            result: Some(PaymentLinkResult {
                checkout_url: checkout_url.map(String::from),
                order_code: Some("778899".to_string()),
                message: None,
                qr_code: qr_code.map(String::from),
            }),
        }
    }

    #[test]
    fn test_validate_amount() {
        assert_eq!(CheckoutParams::new(Some("50000"), None).validate().unwrap(), 50_000);
        assert_eq!(CheckoutParams::new(Some(" 7 "), None).validate().unwrap(), 7);
        assert!(matches!(
            CheckoutParams::new(None, Some("ord-1")).validate(),
            Err(CheckoutError::MissingAmount)
        ));
        for bad in ["0", "-5", "12.5", "abc", "1e3"] {
            assert!(
                matches!(
                    CheckoutParams::new(Some(bad), None).validate(),
                    Err(CheckoutError::InvalidAmount(_))
                ),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_interpret_qr() {
        match interpret(success(Some("https://pay.example/c"), Some("0002010102"))) {
            CheckoutOutcome::ShowQr(p) => {
                assert_eq!(p.checkout_url, "https://pay.example/c");
                assert_eq!(p.qr_code, "0002010102");
                assert_eq!(p.order_code.as_deref(), Some("778899"));
            }
            other => panic!("expected qr, got {other:?}"),
        }
    }

    #[test]
    fn test_interpret_redirect_without_qr() {
        assert!(matches!(
            interpret(success(Some("https://pay.example/c"), None)),
            CheckoutOutcome::Redirect(url) if url == "https://pay.example/c"
        ));
    }

    #[test]
    fn test_interpret_missing_checkout_url() {
        let outcome = interpret(success(None, Some("0002")));
        match outcome {
            CheckoutOutcome::Failed(e @ CheckoutError::MissingCheckoutUrl { .. }) => {
                assert_eq!(e.user_message(), "ok");
            }
            other => panic!("expected missing url, got {other:?}"),
        }
    }

    #[test]
    fn test_interpret_non_success_code() {
        let resp = PaymentLinkResponse {
            code: 1005,
            message: None,
            result: None,
        };
        match interpret(resp) {
            CheckoutOutcome::Failed(e @ CheckoutError::Rejected { code: 1005, .. }) => {
                assert_eq!(e.user_message(), "Could not create the payment link.");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_active_view_shared_between_clones() {
        let view = ActiveView::new();
        let other = view.clone();
        assert!(other.is_active());
        view.deactivate();
        assert!(!other.is_active());
    }
}
