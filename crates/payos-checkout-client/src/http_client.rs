use checkout::{
    classify_failure, CheckoutConfig, CheckoutError, PaymentApi, PaymentLinkRequest,
    PaymentLinkResponse,
};

/// `reqwest`-backed [`PaymentApi`].
///
/// Posts the request body as JSON to the configured endpoint URL with the
/// configured timeout (10 s by default). Non-2xx responses go through
/// [`classify_failure`] so a "link already exists" answer comes back as
/// [`CheckoutError::Conflict`].
pub struct HttpPaymentApi {
    http: reqwest::Client,
    config: CheckoutConfig,
}

impl HttpPaymentApi {
    pub fn new(config: &CheckoutConfig) -> Result<Self, CheckoutError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| CheckoutError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_http_client(config, http))
    }

    /// Create a client around a custom `reqwest::Client`. The client's own
    /// timeout applies.
    pub fn with_http_client(config: &CheckoutConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            config: config.clone(),
        }
    }
}

impl PaymentApi for HttpPaymentApi {
    async fn create_payment_link(
        &self,
        request: &PaymentLinkRequest,
    ) -> Result<PaymentLinkResponse, CheckoutError> {
        let url = self.config.endpoint_url(request.endpoint());

        let resp = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        let body = resp.text().await.map_err(transport_error)?;
        tracing::debug!(%url, status = status.as_u16(), "payment link response");

        if !status.is_success() {
            return Err(classify_failure(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn transport_error(e: reqwest::Error) -> CheckoutError {
    if e.is_timeout() {
        CheckoutError::Timeout
    } else {
        CheckoutError::Network(format!("request failed: {e}"))
    }
}
