//! Browser transport for payment-link creation.

use checkout::{
    classify_failure, CheckoutConfig, CheckoutError, PaymentApi, PaymentLinkRequest,
    PaymentLinkResponse, DEFAULT_API_URL,
};
use futures::future::{select, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;

/// Backend URL. Override at compile time via CHECKOUT_API_URL.
const API_URL: &str = {
    match option_env!("CHECKOUT_API_URL") {
        Some(url) => url,
        None => DEFAULT_API_URL,
    }
};

/// Payment description sent with every request (CHECKOUT_DESCRIPTION).
const DESCRIPTION: &str = {
    match option_env!("CHECKOUT_DESCRIPTION") {
        Some(description) => description,
        None => "",
    }
};

/// Build the checkout config for the page's own origin.
pub fn app_config(origin: &str) -> Result<CheckoutConfig, CheckoutError> {
    Ok(CheckoutConfig::new(API_URL, origin)?.with_description(DESCRIPTION))
}

/// `gloo-net` implementation of [`PaymentApi`].
///
/// The fetch is raced against a timer; on timeout the fetch is abandoned,
/// not aborted.
pub struct GlooPaymentApi {
    config: CheckoutConfig,
}

impl GlooPaymentApi {
    pub fn new(config: &CheckoutConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl PaymentApi for GlooPaymentApi {
    async fn create_payment_link(
        &self,
        request: &PaymentLinkRequest,
    ) -> Result<PaymentLinkResponse, CheckoutError> {
        let url = self.config.endpoint_url(request.endpoint());

        let send = async {
            let resp = Request::post(&url)
                .json(request)
                .map_err(|e| CheckoutError::Network(format!("failed to encode request: {e}")))?
                .send()
                .await
                .map_err(|e| CheckoutError::Network(format!("request to {url} failed: {e}")))?;

            let status = resp.status();
            let body = resp
                .text()
                .await
                .map_err(|e| CheckoutError::Network(format!("failed to read body: {e}")))?;

            if !(200..300).contains(&status) {
                return Err(classify_failure(status, &body));
            }
            Ok::<_, CheckoutError>(serde_json::from_str::<PaymentLinkResponse>(&body)?)
        };

        let millis = u32::try_from(self.config.request_timeout.as_millis()).unwrap_or(u32::MAX);
        let timeout = TimeoutFuture::new(millis);
        futures::pin_mut!(send);
        futures::pin_mut!(timeout);

        match select(send, timeout).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => {
                log::error!("payment link request timed out after {millis} ms");
                Err(CheckoutError::Timeout)
            }
        }
    }
}
