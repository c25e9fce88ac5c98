//! The seam between the checkout flow and the backend transport.
//!
//! - [`PaymentApi`]: posts a [`PaymentLinkRequest`] and returns the decoded envelope
//!
//! The native implementation lives in `checkout_client::HttpPaymentApi`; the
//! web app has its own `gloo-net` one.

use std::future::Future;

use crate::error::CheckoutError;
use crate::payment::{PaymentLinkRequest, PaymentLinkResponse};

/// Creates payment links against the backend.
///
/// Implementations post to `request.endpoint()` and must resolve within the
/// configured request timeout, yielding [`CheckoutError::Timeout`] otherwise.
/// A non-2xx response is reported through
/// [`classify_failure`](crate::conflict::classify_failure) so that conflicts
/// surface as [`CheckoutError::Conflict`]. A 2xx response is returned as-is,
/// whatever its envelope `code`.
///
/// The returned future carries no `Send` bound so browser transports can
/// implement it.
pub trait PaymentApi {
    fn create_payment_link(
        &self,
        request: &PaymentLinkRequest,
    ) -> impl Future<Output = Result<PaymentLinkResponse, CheckoutError>>;
}

impl<T: PaymentApi> PaymentApi for &T {
    fn create_payment_link(
        &self,
        request: &PaymentLinkRequest,
    ) -> impl Future<Output = Result<PaymentLinkResponse, CheckoutError>> {
        (**self).create_payment_link(request)
    }
}
