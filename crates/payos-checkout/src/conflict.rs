//! Classification of failed payment-link calls.
//!
//! The gateway reports "a payment link for this order already exists" as
//! code [`CONFLICT_CODE`]. The structured `code` field is checked first; the
//! text markers only apply to backends that forward the gateway error as an
//! untyped message.

use crate::constants::CONFLICT_CODE;
use crate::error::CheckoutError;
use crate::payment::ApiErrorBody;

/// Text that marks a conflict in an untyped error payload.
const CONFLICT_MARKERS: &[&str] = &["231", "already exists", "đã tồn tại"];

/// Turn a non-2xx response into a [`CheckoutError`].
///
/// `raw` is the response body as received; it is parsed here so that
/// unparseable bodies still get the text check.
pub fn classify_failure(status: u16, raw: &str) -> CheckoutError {
    let body: ApiErrorBody = serde_json::from_str(raw).unwrap_or_default();

    if is_conflict(&body, raw) {
        let message = body
            .desc
            .clone()
            .or_else(|| body.message.clone())
            .unwrap_or_else(|| format!("code {CONFLICT_CODE}"));
        return CheckoutError::Conflict(message);
    }

    CheckoutError::Api {
        status,
        code: body.code,
        message: body.message.or(body.desc),
    }
}

fn is_conflict(body: &ApiErrorBody, raw: &str) -> bool {
    if body.code == Some(CONFLICT_CODE) {
        return true;
    }
    let has_marker = |text: &str| {
        let text = text.to_lowercase();
        CONFLICT_MARKERS.iter().any(|m| text.contains(m))
    };
    body.desc.as_deref().is_some_and(has_marker)
        || body.message.as_deref().is_some_and(has_marker)
        || has_marker(raw)
}
