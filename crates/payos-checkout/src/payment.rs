use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{ORDER_ENDPOINT, SUCCESS_CODE, TEST_ENDPOINT};

/// Body for the anonymous endpoint: the shopper pays a bare amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountPaymentLink {
    pub amount: u64,
    pub description: String,
    pub return_url: String,
    pub cancel_url: String,
}

/// Body for the order endpoint: the backend prices a known order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPaymentLink {
    pub order_id: String,
    pub description: String,
    pub return_url: String,
    pub cancel_url: String,
}

/// A payment-link creation request. Exactly one shape is sent per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaymentLinkRequest {
    Amount(AmountPaymentLink),
    Order(OrderPaymentLink),
}

impl PaymentLinkRequest {
    /// Build a request, picking the order shape only for a non-blank order id.
    pub fn new(
        amount: u64,
        order_id: Option<&str>,
        description: &str,
        return_url: &str,
        cancel_url: &str,
    ) -> Self {
        match order_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(order_id) => PaymentLinkRequest::Order(OrderPaymentLink {
                order_id: order_id.to_string(),
                description: description.to_string(),
                return_url: return_url.to_string(),
                cancel_url: cancel_url.to_string(),
            }),
            None => PaymentLinkRequest::Amount(AmountPaymentLink {
                amount,
                description: description.to_string(),
                return_url: return_url.to_string(),
                cancel_url: cancel_url.to_string(),
            }),
        }
    }

    /// Backend path this request is posted to.
    pub fn endpoint(&self) -> &'static str {
        match self {
            PaymentLinkRequest::Amount(_) => TEST_ENDPOINT,
            PaymentLinkRequest::Order(_) => ORDER_ENDPOINT,
        }
    }
}

/// Envelope returned by both payment-link endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinkResponse {
    pub code: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<PaymentLinkResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinkResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_url: Option<String>,
    /// Gateway-assigned session id. Some backends send it as a number.
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub order_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
}

impl PaymentLinkResponse {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    pub fn checkout_url(&self) -> Option<&str> {
        self.result
            .as_ref()
            .and_then(|r| present(&r.checkout_url))
    }

    pub fn qr_code(&self) -> Option<&str> {
        self.result.as_ref().and_then(|r| present(&r.qr_code))
    }

    pub fn order_code(&self) -> Option<&str> {
        self.result.as_ref().and_then(|r| present(&r.order_code))
    }
}

/// Body of a non-2xx response. Every field is optional; backends differ.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_order_id_selects_amount_shape() {
        for order_id in [None, Some(""), Some("   ")] {
            let req = PaymentLinkRequest::new(50_000, order_id, "", "r", "c");
            assert!(matches!(req, PaymentLinkRequest::Amount(_)));
            assert_eq!(req.endpoint(), TEST_ENDPOINT);
        }
    }

    #[test]
    fn test_order_id_selects_order_shape() {
        let req = PaymentLinkRequest::new(50_000, Some("ord-42"), "", "r", "c");
        assert_eq!(req.endpoint(), ORDER_ENDPOINT);

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["orderId"], "ord-42");
        assert_eq!(json["returnUrl"], "r");
        assert_eq!(json["cancelUrl"], "c");
        assert!(json.get("amount").is_none());
    }

    #[test]
    fn test_amount_body_is_camel_case() {
        let req = PaymentLinkRequest::new(50_000, None, "", "r", "c");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["amount"], 50_000);
        assert_eq!(json["description"], "");
        assert!(json.get("orderId").is_none());
    }

    #[test]
    fn test_response_tolerates_extra_and_missing_fields() {
        let body = r#"{
            "code": 1000,
            "message": "ok",
            "result": {"checkoutUrl": "https://pay.example/c/1", "orderCode": 123456},
            "timestamp": "2024-01-01T00:00:00",
            "path": "/payments/payos/test"
        }"#;
        let resp: PaymentLinkResponse = serde_json::from_str(body).unwrap();
        assert!(resp.is_success());
        assert_eq!(resp.checkout_url(), Some("https://pay.example/c/1"));
        assert_eq!(resp.order_code(), Some("123456"));
        assert_eq!(resp.qr_code(), None);
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let body = r#"{"code": 1000, "result": {"checkoutUrl": "", "qrCode": ""}}"#;
        let resp: PaymentLinkResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.checkout_url(), None);
        assert_eq!(resp.qr_code(), None);
    }

    #[test]
    fn test_error_body_partial() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"desc": "x"}"#).unwrap();
        assert_eq!(body.code, None);
        assert_eq!(body.desc.as_deref(), Some("x"));
    }
}
