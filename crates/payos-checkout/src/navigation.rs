//! Typed routes of the shop front-end and the navigation seam.

use url::Url;

use crate::constants::{CANCEL_PATH, CHECKOUT_PATH, HOME_PATH, SUCCESS_PATH};

/// Base used to parse relative locations; only path and query are kept.
const PARSE_BASE: &str = "http://checkout.invalid";

/// A page of the shop front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Checkout {
        amount: Option<String>,
        order_id: Option<String>,
    },
    PaymentSuccess {
        order_code: Option<String>,
        status: Option<String>,
    },
    PaymentCancel,
}

impl Route {
    /// Checkout route for a cart total, without an order id.
    pub fn checkout_for_amount(amount: u64) -> Self {
        Route::Checkout {
            amount: Some(amount.to_string()),
            order_id: None,
        }
    }

    /// Path plus query string, e.g. `/checkout?amount=50000`.
    pub fn path(&self) -> String {
        match self {
            Route::Home => HOME_PATH.to_string(),
            Route::Checkout { amount, order_id } => with_query(
                CHECKOUT_PATH,
                &[("amount", amount.as_deref()), ("orderId", order_id.as_deref())],
            ),
            Route::PaymentSuccess { order_code, status } => with_query(
                SUCCESS_PATH,
                &[
                    ("orderCode", order_code.as_deref()),
                    ("status", status.as_deref()),
                ],
            ),
            Route::PaymentCancel => CANCEL_PATH.to_string(),
        }
    }

    /// Parse a location (relative path or absolute URL). Unknown paths give `None`.
    pub fn parse(location: &str) -> Option<Self> {
        let base = Url::parse(PARSE_BASE).ok()?;
        let url = base.join(location).ok()?;
        let param = |key: &str| {
            url.query_pairs()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.into_owned())
        };

        match url.path().trim_end_matches('/') {
            "" => Some(Route::Home),
            CHECKOUT_PATH => Some(Route::Checkout {
                amount: param("amount"),
                order_id: param("orderId"),
            }),
            SUCCESS_PATH => Some(Route::PaymentSuccess {
                order_code: param("orderCode"),
                status: param("status"),
            }),
            CANCEL_PATH => Some(Route::PaymentCancel),
            _ => None,
        }
    }
}

fn with_query(path: &str, params: &[(&str, Option<&str>)]) -> String {
    let query: Vec<String> = params
        .iter()
        .filter_map(|(k, v)| v.map(|v| format!("{}={}", k, urlencoding::encode(v))))
        .collect();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query.join("&"))
    }
}

/// Side effects the checkout flow asks of its host.
pub trait Navigator {
    /// In-app navigation to another page.
    fn navigate(&self, route: Route);

    /// Full-page navigation to an external URL, replacing the current entry.
    fn redirect(&self, url: &str);

    /// Open an external URL in a new browsing context.
    fn open_external(&self, url: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_path_encodes_params() {
        let route = Route::Checkout {
            amount: Some("50000".to_string()),
            order_id: Some("a b&c".to_string()),
        };
        assert_eq!(route.path(), "/checkout?amount=50000&orderId=a%20b%26c");
        assert_eq!(Route::parse(&route.path()), Some(route));
    }

    #[test]
    fn test_parse_known_pages() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse("/payment/cancel"), Some(Route::PaymentCancel));
        assert_eq!(
            Route::parse("https://shop.example/payment/success?orderCode=123&status=PAID&id=x"),
            Some(Route::PaymentSuccess {
                order_code: Some("123".to_string()),
                status: Some("PAID".to_string()),
            })
        );
        assert_eq!(
            Route::parse("/checkout"),
            Some(Route::Checkout {
                amount: None,
                order_id: None
            })
        );
    }

    #[test]
    fn test_parse_unknown_page() {
        assert_eq!(Route::parse("/admin"), None);
    }

    #[test]
    fn test_checkout_for_amount() {
        assert_eq!(
            Route::checkout_for_amount(50_000).path(),
            "/checkout?amount=50000"
        );
    }
}
