//! Result pages the gateway redirects back to.

use crate::constants::CANCELLED_STATUS;
use crate::navigation::Route;

/// What the success page should do with its query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuccessView {
    Confirmed { order_code: Option<String> },
    /// The gateway sent a cancelled session to the success URL.
    RedirectToCancel,
}

impl SuccessView {
    pub fn resolve(order_code: Option<&str>, status: Option<&str>) -> Self {
        if status == Some(CANCELLED_STATUS) {
            tracing::info!(?order_code, "cancelled session on success page");
            return SuccessView::RedirectToCancel;
        }
        SuccessView::Confirmed {
            order_code: order_code.filter(|c| !c.is_empty()).map(String::from),
        }
    }

    /// Resolve from a parsed route. Any route other than the success page
    /// resolves as a confirmation without an order code.
    pub fn from_route(route: &Route) -> Self {
        match route {
            Route::PaymentSuccess { order_code, status } => {
                Self::resolve(order_code.as_deref(), status.as_deref())
            }
            _ => SuccessView::Confirmed { order_code: None },
        }
    }

    pub fn redirect(&self) -> Option<Route> {
        match self {
            SuccessView::RedirectToCancel => Some(Route::PaymentCancel),
            SuccessView::Confirmed { .. } => None,
        }
    }
}
