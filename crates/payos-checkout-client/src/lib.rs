//! Native PayOS checkout client.
//!
//! Pairs the runtime-agnostic [`checkout`] flow with a `reqwest` transport
//! and a `tokio` countdown driver.
//!
//! # Quick Example
//!
//! ```no_run
//! use checkout::{CheckoutConfig, CheckoutController, CheckoutOutcome, CheckoutParams};
//! use checkout_client::HttpPaymentApi;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), checkout::CheckoutError> {
//! let config = CheckoutConfig::from_env()?;
//! let controller = CheckoutController::new(HttpPaymentApi::new(&config)?, config);
//!
//! match controller.start(&CheckoutParams::new(Some("50000"), None)).await {
//!     Some(CheckoutOutcome::ShowQr(payment)) => println!("scan: {}", payment.qr_code),
//!     Some(CheckoutOutcome::Redirect(url)) => println!("open: {url}"),
//!     Some(CheckoutOutcome::Failed(e)) => eprintln!("{}", e.user_message()),
//!     None => {}
//! }
//! # Ok(())
//! # }
//! ```

mod http_client;
mod navigator;
mod timer;

pub use http_client::HttpPaymentApi;
pub use navigator::TerminalNavigator;
pub use timer::{OverlaySession, OverlayTimer, SharedOverlay};

// Re-export commonly needed types from core
pub use checkout::{
    CheckoutConfig, CheckoutController, CheckoutError, CheckoutOutcome, CheckoutParams,
    Navigator, QrOverlay, QrPayment, Route,
};
