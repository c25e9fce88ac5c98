//! PayOS checkout flow for a small shop front-end.
//!
//! Creates a payment link through the shop backend, shows the returned code
//! as a QR image with a five-minute countdown, and falls back to a full-page
//! redirect when the gateway returns no code.
//!
//! # Pieces
//!
//! - **Controller** ([`CheckoutController`]): validates the amount, issues the
//!   request once per view, retries once on [`CheckoutError::Conflict`]
//! - **Overlay** ([`QrOverlay`]): countdown state machine driven by host timers
//! - **Transport** ([`PaymentApi`]): implemented natively by
//!   `checkout_client::HttpPaymentApi` and in the browser by the web app
//! - **Pages** ([`Route`], [`Cart`], [`SuccessView`]): landing cart, routes and
//!   the gateway's return pages
//!
//! This crate does no I/O of its own; it runs on tokio and in wasm alike.

// Core types
pub mod constants;
pub mod error;
pub mod payment;

// Flow
pub mod api;
pub mod config;
pub mod conflict;
pub mod controller;
pub mod overlay;

// Pages and presentation helpers
pub mod cart;
pub mod navigation;
pub mod qr;
pub mod result;

// Re-exports
pub use constants::*;
pub use error::CheckoutError;
pub use payment::*;

pub use api::PaymentApi;
pub use cart::{format_vnd, Cart, CartItem};
pub use config::{CheckoutConfig, ConfigError};
pub use conflict::classify_failure;
pub use controller::{ActiveView, CheckoutController, CheckoutOutcome, CheckoutParams};
pub use navigation::{Navigator, Route};
pub use overlay::{format_countdown, OverlayPhase, QrOverlay, QrPayment, Tick};
pub use result::SuccessView;
