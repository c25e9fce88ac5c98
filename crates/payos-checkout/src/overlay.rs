//! QR overlay state machine.
//!
//! `Hidden → Visible(300) → tick… → Expired(0) → (grace) → Hidden`. A manual
//! close from `Visible` or `Expired` goes straight to `Hidden`. The model is
//! pure: timer drivers call [`QrOverlay::tick`] once per
//! [`TICK_INTERVAL`](crate::constants::TICK_INTERVAL) and
//! [`QrOverlay::finish_expiry`] after
//! [`EXPIRY_GRACE`](crate::constants::EXPIRY_GRACE), and must cancel both
//! when the overlay closes.

use crate::constants::QR_LIFETIME_SECS;
use crate::navigation::Route;

/// A payment code ready to be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrPayment {
    pub qr_code: String,
    pub checkout_url: String,
    pub order_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPhase {
    Hidden,
    Visible,
    Expired,
}

/// Result of a single countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Nothing to count: the overlay is hidden or already expired.
    Idle,
    /// Seconds left after this tick.
    Counting(u32),
    /// This tick reached zero; schedule the grace close.
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrOverlay {
    payment: Option<QrPayment>,
    time_left: u32,
    lifetime: u32,
}

impl Default for QrOverlay {
    fn default() -> Self {
        Self::with_lifetime(QR_LIFETIME_SECS)
    }
}

impl QrOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lifetime(lifetime: u32) -> Self {
        Self {
            payment: None,
            time_left: lifetime,
            lifetime,
        }
    }

    pub fn phase(&self) -> OverlayPhase {
        match (&self.payment, self.time_left) {
            (None, _) => OverlayPhase::Hidden,
            (Some(_), 0) => OverlayPhase::Expired,
            (Some(_), _) => OverlayPhase::Visible,
        }
    }

    pub fn is_shown(&self) -> bool {
        self.payment.is_some()
    }

    pub fn payment(&self) -> Option<&QrPayment> {
        self.payment.as_ref()
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    /// Show a new code and restart the countdown.
    pub fn show(&mut self, payment: QrPayment) {
        tracing::debug!(order_code = ?payment.order_code, "showing payment code");
        self.payment = Some(payment);
        self.time_left = self.lifetime;
    }

    pub fn tick(&mut self) -> Tick {
        if self.phase() != OverlayPhase::Visible {
            return Tick::Idle;
        }
        self.time_left -= 1;
        if self.time_left == 0 {
            tracing::info!("payment code expired");
            Tick::Expired
        } else {
            Tick::Counting(self.time_left)
        }
    }

    /// Grace period over. Only acts on an expired overlay, so a grace timer
    /// that fires after a manual close does nothing.
    pub fn finish_expiry(&mut self) -> Option<Route> {
        if self.phase() != OverlayPhase::Expired {
            return None;
        }
        self.clear();
        Some(Route::Home)
    }

    /// Manual dismissal: clear everything and go back to the landing page.
    pub fn close(&mut self) -> Route {
        self.clear();
        Route::Home
    }

    /// Gateway URL for the "open in browser" action while the code is live.
    pub fn open_gateway(&self) -> Option<&str> {
        match self.phase() {
            OverlayPhase::Visible => self.payment.as_ref().map(|p| p.checkout_url.as_str()),
            _ => None,
        }
    }

    /// Remaining time as `MM:SS`.
    pub fn countdown_label(&self) -> String {
        format_countdown(self.time_left)
    }

    fn clear(&mut self) {
        self.payment = None;
        self.time_left = self.lifetime;
    }
}

pub fn format_countdown(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
