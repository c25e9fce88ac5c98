//! Tokio driver for the QR overlay countdown.

use std::sync::Arc;

use checkout::{Navigator, QrOverlay, QrPayment, Tick, EXPIRY_GRACE, TICK_INTERVAL};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;

pub type SharedOverlay = Arc<Mutex<QrOverlay>>;

/// Background countdown for one shown code. Aborted on drop, so neither the
/// tick nor the grace close can outlive it.
pub struct OverlayTimer {
    handle: JoinHandle<()>,
}

impl OverlayTimer {
    pub fn start<N>(overlay: SharedOverlay, navigator: Arc<N>) -> Self
    where
        N: Navigator + Send + Sync + 'static,
    {
        Self {
            handle: tokio::spawn(run_countdown(overlay, navigator)),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for OverlayTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn run_countdown<N: Navigator>(overlay: SharedOverlay, navigator: Arc<N>) {
    let mut ticks = tokio::time::interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
    loop {
        ticks.tick().await;
        match overlay.lock().await.tick() {
            Tick::Counting(left) => tracing::trace!(left, "countdown tick"),
            Tick::Expired => break,
            Tick::Idle => return,
        }
    }

    tokio::time::sleep(EXPIRY_GRACE).await;
    let route = overlay.lock().await.finish_expiry();
    if let Some(route) = route {
        tracing::info!("payment code expired, leaving checkout");
        navigator.navigate(route);
    }
}

/// The overlay as shown by one checkout view: state, navigator and the
/// running countdown.
pub struct OverlaySession<N> {
    overlay: SharedOverlay,
    navigator: Arc<N>,
    timer: Option<OverlayTimer>,
}

impl<N> OverlaySession<N>
where
    N: Navigator + Send + Sync + 'static,
{
    pub fn new(navigator: Arc<N>) -> Self {
        Self {
            overlay: Arc::new(Mutex::new(QrOverlay::new())),
            navigator,
            timer: None,
        }
    }

    pub fn overlay(&self) -> SharedOverlay {
        self.overlay.clone()
    }

    /// Show a code and (re)start the countdown.
    pub async fn show(&mut self, payment: QrPayment) {
        self.timer = None;
        self.overlay.lock().await.show(payment);
        self.timer = Some(OverlayTimer::start(
            self.overlay.clone(),
            self.navigator.clone(),
        ));
    }

    /// Manual close: stop the countdown, clear the overlay, go home.
    pub async fn close(&mut self) {
        self.timer = None;
        let route = self.overlay.lock().await.close();
        self.navigator.navigate(route);
    }

    /// Open the gateway page in a new context; overlay state is untouched.
    pub async fn open_gateway(&self) {
        let overlay = self.overlay.lock().await;
        if let Some(url) = overlay.open_gateway() {
            self.navigator.open_external(url);
        }
    }

    pub async fn snapshot(&self) -> QrOverlay {
        self.overlay.lock().await.clone()
    }

    /// True once the countdown has run its course (or was never started).
    pub fn is_idle(&self) -> bool {
        self.timer.as_ref().map_or(true, OverlayTimer::is_finished)
    }
}
