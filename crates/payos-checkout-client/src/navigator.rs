use checkout::{Navigator, Route};
use tokio::sync::mpsc;

/// Navigator for the terminal: in-app routes are forwarded to the CLI loop,
/// external URLs are printed for the shopper to open.
pub struct TerminalNavigator {
    routes: mpsc::UnboundedSender<Route>,
}

impl TerminalNavigator {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (routes, rx) = mpsc::unbounded_channel();
        (Self { routes }, rx)
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        tracing::debug!(path = %route.path(), "navigate");
        if self.routes.send(route).is_err() {
            tracing::debug!("navigation after the checkout loop ended");
        }
    }

    fn redirect(&self, url: &str) {
        tracing::info!(url, "redirecting to gateway");
        println!("Continue the payment at: {url}");
    }

    fn open_external(&self, url: &str) {
        println!("Gateway checkout page: {url}");
    }
}
