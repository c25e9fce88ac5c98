use std::rc::Rc;

use checkout::{Navigator, Route as Page};
use leptos::window;
use leptos_router::NavigateOptions;

/// [`Navigator`] backed by the router and `window`.
#[derive(Clone)]
pub struct BrowserNavigator {
    navigate: Rc<dyn Fn(&str, NavigateOptions)>,
}

impl BrowserNavigator {
    pub fn new(navigate: impl Fn(&str, NavigateOptions) + 'static) -> Self {
        Self {
            navigate: Rc::new(navigate),
        }
    }
}

impl Navigator for BrowserNavigator {
    fn navigate(&self, route: Page) {
        (self.navigate)(&route.path(), NavigateOptions::default());
    }

    fn redirect(&self, url: &str) {
        log::info!("no QR code, redirecting to {url}");
        if let Err(e) = window().location().replace(url) {
            log::error!("redirect failed: {e:?}");
        }
    }

    fn open_external(&self, url: &str) {
        if let Err(e) = window().open_with_url_and_target(url, "_blank") {
            log::error!("failed to open {url}: {e:?}");
        }
    }
}
