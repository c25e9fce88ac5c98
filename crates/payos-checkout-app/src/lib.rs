use checkout::{
    format_vnd, qr, Cart, CheckoutController, CheckoutOutcome, CheckoutParams, Navigator,
    OverlayPhase, QrOverlay, SuccessView, Tick, EXPIRY_GRACE, TICK_INTERVAL,
};
use gloo_timers::callback::{Interval, Timeout};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use std::time::Duration;
use wasm_bindgen::prelude::*;

mod api;
mod navigator;

use api::{app_config, GlooPaymentApi};
use navigator::BrowserNavigator;

/// Main application component
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Html lang="vi" />
        <Meta charset="utf-8" />
        <Meta name="viewport" content="width=device-width, initial-scale=1" />
        <Title text="PayOS Checkout Demo" />
        <Stylesheet href="/style.css" />

        <Router>
            <main class="container">
                <Routes>
                    <Route path="/" view=LandingPage />
                    <Route path="/checkout" view=CheckoutPage />
                    <Route path="/payment/success" view=SuccessPage />
                    <Route path="/payment/cancel" view=CancelPage />
                    <Route path="/*any" view=NotFound />
                </Routes>
            </main>
        </Router>
    }
}

/// Demo cart with a single checkout button
#[component]
fn LandingPage() -> impl IntoView {
    let cart = Cart::demo();
    let total = cart.total();
    let route = cart.checkout_route();
    let empty = route.is_none();
    let (processing, set_processing) = create_signal(false);
    let navigate = use_navigate();

    let checkout = move |_| {
        if processing.get_untracked() {
            return;
        }
        let Some(route) = route.clone() else { return };
        set_processing.set(true);
        navigate(&route.path(), NavigateOptions::default());
    };

    let items = cart
        .items
        .into_iter()
        .map(|item| {
            let line = format_vnd(item.line_total());
            view! {
                <li class="cart-item">
                    <span class="name">{item.name}</span>
                    <span class="qty">"x" {item.quantity}</span>
                    <span class="price">{line}</span>
                </li>
            }
        })
        .collect_view();

    view! {
        <section class="shop">
            <h1>"Your cart"</h1>
            <ul class="cart">{items}</ul>
            <p class="total">"Total: " <strong>{format_vnd(total)}</strong></p>
            <button
                class="btn btn-primary"
                on:click=checkout
                disabled=move || empty || processing.get()
            >
                {move || if processing.get() { "Processing..." } else { "Checkout" }}
            </button>
        </section>
    }
}

/// Creates the payment link once per mount and shows the QR overlay
#[component]
fn CheckoutPage() -> impl IntoView {
    let query = use_query_map();
    let params = query.with_untracked(checkout_params);
    let amount = params.validate().ok();

    let (loading, set_loading) = create_signal(true);
    let (error, set_error) = create_signal(None::<String>);
    let overlay = create_rw_signal(QrOverlay::new());
    // Dropping a gloo timer cancels it; both are dropped with the page.
    let ticker = store_value(None::<Interval>);
    let grace = store_value(None::<Timeout>);
    let navigator = BrowserNavigator::new(use_navigate());

    let config = window()
        .location()
        .origin()
        .map_err(|e| format!("{e:?}"))
        .and_then(|origin| app_config(&origin).map_err(|e| e.to_string()));

    match config {
        Ok(config) => {
            let controller = CheckoutController::new(GlooPaymentApi::new(&config), config);
            let view_handle = controller.view();
            on_cleanup(move || view_handle.deactivate());

            let navigator = navigator.clone();
            spawn_local(async move {
                match controller.start(&params).await {
                    Some(CheckoutOutcome::ShowQr(payment)) => {
                        overlay.update(|o| o.show(payment));
                        ticker.set_value(Some(start_countdown(overlay, grace, navigator)));
                        set_loading.set(false);
                    }
                    Some(CheckoutOutcome::Redirect(url)) => navigator.redirect(&url),
                    Some(CheckoutOutcome::Failed(e)) => {
                        set_error.set(Some(e.user_message()));
                        set_loading.set(false);
                    }
                    None => {}
                }
            });
        }
        Err(e) => {
            log::error!("invalid checkout config: {e}");
            set_error.set(Some(
                "Something went wrong while creating the payment link.".to_string(),
            ));
            set_loading.set(false);
        }
    }

    let close_nav = navigator.clone();
    let on_close = Callback::new(move |_: ()| {
        ticker.set_value(None);
        grace.set_value(None);
        let mut route = checkout::Route::Home;
        overlay.update(|o| route = o.close());
        close_nav.navigate(route);
    });

    let on_open = Callback::new(move |_: ()| {
        let url = overlay.with_untracked(|o| o.open_gateway().map(str::to_string));
        if let Some(url) = url {
            navigator.open_external(&url);
        }
    });

    view! {
        <section class="checkout">
            <h1>"Checkout"</h1>
            <Show when=move || loading.get() fallback=|| ()>
                <p class="loading">"Processing order..."</p>
            </Show>
            <Show when=move || error.get().is_some() fallback=|| ()>
                <div class="error">
                    <p>{move || error.get().unwrap_or_default()}</p>
                    <a href="/" class="btn btn-secondary">"Back to shop"</a>
                </div>
            </Show>
            <QrModal overlay=overlay amount=amount on_close=on_close on_open=on_open />
        </section>
    }
}

/// Tick the overlay every second; on expiry, schedule the grace close.
fn start_countdown(
    overlay: RwSignal<QrOverlay>,
    grace: StoredValue<Option<Timeout>>,
    navigator: BrowserNavigator,
) -> Interval {
    let grace_ms = millis(EXPIRY_GRACE);
    Interval::new(millis(TICK_INTERVAL), move || {
        if overlay.with_untracked(|o| o.phase() != OverlayPhase::Visible) {
            return;
        }
        let mut tick = Tick::Idle;
        overlay.update(|o| tick = o.tick());
        if tick != Tick::Expired {
            return;
        }

        let navigator = navigator.clone();
        grace.set_value(Some(Timeout::new(grace_ms, move || {
            let mut next = None;
            overlay.update(|o| next = o.finish_expiry());
            if let Some(route) = next {
                // Navigating unmounts the page, which drops this timer.
                spawn_local(async move { navigator.navigate(route) });
            }
        })));
    })
}

fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

/// The QR modal with countdown, order details and gateway link
#[component]
fn QrModal(
    overlay: RwSignal<QrOverlay>,
    amount: Option<u64>,
    on_close: Callback<()>,
    on_open: Callback<()>,
) -> impl IntoView {
    let qr_data = create_memo(move |_| {
        overlay.with(|o| o.payment().map(|p| p.qr_code.clone()))
    });
    let qr_svg = create_memo(move |_| {
        qr_data.get().and_then(|data| match qr::render_svg(&data, qr::QR_IMAGE_SIZE) {
            Ok(svg) => Some(svg),
            Err(e) => {
                log::error!("failed to render QR code: {e}");
                None
            }
        })
    });
    let order_code = move || overlay.with(|o| o.payment().and_then(|p| p.order_code.clone()));
    let expired = move || overlay.with(|o| o.phase() == OverlayPhase::Expired);

    view! {
        <Show when=move || overlay.with(QrOverlay::is_shown) fallback=|| ()>
            <div class="overlay">
                <div class="modal">
                    <button class="modal-close" on:click=move |_| on_close.call(())>"×"</button>
                    <h2>"Scan to pay"</h2>
                    <div class="qr" prop:innerHTML=move || qr_svg.get().unwrap_or_default()></div>
                    <p class="countdown" class:expired=expired>
                        "Expires in " {move || overlay.with(QrOverlay::countdown_label)}
                    </p>
                    <Show when=expired fallback=|| ()>
                        <p class="error">"The QR code has expired. Please create a new order."</p>
                    </Show>
                    {amount.map(|a| view! { <p class="amount">"Amount: " {format_vnd(a)}</p> })}
                    {move || order_code().map(|c| view! { <p class="order-code">"Order code: " {c}</p> })}
                    <button class="btn btn-secondary" on:click=move |_| on_open.call(())>
                        "Open payment page"
                    </button>
                </div>
            </div>
        </Show>
    }
}

/// Return page for completed payments
#[component]
fn SuccessPage() -> impl IntoView {
    let query = use_query_map();
    let outcome = query.with_untracked(success_view);

    if let Some(route) = outcome.redirect() {
        let navigate = use_navigate();
        request_animation_frame(move || {
            navigate(
                &route.path(),
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            )
        });
    }

    let print = move |_| {
        if let Err(e) = window().print() {
            log::error!("print failed: {e:?}");
        }
    };

    match outcome {
        SuccessView::Confirmed { order_code } => view! {
            <section class="result success">
                <h1>"Payment successful!"</h1>
                <p>"Thank you for your purchase."</p>
                {order_code.map(|code| view! { <p class="order-code">"Order code: " <strong>{code}</strong></p> })}
                <div class="actions">
                    <a href="/" class="btn btn-primary">"Create new order"</a>
                    <button class="btn btn-secondary" on:click=print>"Print receipt"</button>
                </div>
            </section>
        }
        .into_view(),
        SuccessView::RedirectToCancel => view! { <p class="loading">"Redirecting..."</p> }.into_view(),
    }
}

/// Return page for cancelled payments
#[component]
fn CancelPage() -> impl IntoView {
    let go_back = move |_| {
        if let Err(e) = window().history().and_then(|h| h.back()) {
            log::error!("history back failed: {e:?}");
        }
    };

    view! {
        <section class="result cancel">
            <h1>"Payment cancelled"</h1>
            <p>"Your payment was not completed. No money has been charged."</p>
            <div class="actions">
                <a href="/" class="btn btn-primary">"Back to shop"</a>
                <button class="btn btn-secondary" on:click=go_back>"Go back"</button>
            </div>
        </section>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <section class="not-found">
            <h1>"404"</h1>
            <p>"Page not found"</p>
            <a href="/">"Go home"</a>
        </section>
    }
}

fn checkout_params(query: &ParamsMap) -> CheckoutParams {
    CheckoutParams::new(
        query.get("amount").map(String::as_str),
        query.get("orderId").map(String::as_str),
    )
}

fn success_view(query: &ParamsMap) -> SuccessView {
    SuccessView::resolve(
        query.get("orderCode").map(String::as_str),
        query.get("status").map(String::as_str),
    )
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("logger init failed: {e}").into());
    }
    mount_to_body(|| view! { <App /> });
}
