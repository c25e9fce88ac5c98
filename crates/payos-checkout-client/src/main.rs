use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use checkout::{
    format_vnd, qr, Cart, CheckoutConfig, CheckoutController, CheckoutError, CheckoutOutcome,
    CheckoutParams, Navigator, OverlayPhase, Route, SuccessView,
};
use checkout_client::{HttpPaymentApi, OverlaySession, TerminalNavigator};
use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Pay for the demo cart (or a given amount/order) through PayOS.
#[derive(Debug, Parser)]
#[command(name = "payos-checkout", version)]
struct Cli {
    /// Amount in VND. Defaults to the demo cart total.
    #[arg(long)]
    amount: Option<String>,

    /// Merchant order id; switches to the order endpoint.
    #[arg(long)]
    order_id: Option<String>,

    /// Backend base URL.
    #[arg(long, env = "CHECKOUT_API_URL")]
    api_url: Option<String>,

    /// Shop origin used for the gateway's return and cancel URLs.
    #[arg(long, env = "CHECKOUT_APP_ORIGIN")]
    app_origin: Option<String>,

    /// Show the result page for a gateway return URL instead of paying.
    #[arg(long, value_name = "URL")]
    result: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,payos_checkout=info,checkout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Some(location) = cli.result.as_deref() {
        return show_result(location);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "checkout failed");
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CheckoutError> {
    let config = CheckoutConfig::from_lookup(|key| match key {
        "CHECKOUT_API_URL" => cli.api_url.clone(),
        "CHECKOUT_APP_ORIGIN" => cli.app_origin.clone(),
        other => std::env::var(other).ok(),
    })?;

    let amount = match cli.amount {
        Some(amount) => amount,
        None => {
            let cart = Cart::demo();
            for item in &cart.items {
                println!(
                    "{} x{}  {}",
                    item.name,
                    item.quantity,
                    format_vnd(item.line_total())
                );
            }
            println!("Total: {}", format_vnd(cart.total()));
            cart.total().to_string()
        }
    };
    let params = CheckoutParams::new(Some(&amount), cli.order_id.as_deref());

    let (navigator, mut routes) = TerminalNavigator::new();
    let navigator = Arc::new(navigator);

    let api = HttpPaymentApi::new(&config)?;
    let controller = CheckoutController::new(api, config);

    println!("Processing order...");
    let payment = match controller.start(&params).await {
        Some(CheckoutOutcome::ShowQr(payment)) => payment,
        Some(CheckoutOutcome::Redirect(url)) => {
            navigator.redirect(&url);
            return Ok(());
        }
        Some(CheckoutOutcome::Failed(e)) => return Err(e),
        None => return Ok(()),
    };

    println!("{}", qr::render_terminal(&payment.qr_code)?);
    println!("Scan the QR code with your banking app to pay.");
    if let Some(order_code) = &payment.order_code {
        println!("Order code: {order_code}");
    }
    if let Ok(amount) = params.validate() {
        println!("Amount: {}", format_vnd(amount));
    }
    println!("[o] open gateway page   [q] close");

    let mut session = OverlaySession::new(navigator.clone());
    session.show(payment).await;

    let mut commands = spawn_stdin_reader();
    let mut display = tokio::time::interval(Duration::from_secs(1));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut closing = false;
    let mut stdin_open = true;
    let mut expiry_noticed = false;

    loop {
        tokio::select! {
            _ = display.tick() => {
                let overlay = session.snapshot().await;
                match overlay.phase() {
                    OverlayPhase::Visible => eprint!("\r{} remaining ", overlay.countdown_label()),
                    OverlayPhase::Expired if !expiry_noticed => {
                        expiry_noticed = true;
                        eprintln!("\r00:00 remaining ");
                        eprintln!("The QR code has expired. Please create a new order.");
                    }
                    OverlayPhase::Expired => {}
                    OverlayPhase::Hidden => {}
                }
            }
            cmd = commands.recv(), if stdin_open && !closing => match cmd.as_deref().map(str::trim) {
                Some("o") => session.open_gateway().await,
                Some("q") => {
                    closing = true;
                    session.close().await;
                }
                Some(_) => {}
                None => stdin_open = false,
            },
            _ = &mut ctrl_c, if !closing => {
                closing = true;
                session.close().await;
            }
            route = routes.recv() => {
                if let Some(route) = route {
                    eprintln!();
                    println!("Back to {}", route.path());
                }
                break;
            }
        }
    }

    Ok(())
}

/// Forward stdin lines over a channel from a dedicated thread.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn show_result(location: &str) -> ExitCode {
    let Some(route) = Route::parse(location) else {
        eprintln!("Unknown page: {location}");
        return ExitCode::FAILURE;
    };

    let route = if matches!(route, Route::PaymentSuccess { .. }) {
        match SuccessView::from_route(&route) {
            SuccessView::Confirmed { order_code } => {
                println!("Payment successful! Thank you for your purchase.");
                if let Some(code) = order_code {
                    println!("Order code: {code}");
                }
                return ExitCode::SUCCESS;
            }
            view => view.redirect().unwrap_or(Route::PaymentCancel),
        }
    } else {
        route
    };

    match route {
        Route::PaymentCancel => {
            println!("Payment cancelled. You can return to the shop and try again.");
            ExitCode::SUCCESS
        }
        other => {
            println!("Nothing to show for {}", other.path());
            ExitCode::SUCCESS
        }
    }
}
