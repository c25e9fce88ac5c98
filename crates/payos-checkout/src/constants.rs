use std::time::Duration;

/// Backend base URL used when `CHECKOUT_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Origin the gateway redirects back to when `CHECKOUT_APP_ORIGIN` is not set.
pub const DEFAULT_APP_ORIGIN: &str = "http://localhost:3000";

/// Anonymous payment-link endpoint (amount + description).
pub const TEST_ENDPOINT: &str = "/payments/payos/test";

/// Named-order payment-link endpoint (order id + description).
pub const ORDER_ENDPOINT: &str = "/payments/payos/create";

/// Envelope `code` signalling success.
pub const SUCCESS_CODE: i64 = 1000;

/// Gateway error code for "a payment link for this order already exists".
pub const CONFLICT_CODE: i64 = 231;

/// Client-side timeout for a single payment-link creation call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Lifetime of a displayed payment code, in seconds.
pub const QR_LIFETIME_SECS: u32 = 300;

/// Interval between countdown ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// How long the "expired" notice stays up before the overlay dismisses itself.
pub const EXPIRY_GRACE: Duration = Duration::from_secs(2);

/// Status value the gateway appends to the return URL for cancelled sessions.
pub const CANCELLED_STATUS: &str = "CANCELLED";

pub const HOME_PATH: &str = "/";
pub const CHECKOUT_PATH: &str = "/checkout";
pub const SUCCESS_PATH: &str = "/payment/success";
pub const CANCEL_PATH: &str = "/payment/cancel";
