//! `HttpPaymentApi` against a local fake of the shop backend.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value};

use checkout::{
    CheckoutConfig, CheckoutController, CheckoutError, CheckoutOutcome, CheckoutParams,
    PaymentApi, PaymentLinkRequest,
};
use checkout_client::HttpPaymentApi;

/// Records request bodies and answers from a script, then with a QR success.
#[derive(Default)]
struct FakeBackend {
    received: Mutex<Vec<(String, Value)>>,
    script: Mutex<VecDeque<(u16, Value)>>,
    delay: Option<Duration>,
}

impl FakeBackend {
    fn scripted(replies: Vec<(u16, Value)>) -> Self {
        Self {
            script: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    fn received(&self) -> Vec<(String, Value)> {
        self.received.lock().unwrap().clone()
    }
}

fn qr_success() -> Value {
    json!({
        "code": 1000,
        "message": "Payment link created",
        "result": {
            "checkoutUrl": "https://pay.payos.vn/web/abc",
            "orderCode": "123456",
            "message": "ok",
            "qrCode": "00020101021238570010A000000727"
        },
        "timestamp": "2024-05-01T10:00:00"
    })
}

fn conflict_body() -> Value {
    json!({"code": 231, "message": "Order already exists", "desc": "Đơn thanh toán đã tồn tại"})
}

async fn create_link(
    req: HttpRequest,
    body: web::Json<Value>,
    backend: web::Data<FakeBackend>,
) -> HttpResponse {
    backend
        .received
        .lock()
        .unwrap()
        .push((req.path().to_string(), body.into_inner()));

    if let Some(delay) = backend.delay {
        actix_rt::time::sleep(delay).await;
    }

    let reply = backend.script.lock().unwrap().pop_front();
    let (status, body) = reply.unwrap_or((200, qr_success()));
    HttpResponse::build(actix_web::http::StatusCode::from_u16(status).unwrap()).json(body)
}

async fn spawn_backend(backend: Arc<FakeBackend>) -> CheckoutConfig {
    let data = web::Data::from(backend);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .route("/payments/payos/test", web::post().to(create_link))
            .route("/payments/payos/create", web::post().to(create_link))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();
    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());

    CheckoutConfig::new(&format!("http://{addr}"), "https://shop.example").unwrap()
}

#[actix_rt::test]
async fn test_amount_checkout_posts_camel_case_body() {
    let backend = Arc::new(FakeBackend::default());
    let config = spawn_backend(backend.clone()).await;
    let controller = CheckoutController::new(HttpPaymentApi::new(&config).unwrap(), config);

    let outcome = controller
        .start(&CheckoutParams::new(Some("50000"), None))
        .await;

    match outcome {
        Some(CheckoutOutcome::ShowQr(payment)) => {
            assert_eq!(payment.checkout_url, "https://pay.payos.vn/web/abc");
            assert_eq!(payment.order_code.as_deref(), Some("123456"));
        }
        other => panic!("expected qr, got {other:?}"),
    }

    let received = backend.received();
    assert_eq!(received.len(), 1);
    let (path, body) = &received[0];
    assert_eq!(path, "/payments/payos/test");
    assert_eq!(
        *body,
        json!({
            "amount": 50000,
            "description": "",
            "returnUrl": "https://shop.example/payment/success",
            "cancelUrl": "https://shop.example/payment/cancel"
        })
    );
}

#[actix_rt::test]
async fn test_order_checkout_hits_order_endpoint() {
    let backend = Arc::new(FakeBackend::default());
    let config = spawn_backend(backend.clone()).await;
    let controller = CheckoutController::new(HttpPaymentApi::new(&config).unwrap(), config);

    controller
        .start(&CheckoutParams::new(Some("50000"), Some("ORD-9")))
        .await;

    let received = backend.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].0, "/payments/payos/create");
    assert_eq!(received[0].1["orderId"], "ORD-9");
    assert!(received[0].1.get("amount").is_none());
}

#[actix_rt::test]
async fn test_conflict_status_is_retried_once() {
    let backend = Arc::new(FakeBackend::scripted(vec![(400, conflict_body())]));
    let config = spawn_backend(backend.clone()).await;
    let controller = CheckoutController::new(HttpPaymentApi::new(&config).unwrap(), config);

    let outcome = controller
        .start(&CheckoutParams::new(Some("50000"), None))
        .await;

    assert!(matches!(outcome, Some(CheckoutOutcome::ShowQr(_))));
    let received = backend.received();
    assert_eq!(received.len(), 2);
    assert_eq!(received[0], received[1]);
}

#[actix_rt::test]
async fn test_conflict_body_maps_to_conflict_error() {
    let backend = Arc::new(FakeBackend::scripted(vec![(500, conflict_body())]));
    let config = spawn_backend(backend).await;
    let api = HttpPaymentApi::new(&config).unwrap();
    let request = PaymentLinkRequest::new(1000, None, "", "r", "c");

    let err = api.create_payment_link(&request).await.unwrap_err();
    assert!(err.is_conflict(), "got {err:?}");
}

#[actix_rt::test]
async fn test_domain_failure_at_200_is_returned_as_response() {
    let backend = Arc::new(FakeBackend::scripted(vec![(
        200,
        json!({"code": 1002, "message": "Order not found"}),
    )]));
    let config = spawn_backend(backend).await;
    let controller = CheckoutController::new(HttpPaymentApi::new(&config).unwrap(), config);

    let outcome = controller
        .start(&CheckoutParams::new(Some("50000"), Some("missing")))
        .await;

    match outcome {
        Some(CheckoutOutcome::Failed(e @ CheckoutError::Rejected { code: 1002, .. })) => {
            assert_eq!(e.user_message(), "Order not found");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[actix_rt::test]
async fn test_slow_backend_times_out() {
    let backend = Arc::new(FakeBackend {
        delay: Some(Duration::from_millis(800)),
        ..FakeBackend::default()
    });
    let config = spawn_backend(backend)
        .await
        .with_request_timeout(Duration::from_millis(100));
    let api = HttpPaymentApi::new(&config).unwrap();
    let request = PaymentLinkRequest::new(1000, None, "", "r", "c");

    let err = api.create_payment_link(&request).await.unwrap_err();
    assert!(matches!(err, CheckoutError::Timeout), "got {err:?}");
}

#[actix_rt::test]
async fn test_unreachable_backend_is_network_error() {
    let config = CheckoutConfig::new("http://127.0.0.1:1", "https://shop.example").unwrap();
    let api = HttpPaymentApi::new(&config).unwrap();
    let request = PaymentLinkRequest::new(1000, None, "", "r", "c");

    let err = api.create_payment_link(&request).await.unwrap_err();
    assert!(matches!(err, CheckoutError::Network(_)), "got {err:?}");
    assert!(!err.user_message().contains("127.0.0.1"));
}
