use axum::{extract::Form, routing::post, Router};
use rust_pay_interkassa::{Pay, PaymentState, ShopConfig, ShopOptions};
use std::collections::HashMap;

// axum's Form extractor decodes application/x-www-form-urlencoded into a map;
// the verifier only ever sees that explicit map.
async fn notify_status(Form(map): Form<HashMap<String, String>>) -> &'static str {
    let client = match Pay::shop() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("shop not ready: {}", e);
            return "failure";
        }
    };
    match client.receive_status(map) {
        Ok(status) => {
            println!("status verified: {:?}", status.payment_state());
            if status.payment_state() == Some(PaymentState::Success) {
                // business validation e.g. check order amount/orderId...
            }
            "OK"
        }
        Err(e) => {
            eprintln!("status notify rejected: {}", e);
            "failure"
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();
    let id = std::env::var("SHOP_ID").ok();
    let secret_key = std::env::var("SHOP_SECRET_KEY").ok();
    match ShopConfig::new(ShopOptions { id, secret_key }) {
        Ok(shop) => Pay::config(shop),
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    }

    let app = Router::new().route("/notify/status", post(notify_status));
    println!("Server running on 0.0.0.0:8080");
    let listener = match tokio::net::TcpListener::bind("0.0.0.0:8080").await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("bind: {}", e);
            return;
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("server: {}", e);
    }
}
