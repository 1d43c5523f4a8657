use rust_pay_interkassa::{Pay, PaymentState, ShopConfig};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let shop = ShopConfig::from_json(r#"{"id": "your_shop_id", "secretKey": "your_secret_key"}"#)?;
    Pay::config(shop);

    let order = [
        ("amount", "10.00"),
        ("currency", "USD"),
        ("orderId", "order-1001"),
        ("description", "测试商品"),
    ];
    let req = Pay::shop()?.create_signed_payment(order)?;
    println!("signature: {}", req.signature());
    println!("query: {}", req.to_query_string());

    // The gateway echoes the signed fields back with a status.
    let callback = Pay::shop()?
        .create_signed_payment([("amount", "10.00"), ("currency", "USD"), ("status", "success")])?
        .into_fields();

    let status = Pay::shop()?.receive_status(callback)?;
    match status.payment_state() {
        Some(PaymentState::Success) => println!("paid: {:?}", status.get("amount")),
        other => println!("not paid: {:?}", other),
    }
    Ok(())
}
