//! Loads the bundled FIX 4.4 specification and validates a few orders.
//!
//! Run with `RUST_LOG=ironspec_dictionary=trace` to see loader and validator events.
use anyhow::Context;
use ironspec::prelude::*;
use ironspec::specs;
use tracing::{info, warn};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}

fn order(symbol: &str, side: &str, price: &str) -> Message {
    let header = FieldMap::new()
        .with_field(tags::BEGIN_STRING, "FIX.4.4")
        .with_field(tags::BODY_LENGTH, "120")
        .with_field(tags::MSG_TYPE, "D")
        .with_field(49, "CLIENT")
        .with_field(56, "BROKER")
        .with_field(34, "7")
        .with_field(52, "20260119-09:30:00.250");
    let body = FieldMap::new()
        .with_field(11, format!("ORD-{symbol}"))
        .with_field(55, symbol)
        .with_field(54, side)
        .with_field(60, "20260119-09:30:00")
        .with_field(38, "100")
        .with_field(40, "2")
        .with_field(44, price);
    let trailer = FieldMap::new().with_field(tags::CHECK_SUM, "201");
    Message::from_sections(header, body, trailer)
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let registry = DictionaryRegistry::new();
    let dictionary = DataDictionary::from_xml(specs::FIX44)
        .context("loading bundled FIX.4.4 specification")?
        .with_policy(ValidationPolicy::new().with_check_fields_out_of_order(true));
    registry.register(dictionary)?;
    info!(versions = ?registry.versions(), "dictionaries ready");

    let orders = [
        order("AAPL", "1", "187.25"),
        order("MSFT", "9", "410.10"),
        order("IBM", "2", "not-a-price"),
    ];
    for message in &orders {
        let symbol = message.body().get(55).unwrap_or_default();
        match registry.validate(message) {
            Ok(()) => info!(symbol, "order accepted"),
            Err(err) => warn!(
                symbol,
                error = %err,
                tag = ?err.tag(),
                reason = ?err.reject_reason(),
                "order rejected"
            ),
        }
    }
    Ok(())
}
