use stun_errcode::stun::{
    attributes::AttributeType,
    codec::AttributeValue,
    error_code::reason_for,
    message::{Message, MessageMethod},
};
use tracing::{info, warn};

const DEFAULT_CODES: &str = "300,400,401,420,430,431,432,433,438,500,600";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let codes = std::env::var("STUN_ERROR_CODES").unwrap_or_else(|_| DEFAULT_CODES.to_string());
    let software = std::env::var("STUN_SOFTWARE").ok();

    let transaction_id = [0u8; 12];

    for code in codes.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        let code: u16 = code.parse()?;
        if reason_for(code).is_empty() {
            warn!("{} has no registered reason phrase", code);
        }

        let mut response = Message::error_response(MessageMethod::Binding, transaction_id, code)?;
        if let Some(software) = &software {
            response.add_attribute(AttributeType::Software, &AttributeValue::Text(software.clone()))?;
        }

        let wire = response.serialize()?;
        let decoded = Message::parse(&wire)?.error_code()?;
        info!(code, bytes = wire.len(), "encoded error response");

        match decoded {
            Some(attr) => println!("{} {:<24} {}", attr.code, attr, hex::encode(&wire)),
            None => println!("{} <missing ERROR-CODE>", code),
        }
    }

    Ok(())
}
