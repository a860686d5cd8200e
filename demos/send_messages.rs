use std::io;

use messagemedia::{
    MessageContent, MessageMediaClientBuilder, MessageOptions, NewMessage, PhoneNumber,
    RawPhoneNumber, SendMessages,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let phone_raw = std::env::var("MESSAGEMEDIA_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "MESSAGEMEDIA_PHONE environment variable is required",
        )
    })?;
    let content = std::env::var("MESSAGEMEDIA_MESSAGE")
        .unwrap_or_else(|_| "Hello from the messagemedia demo.".to_owned());

    let client = MessageMediaClientBuilder::from_env()?.build()?;
    let destination: RawPhoneNumber = PhoneNumber::parse(None, phone_raw)?.into();
    let mut options = MessageOptions {
        delivery_report: true,
        ..Default::default()
    };
    if let Ok(source) = std::env::var("MESSAGEMEDIA_SOURCE") {
        let (number, kind) = PhoneNumber::parse_field("source_number", None, source)?.into_source();
        options.source_number = Some(number);
        options.source_number_type = Some(kind);
    }
    let message = NewMessage::new(MessageContent::new(content)?, destination, options)?;

    let response = client.send_messages(SendMessages::one(message)).await?;
    for message in &response.messages {
        println!(
            "message_id: {}, status: {}",
            message.message_id,
            message.status.as_str()
        );
    }

    Ok(())
}
