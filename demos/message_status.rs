use std::io;

use messagemedia::{MessageId, MessageMediaClientBuilder};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let message_id = std::env::var("MESSAGEMEDIA_MESSAGE_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "MESSAGEMEDIA_MESSAGE_ID environment variable is required",
        )
    })?;
    let cancel = std::env::var("MESSAGEMEDIA_CANCEL").is_ok_and(|value| value == "1");

    let client = MessageMediaClientBuilder::from_env()?.build()?;
    let message_id = MessageId::new(message_id)?;

    let message = client.get_message_status(&message_id).await?;
    println!(
        "message {}: {} (scheduled: {:?})",
        message.message_id,
        message.status.as_str(),
        message.scheduled
    );

    if cancel {
        client.cancel_scheduled_message(&message_id).await?;
        println!("cancelled {message_id}");
    }

    Ok(())
}
