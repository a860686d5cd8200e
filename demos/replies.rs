use messagemedia::{ConfirmReplies, MessageMediaClientBuilder};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = MessageMediaClientBuilder::from_env()?.build()?;
    let batch = client.check_replies().await?;

    for reply in &batch.replies {
        println!(
            "reply {} from {:?}: {}",
            reply.reply_id, reply.source_number, reply.content
        );
    }

    if !batch.replies.is_empty() {
        client
            .confirm_replies(ConfirmReplies::new(batch.ids())?)
            .await?;
    }

    Ok(())
}
