use messagemedia::{ConfirmDeliveryReports, MessageMediaClientBuilder};
use tracing_subscriber::EnvFilter;

/// Check, process, confirm: drains pending delivery reports batch by batch.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = MessageMediaClientBuilder::from_env()?.build()?;

    loop {
        let batch = client.check_delivery_reports().await?;
        if batch.delivery_reports.is_empty() {
            break;
        }

        for report in &batch.delivery_reports {
            println!(
                "report {} for message {}: {} (from {:?} at {:?})",
                report.delivery_report_id,
                report.message_id,
                report.status.as_str(),
                report.source_number,
                report.date_received
            );
        }

        client
            .confirm_delivery_reports(ConfirmDeliveryReports::new(batch.ids())?)
            .await?;
    }

    Ok(())
}
