use crate::domain::model::DeliveryReport;
use crate::domain::ports::NotificationGateway;
use async_trait::async_trait;

/// Dry-run gateway: logs the message and reports success.
#[derive(Debug, Clone, Default)]
pub struct LogNotificationGateway;

#[async_trait]
impl NotificationGateway for LogNotificationGateway {
    async fn send(&self, destination: &str, subject: &str, body: &str) -> DeliveryReport {
        tracing::info!("🔍 DRY RUN: would send '{}' to {}", subject, destination);
        tracing::debug!("🔍 DRY RUN body:\n{}", body);
        DeliveryReport::delivered()
    }
}
