use crate::domain::model::DeliveryReport;
use crate::domain::ports::NotificationGateway;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct SubmitPayload<'a> {
    access_key: &'a str,
    to: &'a str,
    subject: &'a str,
    message: &'a str,
    from_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// 透過表單轉寄服務（Web3Forms 相容）發送通知
#[derive(Debug, Clone)]
pub struct HttpNotificationGateway {
    client: Client,
    endpoint: String,
    access_key: String,
    from_name: String,
    timeout: Option<Duration>,
}

impl HttpNotificationGateway {
    pub fn new(endpoint: String, access_key: String, from_name: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            access_key,
            from_name,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl NotificationGateway for HttpNotificationGateway {
    async fn send(&self, destination: &str, subject: &str, body: &str) -> DeliveryReport {
        let payload = SubmitPayload {
            access_key: &self.access_key,
            to: destination,
            subject,
            message: body,
            from_name: &self.from_name,
        };

        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("📡 Notification request failed: {}", e);
                return DeliveryReport::failed(format!("request failed: {}", e));
            }
        };

        let status = response.status();
        tracing::debug!("📡 Notification service responded with {}", status);
        if !status.is_success() {
            return DeliveryReport::failed(format!("notification service returned {}", status));
        }

        match response.json::<SubmitResponse>().await {
            Ok(SubmitResponse { success: true, .. }) => DeliveryReport::delivered(),
            Ok(SubmitResponse { message, .. }) => DeliveryReport::failed(
                message.unwrap_or_else(|| "notification service rejected the message".to_string()),
            ),
            Err(e) => DeliveryReport::failed(format!("unreadable response: {}", e)),
        }
    }
}
