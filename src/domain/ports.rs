use crate::domain::model::DeliveryReport;
use async_trait::async_trait;

/// 外部通知服務。投遞問題以 `DeliveryReport` 回報，不得以錯誤或 panic 結束。
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn send(&self, destination: &str, subject: &str, body: &str) -> DeliveryReport;
}

#[async_trait]
impl<G: NotificationGateway + ?Sized> NotificationGateway for std::sync::Arc<G> {
    async fn send(&self, destination: &str, subject: &str, body: &str) -> DeliveryReport {
        (**self).send(destination, subject, body).await
    }
}

/// PIN 驗證協作者，設定變更前必須通過
pub trait PinAuthenticator: Send + Sync {
    fn verify(&self, candidate: &str) -> bool;
    fn replace(&mut self, new_pin: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn notification_timeout_secs(&self) -> u64;
    fn subject_prefix(&self) -> &str;
    fn fallback_recipient(&self) -> Option<&str>;
    fn max_span_days(&self) -> u32;
}
