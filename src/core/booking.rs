use crate::core::conflict::find_conflict;
use crate::core::settings::Settings;
use crate::core::store::AppointmentStore;
use crate::core::template::{render, Placeholder, TemplateValues};
use crate::domain::model::{Appointment, BookingRequest, ValidatedBooking};
use crate::domain::ports::{ConfigProvider, NotificationGateway};
use crate::utils::error::{DeskError, Result};
use crate::utils::validation::validate_booking_request;
use chrono::{NaiveDate, NaiveTime};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

const NOT_PROVIDED: &str = "Not provided";
pub const DEFAULT_MAX_SPAN_DAYS: u32 = 366;
const TEST_MESSAGE: &str = "This is a test email to verify the email service is working.";

#[derive(Debug, Clone)]
pub struct WorkflowOptions {
    pub notification_timeout: Duration,
    pub subject_prefix: String,
    pub fallback_recipient: Option<String>,
    /// 單筆預約最多涵蓋的天數（含端點）
    pub max_span_days: u32,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            notification_timeout: Duration::from_secs(10),
            subject_prefix: "Appointment Confirmed".to_string(),
            fallback_recipient: None,
            max_span_days: DEFAULT_MAX_SPAN_DAYS,
        }
    }
}

impl WorkflowOptions {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            notification_timeout: Duration::from_secs(config.notification_timeout_secs()),
            subject_prefix: config.subject_prefix().to_string(),
            fallback_recipient: config.fallback_recipient().map(str::to_string),
            max_span_days: config.max_span_days(),
        }
    }
}

/// "Wednesday, January 10, 2024 to Wednesday, January 10, 2024 at 9:00 AM"
pub fn format_appointment_date(start: NaiveDate, end: NaiveDate, time: NaiveTime) -> String {
    format!(
        "{} to {} at {}",
        start.format("%A, %B %-d, %Y"),
        end.format("%A, %B %-d, %Y"),
        time.format("%-I:%M %p")
    )
}

pub fn template_values(
    customer_name: &str,
    service: &str,
    appointment_date: &str,
    email: Option<&str>,
    phone: Option<&str>,
) -> TemplateValues {
    TemplateValues::from([
        (Placeholder::CustomerName, customer_name.to_string()),
        (Placeholder::Service, service.to_string()),
        (Placeholder::AppointmentDate, appointment_date.to_string()),
        (
            Placeholder::CustomerEmail,
            email.unwrap_or(NOT_PROVIDED).to_string(),
        ),
        (Placeholder::Phone, phone.unwrap_or(NOT_PROVIDED).to_string()),
    ])
}

/// 預約流程：驗證 -> 衝突檢查 -> 產生內容 -> 發送通知 -> 寫入
///
/// Steps two through five run under one booking gate, so two concurrent
/// bookings for the same slot cannot both pass the conflict check.
pub struct BookingWorkflow<G: NotificationGateway> {
    gateway: G,
    options: WorkflowOptions,
    gate: Mutex<()>,
}

impl<G: NotificationGateway> BookingWorkflow<G> {
    pub fn new(gateway: G, options: WorkflowOptions) -> Self {
        Self {
            gateway,
            options,
            gate: Mutex::new(()),
        }
    }

    pub fn options(&self) -> &WorkflowOptions {
        &self.options
    }

    pub async fn run(
        &self,
        request: &BookingRequest,
        store: &RwLock<AppointmentStore>,
        settings: &RwLock<Settings>,
    ) -> Result<Appointment> {
        // 1. 驗證
        let booking = validate_booking_request(request, self.options.max_span_days)?;
        tracing::debug!(
            "📝 Validated booking for {} ({} to {} at {})",
            booking.customer_name,
            booking.start_date,
            booking.end_date,
            booking.time.format("%H:%M")
        );

        let _gate = self.gate.lock().await;

        // 2. 衝突檢查（讀取當下快照）
        self.check_conflict(&booking, store).await?;

        // 3. 產生通知內容，範本以值取出
        let template = settings.read().await.email_template();
        let appointment_date =
            format_appointment_date(booking.start_date, booking.end_date, booking.time);
        let body = render(
            &template,
            &template_values(
                &booking.customer_name,
                &booking.service,
                &appointment_date,
                booking.email.as_deref(),
                booking.phone.as_deref(),
            ),
        );
        let subject = format!("{} - {}", self.options.subject_prefix, appointment_date);

        // 4. 發送通知，失敗則不寫入
        let destination = self.destination_for(booking.email.as_deref())?;
        self.deliver(&destination, &subject, &body).await?;

        // 5. 寫入
        let appointment = store.write().await.create(booking);
        tracing::info!(
            "✅ Appointment {} booked for {}",
            appointment.id,
            appointment.customer_name
        );
        Ok(appointment)
    }

    async fn check_conflict(
        &self,
        booking: &ValidatedBooking,
        store: &RwLock<AppointmentStore>,
    ) -> Result<()> {
        let store = store.read().await;
        let slot = booking.slot();
        if let Some(existing) = find_conflict(&slot, store.list()) {
            tracing::warn!(
                "⛔ Booking for {} collides with appointment {}",
                booking.customer_name,
                existing.id
            );
            return Err(DeskError::Conflict {
                start_date: slot.start_date,
                end_date: slot.end_date,
                time: slot.time,
                existing_id: existing.id,
            });
        }
        Ok(())
    }

    fn destination_for(&self, email: Option<&str>) -> Result<String> {
        email
            .or(self.options.fallback_recipient.as_deref())
            .map(str::to_string)
            .ok_or_else(|| DeskError::notification("no email address to send the confirmation to"))
    }

    /// 呼叫閘道並套用逾時；逾時與回報失敗同樣視為通知錯誤
    async fn deliver(&self, destination: &str, subject: &str, body: &str) -> Result<()> {
        tracing::debug!("📨 Sending '{}' to {}", subject, destination);
        let sent = tokio::time::timeout(
            self.options.notification_timeout,
            self.gateway.send(destination, subject, body),
        )
        .await;

        match sent {
            Ok(report) if report.delivered => {
                tracing::debug!("📨 Delivered to {}", destination);
                Ok(())
            }
            Ok(report) => {
                let diagnostic = report
                    .diagnostic
                    .unwrap_or_else(|| "gateway reported failure".to_string());
                tracing::error!("❌ Notification to {} failed: {}", destination, diagnostic);
                Err(DeskError::notification(diagnostic))
            }
            Err(_) => {
                tracing::error!(
                    "❌ Notification to {} timed out after {:?}",
                    destination,
                    self.options.notification_timeout
                );
                Err(DeskError::notification(format!(
                    "timed out after {:?}",
                    self.options.notification_timeout
                )))
            }
        }
    }

    pub async fn remind(&self, appointment: &Appointment, settings: &RwLock<Settings>) -> Result<()> {
        let template = settings.read().await.reminder_template();
        let appointment_date = format_appointment_date(
            appointment.start_date,
            appointment.end_date,
            appointment.time,
        );
        let body = render(
            &template,
            &template_values(
                &appointment.customer_name,
                &appointment.service,
                &appointment_date,
                appointment.email.as_deref(),
                appointment.phone.as_deref(),
            ),
        );
        let subject = format!("Appointment Reminder - {}", appointment_date);
        let destination = self.destination_for(appointment.email.as_deref())?;
        self.deliver(&destination, &subject, &body).await?;
        tracing::info!("🔔 Reminder sent for appointment {}", appointment.id);
        Ok(())
    }

    pub async fn send_test(&self, destination: &str) -> Result<()> {
        self.deliver(destination, "Test Email from Appointment App", TEST_MESSAGE)
            .await
    }
}
