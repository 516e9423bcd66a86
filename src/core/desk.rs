use crate::core::booking::{BookingWorkflow, WorkflowOptions};
use crate::core::settings::Settings;
use crate::core::store::AppointmentStore;
use crate::core::view;
use crate::config::DeskConfig;
use crate::domain::model::{
    Appointment, AppointmentId, AppointmentStatus, BookingRequest, StatusFilter,
};
use crate::domain::ports::NotificationGateway;
use crate::utils::error::{DeskError, Result};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tokio::sync::RwLock;

/// One front-desk session: owns the store, the settings and the booking workflow.
///
/// Created at session start and consumed by [`BookingDesk::shutdown`]. Share it
/// between tasks with an `Arc`.
pub struct BookingDesk<G: NotificationGateway> {
    store: RwLock<AppointmentStore>,
    settings: RwLock<Settings>,
    workflow: BookingWorkflow<G>,
}

impl<G: NotificationGateway> BookingDesk<G> {
    pub fn new(gateway: G, settings: Settings, options: WorkflowOptions) -> Self {
        tracing::info!("🛎️ Booking desk opened");
        Self {
            store: RwLock::new(AppointmentStore::new()),
            settings: RwLock::new(settings),
            workflow: BookingWorkflow::new(gateway, options),
        }
    }

    pub fn from_config(config: &DeskConfig, gateway: G) -> Self {
        Self::new(
            gateway,
            config.build_settings(),
            WorkflowOptions::from_config(config),
        )
    }

    pub async fn create_appointment(&self, request: &BookingRequest) -> Result<Appointment> {
        self.workflow
            .run(request, &self.store, &self.settings)
            .await
    }

    pub async fn set_status(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> Result<Appointment> {
        self.store.write().await.update_status(id, status)
    }

    pub async fn remove_appointment(&self, id: AppointmentId) -> bool {
        let removed = self.store.write().await.remove(id);
        if removed {
            tracing::info!("🗑️ Appointment {} removed", id);
        }
        removed
    }

    /// 篩選後依顯示順序排序
    pub async fn list_appointments(&self, filter: StatusFilter) -> Vec<Appointment> {
        view::project(&*self.store.read().await, filter)
    }

    pub async fn get_appointment(&self, id: AppointmentId) -> Option<Appointment> {
        self.store.read().await.get(id).cloned()
    }

    pub async fn booked_dates(&self) -> BTreeSet<NaiveDate> {
        self.store.read().await.booked_dates()
    }

    pub async fn appointments_on(&self, date: NaiveDate) -> Vec<Appointment> {
        self.store.read().await.on_date(date)
    }

    pub async fn send_reminder(&self, id: AppointmentId) -> Result<()> {
        let appointment = self
            .get_appointment(id)
            .await
            .ok_or(DeskError::NotFound { id })?;
        self.workflow.remind(&appointment, &self.settings).await
    }

    pub async fn send_test_notification(&self, destination: &str) -> Result<()> {
        self.workflow.send_test(destination).await
    }

    pub async fn email_template(&self) -> String {
        self.settings.read().await.email_template()
    }

    pub async fn update_email_template(&self, pin: &str, template: &str) -> Result<()> {
        self.settings
            .write()
            .await
            .update_email_template(pin, template)
    }

    pub async fn update_reminder_template(&self, pin: &str, template: &str) -> Result<()> {
        self.settings
            .write()
            .await
            .update_reminder_template(pin, template)
    }

    pub async fn complete_first_time_setup(&self, pin: &str, template: &str) -> Result<()> {
        self.settings
            .write()
            .await
            .complete_first_time_setup(pin, template)
    }

    pub async fn change_pin(&self, current: &str, new_pin: &str) -> Result<()> {
        self.settings.write().await.change_pin(current, new_pin)
    }

    pub fn shutdown(self) -> Vec<Appointment> {
        let appointments = self.store.into_inner().into_appointments();
        tracing::info!(
            "🛎️ Booking desk closed with {} appointment(s)",
            appointments.len()
        );
        appointments
    }
}
