use crate::domain::model::{
    Appointment, AppointmentId, AppointmentStatus, StatusFilter, ValidatedBooking,
};
use crate::utils::error::{DeskError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeSet;
use uuid::Uuid;

/// In-process appointment collection. The only place appointments are mutated.
#[derive(Debug, Default)]
pub struct AppointmentStore {
    appointments: Vec<Appointment>,
}

impl AppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, booking: ValidatedBooking) -> Appointment {
        self.create_at(booking, Utc::now())
    }

    /// 以指定建立時間寫入，新預約一律為 scheduled
    pub fn create_at(&mut self, booking: ValidatedBooking, created_at: DateTime<Utc>) -> Appointment {
        let mut id = Uuid::new_v4();
        while self.get(id).is_some() {
            id = Uuid::new_v4();
        }

        let appointment = Appointment {
            id,
            customer_name: booking.customer_name,
            service: booking.service,
            start_date: booking.start_date,
            end_date: booking.end_date,
            time: booking.time,
            profession: booking.profession,
            id_number: booking.id_number,
            email: booking.email,
            phone: booking.phone,
            notes: booking.notes,
            status: AppointmentStatus::Scheduled,
            created_at,
        };

        tracing::debug!("🗂️ Stored appointment {} ({} total)", id, self.appointments.len() + 1);
        self.appointments.push(appointment.clone());
        appointment
    }

    pub fn update_status(
        &mut self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> Result<Appointment> {
        let appointment = self
            .appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(DeskError::NotFound { id })?;

        if !appointment.status.can_transition_to(status) {
            return Err(DeskError::InvalidTransition {
                id,
                from: appointment.status,
                to: status,
            });
        }

        tracing::debug!("🔁 {}: {} -> {}", id, appointment.status, status);
        appointment.status = status;
        Ok(appointment.clone())
    }

    pub fn remove(&mut self, id: AppointmentId) -> bool {
        let before = self.appointments.len();
        self.appointments.retain(|a| a.id != id);
        self.appointments.len() < before
    }

    /// 依狀態篩選，保留插入順序
    pub fn filter(&self, criterion: StatusFilter) -> Vec<Appointment> {
        self.appointments
            .iter()
            .filter(|a| criterion.matches(a.status))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: AppointmentId) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    pub fn list(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    /// 所有已有預約覆蓋到的日期（行事曆標示用）
    pub fn booked_dates(&self) -> BTreeSet<NaiveDate> {
        self.appointments
            .iter()
            .flat_map(|a| a.start_date.iter_days().take_while(move |d| *d <= a.end_date))
            .collect()
    }

    pub fn on_date(&self, date: NaiveDate) -> Vec<Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.start_date <= date && date <= a.end_date)
            .cloned()
            .collect()
    }

    pub fn into_appointments(self) -> Vec<Appointment> {
        self.appointments
    }
}
