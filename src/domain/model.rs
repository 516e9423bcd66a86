use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::utils::error::DeskError;

pub type AppointmentId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// 狀態機：scheduled -> completed/cancelled，completed/cancelled -> scheduled。
    /// 相同狀態視為無操作。
    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        matches!(
            (self, next),
            (Scheduled, Completed)
                | (Scheduled, Cancelled)
                | (Completed, Scheduled)
                | (Cancelled, Scheduled)
        ) || self == next
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(DeskError::validation(
                "status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

/// 列表篩選條件：全部或單一狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(AppointmentStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: AppointmentStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub customer_name: String,
    pub service: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub time: NaiveTime,
    pub profession: Option<String>,
    pub id_number: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

/// Raw booking input as it arrives from the form or a request file.
/// Nothing here is trusted until it passes through
/// [`validate_booking_request`](crate::utils::validation::validate_booking_request).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingRequest {
    pub customer_name: Option<String>,
    pub service: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub time: Option<String>,
    pub profession: Option<String>,
    pub id_number: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// A booking that passed validation. `start_date <= end_date` holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBooking {
    pub customer_name: String,
    pub service: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub time: NaiveTime,
    pub profession: Option<String>,
    pub id_number: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl ValidatedBooking {
    pub fn slot(&self) -> BookingSlot {
        BookingSlot {
            start_date: self.start_date,
            end_date: self.end_date,
            time: self.time,
        }
    }
}

/// 衝突檢查所需的三個欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingSlot {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub time: NaiveTime,
}

impl From<&Appointment> for BookingSlot {
    fn from(appointment: &Appointment) -> Self {
        Self {
            start_date: appointment.start_date,
            end_date: appointment.end_date,
            time: appointment.time,
        }
    }
}

/// 通知閘道的回報。投遞失敗不是錯誤，只是 `delivered = false`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: bool,
    pub diagnostic: Option<String>,
}

impl DeliveryReport {
    pub fn delivered() -> Self {
        Self {
            delivered: true,
            diagnostic: None,
        }
    }

    pub fn failed(diagnostic: impl Into<String>) -> Self {
        Self {
            delivered: false,
            diagnostic: Some(diagnostic.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        use AppointmentStatus::*;
        assert!(Scheduled.can_transition_to(Completed));
        assert!(Scheduled.can_transition_to(Cancelled));
        assert!(Completed.can_transition_to(Scheduled));
        assert!(Cancelled.can_transition_to(Scheduled));
        assert!(Completed.can_transition_to(Completed));

        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Completed));
    }

    #[test]
    fn test_parse_status_filter() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "Completed".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(AppointmentStatus::Completed)
        );
        assert!("archived".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&AppointmentStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
    }
}
