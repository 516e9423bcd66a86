pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;
pub use config::DeskConfig;

pub use adapters::{HttpNotificationGateway, LogNotificationGateway};
pub use crate::core::booking::{BookingWorkflow, WorkflowOptions};
pub use crate::core::desk::BookingDesk;
pub use crate::core::settings::{ConfiguredPin, Settings};
pub use domain::model::{
    Appointment, AppointmentId, AppointmentStatus, BookingRequest, DeliveryReport, StatusFilter,
};
pub use domain::ports::NotificationGateway;
pub use utils::error::{DeskError, Result};
