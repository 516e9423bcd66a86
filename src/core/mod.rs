pub mod booking;
pub mod conflict;
pub mod desk;
pub mod settings;
pub mod store;
pub mod template;
pub mod view;

pub use crate::domain::model::{Appointment, AppointmentStatus, BookingRequest, StatusFilter};
pub use crate::domain::ports::{ConfigProvider, NotificationGateway, PinAuthenticator};
pub use crate::utils::error::Result;
