pub mod accounts;
pub mod catalog;
pub mod desk;
pub mod intake;
pub mod lifecycle;
pub mod messaging;
pub mod reporting;
pub mod schedule;
pub mod tracking;

pub use crate::domain::model::{Appointment, AppointmentStatus, DeviceKind};
pub use crate::domain::ports::{
    AdminStore, AppointmentStore, ClientStore, Clock, MessageStore, Notifier, PasswordHasher,
    Storage,
};
pub use crate::utils::error::Result;
