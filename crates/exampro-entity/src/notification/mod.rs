//! Notification domain entities.

pub mod kind;
pub mod model;
pub mod provenance;
pub mod status;

pub use kind::NotificationType;
pub use model::{NewNotification, Notification, NotificationReference};
pub use provenance::Provenance;
pub use status::{NotificationStatus, ReadState};
