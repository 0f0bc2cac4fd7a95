//! Outgoing notifications handed to the mail service

mod traits;

#[cfg(test)]
pub mod mock;

pub use traits::NotificationPublisher;

#[cfg(test)]
pub use mock::RecordingPublisher;
