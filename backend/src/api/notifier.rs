use futures::future::{BoxFuture, FutureExt};
use thiserror::Error;

use crate::utils::notification_template::BookingNotification;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}

/// Delivers booking notifications to the team.
pub trait Notifier: Send + Sync {
    fn send<'a>(&'a self, notification: &'a BookingNotification) -> BoxFuture<'a, Result<(), NotifyError>>;
}

/// Writes notifications to the log instead of delivering them.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send<'a>(&'a self, notification: &'a BookingNotification) -> BoxFuture<'a, Result<(), NotifyError>> {
        async move {
            tracing::info!(
                from = %notification.from,
                to = %notification.to,
                subject = %notification.subject,
                html_bytes = notification.html.len(),
                "Booking notification"
            );
            Ok(())
        }
        .boxed()
    }
}
