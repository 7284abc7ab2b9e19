//! Booking notifications.
//!
//! A new booking is mailed to the operator inbox. Delivery is best effort:
//! failures are logged by the caller and never retried.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::sync::Arc;

use crate::config::{NotifyConfig, BOOKING_DATE_FORMAT, BOOKING_TIME_OUTPUT_FORMAT, SMTPS_PORT};
use crate::domain::Booking;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Outbound notification channel for new bookings.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn booking_created(&self, booking: &Booking) -> AppResult<()>;
}

/// Build the notifier for `config`.
///
/// Falls back to [`NoopNotifier`] when mail is not configured or the relay
/// settings are unusable, so a broken mail setup never blocks bookings.
pub fn build_notifier(config: &NotifyConfig) -> Arc<dyn Notifier> {
    if !config.is_configured() {
        tracing::info!("SMTP_HOST or NOTIFY_EMAIL not set, booking notifications disabled");
        return Arc::new(NoopNotifier);
    }

    match MailNotifier::new(config) {
        Ok(notifier) => Arc::new(notifier),
        Err(e) => {
            tracing::warn!(error = %e, "Invalid mail settings, booking notifications disabled");
            Arc::new(NoopNotifier)
        }
    }
}

/// Drops every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn booking_created(&self, booking: &Booking) -> AppResult<()> {
        tracing::debug!(booking_id = booking.id, "Notification skipped");
        Ok(())
    }
}

/// SMTP-backed notifier
pub struct MailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl MailNotifier {
    /// Port 465 speaks implicit TLS; any other port upgrades with STARTTLS.
    pub fn new(config: &NotifyConfig) -> AppResult<Self> {
        let (host, recipient) = match (&config.smtp_host, &config.recipient) {
            (Some(host), Some(recipient)) => (host, recipient),
            _ => return Err(AppError::configuration("SMTP_HOST and NOTIFY_EMAIL are required")),
        };

        let builder = if config.smtp_port == SMTPS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
        }
        .map_err(|e| AppError::configuration(format!("Invalid SMTP relay: {}", e)))?;

        let mut builder = builder.port(config.smtp_port);
        if let Some((user, pass)) = config.credentials() {
            builder = builder.credentials(Credentials::new(user, pass));
        }

        Ok(Self {
            transport: builder.build(),
            from: parse_mailbox(&config.smtp_from)?,
            to: parse_mailbox(recipient)?,
        })
    }
}

#[async_trait]
impl Notifier for MailNotifier {
    async fn booking_created(&self, booking: &Booking) -> AppResult<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject(booking))
            .header(ContentType::TEXT_PLAIN)
            .body(body(booking))
            .map_err(|e| AppError::internal(format!("Failed to build mail: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| AppError::internal(format!("SMTP delivery failed: {}", e)))?;

        tracing::info!(booking_id = booking.id, to = %self.to, "Booking notification sent");
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> AppResult<Mailbox> {
    address
        .parse()
        .map_err(|e| AppError::configuration(format!("Invalid mail address {}: {}", address, e)))
}

fn subject(booking: &Booking) -> String {
    format!("New booking #{}: {}", booking.id, booking.service_type)
}

fn body(booking: &Booking) -> String {
    let schedule = match (booking.booking_date, booking.booking_time) {
        (Some(date), Some(time)) => format!(
            "{} {}",
            date.format(BOOKING_DATE_FORMAT),
            time.format(BOOKING_TIME_OUTPUT_FORMAT)
        ),
        _ => "not specified".to_string(),
    };

    let mut text = format!(
        "Name: {}\nPhone: {}\nEmail: {}\nAddress: {}\nArea: {} m2\nService: {}\nDate: {}\n",
        booking.name,
        booking.phone,
        booking.email,
        booking.address,
        booking.area,
        booking.service_type,
        schedule,
    );
    if !booking.comment.is_empty() {
        text.push_str(&format!("Comment: {}\n", booking.comment));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Utc};

    fn booking(comment: &str) -> Booking {
        Booking {
            id: 12,
            name: "Ann".into(),
            phone: "+7 900".into(),
            email: "ann@x.com".into(),
            address: "Main st 1".into(),
            area: 42,
            service_type: "deep".into(),
            comment: comment.into(),
            status: "new".into(),
            booking_date: NaiveDate::from_ymd_opt(2024, 3, 9),
            booking_time: NaiveTime::from_hms_opt(9, 5, 0),
            assignee_id: None,
            assignee_name: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_body_lists_booking_fields() {
        let text = body(&booking("ring twice"));
        assert!(text.contains("Name: Ann"));
        assert!(text.contains("Area: 42 m2"));
        assert!(text.contains("Date: 2024-03-09 09:05"));
        assert!(text.contains("Comment: ring twice"));
        assert_eq!(subject(&booking("")), "New booking #12: deep");
    }

    #[test]
    fn test_body_omits_empty_comment() {
        assert!(!body(&booking("")).contains("Comment"));
    }

    #[tokio::test]
    async fn test_unconfigured_falls_back_to_noop() {
        let notifier = build_notifier(&NotifyConfig::default());
        assert!(notifier.booking_created(&booking("")).await.is_ok());
    }

    #[test]
    fn test_mail_notifier_requires_recipient() {
        assert!(MailNotifier::new(&NotifyConfig::default()).is_err());
    }
}
