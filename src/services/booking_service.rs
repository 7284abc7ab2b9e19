//! Booking service - request lifecycle from submission to completion.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Booking, BookingChanges, BookingDraft, BookingStats};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{Notifier, UnitOfWork};
use crate::with_transaction;

/// Booking service trait for dependency injection.
#[async_trait]
pub trait BookingService: Send + Sync {
    /// Validate and store a submission, then notify staff in the background.
    async fn create(&self, draft: BookingDraft) -> AppResult<Booking>;

    async fn get(&self, id: i32) -> AppResult<Booking>;

    /// All bookings, newest first
    async fn list(&self) -> AppResult<Vec<Booking>>;

    /// Change status and/or assignee.
    ///
    /// Assigning someone to a `new` booking moves it to `assigned` unless
    /// the same request sets a status explicitly.
    async fn update(&self, id: i32, changes: BookingChanges) -> AppResult<Booking>;

    /// Remove a booking; unknown ids are not an error.
    async fn delete(&self, id: i32) -> AppResult<()>;

    async fn stats(&self) -> AppResult<BookingStats>;
}

/// Concrete implementation of BookingService using Unit of Work.
pub struct BookingManager<U: UnitOfWork> {
    uow: Arc<U>,
    notifier: Arc<dyn Notifier>,
}

impl<U: UnitOfWork> BookingManager<U> {
    pub fn new(uow: Arc<U>, notifier: Arc<dyn Notifier>) -> Self {
        Self { uow, notifier }
    }

    fn notify(&self, booking: Booking) {
        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.booking_created(&booking).await {
                tracing::warn!(booking_id = booking.id, error = %e, "Booking notification failed");
            }
        });
    }
}

#[async_trait]
impl<U: UnitOfWork> BookingService for BookingManager<U> {
    async fn create(&self, draft: BookingDraft) -> AppResult<Booking> {
        let new_booking = draft.validate()?;
        let booking = self.uow.bookings().create(new_booking).await?;

        tracing::info!(booking_id = booking.id, service_type = %booking.service_type, "Booking created");
        self.notify(booking.clone());

        Ok(booking)
    }

    async fn get(&self, id: i32) -> AppResult<Booking> {
        self.uow.bookings().find_by_id(id).await?.ok_or_not_found()
    }

    async fn list(&self) -> AppResult<Vec<Booking>> {
        self.uow.bookings().list().await
    }

    async fn update(&self, id: i32, changes: BookingChanges) -> AppResult<Booking> {
        if changes.is_empty() {
            return Err(AppError::validation("Status or assignee_id is required"));
        }

        let status = match changes.status {
            Some(status) => {
                let status = status.trim().to_string();
                if status.is_empty() {
                    return Err(AppError::validation("Status must not be empty"));
                }
                Some(status)
            }
            None => None,
        };
        let assignee_change = changes.assignee_id;

        let booking = with_transaction!(self.uow, |ctx| {
            let bookings = ctx.bookings();
            let current = bookings.find_by_id(id).await?.ok_or_not_found()?;

            let assignee_id = match assignee_change {
                Some(Some(staff_id)) => {
                    if ctx.staff().find_by_id(staff_id).await?.is_none() {
                        return Err(AppError::validation(format!(
                            "Unknown assignee: {}",
                            staff_id
                        )));
                    }
                    Some(staff_id)
                }
                Some(None) => None,
                None => current.assignee_id,
            };

            let status = match (status, assignee_change) {
                (Some(status), _) => status,
                (None, Some(_)) => current.status_after_assignment(assignee_id),
                (None, None) => current.status.clone(),
            };

            bookings.update(id, status, assignee_id).await
        })?;

        tracing::info!(
            booking_id = booking.id,
            status = %booking.status,
            assignee_id = ?booking.assignee_id,
            "Booking updated"
        );
        Ok(booking)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let removed = self.uow.bookings().delete(id).await?;
        if removed == 0 {
            tracing::debug!(booking_id = id, "Delete of unknown booking ignored");
        } else {
            tracing::info!(booking_id = id, "Booking deleted");
        }
        Ok(())
    }

    async fn stats(&self) -> AppResult<BookingStats> {
        let counts = self.uow.bookings().count_by_status().await?;
        Ok(BookingStats::from_counts(counts))
    }
}
