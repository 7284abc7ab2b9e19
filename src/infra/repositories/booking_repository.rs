//! Booking repository implementation.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::entities::booking::{self, ActiveModel, Entity as BookingEntity};
use super::entities::staff_user;
use crate::config::BOOKING_STATUS_NEW;
use crate::domain::{Booking, NewBooking};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Booking repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Store a new booking with status `new`
    async fn create(&self, booking: NewBooking) -> AppResult<Booking>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Booking>>;

    /// All bookings, newest first
    async fn list(&self) -> AppResult<Vec<Booking>>;

    /// Overwrite status and assignee; `NotFound` if the row is gone.
    async fn update(&self, id: i32, status: String, assignee_id: Option<i32>)
        -> AppResult<Booking>;

    /// Hard delete, returns the number of removed rows
    async fn delete(&self, id: i32) -> AppResult<u64>;

    /// `(status, count)` for every status present
    async fn count_by_status(&self) -> AppResult<Vec<(String, u64)>>;
}

/// Booking queries over any connection, pooled or transactional.
pub struct BookingQueries<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BookingQueries<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, booking: NewBooking) -> AppResult<Booking> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            name: Set(booking.name),
            phone: Set(booking.phone),
            email: Set(booking.email),
            address: Set(booking.address),
            area: Set(booking.area),
            service_type: Set(booking.service_type),
            comment: Set(booking.comment),
            status: Set(BOOKING_STATUS_NEW.to_string()),
            booking_date: Set(booking.booking_date),
            booking_time: Set(booking.booking_time),
            assignee_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(self.db).await?;
        Ok(Booking::from(model))
    }

    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<Booking>> {
        let result = BookingEntity::find_by_id(id)
            .find_also_related(staff_user::Entity)
            .one(self.db)
            .await?;
        Ok(result.map(Booking::from))
    }

    pub async fn list(&self) -> AppResult<Vec<Booking>> {
        let models = BookingEntity::find()
            .find_also_related(staff_user::Entity)
            .order_by_desc(booking::Column::CreatedAt)
            .order_by_desc(booking::Column::Id)
            .all(self.db)
            .await?;

        Ok(models.into_iter().map(Booking::from).collect())
    }

    pub async fn update(
        &self,
        id: i32,
        status: String,
        assignee_id: Option<i32>,
    ) -> AppResult<Booking> {
        let model = BookingEntity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = model.into();
        active.status = Set(status);
        active.assignee_id = Set(assignee_id);
        active.updated_at = Set(chrono::Utc::now());
        active.update(self.db).await?;

        self.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    /// Detach every booking from a staff member, returns the affected rows
    pub async fn clear_assignee(&self, staff_id: i32) -> AppResult<u64> {
        let result = BookingEntity::update_many()
            .col_expr(booking::Column::AssigneeId, Expr::value(Option::<i32>::None))
            .filter(booking::Column::AssigneeId.eq(staff_id))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn delete(&self, id: i32) -> AppResult<u64> {
        let result = BookingEntity::delete_by_id(id).exec(self.db).await?;
        Ok(result.rows_affected)
    }

    pub async fn count_by_status(&self) -> AppResult<Vec<(String, u64)>> {
        let rows: Vec<(String, i64)> = BookingEntity::find()
            .select_only()
            .column(booking::Column::Status)
            .column_as(Expr::col(booking::Column::Id).count(), "count")
            .group_by(booking::Column::Status)
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(status, count)| (status, count.max(0) as u64))
            .collect())
    }
}

/// Pool-backed implementation of BookingRepository
pub struct BookingStore {
    db: DatabaseConnection,
}

impl BookingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn queries(&self) -> BookingQueries<'_, DatabaseConnection> {
        BookingQueries::new(&self.db)
    }
}

#[async_trait]
impl BookingRepository for BookingStore {
    async fn create(&self, booking: NewBooking) -> AppResult<Booking> {
        self.queries().create(booking).await
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Booking>> {
        self.queries().find_by_id(id).await
    }

    async fn list(&self) -> AppResult<Vec<Booking>> {
        self.queries().list().await
    }

    async fn update(
        &self,
        id: i32,
        status: String,
        assignee_id: Option<i32>,
    ) -> AppResult<Booking> {
        self.queries().update(id, status, assignee_id).await
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        self.queries().delete(id).await
    }

    async fn count_by_status(&self) -> AppResult<Vec<(String, u64)>> {
        self.queries().count_by_status().await
    }
}
