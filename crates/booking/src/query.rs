use dietdesk_db::table::{Appointment, Owner};
use dietdesk_shared::booking::AppointmentStatus;
use sea_query::{Expr, ExprTrait, Order, SimpleExpr, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};
use time::{Date, UtcOffset};

use crate::{BookingWindow, Occupancy, TimeSlot, generate_slots};

#[derive(Debug, Default, Clone, FromRow)]
pub struct OwnerRow {
    pub id: String,
    pub full_name: String,
    pub public_slug: String,
    pub work_start_hour: i64,
    pub work_end_hour: i64,
    pub session_duration: i64,
    pub created_at: i64,
}

impl OwnerRow {
    /// Bookable starts of the stored window; an invalid stored window falls
    /// back to the default one.
    pub fn slots(&self) -> Vec<TimeSlot> {
        generate_slots(
            self.work_start_hour,
            self.work_end_hour,
            self.session_duration,
        )
    }

    pub fn window(&self) -> Option<BookingWindow> {
        let window = BookingWindow {
            start_hour: self.work_start_hour.try_into().ok()?,
            end_hour: self.work_end_hour.try_into().ok()?,
            session_duration: self.session_duration.try_into().ok()?,
        };

        window.is_valid().then_some(window)
    }
}

#[derive(Debug, Default, Clone, FromRow)]
pub struct AppointmentRow {
    pub id: String,
    pub owner_id: String,
    pub client_name: String,
    pub client_phone: String,
    pub note: String,
    pub start_time: i64,
    pub status: sqlx::types::Text<AppointmentStatus>,
    pub created_at: i64,
}

impl AppointmentRow {
    pub fn time_of_day(&self, offset: UtcOffset) -> dietdesk_shared::Result<TimeSlot> {
        Ok(dietdesk_shared::time_of_day(self.start_time, offset)?.into())
    }
}

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    pub async fn find(&self, id: impl Into<String>) -> anyhow::Result<Option<OwnerRow>> {
        self.find_owner_where(Expr::col(Owner::Id).eq(id.into()))
            .await
    }

    pub async fn find_by_slug(&self, slug: impl Into<String>) -> anyhow::Result<Option<OwnerRow>> {
        self.find_owner_where(Expr::col(Owner::PublicSlug).eq(slug.into()))
            .await
    }

    async fn find_owner_where(&self, condition: SimpleExpr) -> anyhow::Result<Option<OwnerRow>> {
        let statement = sea_query::Query::select()
            .columns([
                Owner::Id,
                Owner::FullName,
                Owner::PublicSlug,
                Owner::WorkStartHour,
                Owner::WorkEndHour,
                Owner::SessionDuration,
                Owner::CreatedAt,
            ])
            .from(Owner::Table)
            .and_where(condition)
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, OwnerRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    pub async fn find_appointment(
        &self,
        id: impl Into<String>,
    ) -> anyhow::Result<Option<AppointmentRow>> {
        let statement = sea_query::Query::select()
            .columns(appointment_columns())
            .from(Appointment::Table)
            .and_where(Expr::col(Appointment::Id).eq(id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, AppointmentRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    /// Every appointment of the owner on `date`, whatever its status.
    pub async fn appointments_on(
        &self,
        owner_id: impl Into<String>,
        date: Date,
        offset: UtcOffset,
    ) -> anyhow::Result<Vec<AppointmentRow>> {
        let (start, end) = dietdesk_shared::day_bounds(date, offset);

        let statement = sea_query::Query::select()
            .columns(appointment_columns())
            .from(Appointment::Table)
            .and_where(Expr::col(Appointment::OwnerId).eq(owner_id.into()))
            .and_where(Expr::col(Appointment::StartTime).gte(start))
            .and_where(Expr::col(Appointment::StartTime).lt(end))
            .order_by(Appointment::StartTime, Order::Asc)
            .order_by(Appointment::CreatedAt, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, AppointmentRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }
}

impl Occupancy {
    /// Times of day held by pending or approved appointments of the owner on
    /// `date`, seen from `offset`.
    pub async fn load(
        pool: &SqlitePool,
        owner_id: impl Into<String>,
        date: Date,
        offset: UtcOffset,
    ) -> anyhow::Result<Self> {
        let (start, end) = dietdesk_shared::day_bounds(date, offset);
        let active = AppointmentStatus::ACTIVE
            .iter()
            .map(|status| status.to_string())
            .collect::<Vec<_>>();

        let statement = sea_query::Query::select()
            .column(Appointment::StartTime)
            .from(Appointment::Table)
            .and_where(Expr::col(Appointment::OwnerId).eq(owner_id.into()))
            .and_where(Expr::col(Appointment::StartTime).gte(start))
            .and_where(Expr::col(Appointment::StartTime).lt(end))
            .and_where(Expr::col(Appointment::Status).is_in(active))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_all(pool)
            .await?;

        rows.into_iter()
            .map(|(start_time,)| -> anyhow::Result<TimeSlot> {
                Ok(dietdesk_shared::time_of_day(start_time, offset)?.into())
            })
            .collect()
    }
}

fn appointment_columns() -> [Appointment; 8] {
    [
        Appointment::Id,
        Appointment::OwnerId,
        Appointment::ClientName,
        Appointment::ClientPhone,
        Appointment::Note,
        Appointment::StartTime,
        Appointment::Status,
        Appointment::CreatedAt,
    ]
}
