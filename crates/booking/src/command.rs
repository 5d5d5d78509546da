use std::{ops::Deref, sync::LazyLock};

use dietdesk_db::table::{Appointment, Owner};
use dietdesk_shared::{Error, State, bail, booking::AppointmentStatus};
use regex::Regex;
use sea_query::{Expr, ExprTrait, Query as SqlQuery, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::{Date, UtcOffset};
use ulid::Ulid;
use validator::{Validate, ValidationError};

use crate::{BookingWindow, Occupancy, Query, TimeSlot, find_slot_index};

static RE_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap());

fn validate_window(window: &BookingWindow) -> Result<(), ValidationError> {
    if window.is_valid() {
        return Ok(());
    }

    Err(ValidationError::new("window").with_message(
        "Working hours must satisfy 0 <= start < end <= 24 and sessions last 5 to 480 minutes."
            .into(),
    ))
}

#[derive(Validate)]
pub struct CreateOwnerInput {
    #[validate(length(min = 1, max = 120))]
    pub full_name: String,
    #[validate(length(min = 3, max = 40), regex(path = *RE_SLUG, message = "Only lowercase letters (a-z), digits (0-9) and single dashes are allowed."))]
    pub public_slug: String,
    #[validate(custom(function = "validate_window"))]
    pub window: BookingWindow,
}

#[derive(Validate)]
struct SetSlugInput {
    #[validate(length(min = 3, max = 40), regex(path = *RE_SLUG, message = "Only lowercase letters (a-z), digits (0-9) and single dashes are allowed."))]
    public_slug: String,
}

#[derive(Validate)]
struct UpdateWindowInput {
    #[validate(custom(function = "validate_window"))]
    window: BookingWindow,
}

#[derive(Validate)]
pub struct RequestAppointmentInput {
    pub date: Date,
    pub time: TimeSlot,
    #[validate(length(min = 1, max = 120))]
    pub client_name: String,
    #[validate(length(min = 7, max = 20))]
    pub client_phone: String,
    #[validate(length(max = 500))]
    pub note: String,
}

#[derive(Clone)]
pub struct Command {
    state: State,
    offset: UtcOffset,
}

impl Deref for Command {
    type Target = State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    /// `offset` is the wall-clock offset booking dates and times are read in.
    pub fn new(state: State, offset: UtcOffset) -> Self {
        Self { state, offset }
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    #[tracing::instrument(skip_all, fields(slug = %input.public_slug))]
    pub async fn create_owner(&self, input: CreateOwnerInput) -> dietdesk_shared::Result<String> {
        input.validate()?;
        self.ensure_slug_free(&input.public_slug, None).await?;

        let id = Ulid::new().to_string();

        let statement = SqlQuery::insert()
            .into_table(Owner::Table)
            .columns([
                Owner::Id,
                Owner::FullName,
                Owner::PublicSlug,
                Owner::WorkStartHour,
                Owner::WorkEndHour,
                Owner::SessionDuration,
                Owner::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                input.full_name.into(),
                input.public_slug.into(),
                input.window.start_hour.into(),
                input.window.end_hour.into(),
                input.window.session_duration.into(),
                dietdesk_shared::now().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        match sqlx::query_with(&sql, values).execute(&self.write_db).await {
            Ok(_) => {}
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                bail!("slug already taken")
            }
            Err(err) => return Err(err.into()),
        }

        tracing::info!(owner.id = id, "owner created");

        Ok(id)
    }

    pub async fn set_slug(
        &self,
        owner_id: impl Into<String>,
        public_slug: impl Into<String>,
    ) -> dietdesk_shared::Result<()> {
        let owner_id = owner_id.into();
        let input = SetSlugInput {
            public_slug: public_slug.into(),
        };
        input.validate()?;

        self.ensure_slug_free(&input.public_slug, Some(&owner_id))
            .await?;

        let statement = SqlQuery::update()
            .table(Owner::Table)
            .values([(Owner::PublicSlug, input.public_slug.into())])
            .and_where(Expr::col(Owner::Id).eq(owner_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = match sqlx::query_with(&sql, values).execute(&self.write_db).await {
            Ok(result) => result,
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                bail!("slug already taken")
            }
            Err(err) => return Err(err.into()),
        };

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("owner".to_owned()));
        }

        Ok(())
    }

    pub async fn update_window(
        &self,
        owner_id: impl Into<String>,
        window: BookingWindow,
    ) -> dietdesk_shared::Result<()> {
        UpdateWindowInput { window }.validate()?;

        let statement = SqlQuery::update()
            .table(Owner::Table)
            .values([
                (Owner::WorkStartHour, window.start_hour.into()),
                (Owner::WorkEndHour, window.end_hour.into()),
                (Owner::SessionDuration, window.session_duration.into()),
            ])
            .and_where(Expr::col(Owner::Id).eq(owner_id.into()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("owner".to_owned()));
        }

        Ok(())
    }

    /// Books a pending appointment on the owner's public page.
    ///
    /// The occupancy read is only a fast path; the partial unique index on
    /// active appointments decides races between concurrent requests.
    #[tracing::instrument(skip(self, input), fields(date = %input.date, time = %input.time))]
    pub async fn request(
        &self,
        slug: &str,
        input: RequestAppointmentInput,
    ) -> dietdesk_shared::Result<String> {
        input.validate()?;

        let query = Query(self.read_db.clone());
        let Some(owner) = query.find_by_slug(slug).await? else {
            return Err(Error::NotFound("owner".to_owned()));
        };

        if find_slot_index(input.time, &owner.slots()).is_none() {
            bail!("invalid slot {}", input.time);
        }

        let start_time = dietdesk_shared::timestamp_at(input.date, input.time.to_time(), self.offset);
        if start_time <= dietdesk_shared::now() {
            bail!("cannot book a time in the past");
        }

        let occupancy =
            match Occupancy::load(&self.read_db, &owner.id, input.date, self.offset).await {
                Ok(occupancy) => occupancy,
                Err(err) => {
                    tracing::error!(owner.id = owner.id, err = %err, "occupancy check failed");

                    return Err(Error::BookingBlocked);
                }
            };

        if occupancy.is_taken(input.time) {
            return Err(Error::SlotTaken);
        }

        let id = Ulid::new().to_string();

        let statement = SqlQuery::insert()
            .into_table(Appointment::Table)
            .columns([
                Appointment::Id,
                Appointment::OwnerId,
                Appointment::ClientName,
                Appointment::ClientPhone,
                Appointment::Note,
                Appointment::StartTime,
                Appointment::Status,
                Appointment::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                owner.id.to_owned().into(),
                input.client_name.trim().into(),
                input.client_phone.trim().into(),
                input.note.trim().into(),
                start_time.into(),
                AppointmentStatus::Pending.to_string().into(),
                dietdesk_shared::now().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        match sqlx::query_with(&sql, values).execute(&self.write_db).await {
            Ok(_) => {}
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                tracing::info!(owner.id = owner.id, "slot claimed concurrently");

                return Err(Error::SlotTaken);
            }
            Err(err) => return Err(err.into()),
        }

        tracing::info!(appointment.id = id, owner.id = owner.id, "appointment requested");

        Ok(id)
    }

    #[tracing::instrument(skip(self, id))]
    pub async fn set_status(
        &self,
        id: impl Into<String>,
        status: AppointmentStatus,
    ) -> dietdesk_shared::Result<()> {
        let id = id.into();

        let Some(appointment) = Query(self.read_db.clone())
            .find_appointment(&id)
            .await?
        else {
            return Err(Error::NotFound("appointment".to_owned()));
        };

        let current = appointment.status.0;
        if !current.can_transition_to(status) {
            bail!("cannot move appointment from {} to {}", current, status);
        }

        let statement = SqlQuery::update()
            .table(Appointment::Table)
            .values([(Appointment::Status, status.to_string().into())])
            .and_where(Expr::col(Appointment::Id).eq(id))
            .and_where(Expr::col(Appointment::Status).eq(current.to_string()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            bail!("appointment was changed meanwhile, please reload");
        }

        Ok(())
    }

    async fn ensure_slug_free(
        &self,
        slug: &str,
        owner_id: Option<&str>,
    ) -> dietdesk_shared::Result<()> {
        let existing = Query(self.read_db.clone()).find_by_slug(slug).await?;

        match existing {
            Some(owner) if Some(owner.id.as_str()) != owner_id => bail!("slug already taken"),
            _ => Ok(()),
        }
    }
}
