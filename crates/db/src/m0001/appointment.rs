use sea_query::{
    ColumnDef, Index, IndexCreateStatement, IndexDropStatement, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::Appointment;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Appointment::Table)
        .col(
            ColumnDef::new(Appointment::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Appointment::OwnerId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(ColumnDef::new(Appointment::ClientName).string().not_null())
        .col(ColumnDef::new(Appointment::ClientPhone).string().not_null())
        .col(
            ColumnDef::new(Appointment::Note)
                .text()
                .not_null()
                .default(""),
        )
        .col(
            ColumnDef::new(Appointment::StartTime)
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(Appointment::Status)
                .string()
                .not_null()
                .string_len(15),
        )
        .col(
            ColumnDef::new(Appointment::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Appointment::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}

pub struct CreateIdx1;

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_appointment_owner_start")
        .table(Appointment::Table)
        .col(Appointment::OwnerId)
        .col(Appointment::StartTime)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_appointment_owner_start")
        .table(Appointment::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateIdx1 {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_idx_1().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_idx_1().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}

/// One live appointment per owner and start time. Partial so rejected,
/// completed or cancelled rows release the slot.
pub struct CreateUk1;

const CREATE_UK_1: &str = "CREATE UNIQUE INDEX IF NOT EXISTS uk_appointment_owner_start_active \
     ON appointment (owner_id, start_time) WHERE status IN ('Pending', 'Approved')";

const DROP_UK_1: &str = "DROP INDEX IF EXISTS uk_appointment_owner_start_active";

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateUk1 {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        sqlx::query(CREATE_UK_1).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        sqlx::query(DROP_UK_1).execute(connection).await?;

        Ok(())
    }
}
