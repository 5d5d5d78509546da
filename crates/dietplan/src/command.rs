use std::ops::Deref;

use dietdesk_db::table::DietList;
use dietdesk_shared::{Error, State};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use ulid::Ulid;
use validator::Validate;

use crate::PlanDocument;

#[derive(Validate)]
pub struct CreateDietListInput {
    #[validate(length(min = 1, max = 120))]
    pub client_name: String,
    #[validate(length(min = 1, max = 120))]
    pub title: String,
    pub document: PlanDocument,
}

#[derive(Validate)]
pub struct UpdateDietListInput {
    #[validate(length(min = 1, max = 120))]
    pub title: String,
    pub document: PlanDocument,
}

#[derive(Clone)]
pub struct Command(pub State);

impl Deref for Command {
    type Target = State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Command {
    /// Stores the plan as encoded text together with its explicit mode.
    #[tracing::instrument(skip_all)]
    pub async fn create(
        &self,
        owner_id: impl Into<String>,
        input: CreateDietListInput,
    ) -> dietdesk_shared::Result<String> {
        input.validate()?;

        let id = Ulid::new().to_string();
        let owner_id = owner_id.into();
        let content = crate::encode(&input.document);

        let statement = Query::insert()
            .into_table(DietList::Table)
            .columns([
                DietList::Id,
                DietList::OwnerId,
                DietList::ClientName,
                DietList::Title,
                DietList::Content,
                DietList::Mode,
                DietList::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                owner_id.into(),
                input.client_name.into(),
                input.title.into(),
                content.into(),
                input.document.mode().to_string().into(),
                dietdesk_shared::now().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        tracing::info!(diet_list.id = id, "diet list created");

        Ok(id)
    }

    #[tracing::instrument(skip_all)]
    pub async fn update(
        &self,
        id: impl Into<String>,
        input: UpdateDietListInput,
    ) -> dietdesk_shared::Result<()> {
        input.validate()?;

        let content = crate::encode(&input.document);

        let statement = Query::update()
            .table(DietList::Table)
            .values([
                (DietList::Title, input.title.into()),
                (DietList::Content, content.into()),
                (DietList::Mode, input.document.mode().to_string().into()),
                (DietList::UpdatedAt, dietdesk_shared::now().into()),
            ])
            .and_where(Expr::col(DietList::Id).eq(id.into()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("diet list".to_owned()));
        }

        Ok(())
    }

    pub async fn delete(&self, id: impl Into<String>) -> dietdesk_shared::Result<()> {
        let statement = Query::delete()
            .from_table(DietList::Table)
            .and_where(Expr::col(DietList::Id).eq(id.into()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("diet list".to_owned()));
        }

        Ok(())
    }
}
