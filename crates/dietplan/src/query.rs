use dietdesk_db::table::DietList;
use sea_query::{Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

use crate::{PlanDocument, PlanMode};

#[derive(Debug, Default, FromRow)]
pub struct DietListRow {
    pub id: String,
    pub owner_id: String,
    pub client_name: String,
    pub title: String,
    pub content: String,
    pub mode: Option<sqlx::types::Text<PlanMode>>,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

impl DietListRow {
    /// Stored mode, or the keyword heuristic for rows written before the
    /// mode column existed.
    pub fn mode(&self) -> PlanMode {
        match &self.mode {
            Some(mode) => mode.0,
            None => crate::detect_mode(&self.content),
        }
    }

    pub fn document(&self) -> PlanDocument {
        crate::decode_as(&self.content, self.mode())
    }

    pub fn whatsapp_message(&self) -> String {
        crate::share::whatsapp_message(&self.client_name, &self.title, &self.content)
    }
}

#[derive(Clone)]
pub struct Query(pub sqlx::SqlitePool);

impl Query {
    pub async fn find(&self, id: impl Into<String>) -> anyhow::Result<Option<DietListRow>> {
        let statement = sea_query::Query::select()
            .columns(columns())
            .from(DietList::Table)
            .and_where(Expr::col(DietList::Id).eq(id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, DietListRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    pub async fn list_by_owner(
        &self,
        owner_id: impl Into<String>,
    ) -> anyhow::Result<Vec<DietListRow>> {
        let statement = sea_query::Query::select()
            .columns(columns())
            .from(DietList::Table)
            .and_where(Expr::col(DietList::OwnerId).eq(owner_id.into()))
            .order_by(DietList::CreatedAt, Order::Desc)
            .order_by(DietList::Id, Order::Desc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, DietListRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }
}

fn columns() -> [DietList; 8] {
    [
        DietList::Id,
        DietList::OwnerId,
        DietList::ClientName,
        DietList::Title,
        DietList::Content,
        DietList::Mode,
        DietList::CreatedAt,
        DietList::UpdatedAt,
    ]
}
