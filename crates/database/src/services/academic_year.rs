use super::{now, validate};
use crate::{entities::academic_years, error::ServiceError};
use chrono::NaiveDate;
use log::info;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait, sea_query::Expr,
};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewAcademicYear {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_current: bool,
}

pub struct AcademicYearService;

impl AcademicYearService {
    /// Lists academic years, most recent first
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<academic_years::Model>, DbErr> {
        academic_years::Entity::find()
            .order_by_desc(academic_years::Column::StartDate)
            .order_by_asc(academic_years::Column::Id)
            .all(db)
            .await
    }

    /// Returns the academic year flagged as current, if any
    pub async fn current(db: &DatabaseConnection) -> Result<Option<academic_years::Model>, DbErr> {
        academic_years::Entity::find()
            .filter(academic_years::Column::IsCurrent.eq(true))
            .order_by_desc(academic_years::Column::StartDate)
            .one(db)
            .await
    }

    /// Id of the current academic year, usable inside a transaction
    pub(crate) async fn current_id<C>(conn: &C) -> Result<Option<Uuid>, DbErr>
    where
        C: ConnectionTrait,
    {
        academic_years::Entity::find()
            .select_only()
            .column(academic_years::Column::Id)
            .filter(academic_years::Column::IsCurrent.eq(true))
            .order_by_desc(academic_years::Column::StartDate)
            .into_tuple::<Uuid>()
            .one(conn)
            .await
    }

    /// Creates an academic year. A new current year replaces the previous one.
    pub async fn create(
        db: &DatabaseConnection,
        input: NewAcademicYear,
    ) -> Result<academic_years::Model, ServiceError> {
        validate::required("name", &input.name)?;
        validate::date_order("end_date", Some(input.start_date), Some(input.end_date))?;

        let txn = db.begin().await?;

        if input.is_current {
            academic_years::Entity::update_many()
                .col_expr(academic_years::Column::IsCurrent, Expr::value(false))
                .filter(academic_years::Column::IsCurrent.eq(true))
                .exec(&txn)
                .await?;
        }

        let timestamp = now();
        let year = academic_years::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name.trim().to_owned()),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            is_current: Set(input.is_current),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!("Created academic year {} ({})", year.name, year.id);
        Ok(year)
    }
}
