use super::{academic_year::AcademicYearService, default_true, ensure_exists, now, validate};
use crate::{
    entities::{academic_years, exams, student_fees, terms},
    error::ServiceError,
};
use chrono::NaiveDate;
use log::{debug, info};
use models::status::TermStatus;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, TransactionTrait, sea_query::Expr,
};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewTerm {
    pub name: String,
    pub code: Option<String>,
    /// Defaults to the current academic year
    pub academic_year_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub registration_start: Option<NaiveDate>,
    pub registration_end: Option<NaiveDate>,
    pub exam_start: Option<NaiveDate>,
    pub exam_end: Option<NaiveDate>,
    pub result_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: TermStatus,
    pub total_weeks: Option<i32>,
    pub holiday_days: Option<i32>,
    pub fee_amount: Option<f64>,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TermChanges {
    pub name: Option<String>,
    pub code: Option<String>,
    pub academic_year_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub registration_start: Option<NaiveDate>,
    pub registration_end: Option<NaiveDate>,
    pub exam_start: Option<NaiveDate>,
    pub exam_end: Option<NaiveDate>,
    pub result_date: Option<NaiveDate>,
    pub status: Option<TermStatus>,
    pub total_weeks: Option<i32>,
    pub holiday_days: Option<i32>,
    pub fee_amount: Option<f64>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

pub struct TermService;

impl TermService {
    /// Lists terms, latest start date first
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<terms::Model>, ServiceError> {
        Ok(terms::Entity::find()
            .order_by_desc(terms::Column::StartDate)
            .order_by_asc(terms::Column::Id)
            .all(db)
            .await?)
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<terms::Model, ServiceError> {
        terms::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("term", id))
    }

    pub async fn create(
        db: &DatabaseConnection,
        input: NewTerm,
    ) -> Result<terms::Model, ServiceError> {
        let timestamp = now();
        let mut term = terms::Model {
            id: Uuid::new_v4(),
            name: input.name.trim().to_owned(),
            code: input.code,
            academic_year_id: input.academic_year_id,
            start_date: input.start_date,
            end_date: input.end_date,
            registration_start: input.registration_start,
            registration_end: input.registration_end,
            exam_start: input.exam_start,
            exam_end: input.exam_end,
            result_date: input.result_date,
            status: input.status,
            total_weeks: input.total_weeks,
            holiday_days: input.holiday_days,
            fee_amount: input.fee_amount,
            description: input.description,
            is_active: input.is_active,
            created_at: timestamp,
            updated_at: timestamp,
        };
        Self::validate(&term)?;

        let txn = db.begin().await?;

        match term.academic_year_id {
            Some(year) => {
                ensure_exists::<academic_years::Entity, _>(
                    &txn,
                    academic_years::Column::Id,
                    "academic_year_id",
                    year,
                )
                .await?
            }
            None => term.academic_year_id = AcademicYearService::current_id(&txn).await?,
        }

        let term = term.into_active_model().reset_all().insert(&txn).await?;

        txn.commit().await?;

        info!("Created term {} ({})", term.name, term.id);
        Ok(term)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        changes: TermChanges,
    ) -> Result<terms::Model, ServiceError> {
        let txn = db.begin().await?;

        let mut term = terms::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::not_found("term", id))?;

        let new_year = changes.academic_year_id;
        apply_changes!(changes => term;
            name, start_date, end_date, status, is_active;
            code, academic_year_id, registration_start, registration_end, exam_start,
            exam_end, result_date, total_weeks, holiday_days, fee_amount, description,
        );
        term.updated_at = now();

        Self::validate(&term)?;
        if let Some(year) = new_year {
            ensure_exists::<academic_years::Entity, _>(
                &txn,
                academic_years::Column::Id,
                "academic_year_id",
                year,
            )
            .await?;
        }

        let term = term.into_active_model().reset_all().update(&txn).await?;
        txn.commit().await?;

        info!("Updated term {} ({id})", term.name);
        Ok(term)
    }

    /// Deletes a term. Exams and fees scheduled in it are kept without a term.
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
        let txn = db.begin().await?;

        let term = terms::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::not_found("term", id))?;

        let exams = exams::Entity::update_many()
            .col_expr(exams::Column::TermId, Expr::value(None::<Uuid>))
            .filter(exams::Column::TermId.eq(id))
            .exec(&txn)
            .await?;
        let fees = student_fees::Entity::update_many()
            .col_expr(student_fees::Column::TermId, Expr::value(None::<Uuid>))
            .filter(student_fees::Column::TermId.eq(id))
            .exec(&txn)
            .await?;
        terms::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        debug!(
            "Detached {} exams and {} fees from term {id}",
            exams.rows_affected, fees.rows_affected
        );
        info!("Deleted term {} ({id})", term.name);
        Ok(())
    }

    fn validate(term: &terms::Model) -> Result<(), ServiceError> {
        validate::required("name", &term.name)?;
        validate::date_order("end_date", Some(term.start_date), Some(term.end_date))?;
        validate::date_order(
            "registration_end",
            term.registration_start,
            term.registration_end,
        )?;
        validate::date_order("exam_end", term.exam_start, term.exam_end)?;
        validate::not_negative("total_weeks", term.total_weeks)?;
        validate::not_negative("holiday_days", term.holiday_days)?;
        if let Some(amount) = term.fee_amount
            && (amount < 0.0 || amount.is_nan())
        {
            return Err(ServiceError::validation("fee_amount", "must not be negative"));
        }
        Ok(())
    }
}
