use super::{ensure_exists, now};
use crate::{
    entities::{fee_types, student_fees, students, terms},
    error::ServiceError,
};
use chrono::{NaiveDate, Utc};
use log::info;
use models::status::FeeStatus;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewFee {
    pub student_id: Uuid,
    pub term_id: Option<Uuid>,
    pub fee_type_id: Uuid,
    pub total_amount: f64,
    #[serde(default)]
    pub paid_amount: f64,
    #[serde(default)]
    pub discount_amount: f64,
    #[serde(default)]
    pub late_fee_penalty: f64,
    pub due_date: NaiveDate,
    pub payment_date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    pub description: Option<String>,
    /// Derived from the amounts and due date when absent
    pub status: Option<FeeStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FeeChanges {
    pub student_id: Option<Uuid>,
    pub term_id: Option<Uuid>,
    pub fee_type_id: Option<Uuid>,
    pub total_amount: Option<f64>,
    pub paid_amount: Option<f64>,
    pub discount_amount: Option<f64>,
    pub late_fee_penalty: Option<f64>,
    pub due_date: Option<NaiveDate>,
    pub payment_date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    pub description: Option<String>,
    pub status: Option<FeeStatus>,
}

impl FeeChanges {
    fn touches_status_inputs(&self) -> bool {
        self.total_amount.is_some()
            || self.paid_amount.is_some()
            || self.discount_amount.is_some()
            || self.late_fee_penalty.is_some()
            || self.due_date.is_some()
    }
}

/// A fee with the student it is charged to and its fee type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeRecord {
    #[serde(flatten)]
    pub fee: student_fees::Model,
    pub student: Option<students::Model>,
    pub fee_type: Option<fee_types::Model>,
}

impl FeeRecord {
    pub fn balance(&self) -> f64 {
        self.fee.amounts().balance()
    }
}

pub struct FeeService;

impl FeeService {
    /// Lists fees, latest due date first
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<FeeRecord>, ServiceError> {
        let fees = student_fees::Entity::find()
            .order_by_desc(student_fees::Column::DueDate)
            .order_by_asc(student_fees::Column::Id)
            .all(db)
            .await?;

        Ok(Self::enrich(db, fees).await?)
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<FeeRecord, ServiceError> {
        let fee = student_fees::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("fee", id))?;

        Self::enrich(db, vec![fee])
            .await?
            .pop()
            .ok_or(ServiceError::not_found("fee", id))
    }

    pub async fn create(db: &DatabaseConnection, input: NewFee) -> Result<FeeRecord, ServiceError> {
        let timestamp = now();
        let mut fee = student_fees::Model {
            id: Uuid::new_v4(),
            student_id: input.student_id,
            term_id: input.term_id,
            fee_type_id: input.fee_type_id,
            total_amount: input.total_amount,
            paid_amount: input.paid_amount,
            discount_amount: input.discount_amount,
            late_fee_penalty: input.late_fee_penalty,
            due_date: input.due_date,
            payment_date: input.payment_date,
            payment_method: input.payment_method,
            description: input.description,
            status: FeeStatus::default(),
            created_at: timestamp,
            updated_at: timestamp,
        };
        Self::validate(&fee)?;
        fee.status = input.status.unwrap_or_else(|| derive_status(&fee));

        let txn = db.begin().await?;
        Self::check_references(&txn, &fee).await?;
        let fee = fee.into_active_model().reset_all().insert(&txn).await?;
        txn.commit().await?;

        info!(
            "Recorded {} fee of {} for student {} ({})",
            fee.status, fee.total_amount, fee.student_id, fee.id
        );
        Self::get(db, fee.id).await
    }

    /// Applies the given changes. The status is derived again when amounts or the due date
    /// change without an explicit status.
    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        changes: FeeChanges,
    ) -> Result<FeeRecord, ServiceError> {
        let txn = db.begin().await?;

        let mut fee = student_fees::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::not_found("fee", id))?;

        let rederive = changes.status.is_none() && changes.touches_status_inputs();
        apply_changes!(changes => fee;
            student_id, fee_type_id, total_amount, paid_amount, discount_amount,
            late_fee_penalty, due_date, status;
            term_id, payment_date, payment_method, description,
        );
        fee.updated_at = now();

        Self::validate(&fee)?;
        if rederive {
            fee.status = derive_status(&fee);
        }
        Self::check_references(&txn, &fee).await?;

        let fee = fee.into_active_model().reset_all().update(&txn).await?;
        txn.commit().await?;

        info!("Updated fee {id}, now {}", fee.status);
        Self::get(db, id).await
    }

    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
        let result = student_fees::Entity::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("fee", id));
        }

        info!("Deleted fee {id}");
        Ok(())
    }

    fn validate(fee: &student_fees::Model) -> Result<(), ServiceError> {
        match fee.amounts().first_negative() {
            Some(field) => Err(ServiceError::validation(field, "must not be negative")),
            None => Ok(()),
        }
    }

    async fn check_references<C>(conn: &C, fee: &student_fees::Model) -> Result<(), ServiceError>
    where
        C: ConnectionTrait,
    {
        ensure_exists::<students::Entity, _>(
            conn,
            students::Column::Id,
            "student_id",
            fee.student_id,
        )
        .await?;
        ensure_exists::<fee_types::Entity, _>(
            conn,
            fee_types::Column::Id,
            "fee_type_id",
            fee.fee_type_id,
        )
        .await?;
        if let Some(term_id) = fee.term_id {
            ensure_exists::<terms::Entity, _>(conn, terms::Column::Id, "term_id", term_id).await?;
        }
        Ok(())
    }

    /// Attaches students and fee types with one query each
    async fn enrich(
        db: &DatabaseConnection,
        fees: Vec<student_fees::Model>,
    ) -> Result<Vec<FeeRecord>, DbErr> {
        let student_ids: HashSet<Uuid> = fees.iter().map(|fee| fee.student_id).collect();
        let fee_type_ids: HashSet<Uuid> = fees.iter().map(|fee| fee.fee_type_id).collect();

        let students: HashMap<Uuid, students::Model> = students::Entity::find()
            .filter(students::Column::Id.is_in(student_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|student| (student.id, student))
            .collect();
        let fee_types: HashMap<Uuid, fee_types::Model> = fee_types::Entity::find()
            .filter(fee_types::Column::Id.is_in(fee_type_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|fee_type| (fee_type.id, fee_type))
            .collect();

        Ok(fees
            .into_iter()
            .map(|fee| FeeRecord {
                student: students.get(&fee.student_id).cloned(),
                fee_type: fee_types.get(&fee.fee_type_id).cloned(),
                fee,
            })
            .collect())
    }
}

fn derive_status(fee: &student_fees::Model) -> FeeStatus {
    fee.amounts().status(fee.due_date, Utc::now().date_naive())
}
