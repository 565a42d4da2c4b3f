use chrono::{NaiveDate, NaiveDateTime};
use database::{entities::fee_types, services::fee::FeeRecord};
use models::status::FeeStatus;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct FeeTypeResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub is_active: bool,
}

impl From<fee_types::Model> for FeeTypeResponse {
    fn from(fee_type: fee_types::Model) -> Self {
        Self {
            id: fee_type.id,
            name: fee_type.name,
            description: fee_type.description,
            amount: fee_type.amount,
            is_active: fee_type.is_active,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeeResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub student_name: Option<String>,
    /// School-issued number of the student
    pub student_number: Option<String>,
    pub term_id: Option<Uuid>,
    pub fee_type_id: Uuid,
    pub fee_type_name: Option<String>,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub discount_amount: f64,
    pub late_fee_penalty: f64,
    /// Amount still owed; negative when overpaid
    pub balance: f64,
    pub due_date: NaiveDate,
    pub payment_date: Option<NaiveDate>,
    pub payment_method: Option<String>,
    pub description: Option<String>,
    pub status: FeeStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<FeeRecord> for FeeResponse {
    fn from(record: FeeRecord) -> Self {
        let balance = record.balance();
        let FeeRecord {
            fee,
            student,
            fee_type,
        } = record;
        let (student_name, student_number) = student
            .map(|student| (student.full_name(), student.student_id))
            .unzip();

        Self {
            id: fee.id,
            student_id: fee.student_id,
            student_name,
            student_number,
            term_id: fee.term_id,
            fee_type_id: fee.fee_type_id,
            fee_type_name: fee_type.map(|fee_type| fee_type.name),
            total_amount: fee.total_amount,
            paid_amount: fee.paid_amount,
            discount_amount: fee.discount_amount,
            late_fee_penalty: fee.late_fee_penalty,
            balance,
            due_date: fee.due_date,
            payment_date: fee.payment_date,
            payment_method: fee.payment_method,
            description: fee.description,
            status: fee.status,
            created_at: fee.created_at,
            updated_at: fee.updated_at,
        }
    }
}
