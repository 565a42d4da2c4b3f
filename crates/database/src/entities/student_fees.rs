use models::{fees::FeeAmounts, status::FeeStatus};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student_fees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub student_id: Uuid,
    pub term_id: Option<Uuid>,
    pub fee_type_id: Uuid,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub discount_amount: f64,
    pub late_fee_penalty: f64,
    pub due_date: Date,
    pub payment_date: Option<Date>,
    pub payment_method: Option<String>,
    pub description: Option<String>,
    pub status: FeeStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Model {
    pub fn amounts(&self) -> FeeAmounts {
        FeeAmounts {
            total: self.total_amount,
            paid: self.paid_amount,
            discount: self.discount_amount,
            late_fee: self.late_fee_penalty,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::fee_types::Entity",
        from = "Column::FeeTypeId",
        to = "super::fee_types::Column::Id",
        on_delete = "Restrict"
    )]
    FeeType,
    #[sea_orm(
        belongs_to = "super::terms::Entity",
        from = "Column::TermId",
        to = "super::terms::Column::Id",
        on_delete = "SetNull"
    )]
    Term,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::fee_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeeType.def()
    }
}

impl Related<super::terms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Term.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
