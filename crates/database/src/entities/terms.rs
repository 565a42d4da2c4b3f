use models::status::TermStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "terms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub code: Option<String>,
    pub academic_year_id: Option<Uuid>,
    pub start_date: Date,
    pub end_date: Date,
    pub registration_start: Option<Date>,
    pub registration_end: Option<Date>,
    pub exam_start: Option<Date>,
    pub exam_end: Option<Date>,
    pub result_date: Option<Date>,
    pub status: TermStatus,
    pub total_weeks: Option<i32>,
    pub holiday_days: Option<i32>,
    pub fee_amount: Option<f64>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::academic_years::Entity",
        from = "Column::AcademicYearId",
        to = "super::academic_years::Column::Id",
        on_delete = "SetNull"
    )]
    AcademicYear,
}

impl Related<super::academic_years::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AcademicYear.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
