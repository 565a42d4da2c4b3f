use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub section: String,
    pub grade: String,
    pub academic_year_id: Option<Uuid>,
    pub class_teacher_id: Option<Uuid>,
    pub room: Option<String>,
    pub capacity: Option<i32>,
    pub current_students: Option<i32>,
    pub schedule: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::ClassTeacherId",
        to = "super::teachers::Column::Id",
        on_delete = "SetNull"
    )]
    ClassTeacher,
    #[sea_orm(
        belongs_to = "super::academic_years::Entity",
        from = "Column::AcademicYearId",
        to = "super::academic_years::Column::Id",
        on_delete = "SetNull"
    )]
    AcademicYear,
    #[sea_orm(has_many = "super::class_subjects::Entity")]
    ClassSubjects,
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassTeacher.def()
    }
}

impl Related<super::academic_years::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AcademicYear.def()
    }
}

impl Related<super::class_subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassSubjects.def()
    }
}

// Many-to-many relationship with subjects
impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        super::class_subjects::Relation::Subject.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::class_subjects::Relation::Class.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
