use crate::entities::{student_fees, students, subjects, teachers};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QuerySelect};
use serde::Serialize;

/// Headline figures for the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DashboardStats {
    pub total_students: u64,
    pub total_teachers: u64,
    pub total_subjects: u64,
    /// Sum of every amount paid so far
    pub fees_collected: f64,
}

pub struct DashboardService;

impl DashboardService {
    pub async fn stats(db: &DatabaseConnection) -> Result<DashboardStats, DbErr> {
        let total_students = students::Entity::find().count(db).await?;
        let total_teachers = teachers::Entity::find().count(db).await?;
        let total_subjects = subjects::Entity::find().count(db).await?;

        let fees_collected = student_fees::Entity::find()
            .select_only()
            .column_as(student_fees::Column::PaidAmount.sum(), "fees_collected")
            .into_tuple::<Option<f64>>()
            .one(db)
            .await?
            .flatten()
            .unwrap_or_default();

        Ok(DashboardStats {
            total_students,
            total_teachers,
            total_subjects,
            fees_collected,
        })
    }
}
