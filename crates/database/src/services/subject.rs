use super::{association, default_true, ensure_unique, now, validate};
use crate::{
    entities::{class_subjects, exams, subjects, teacher_subjects},
    error::ServiceError,
};
use log::info;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait,
};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewSubject {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub credits: Option<i32>,
    pub total_marks: Option<i32>,
    pub passing_marks: Option<i32>,
    pub duration_hours: Option<i32>,
    pub objectives: Option<String>,
    pub syllabus: Option<String>,
    pub prerequisites: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SubjectChanges {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub credits: Option<i32>,
    pub total_marks: Option<i32>,
    pub passing_marks: Option<i32>,
    pub duration_hours: Option<i32>,
    pub objectives: Option<String>,
    pub syllabus: Option<String>,
    pub prerequisites: Option<String>,
    pub is_active: Option<bool>,
}

pub struct SubjectService;

impl SubjectService {
    /// Lists subjects alphabetically by name
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<subjects::Model>, DbErr> {
        subjects::Entity::find()
            .order_by_asc(subjects::Column::Name)
            .order_by_asc(subjects::Column::Id)
            .all(db)
            .await
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<subjects::Model, ServiceError> {
        subjects::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("subject", id))
    }

    pub async fn create(
        db: &DatabaseConnection,
        input: NewSubject,
    ) -> Result<subjects::Model, ServiceError> {
        validate::required("code", &input.code)?;
        validate::required("name", &input.name)?;
        validate::required("category", &input.category)?;
        validate::marks(input.total_marks, input.passing_marks)?;
        validate::not_negative("credits", input.credits)?;
        validate::not_negative("duration_hours", input.duration_hours)?;

        let code = input.code.trim().to_owned();
        let name = input.name.trim().to_owned();
        let txn = db.begin().await?;
        ensure_unique::<subjects::Entity, _>(&txn, subjects::Column::Code, "code", &code, None)
            .await?;
        ensure_unique::<subjects::Entity, _>(&txn, subjects::Column::Name, "name", &name, None)
            .await?;

        let timestamp = now();
        let subject = subjects::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(code),
            name: Set(name),
            description: Set(input.description),
            category: Set(input.category),
            credits: Set(input.credits),
            total_marks: Set(input.total_marks),
            passing_marks: Set(input.passing_marks),
            duration_hours: Set(input.duration_hours),
            objectives: Set(input.objectives),
            syllabus: Set(input.syllabus),
            prerequisites: Set(input.prerequisites),
            is_active: Set(input.is_active),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!("Created subject {} ({})", subject.name, subject.id);
        Ok(subject)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        changes: SubjectChanges,
    ) -> Result<subjects::Model, ServiceError> {
        let txn = db.begin().await?;

        let mut subject = subjects::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::not_found("subject", id))?;

        let changes = SubjectChanges {
            code: changes.code.map(|code| code.trim().to_owned()),
            name: changes.name.map(|name| name.trim().to_owned()),
            ..changes
        };
        apply_changes!(changes => subject;
            code, name, category, is_active;
            description, credits, total_marks, passing_marks, duration_hours,
            objectives, syllabus, prerequisites,
        );
        subject.updated_at = now();

        validate::required("code", &subject.code)?;
        validate::required("name", &subject.name)?;
        validate::required("category", &subject.category)?;
        validate::marks(subject.total_marks, subject.passing_marks)?;
        validate::not_negative("credits", subject.credits)?;
        validate::not_negative("duration_hours", subject.duration_hours)?;
        ensure_unique::<subjects::Entity, _>(
            &txn,
            subjects::Column::Code,
            "code",
            &subject.code,
            Some((subjects::Column::Id, id)),
        )
        .await?;
        ensure_unique::<subjects::Entity, _>(
            &txn,
            subjects::Column::Name,
            "name",
            &subject.name,
            Some((subjects::Column::Id, id)),
        )
        .await?;

        let subject = subject.into_active_model().reset_all().update(&txn).await?;
        txn.commit().await?;

        info!("Updated subject {} ({})", subject.name, subject.id);
        Ok(subject)
    }

    /// Deletes a subject along with every link to it and the exams set for it
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
        let txn = db.begin().await?;

        let subject = subjects::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::not_found("subject", id))?;

        let teacher_links =
            association::unlink_subject::<teacher_subjects::Entity, _>(&txn, id).await?;
        let class_links = association::unlink_subject::<class_subjects::Entity, _>(&txn, id).await?;
        exams::Entity::delete_many()
            .filter(exams::Column::SubjectId.eq(id))
            .exec(&txn)
            .await?;
        subjects::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        info!(
            "Deleted subject {} ({id}), unlinked {teacher_links} teachers and {class_links} classes",
            subject.name
        );
        Ok(())
    }
}
