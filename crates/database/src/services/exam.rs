use super::{ensure_exists, now, validate};
use crate::{
    entities::{classes, exams, subjects, terms},
    error::ServiceError,
};
use chrono::{NaiveDate, NaiveTime};
use log::info;
use models::status::ExamStatus;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewExam {
    pub name: String,
    pub exam_type: String,
    pub subject_id: Uuid,
    pub class_id: Uuid,
    pub term_id: Option<Uuid>,
    pub exam_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: Option<i32>,
    pub total_marks: i32,
    pub passing_marks: Option<i32>,
    pub instructions: Option<String>,
    pub venue: Option<String>,
    #[serde(default)]
    pub status: ExamStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ExamChanges {
    pub name: Option<String>,
    pub exam_type: Option<String>,
    pub subject_id: Option<Uuid>,
    pub class_id: Option<Uuid>,
    pub term_id: Option<Uuid>,
    pub exam_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub duration_minutes: Option<i32>,
    pub total_marks: Option<i32>,
    pub passing_marks: Option<i32>,
    pub instructions: Option<String>,
    pub venue: Option<String>,
    pub status: Option<ExamStatus>,
}

/// An exam with the subject it tests and the class sitting it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamRecord {
    #[serde(flatten)]
    pub exam: exams::Model,
    pub subject: Option<subjects::Model>,
    pub class: Option<classes::Model>,
}

pub struct ExamService;

impl ExamService {
    /// Lists exams, latest exam date first
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<ExamRecord>, ServiceError> {
        let exams = exams::Entity::find()
            .order_by_desc(exams::Column::ExamDate)
            .order_by_asc(exams::Column::Id)
            .all(db)
            .await?;

        Ok(Self::enrich(db, exams).await?)
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<ExamRecord, ServiceError> {
        let exam = exams::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("exam", id))?;

        Self::enrich(db, vec![exam])
            .await?
            .pop()
            .ok_or(ServiceError::not_found("exam", id))
    }

    pub async fn create(
        db: &DatabaseConnection,
        input: NewExam,
    ) -> Result<ExamRecord, ServiceError> {
        let timestamp = now();
        let exam = exams::Model {
            id: Uuid::new_v4(),
            name: input.name.trim().to_owned(),
            exam_type: input.exam_type.trim().to_owned(),
            subject_id: input.subject_id,
            class_id: input.class_id,
            term_id: input.term_id,
            exam_date: input.exam_date,
            start_time: input.start_time,
            duration_minutes: input.duration_minutes,
            total_marks: input.total_marks,
            passing_marks: input.passing_marks,
            instructions: input.instructions,
            venue: input.venue,
            status: input.status,
            created_at: timestamp,
            updated_at: timestamp,
        };
        Self::validate(&exam)?;

        let txn = db.begin().await?;
        Self::check_references(&txn, &exam).await?;
        let exam = exam.into_active_model().reset_all().insert(&txn).await?;
        txn.commit().await?;

        info!("Created exam {} ({})", exam.name, exam.id);
        Self::get(db, exam.id).await
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        changes: ExamChanges,
    ) -> Result<ExamRecord, ServiceError> {
        let txn = db.begin().await?;

        let mut exam = exams::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::not_found("exam", id))?;

        apply_changes!(changes => exam;
            name, exam_type, subject_id, class_id, exam_date, start_time, total_marks, status;
            term_id, duration_minutes, passing_marks, instructions, venue,
        );
        exam.updated_at = now();

        Self::validate(&exam)?;
        Self::check_references(&txn, &exam).await?;

        let exam = exam.into_active_model().reset_all().update(&txn).await?;
        txn.commit().await?;

        info!("Updated exam {} ({id})", exam.name);
        Self::get(db, id).await
    }

    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
        let exam = exams::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("exam", id))?;

        exams::Entity::delete_by_id(id).exec(db).await?;

        info!("Deleted exam {} ({id})", exam.name);
        Ok(())
    }

    fn validate(exam: &exams::Model) -> Result<(), ServiceError> {
        validate::required("name", &exam.name)?;
        validate::required("exam_type", &exam.exam_type)?;
        if exam.total_marks <= 0 {
            return Err(ServiceError::validation("total_marks", "must be positive"));
        }
        validate::marks(Some(exam.total_marks), exam.passing_marks)?;
        validate::not_negative("duration_minutes", exam.duration_minutes)
    }

    async fn check_references<C>(conn: &C, exam: &exams::Model) -> Result<(), ServiceError>
    where
        C: ConnectionTrait,
    {
        ensure_exists::<subjects::Entity, _>(
            conn,
            subjects::Column::Id,
            "subject_id",
            exam.subject_id,
        )
        .await?;
        ensure_exists::<classes::Entity, _>(conn, classes::Column::Id, "class_id", exam.class_id)
            .await?;
        if let Some(term_id) = exam.term_id {
            ensure_exists::<terms::Entity, _>(conn, terms::Column::Id, "term_id", term_id).await?;
        }
        Ok(())
    }

    /// Attaches subjects and classes with one query each
    async fn enrich(
        db: &DatabaseConnection,
        exams: Vec<exams::Model>,
    ) -> Result<Vec<ExamRecord>, DbErr> {
        let subject_ids: HashSet<Uuid> = exams.iter().map(|exam| exam.subject_id).collect();
        let class_ids: HashSet<Uuid> = exams.iter().map(|exam| exam.class_id).collect();

        let subjects: HashMap<Uuid, subjects::Model> = subjects::Entity::find()
            .filter(subjects::Column::Id.is_in(subject_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|subject| (subject.id, subject))
            .collect();
        let classes: HashMap<Uuid, classes::Model> = classes::Entity::find()
            .filter(classes::Column::Id.is_in(class_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|class| (class.id, class))
            .collect();

        Ok(exams
            .into_iter()
            .map(|exam| ExamRecord {
                subject: subjects.get(&exam.subject_id).cloned(),
                class: classes.get(&exam.class_id).cloned(),
                exam,
            })
            .collect())
    }
}
