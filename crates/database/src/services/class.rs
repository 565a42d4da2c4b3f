use super::{
    academic_year::AcademicYearService, association, default_true, ensure_exists, now, validate,
};
use crate::{
    entities::{academic_years, class_subjects, classes, exams, students, teachers},
    error::ServiceError,
};
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait, sea_query::Expr,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewClass {
    pub name: String,
    pub section: String,
    pub grade: String,
    /// Defaults to the current academic year
    pub academic_year_id: Option<Uuid>,
    pub class_teacher_id: Option<Uuid>,
    pub room: Option<String>,
    pub capacity: Option<i32>,
    pub current_students: Option<i32>,
    pub schedule: Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Names of the subjects taught in this class
    #[serde(default)]
    pub subjects: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ClassChanges {
    pub name: Option<String>,
    pub section: Option<String>,
    pub grade: Option<String>,
    pub academic_year_id: Option<Uuid>,
    pub class_teacher_id: Option<Uuid>,
    pub room: Option<String>,
    pub capacity: Option<i32>,
    pub current_students: Option<i32>,
    pub schedule: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    /// Replaces the linked subjects when present; an empty list removes them all
    pub subjects: Option<Vec<String>>,
}

/// A class with its class teacher and the names of its subjects
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassRecord {
    #[serde(flatten)]
    pub class: classes::Model,
    pub class_teacher: Option<teachers::Model>,
    pub subjects: Vec<String>,
}

pub struct ClassService;

impl ClassService {
    /// Lists classes by grade, then name, then section
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<ClassRecord>, ServiceError> {
        let rows = classes::Entity::find()
            .find_also_related(teachers::Entity)
            .order_by_asc(classes::Column::Grade)
            .order_by_asc(classes::Column::Name)
            .order_by_asc(classes::Column::Section)
            .order_by_asc(classes::Column::Id)
            .all(db)
            .await?;

        let ids: Vec<Uuid> = rows.iter().map(|(class, _)| class.id).collect();
        let mut subjects =
            association::subject_names_by_owner::<class_subjects::Entity, _>(db, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|(class, class_teacher)| ClassRecord {
                subjects: subjects.remove(&class.id).unwrap_or_default(),
                class,
                class_teacher,
            })
            .collect())
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<ClassRecord, ServiceError> {
        let (class, class_teacher) = classes::Entity::find_by_id(id)
            .find_also_related(teachers::Entity)
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("class", id))?;

        let mut subjects =
            association::subject_names_by_owner::<class_subjects::Entity, _>(db, &[id]).await?;

        Ok(ClassRecord {
            subjects: subjects.remove(&id).unwrap_or_default(),
            class,
            class_teacher,
        })
    }

    /// Inserts a class and links the named subjects in one transaction
    pub async fn create(
        db: &DatabaseConnection,
        input: NewClass,
    ) -> Result<ClassRecord, ServiceError> {
        validate::required("name", &input.name)?;
        validate::required("section", &input.section)?;
        validate::required("grade", &input.grade)?;
        validate::not_negative("capacity", input.capacity)?;
        validate::not_negative("current_students", input.current_students)?;

        let txn = db.begin().await?;

        let academic_year_id = match input.academic_year_id {
            Some(id) => Some(id),
            None => AcademicYearService::current_id(&txn).await?,
        };
        Self::check_references(&txn, academic_year_id, input.class_teacher_id).await?;

        let timestamp = now();
        let class = classes::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name.trim().to_owned()),
            section: Set(input.section.trim().to_owned()),
            grade: Set(input.grade.trim().to_owned()),
            academic_year_id: Set(academic_year_id),
            class_teacher_id: Set(input.class_teacher_id),
            room: Set(input.room),
            capacity: Set(input.capacity),
            current_students: Set(input.current_students),
            schedule: Set(input.schedule),
            description: Set(input.description),
            is_active: Set(input.is_active),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        }
        .insert(&txn)
        .await?;

        association::sync_subjects::<class_subjects::Entity, _>(&txn, class.id, &input.subjects)
            .await?;

        txn.commit().await?;

        info!(
            "Created class {} {} ({})",
            class.name, class.section, class.id
        );
        Self::get(db, class.id).await
    }

    /// Applies the given changes and, when `subjects` is present, replaces the linked subjects
    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        changes: ClassChanges,
    ) -> Result<ClassRecord, ServiceError> {
        let txn = db.begin().await?;

        let mut class = classes::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::not_found("class", id))?;

        let subjects = changes.subjects;
        let references_changed =
            changes.academic_year_id.is_some() || changes.class_teacher_id.is_some();
        apply_changes!(changes => class;
            name, section, grade, is_active;
            academic_year_id, class_teacher_id, room, capacity, current_students,
            schedule, description,
        );
        class.updated_at = now();

        validate::required("name", &class.name)?;
        validate::required("section", &class.section)?;
        validate::required("grade", &class.grade)?;
        validate::not_negative("capacity", class.capacity)?;
        validate::not_negative("current_students", class.current_students)?;
        if references_changed {
            Self::check_references(&txn, class.academic_year_id, class.class_teacher_id).await?;
        }

        let class = class.into_active_model().reset_all().update(&txn).await?;

        if let Some(names) = subjects {
            association::sync_subjects::<class_subjects::Entity, _>(&txn, id, &names).await?;
        }

        txn.commit().await?;

        info!("Updated class {} {} ({id})", class.name, class.section);
        Self::get(db, id).await
    }

    /// Deletes a class with its subject links and exams. Its students stay, without a class.
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
        let txn = db.begin().await?;

        let class = classes::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::not_found("class", id))?;

        let links = association::clear_subjects::<class_subjects::Entity, _>(&txn, id).await?;
        let unassigned = students::Entity::update_many()
            .col_expr(students::Column::ClassId, Expr::value(None::<Uuid>))
            .filter(students::Column::ClassId.eq(id))
            .exec(&txn)
            .await?;
        let exams = exams::Entity::delete_many()
            .filter(exams::Column::ClassId.eq(id))
            .exec(&txn)
            .await?;
        classes::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        debug!(
            "Removed {links} subject links and {} exams of class {id}, unassigned {} students",
            exams.rows_affected, unassigned.rows_affected
        );
        info!("Deleted class {} {} ({id})", class.name, class.section);
        Ok(())
    }

    async fn check_references<C>(
        conn: &C,
        academic_year_id: Option<Uuid>,
        class_teacher_id: Option<Uuid>,
    ) -> Result<(), ServiceError>
    where
        C: ConnectionTrait,
    {
        if let Some(year) = academic_year_id {
            ensure_exists::<academic_years::Entity, _>(
                conn,
                academic_years::Column::Id,
                "academic_year_id",
                year,
            )
            .await?;
        }
        if let Some(teacher) = class_teacher_id {
            ensure_exists::<teachers::Entity, _>(
                conn,
                teachers::Column::Id,
                "class_teacher_id",
                teacher,
            )
            .await?;
        }
        Ok(())
    }
}
