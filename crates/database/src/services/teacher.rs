use super::{association, ensure_unique, now, validate};
use crate::{
    entities::{classes, teacher_subjects, teachers},
    error::ServiceError,
};
use chrono::NaiveDate;
use log::{debug, info};
use models::{gender::Gender, status::TeacherStatus};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait, sea_query::Expr,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewTeacher {
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub photo_url: Option<String>,
    pub designation: String,
    pub qualification: String,
    pub experience: Option<i32>,
    pub joining_date: NaiveDate,
    pub salary: Option<f64>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    #[serde(default)]
    pub status: TeacherStatus,
    /// Names of the subjects this teacher teaches
    #[serde(default)]
    pub subjects: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TeacherChanges {
    pub employee_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub photo_url: Option<String>,
    pub designation: Option<String>,
    pub qualification: Option<String>,
    pub experience: Option<i32>,
    pub joining_date: Option<NaiveDate>,
    pub salary: Option<f64>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub status: Option<TeacherStatus>,
    /// Replaces the linked subjects when present; an empty list removes them all
    pub subjects: Option<Vec<String>>,
}

/// A teacher with the names of the subjects they teach
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeacherRecord {
    #[serde(flatten)]
    pub teacher: teachers::Model,
    pub subjects: Vec<String>,
}

pub struct TeacherService;

impl TeacherService {
    /// Lists teachers, newest first
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<TeacherRecord>, ServiceError> {
        let teachers = teachers::Entity::find()
            .order_by_desc(teachers::Column::CreatedAt)
            .order_by_asc(teachers::Column::Id)
            .all(db)
            .await?;

        let ids: Vec<Uuid> = teachers.iter().map(|teacher| teacher.id).collect();
        let mut subjects =
            association::subject_names_by_owner::<teacher_subjects::Entity, _>(db, &ids).await?;

        Ok(teachers
            .into_iter()
            .map(|teacher| TeacherRecord {
                subjects: subjects.remove(&teacher.id).unwrap_or_default(),
                teacher,
            })
            .collect())
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<TeacherRecord, ServiceError> {
        let teacher = teachers::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("teacher", id))?;

        let mut subjects =
            association::subject_names_by_owner::<teacher_subjects::Entity, _>(db, &[id]).await?;

        Ok(TeacherRecord {
            subjects: subjects.remove(&id).unwrap_or_default(),
            teacher,
        })
    }

    /// Inserts a teacher and links the named subjects in one transaction
    pub async fn create(
        db: &DatabaseConnection,
        input: NewTeacher,
    ) -> Result<TeacherRecord, ServiceError> {
        Self::validate_fields(
            &input.employee_id,
            &input.first_name,
            &input.last_name,
            &input.email,
            &input.designation,
            &input.qualification,
            input.experience,
            input.salary,
        )?;

        let employee_id = input.employee_id.trim().to_owned();
        let txn = db.begin().await?;

        ensure_unique::<teachers::Entity, _>(
            &txn,
            teachers::Column::EmployeeId,
            "employee_id",
            &employee_id,
            None,
        )
        .await?;

        let timestamp = now();
        let teacher = teachers::ActiveModel {
            id: Set(Uuid::new_v4()),
            employee_id: Set(employee_id),
            first_name: Set(input.first_name.trim().to_owned()),
            last_name: Set(input.last_name.trim().to_owned()),
            email: Set(input.email.trim().to_owned()),
            phone: Set(input.phone),
            date_of_birth: Set(input.date_of_birth),
            gender: Set(input.gender),
            address: Set(input.address),
            photo_url: Set(input.photo_url),
            designation: Set(input.designation),
            qualification: Set(input.qualification),
            experience: Set(input.experience),
            joining_date: Set(input.joining_date),
            salary: Set(input.salary),
            emergency_contact_name: Set(input.emergency_contact_name),
            emergency_contact_phone: Set(input.emergency_contact_phone),
            status: Set(input.status),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        }
        .insert(&txn)
        .await?;

        association::sync_subjects::<teacher_subjects::Entity, _>(
            &txn,
            teacher.id,
            &input.subjects,
        )
        .await?;

        txn.commit().await?;

        info!("Created teacher {} ({})", teacher.full_name(), teacher.id);
        Self::get(db, teacher.id).await
    }

    /// Applies the given changes and, when `subjects` is present, replaces the linked subjects
    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        changes: TeacherChanges,
    ) -> Result<TeacherRecord, ServiceError> {
        let txn = db.begin().await?;

        let mut teacher = teachers::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::not_found("teacher", id))?;

        let changes = TeacherChanges {
            employee_id: changes.employee_id.map(|id| id.trim().to_owned()),
            first_name: changes.first_name.map(|name| name.trim().to_owned()),
            last_name: changes.last_name.map(|name| name.trim().to_owned()),
            email: changes.email.map(|email| email.trim().to_owned()),
            ..changes
        };
        let subjects = changes.subjects;
        let employee_id_changed = changes.employee_id.is_some();
        apply_changes!(changes => teacher;
            employee_id, first_name, last_name, email, designation, qualification,
            joining_date, status;
            phone, date_of_birth, gender, address, photo_url, experience, salary,
            emergency_contact_name, emergency_contact_phone,
        );
        teacher.updated_at = now();

        Self::validate_fields(
            &teacher.employee_id,
            &teacher.first_name,
            &teacher.last_name,
            &teacher.email,
            &teacher.designation,
            &teacher.qualification,
            teacher.experience,
            teacher.salary,
        )?;
        if employee_id_changed {
            ensure_unique::<teachers::Entity, _>(
                &txn,
                teachers::Column::EmployeeId,
                "employee_id",
                &teacher.employee_id,
                Some((teachers::Column::Id, id)),
            )
            .await?;
        }

        let teacher = teacher.into_active_model().reset_all().update(&txn).await?;

        if let Some(names) = subjects {
            association::sync_subjects::<teacher_subjects::Entity, _>(&txn, id, &names).await?;
        }

        txn.commit().await?;

        info!("Updated teacher {} ({id})", teacher.full_name());
        Self::get(db, id).await
    }

    /// Deletes a teacher, their subject links and their class-teacher assignments
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
        let txn = db.begin().await?;

        let teacher = teachers::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::not_found("teacher", id))?;

        let links = association::clear_subjects::<teacher_subjects::Entity, _>(&txn, id).await?;
        let unassigned = classes::Entity::update_many()
            .col_expr(classes::Column::ClassTeacherId, Expr::value(None::<Uuid>))
            .filter(classes::Column::ClassTeacherId.eq(id))
            .exec(&txn)
            .await?;
        teachers::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        debug!(
            "Removed {links} subject links and {} class assignments of teacher {id}",
            unassigned.rows_affected
        );
        info!("Deleted teacher {} ({id})", teacher.full_name());
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn validate_fields(
        employee_id: &str,
        first_name: &str,
        last_name: &str,
        email: &str,
        designation: &str,
        qualification: &str,
        experience: Option<i32>,
        salary: Option<f64>,
    ) -> Result<(), ServiceError> {
        validate::required("employee_id", employee_id)?;
        validate::required("first_name", first_name)?;
        validate::required("last_name", last_name)?;
        validate::required("email", email)?;
        validate::email("email", Some(email))?;
        validate::required("designation", designation)?;
        validate::required("qualification", qualification)?;
        validate::not_negative("experience", experience)?;
        if let Some(salary) = salary
            && (salary < 0.0 || salary.is_nan())
        {
            return Err(ServiceError::validation("salary", "must not be negative"));
        }
        Ok(())
    }
}
