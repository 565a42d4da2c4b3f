use super::{ensure_exists, ensure_unique, now, validate};
use crate::{
    entities::{classes, student_fees, students},
    error::ServiceError,
};
use chrono::NaiveDate;
use log::{debug, info};
use models::{gender::Gender, status::StudentStatus};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewStudent {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub blood_group: Option<String>,
    pub photo_url: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub parent_email: Option<String>,
    pub class_id: Option<Uuid>,
    pub roll_number: Option<String>,
    pub admission_date: Option<NaiveDate>,
    pub admission_number: Option<String>,
    #[serde(default)]
    pub status: StudentStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StudentChanges {
    pub student_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub blood_group: Option<String>,
    pub photo_url: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub parent_email: Option<String>,
    pub class_id: Option<Uuid>,
    pub roll_number: Option<String>,
    pub admission_date: Option<NaiveDate>,
    pub admission_number: Option<String>,
    pub status: Option<StudentStatus>,
}

/// A student together with the class they are enrolled in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRecord {
    #[serde(flatten)]
    pub student: students::Model,
    pub class: Option<classes::Model>,
}

pub struct StudentService;

impl StudentService {
    /// Lists students, most recently admitted to the system first
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<StudentRecord>, ServiceError> {
        let rows = students::Entity::find()
            .find_also_related(classes::Entity)
            .order_by_desc(students::Column::CreatedAt)
            .order_by_asc(students::Column::Id)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(student, class)| StudentRecord { student, class })
            .collect())
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<StudentRecord, ServiceError> {
        let (student, class) = students::Entity::find_by_id(id)
            .find_also_related(classes::Entity)
            .one(db)
            .await?
            .ok_or(ServiceError::not_found("student", id))?;

        Ok(StudentRecord { student, class })
    }

    pub async fn create(
        db: &DatabaseConnection,
        input: NewStudent,
    ) -> Result<StudentRecord, ServiceError> {
        validate::required("student_id", &input.student_id)?;
        validate::required("first_name", &input.first_name)?;
        validate::required("last_name", &input.last_name)?;
        validate::email("email", input.email.as_deref())?;
        validate::email("parent_email", input.parent_email.as_deref())?;

        let student_id = input.student_id.trim().to_owned();
        let txn = db.begin().await?;

        ensure_unique::<students::Entity, _>(
            &txn,
            students::Column::StudentId,
            "student_id",
            &student_id,
            None,
        )
        .await?;
        if let Some(class_id) = input.class_id {
            ensure_exists::<classes::Entity, _>(&txn, classes::Column::Id, "class_id", class_id)
                .await?;
        }

        let timestamp = now();
        let student = students::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(student_id),
            first_name: Set(input.first_name.trim().to_owned()),
            last_name: Set(input.last_name.trim().to_owned()),
            email: Set(input.email),
            phone: Set(input.phone),
            date_of_birth: Set(input.date_of_birth),
            gender: Set(input.gender),
            address: Set(input.address),
            blood_group: Set(input.blood_group),
            photo_url: Set(input.photo_url),
            parent_name: Set(input.parent_name),
            parent_phone: Set(input.parent_phone),
            parent_email: Set(input.parent_email),
            class_id: Set(input.class_id),
            roll_number: Set(input.roll_number),
            admission_date: Set(input.admission_date),
            admission_number: Set(input.admission_number),
            status: Set(input.status),
            created_at: Set(timestamp),
            updated_at: Set(timestamp),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!("Created student {} ({})", student.full_name(), student.id);
        Self::get(db, student.id).await
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        changes: StudentChanges,
    ) -> Result<StudentRecord, ServiceError> {
        let txn = db.begin().await?;

        let mut student = students::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::not_found("student", id))?;

        let changes = StudentChanges {
            student_id: changes.student_id.map(|id| id.trim().to_owned()),
            first_name: changes.first_name.map(|name| name.trim().to_owned()),
            last_name: changes.last_name.map(|name| name.trim().to_owned()),
            ..changes
        };
        let student_id_changed = changes.student_id.is_some();
        let new_class = changes.class_id;
        apply_changes!(changes => student;
            student_id, first_name, last_name, status;
            email, phone, date_of_birth, gender, address, blood_group, photo_url,
            parent_name, parent_phone, parent_email, class_id, roll_number,
            admission_date, admission_number,
        );
        student.updated_at = now();

        validate::required("student_id", &student.student_id)?;
        validate::required("first_name", &student.first_name)?;
        validate::required("last_name", &student.last_name)?;
        validate::email("email", student.email.as_deref())?;
        validate::email("parent_email", student.parent_email.as_deref())?;
        if student_id_changed {
            ensure_unique::<students::Entity, _>(
                &txn,
                students::Column::StudentId,
                "student_id",
                &student.student_id,
                Some((students::Column::Id, id)),
            )
            .await?;
        }
        if let Some(class_id) = new_class {
            ensure_exists::<classes::Entity, _>(&txn, classes::Column::Id, "class_id", class_id)
                .await?;
        }

        let student = student.into_active_model().reset_all().update(&txn).await?;
        txn.commit().await?;

        info!("Updated student {} ({id})", student.full_name());
        Self::get(db, id).await
    }

    /// Deletes a student and every fee recorded against them
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
        let txn = db.begin().await?;

        let student = students::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::not_found("student", id))?;

        let fees = student_fees::Entity::delete_many()
            .filter(student_fees::Column::StudentId.eq(id))
            .exec(&txn)
            .await?;
        students::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        debug!("Removed {} fees of student {id}", fees.rows_affected);
        info!("Deleted student {} ({id})", student.full_name());
        Ok(())
    }
}
