#![allow(dead_code)]

use chrono::NaiveDate;
use database::services::{
    class::{ClassRecord, ClassService, NewClass},
    subject::{NewSubject, SubjectService},
    teacher::{NewTeacher, TeacherRecord, TeacherService},
};
use migration::{Migrator, MigratorTrait};
use models::status::TeacherStatus;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// A migrated in-memory database. One pooled connection keeps the schema alive.
pub async fn setup() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

/// Same as [`setup`], with English, Mathematics and Science already in the subject table
pub async fn setup_with_subjects() -> DatabaseConnection {
    let db = setup().await;
    for (code, name) in [("ENG", "English"), ("MATH", "Mathematics"), ("SCI", "Science")] {
        SubjectService::create(&db, new_subject(code, name))
            .await
            .expect("seed subject");
    }
    db
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|name| name.to_string()).collect()
}

pub fn new_subject(code: &str, name: &str) -> NewSubject {
    NewSubject {
        code: code.to_string(),
        name: name.to_string(),
        description: None,
        category: "core".to_string(),
        credits: Some(3),
        total_marks: Some(100),
        passing_marks: Some(40),
        duration_hours: None,
        objectives: None,
        syllabus: None,
        prerequisites: None,
        is_active: true,
    }
}

pub fn new_teacher(employee_id: &str, subjects: &[&str]) -> NewTeacher {
    NewTeacher {
        employee_id: employee_id.to_string(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: format!("{}@school.test", employee_id.to_lowercase()),
        phone: None,
        date_of_birth: None,
        gender: None,
        address: None,
        photo_url: None,
        designation: "Senior Teacher".to_string(),
        qualification: "B.Ed".to_string(),
        experience: Some(5),
        joining_date: date(2020, 1, 6),
        salary: None,
        emergency_contact_name: None,
        emergency_contact_phone: None,
        status: TeacherStatus::Active,
        subjects: names(subjects),
    }
}

pub fn new_class(name: &str, section: &str, grade: &str, subjects: &[&str]) -> NewClass {
    NewClass {
        name: name.to_string(),
        section: section.to_string(),
        grade: grade.to_string(),
        academic_year_id: None,
        class_teacher_id: None,
        room: None,
        capacity: Some(40),
        current_students: None,
        schedule: None,
        description: None,
        is_active: true,
        subjects: names(subjects),
    }
}

pub async fn create_teacher(
    db: &DatabaseConnection,
    employee_id: &str,
    subjects: &[&str],
) -> TeacherRecord {
    TeacherService::create(db, new_teacher(employee_id, subjects))
        .await
        .expect("create teacher")
}

pub async fn create_class(db: &DatabaseConnection, name: &str, subjects: &[&str]) -> ClassRecord {
    ClassService::create(db, new_class(name, "A", "5", subjects))
        .await
        .expect("create class")
}
