use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use database::{
    entities::{academic_years, subjects, terms},
    services::{class::ClassRecord, exam::ExamRecord},
};
use models::status::{ExamStatus, TermStatus};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct AcademicYearResponse {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_current: bool,
}

impl From<academic_years::Model> for AcademicYearResponse {
    fn from(year: academic_years::Model) -> Self {
        Self {
            id: year.id,
            name: year.name,
            start_date: year.start_date,
            end_date: year.end_date,
            is_current: year.is_current,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectResponse {
    pub id: Uuid,
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
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<subjects::Model> for SubjectResponse {
    fn from(subject: subjects::Model) -> Self {
        Self {
            id: subject.id,
            code: subject.code,
            name: subject.name,
            description: subject.description,
            category: subject.category,
            credits: subject.credits,
            total_marks: subject.total_marks,
            passing_marks: subject.passing_marks,
            duration_hours: subject.duration_hours,
            objectives: subject.objectives,
            syllabus: subject.syllabus,
            prerequisites: subject.prerequisites,
            is_active: subject.is_active,
            created_at: subject.created_at,
            updated_at: subject.updated_at,
        }
    }
}

/// The teacher in charge of a class
#[derive(Debug, Serialize, ToSchema)]
pub struct ClassTeacher {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassResponse {
    pub id: Uuid,
    pub name: String,
    pub section: String,
    pub grade: String,
    pub academic_year_id: Option<Uuid>,
    pub class_teacher: Option<ClassTeacher>,
    pub room: Option<String>,
    pub capacity: Option<i32>,
    pub current_students: Option<i32>,
    pub schedule: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    /// Names of the subjects taught, alphabetically
    pub subjects: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<ClassRecord> for ClassResponse {
    fn from(
        ClassRecord {
            class,
            class_teacher,
            subjects,
        }: ClassRecord,
    ) -> Self {
        Self {
            id: class.id,
            name: class.name,
            section: class.section,
            grade: class.grade,
            academic_year_id: class.academic_year_id,
            class_teacher: class_teacher.map(|teacher| ClassTeacher {
                id: teacher.id,
                full_name: teacher.full_name(),
                email: teacher.email,
            }),
            room: class.room,
            capacity: class.capacity,
            current_students: class.current_students,
            schedule: class.schedule,
            description: class.description,
            is_active: class.is_active,
            subjects,
            created_at: class.created_at,
            updated_at: class.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TermResponse {
    pub id: Uuid,
    pub name: String,
    pub code: Option<String>,
    pub academic_year_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub registration_start: Option<NaiveDate>,
    pub registration_end: Option<NaiveDate>,
    pub exam_start: Option<NaiveDate>,
    pub exam_end: Option<NaiveDate>,
    pub result_date: Option<NaiveDate>,
    pub status: TermStatus,
    pub total_weeks: Option<i32>,
    pub holiday_days: Option<i32>,
    pub fee_amount: Option<f64>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<terms::Model> for TermResponse {
    fn from(term: terms::Model) -> Self {
        Self {
            id: term.id,
            name: term.name,
            code: term.code,
            academic_year_id: term.academic_year_id,
            start_date: term.start_date,
            end_date: term.end_date,
            registration_start: term.registration_start,
            registration_end: term.registration_end,
            exam_start: term.exam_start,
            exam_end: term.exam_end,
            result_date: term.result_date,
            status: term.status,
            total_weeks: term.total_weeks,
            holiday_days: term.holiday_days,
            fee_amount: term.fee_amount,
            description: term.description,
            is_active: term.is_active,
            created_at: term.created_at,
            updated_at: term.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExamResponse {
    pub id: Uuid,
    pub name: String,
    pub exam_type: String,
    pub subject_id: Uuid,
    pub subject_name: Option<String>,
    pub subject_code: Option<String>,
    pub class_id: Uuid,
    pub class_name: Option<String>,
    pub class_section: Option<String>,
    pub term_id: Option<Uuid>,
    pub exam_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: Option<i32>,
    pub total_marks: i32,
    pub passing_marks: Option<i32>,
    pub instructions: Option<String>,
    pub venue: Option<String>,
    pub status: ExamStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<ExamRecord> for ExamResponse {
    fn from(
        ExamRecord {
            exam,
            subject,
            class,
        }: ExamRecord,
    ) -> Self {
        let (subject_name, subject_code) = subject
            .map(|subject| (subject.name, subject.code))
            .unzip();
        let (class_name, class_section) = class.map(|class| (class.name, class.section)).unzip();

        Self {
            id: exam.id,
            name: exam.name,
            exam_type: exam.exam_type,
            subject_id: exam.subject_id,
            subject_name,
            subject_code,
            class_id: exam.class_id,
            class_name,
            class_section,
            term_id: exam.term_id,
            exam_date: exam.exam_date,
            start_time: exam.start_time,
            duration_minutes: exam.duration_minutes,
            total_marks: exam.total_marks,
            passing_marks: exam.passing_marks,
            instructions: exam.instructions,
            venue: exam.venue,
            status: exam.status,
            created_at: exam.created_at,
            updated_at: exam.updated_at,
        }
    }
}
