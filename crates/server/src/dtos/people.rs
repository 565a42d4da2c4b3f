use chrono::{NaiveDate, NaiveDateTime};
use database::services::{student::StudentRecord, teacher::TeacherRecord};
use models::{
    gender::Gender,
    status::{StudentStatus, TeacherStatus},
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// The class a student is enrolled in
#[derive(Debug, Serialize, ToSchema)]
pub struct EnrolledClass {
    pub id: Uuid,
    pub name: String,
    pub section: String,
    pub grade: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentResponse {
    pub id: Uuid,
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
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
    pub class: Option<EnrolledClass>,
    pub roll_number: Option<String>,
    pub admission_date: Option<NaiveDate>,
    pub admission_number: Option<String>,
    pub status: StudentStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<StudentRecord> for StudentResponse {
    fn from(StudentRecord { student, class }: StudentRecord) -> Self {
        Self {
            full_name: student.full_name(),
            id: student.id,
            student_id: student.student_id,
            first_name: student.first_name,
            last_name: student.last_name,
            email: student.email,
            phone: student.phone,
            date_of_birth: student.date_of_birth,
            gender: student.gender,
            address: student.address,
            blood_group: student.blood_group,
            photo_url: student.photo_url,
            parent_name: student.parent_name,
            parent_phone: student.parent_phone,
            parent_email: student.parent_email,
            class: class.map(|class| EnrolledClass {
                id: class.id,
                name: class.name,
                section: class.section,
                grade: class.grade,
            }),
            roll_number: student.roll_number,
            admission_date: student.admission_date,
            admission_number: student.admission_number,
            status: student.status,
            created_at: student.created_at,
            updated_at: student.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherResponse {
    pub id: Uuid,
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
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
    pub status: TeacherStatus,
    /// Names of the subjects taught, alphabetically
    pub subjects: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<TeacherRecord> for TeacherResponse {
    fn from(TeacherRecord { teacher, subjects }: TeacherRecord) -> Self {
        Self {
            full_name: teacher.full_name(),
            id: teacher.id,
            employee_id: teacher.employee_id,
            first_name: teacher.first_name,
            last_name: teacher.last_name,
            email: teacher.email,
            phone: teacher.phone,
            date_of_birth: teacher.date_of_birth,
            gender: teacher.gender,
            address: teacher.address,
            photo_url: teacher.photo_url,
            designation: teacher.designation,
            qualification: teacher.qualification,
            experience: teacher.experience,
            joining_date: teacher.joining_date,
            salary: teacher.salary,
            emergency_contact_name: teacher.emergency_contact_name,
            emergency_contact_phone: teacher.emergency_contact_phone,
            status: teacher.status,
            subjects,
            created_at: teacher.created_at,
            updated_at: teacher.updated_at,
        }
    }
}
