use crate::routes::{
    classes, dashboard, exams, fees, health, notifications, reference, root, students, subjects,
    teachers, terms,
};
use utoipa::OpenApi;

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        dashboard::stats,
        notifications::notifications,
        reference::list_academic_years,
        reference::current_academic_year,
        reference::create_academic_year,
        reference::list_fee_types,
        reference::create_fee_type,
        students::list_students,
        students::get_student,
        students::create_student,
        students::update_student,
        students::delete_student,
        teachers::list_teachers,
        teachers::get_teacher,
        teachers::create_teacher,
        teachers::update_teacher,
        teachers::delete_teacher,
        subjects::list_subjects,
        subjects::get_subject,
        subjects::create_subject,
        subjects::update_subject,
        subjects::delete_subject,
        classes::list_classes,
        classes::get_class,
        classes::create_class,
        classes::update_class,
        classes::delete_class,
        terms::list_terms,
        terms::get_term,
        terms::create_term,
        terms::update_term,
        terms::delete_term,
        exams::list_exams,
        exams::get_exam,
        exams::create_exam,
        exams::update_exam,
        exams::delete_exam,
        fees::list_fees,
        fees::get_fee,
        fees::create_fee,
        fees::update_fee,
        fees::delete_fee,
    ),
    tags(
        (name = "Health", description = "Liveness and readiness"),
        (name = "Dashboard", description = "School-wide totals"),
        (name = "Notifications", description = "Live notices about changes"),
        (name = "Reference", description = "Academic years and fee types"),
        (name = "Students", description = "Student records and enrolment"),
        (name = "Teachers", description = "Teachers and the subjects they teach"),
        (name = "Subjects", description = "The subject catalogue"),
        (name = "Classes", description = "Classes and the subjects taught in them"),
        (name = "Terms", description = "Terms within an academic year"),
        (name = "Exams", description = "Exam scheduling"),
        (name = "Fees", description = "Student fees and payments"),
    ),
    info(
        title = "School Nexus API",
        version = "1.0.0",
        description = "School administration backend",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
