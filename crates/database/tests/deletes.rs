mod common;

use common::{create_class, create_teacher, date, setup, setup_with_subjects};
use database::{
    entities::{class_subjects, exams, student_fees, teacher_subjects},
    error::ServiceError,
    services::{
        class::{ClassChanges, ClassService},
        exam::{ExamService, NewExam},
        fee::{FeeService, NewFee},
        fee_type::{FeeTypeService, NewFeeType},
        student::{NewStudent, StudentService},
        subject::SubjectService,
        teacher::TeacherService,
    },
};
use models::status::{ExamStatus, StudentStatus};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

fn new_student(student_id: &str, class_id: Option<Uuid>) -> NewStudent {
    NewStudent {
        student_id: student_id.to_string(),
        first_name: "Amina".to_string(),
        last_name: "Okello".to_string(),
        email: None,
        phone: None,
        date_of_birth: None,
        gender: None,
        address: None,
        blood_group: None,
        photo_url: None,
        parent_name: None,
        parent_phone: None,
        parent_email: None,
        class_id,
        roll_number: None,
        admission_date: None,
        admission_number: None,
        status: StudentStatus::Active,
    }
}

async fn schedule_exam(db: &DatabaseConnection, subject_id: Uuid, class_id: Uuid) {
    ExamService::create(
        db,
        NewExam {
            name: "Mid-term".to_string(),
            exam_type: "written".to_string(),
            subject_id,
            class_id,
            term_id: None,
            exam_date: date(2025, 3, 10),
            start_time: chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            duration_minutes: Some(90),
            total_marks: 100,
            passing_marks: Some(40),
            instructions: None,
            venue: None,
            status: ExamStatus::Scheduled,
        },
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_deleted_teacher_leaves_no_links() {
    let db = setup_with_subjects().await;
    let teacher = create_teacher(&db, "T-001", &["English", "Science"]).await;
    let other = create_teacher(&db, "T-002", &["English"]).await;

    TeacherService::delete(&db, teacher.teacher.id).await.unwrap();

    let remaining = TeacherService::list(&db).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].teacher.id, other.teacher.id);
    assert_eq!(
        teacher_subjects::Entity::find()
            .filter(teacher_subjects::Column::TeacherId.eq(teacher.teacher.id))
            .count(&db)
            .await
            .unwrap(),
        0
    );
    assert_eq!(teacher_subjects::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_deleted_teacher_is_unassigned_from_classes() {
    let db = setup_with_subjects().await;
    let teacher = create_teacher(&db, "T-001", &[]).await;
    let class = create_class(&db, "Primary Five", &[]).await;
    ClassService::update(
        &db,
        class.class.id,
        ClassChanges {
            class_teacher_id: Some(teacher.teacher.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    TeacherService::delete(&db, teacher.teacher.id).await.unwrap();

    let class = ClassService::get(&db, class.class.id).await.unwrap();
    assert_eq!(class.class.class_teacher_id, None);
    assert!(class.class_teacher.is_none());
}

#[tokio::test]
async fn test_deleted_class_cleans_up_dependents() {
    let db = setup_with_subjects().await;
    let class = create_class(&db, "Primary Five", &["English", "Mathematics"]).await;
    let student = StudentService::create(&db, new_student("S-001", Some(class.class.id)))
        .await
        .unwrap();
    let english = SubjectService::list(&db).await.unwrap()[0].clone();
    schedule_exam(&db, english.id, class.class.id).await;

    ClassService::delete(&db, class.class.id).await.unwrap();

    assert!(ClassService::list(&db).await.unwrap().is_empty());
    assert_eq!(class_subjects::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(exams::Entity::find().count(&db).await.unwrap(), 0);

    let student = StudentService::get(&db, student.student.id).await.unwrap();
    assert_eq!(student.student.class_id, None);
    assert!(student.class.is_none());
}

#[tokio::test]
async fn test_deleted_subject_is_unlinked_everywhere() {
    let db = setup_with_subjects().await;
    let teacher = create_teacher(&db, "T-001", &["English", "Science"]).await;
    let class = create_class(&db, "Primary Five", &["English"]).await;
    let english = SubjectService::list(&db).await.unwrap()[0].clone();
    assert_eq!(english.name, "English");
    schedule_exam(&db, english.id, class.class.id).await;

    SubjectService::delete(&db, english.id).await.unwrap();

    let teacher = TeacherService::get(&db, teacher.teacher.id).await.unwrap();
    assert_eq!(teacher.subjects, vec!["Science".to_string()]);
    let class = ClassService::get(&db, class.class.id).await.unwrap();
    assert!(class.subjects.is_empty());
    assert_eq!(exams::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_deleted_student_takes_fees_along() {
    let db = setup().await;
    let student = StudentService::create(&db, new_student("S-001", None))
        .await
        .unwrap();
    let tuition = FeeTypeService::create(
        &db,
        NewFeeType {
            name: "Tuition".to_string(),
            description: None,
            amount: Some(500.0),
            is_active: true,
        },
    )
    .await
    .unwrap();
    FeeService::create(
        &db,
        NewFee {
            student_id: student.student.id,
            term_id: None,
            fee_type_id: tuition.id,
            total_amount: 500.0,
            paid_amount: 0.0,
            discount_amount: 0.0,
            late_fee_penalty: 0.0,
            due_date: date(2025, 2, 1),
            payment_date: None,
            payment_method: None,
            description: None,
            status: None,
        },
    )
    .await
    .unwrap();

    StudentService::delete(&db, student.student.id).await.unwrap();

    assert!(StudentService::list(&db).await.unwrap().is_empty());
    assert_eq!(student_fees::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_missing_rows_reports_not_found() {
    let db = setup().await;
    let id = Uuid::new_v4();

    assert!(matches!(
        TeacherService::delete(&db, id).await,
        Err(ServiceError::NotFound {
            entity: "teacher",
            ..
        })
    ));
    assert!(matches!(
        ClassService::delete(&db, id).await,
        Err(ServiceError::NotFound { entity: "class", .. })
    ));
    assert!(matches!(
        FeeService::delete(&db, id).await,
        Err(ServiceError::NotFound { entity: "fee", .. })
    ));
}
