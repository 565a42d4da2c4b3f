mod common;

use common::{
    create_class, create_teacher, date, new_class, new_subject, new_teacher, setup,
    setup_with_subjects,
};
use database::{
    error::ServiceError,
    services::{
        academic_year::{AcademicYearService, NewAcademicYear},
        class::ClassService,
        dashboard::DashboardService,
        exam::{ExamChanges, ExamService, NewExam},
        fee::{FeeChanges, FeeService, NewFee},
        fee_type::{FeeTypeService, NewFeeType},
        student::{NewStudent, StudentChanges, StudentService},
        subject::{SubjectChanges, SubjectService},
        teacher::{NewTeacher, TeacherChanges, TeacherService},
        term::{NewTerm, TermService},
    },
};
use models::{
    gender::Gender,
    status::{ExamStatus, FeeStatus, StudentStatus, TermStatus},
};
use sea_orm::DatabaseConnection;
use std::time::Duration;
use uuid::Uuid;

fn new_student(student_id: &str, first_name: &str) -> NewStudent {
    NewStudent {
        student_id: student_id.to_string(),
        first_name: first_name.to_string(),
        last_name: "Okello".to_string(),
        email: Some(format!("{}@pupils.test", first_name.to_lowercase())),
        phone: None,
        date_of_birth: Some(date(2014, 5, 2)),
        gender: None,
        address: None,
        blood_group: None,
        photo_url: None,
        parent_name: None,
        parent_phone: None,
        parent_email: None,
        class_id: None,
        roll_number: None,
        admission_date: None,
        admission_number: None,
        status: StudentStatus::Active,
    }
}

fn new_term(name: &str, start: (i32, u32, u32), end: (i32, u32, u32)) -> NewTerm {
    NewTerm {
        name: name.to_string(),
        code: None,
        academic_year_id: None,
        start_date: date(start.0, start.1, start.2),
        end_date: date(end.0, end.1, end.2),
        registration_start: None,
        registration_end: None,
        exam_start: None,
        exam_end: None,
        result_date: None,
        status: TermStatus::Upcoming,
        total_weeks: Some(12),
        holiday_days: None,
        fee_amount: None,
        description: None,
        is_active: true,
    }
}

fn new_fee(student_id: Uuid, fee_type_id: Uuid, total: f64, paid: f64) -> NewFee {
    NewFee {
        student_id,
        term_id: None,
        fee_type_id,
        total_amount: total,
        paid_amount: paid,
        discount_amount: 0.0,
        late_fee_penalty: 0.0,
        due_date: date(2100, 1, 1),
        payment_date: None,
        payment_method: None,
        description: None,
        status: None,
    }
}

async fn current_year(db: &DatabaseConnection) -> Uuid {
    AcademicYearService::create(
        db,
        NewAcademicYear {
            name: "2025".to_string(),
            start_date: date(2025, 1, 1),
            end_date: date(2025, 12, 31),
            is_current: true,
        },
    )
    .await
    .unwrap()
    .id
}

async fn tuition(db: &DatabaseConnection) -> Uuid {
    FeeTypeService::create(
        db,
        NewFeeType {
            name: "Tuition".to_string(),
            description: None,
            amount: Some(500.0),
            is_active: true,
        },
    )
    .await
    .unwrap()
    .id
}

#[tokio::test]
async fn test_students_list_newest_first_with_class() {
    let db = setup_with_subjects().await;
    let class = create_class(&db, "Primary Five", &[]).await;

    let first = StudentService::create(&db, new_student("S-001", "Amina"))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let mut second = new_student("S-002", "Brian");
    second.class_id = Some(class.class.id);
    let second = StudentService::create(&db, second).await.unwrap();

    let listed = StudentService::list(&db).await.unwrap();
    let ids: Vec<Uuid> = listed.iter().map(|record| record.student.id).collect();
    assert_eq!(ids, vec![second.student.id, first.student.id]);
    assert_eq!(
        listed[0].class.as_ref().map(|class| class.name.as_str()),
        Some("Primary Five")
    );
    assert!(listed[1].class.is_none());
}

#[tokio::test]
async fn test_student_validation_happens_before_writes() {
    let db = setup().await;

    let mut blank = new_student("S-001", "Amina");
    blank.first_name = "  ".to_string();
    assert!(matches!(
        StudentService::create(&db, blank).await,
        Err(ServiceError::Validation {
            field: "first_name",
            ..
        })
    ));

    let mut bad_email = new_student("S-001", "Amina");
    bad_email.parent_email = Some("parent.example".to_string());
    assert!(matches!(
        StudentService::create(&db, bad_email).await,
        Err(ServiceError::Validation {
            field: "parent_email",
            ..
        })
    ));

    let mut unknown_class = new_student("S-001", "Amina");
    unknown_class.class_id = Some(Uuid::new_v4());
    assert!(matches!(
        StudentService::create(&db, unknown_class).await,
        Err(ServiceError::Validation {
            field: "class_id",
            ..
        })
    ));

    assert!(StudentService::list(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_student_number_is_rejected() {
    let db = setup().await;
    StudentService::create(&db, new_student("S-001", "Amina"))
        .await
        .unwrap();

    let err = StudentService::create(&db, new_student("S-001", "Brian"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Validation {
            field: "student_id",
            ..
        }
    ));
}

#[tokio::test]
async fn test_student_update_changes_only_given_fields() {
    let db = setup().await;
    let student = StudentService::create(&db, new_student("S-001", "Amina"))
        .await
        .unwrap();

    let updated = StudentService::update(
        &db,
        student.student.id,
        StudentChanges {
            status: Some(StudentStatus::Suspended),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.student.status, StudentStatus::Suspended);
    assert_eq!(updated.student.first_name, "Amina");
    assert_eq!(updated.student.date_of_birth, Some(date(2014, 5, 2)));
    assert!(updated.student.updated_at >= student.student.updated_at);

    let missing = StudentService::update(&db, Uuid::new_v4(), StudentChanges::default()).await;
    assert!(matches!(missing, Err(ServiceError::NotFound { .. })));
}

#[tokio::test]
async fn test_subjects_list_alphabetically_and_reject_bad_marks() {
    let db = setup_with_subjects().await;

    let listed: Vec<String> = SubjectService::list(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|subject| subject.name)
        .collect();
    assert_eq!(listed, ["English", "Mathematics", "Science"]);

    let mut bad = new_subject("HIS", "History");
    bad.passing_marks = Some(120);
    assert!(matches!(
        SubjectService::create(&db, bad).await,
        Err(ServiceError::Validation {
            field: "passing_marks",
            ..
        })
    ));

    let duplicate = SubjectService::create(&db, new_subject("ENG2", "English")).await;
    assert!(matches!(
        duplicate,
        Err(ServiceError::Validation { field: "name", .. })
    ));
}

#[tokio::test]
async fn test_renamed_subject_resolves_under_new_name() {
    let db = setup_with_subjects().await;
    let science = SubjectService::list(&db).await.unwrap()[2].clone();

    SubjectService::update(
        &db,
        science.id,
        SubjectChanges {
            name: Some("Integrated Science".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let teacher = TeacherService::create(&db, new_teacher("T-001", &["Integrated Science"]))
        .await
        .unwrap();
    assert_eq!(teacher.subjects, vec!["Integrated Science".to_string()]);

    let stale = TeacherService::create(&db, new_teacher("T-002", &["Science"])).await;
    assert!(matches!(
        stale,
        Err(ServiceError::UnresolvedAssociation { .. })
    ));
}

#[tokio::test]
async fn test_teacher_requires_a_valid_email() {
    let db = setup_with_subjects().await;
    let mut input = new_teacher("T-001", &[]);
    input.email = "jane.doe".to_string();

    let err = TeacherService::create(&db, input).await.unwrap_err();

    assert!(matches!(err, ServiceError::Validation { field: "email", .. }));
    assert!(TeacherService::list(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_optional_gender_reads_back_as_stored() {
    let db = setup().await;
    let unspecified = create_teacher(&db, "T-001", &[]).await;
    let female = TeacherService::create(
        &db,
        NewTeacher {
            gender: Some(Gender::Female),
            ..new_teacher("T-002", &[])
        },
    )
    .await
    .unwrap();
    let student = StudentService::create(&db, new_student("S-001", "Amina"))
        .await
        .unwrap();

    let unspecified = TeacherService::get(&db, unspecified.teacher.id).await.unwrap();
    let female = TeacherService::get(&db, female.teacher.id).await.unwrap();
    assert_eq!(unspecified.teacher.gender, None);
    assert_eq!(female.teacher.gender, Some(Gender::Female));
    assert_eq!(TeacherService::list(&db).await.unwrap().len(), 2);

    let student = StudentService::get(&db, student.student.id).await.unwrap();
    assert_eq!(student.student.gender, None);
    assert_eq!(StudentService::list(&db).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_padded_duplicate_ids_are_rejected_on_update() {
    let db = setup().await;
    create_teacher(&db, "T-001", &[]).await;
    let other = create_teacher(&db, "T-002", &[]).await;

    let err = TeacherService::update(
        &db,
        other.teacher.id,
        TeacherChanges {
            employee_id: Some(" T-001 ".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation {
            field: "employee_id",
            ..
        }
    ));
    let unchanged = TeacherService::get(&db, other.teacher.id).await.unwrap();
    assert_eq!(unchanged.teacher.employee_id, "T-002");

    let renamed = TeacherService::update(
        &db,
        other.teacher.id,
        TeacherChanges {
            employee_id: Some(" T-009 ".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(renamed.teacher.employee_id, "T-009");

    StudentService::create(&db, new_student("S-001", "Amina"))
        .await
        .unwrap();
    let brian = StudentService::create(&db, new_student("S-002", "Brian"))
        .await
        .unwrap();
    let err = StudentService::update(
        &db,
        brian.student.id,
        StudentChanges {
            student_id: Some(" S-001 ".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation {
            field: "student_id",
            ..
        }
    ));
}

#[tokio::test]
async fn test_classes_sorted_by_grade_name_and_section() {
    let db = setup_with_subjects().await;
    for (name, section, grade) in [
        ("Primary Six", "B", "6"),
        ("Primary Five", "B", "5"),
        ("Primary Five", "A", "5"),
    ] {
        ClassService::create(&db, new_class(name, section, grade, &[]))
            .await
            .unwrap();
    }

    let listed: Vec<(String, String)> = ClassService::list(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|record| (record.class.grade, record.class.section))
        .collect();

    assert_eq!(
        listed,
        vec![
            ("5".to_string(), "A".to_string()),
            ("5".to_string(), "B".to_string()),
            ("6".to_string(), "B".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_class_and_term_default_to_current_academic_year() {
    let db = setup_with_subjects().await;
    let year = current_year(&db).await;

    let class = create_class(&db, "Primary Five", &[]).await;
    let term = TermService::create(&db, new_term("Term 1", (2025, 1, 6), (2025, 4, 4)))
        .await
        .unwrap();

    assert_eq!(class.class.academic_year_id, Some(year));
    assert_eq!(term.academic_year_id, Some(year));
}

#[tokio::test]
async fn test_only_one_academic_year_is_current() {
    let db = setup().await;
    let old = current_year(&db).await;

    let new = AcademicYearService::create(
        &db,
        NewAcademicYear {
            name: "2026".to_string(),
            start_date: date(2026, 1, 1),
            end_date: date(2026, 12, 31),
            is_current: true,
        },
    )
    .await
    .unwrap();

    let current = AcademicYearService::current(&db).await.unwrap().unwrap();
    assert_eq!(current.id, new.id);

    let years = AcademicYearService::list(&db).await.unwrap();
    assert_eq!(years[0].id, new.id);
    assert_eq!(years[1].id, old);
    assert!(!years[1].is_current);
}

#[tokio::test]
async fn test_terms_reject_inverted_dates_and_sort_by_start() {
    let db = setup().await;

    let inverted = TermService::create(&db, new_term("Term 1", (2025, 4, 4), (2025, 1, 6))).await;
    assert!(matches!(
        inverted,
        Err(ServiceError::Validation {
            field: "end_date",
            ..
        })
    ));

    let first = TermService::create(&db, new_term("Term 1", (2025, 1, 6), (2025, 4, 4)))
        .await
        .unwrap();
    let second = TermService::create(&db, new_term("Term 2", (2025, 5, 5), (2025, 8, 1)))
        .await
        .unwrap();

    let ids: Vec<Uuid> = TermService::list(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|term| term.id)
        .collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[tokio::test]
async fn test_exam_marks_and_enrichment() {
    let db = setup_with_subjects().await;
    let class = create_class(&db, "Primary Five", &[]).await;
    let maths = SubjectService::list(&db).await.unwrap()[1].clone();

    let input = NewExam {
        name: "End of term".to_string(),
        exam_type: "written".to_string(),
        subject_id: maths.id,
        class_id: class.class.id,
        term_id: None,
        exam_date: date(2025, 4, 1),
        start_time: chrono::NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
        duration_minutes: Some(120),
        total_marks: 100,
        passing_marks: Some(50),
        instructions: None,
        venue: Some("Hall".to_string()),
        status: ExamStatus::Scheduled,
    };

    let zero = ExamService::create(
        &db,
        NewExam {
            total_marks: 0,
            passing_marks: None,
            ..input.clone()
        },
    )
    .await;
    assert!(matches!(
        zero,
        Err(ServiceError::Validation {
            field: "total_marks",
            ..
        })
    ));

    let exam = ExamService::create(&db, input).await.unwrap();
    assert_eq!(exam.subject.as_ref().map(|s| s.code.as_str()), Some("MATH"));
    assert_eq!(
        exam.class.as_ref().map(|c| c.name.as_str()),
        Some("Primary Five")
    );

    let over = ExamService::update(
        &db,
        exam.exam.id,
        ExamChanges {
            passing_marks: Some(150),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(
        over,
        Err(ServiceError::Validation {
            field: "passing_marks",
            ..
        })
    ));

    let unchanged = ExamService::get(&db, exam.exam.id).await.unwrap();
    assert_eq!(unchanged.exam.passing_marks, Some(50));
}

#[tokio::test]
async fn test_fee_status_is_derived_and_rederived() {
    let db = setup().await;
    let student = StudentService::create(&db, new_student("S-001", "Amina"))
        .await
        .unwrap();
    let fee_type = tuition(&db).await;

    let pending = FeeService::create(&db, new_fee(student.student.id, fee_type, 500.0, 0.0))
        .await
        .unwrap();
    assert_eq!(pending.fee.status, FeeStatus::Pending);
    assert_eq!(pending.balance(), 500.0);
    assert_eq!(
        pending.fee_type.as_ref().map(|t| t.name.as_str()),
        Some("Tuition")
    );

    let partial = FeeService::update(
        &db,
        pending.fee.id,
        FeeChanges {
            paid_amount: Some(200.0),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(partial.fee.status, FeeStatus::Partial);
    assert_eq!(partial.balance(), 300.0);

    let overdue = FeeService::update(
        &db,
        pending.fee.id,
        FeeChanges {
            paid_amount: Some(0.0),
            due_date: Some(date(2020, 1, 1)),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(overdue.fee.status, FeeStatus::Overdue);

    let explicit = FeeService::update(
        &db,
        pending.fee.id,
        FeeChanges {
            paid_amount: Some(500.0),
            status: Some(FeeStatus::Partial),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(explicit.fee.status, FeeStatus::Partial);
}

#[tokio::test]
async fn test_fee_rejects_negative_amounts() {
    let db = setup().await;
    let student = StudentService::create(&db, new_student("S-001", "Amina"))
        .await
        .unwrap();
    let fee_type = tuition(&db).await;

    let mut input = new_fee(student.student.id, fee_type, 500.0, 0.0);
    input.discount_amount = -10.0;

    assert!(matches!(
        FeeService::create(&db, input).await,
        Err(ServiceError::Validation {
            field: "discount_amount",
            ..
        })
    ));
}

#[tokio::test]
async fn test_fee_types_list_only_active() {
    let db = setup().await;
    tuition(&db).await;
    FeeTypeService::create(
        &db,
        NewFeeType {
            name: "Bus".to_string(),
            description: None,
            amount: None,
            is_active: false,
        },
    )
    .await
    .unwrap();

    let active = FeeTypeService::list_active(&db).await.unwrap();

    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "Tuition");
}

#[tokio::test]
async fn test_dashboard_counts_and_collected_fees() {
    let db = setup_with_subjects().await;

    let empty = DashboardService::stats(&db).await.unwrap();
    assert_eq!(empty.total_students, 0);
    assert_eq!(empty.total_subjects, 3);
    assert_eq!(empty.fees_collected, 0.0);

    let fee_type = tuition(&db).await;
    for (number, name, paid) in [("S-001", "Amina", 150.0), ("S-002", "Brian", 250.5)] {
        let student = StudentService::create(&db, new_student(number, name))
            .await
            .unwrap();
        FeeService::create(&db, new_fee(student.student.id, fee_type, 500.0, paid))
            .await
            .unwrap();
    }
    TeacherService::create(&db, new_teacher("T-001", &["English"]))
        .await
        .unwrap();

    let stats = DashboardService::stats(&db).await.unwrap();
    assert_eq!(stats.total_students, 2);
    assert_eq!(stats.total_teachers, 1);
    assert_eq!(stats.fees_collected, 400.5);
}
