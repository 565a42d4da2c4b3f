mod common;

use common::{create_class, create_teacher, names, new_class, new_teacher, setup_with_subjects};
use database::{
    entities::{class_subjects, teacher_subjects, teachers},
    error::ServiceError,
    services::{
        association::{self, SyncOutcome},
        class::{ClassChanges, ClassService},
        teacher::{TeacherChanges, TeacherService},
    },
};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, TransactionTrait,
};

#[tokio::test]
async fn test_resolve_reports_unknown_names_in_input_order() {
    let db = setup_with_subjects().await;

    let resolution = association::resolve_subjects(
        &db,
        &names(&["Science", "Latin", "English", "Science", " English ", "Greek"]),
    )
    .await
    .unwrap();

    assert_eq!(resolution.ids.len(), 2);
    assert_eq!(resolution.unresolved, names(&["Latin", "Greek"]));
}

#[tokio::test]
async fn test_resolve_empty_input() {
    let db = setup_with_subjects().await;

    let resolution = association::resolve_subjects(&db, &[]).await.unwrap();

    assert!(resolution.ids.is_empty());
    assert!(resolution.unresolved.is_empty());
}

#[tokio::test]
async fn test_create_links_exactly_the_named_subjects() {
    let db = setup_with_subjects().await;

    let teacher = create_teacher(&db, "T-001", &["Science", "English", "English"]).await;

    assert_eq!(teacher.subjects, names(&["English", "Science"]));

    let listed = TeacherService::list(&db).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].subjects, names(&["English", "Science"]));
}

#[tokio::test]
async fn test_create_with_unknown_subject_writes_nothing() {
    let db = setup_with_subjects().await;

    let err = ClassService::create(
        &db,
        new_class(
            "Primary Five",
            "A",
            "5",
            &["English", "Mathematics", "NotARealSubject"],
        ),
    )
    .await
    .unwrap_err();

    match err {
        ServiceError::UnresolvedAssociation { names } => {
            assert_eq!(names, vec!["NotARealSubject".to_string()])
        }
        other => panic!("expected an unresolved association, got {other:?}"),
    }

    assert!(ClassService::list(&db).await.unwrap().is_empty());
    assert_eq!(class_subjects::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_replaces_instead_of_accumulating() {
    let db = setup_with_subjects().await;
    let teacher = create_teacher(&db, "T-001", &["English", "Science"]).await;

    let updated = TeacherService::update(
        &db,
        teacher.teacher.id,
        TeacherChanges {
            subjects: Some(names(&["Mathematics"])),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.subjects, names(&["Mathematics"]));
    assert_eq!(
        teacher_subjects::Entity::find()
            .filter(teacher_subjects::Column::TeacherId.eq(teacher.teacher.id))
            .count(&db)
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn test_update_to_empty_list_clears_subjects() {
    let db = setup_with_subjects().await;
    let teacher = create_teacher(&db, "T-001", &["English", "Science"]).await;

    TeacherService::update(
        &db,
        teacher.teacher.id,
        TeacherChanges {
            subjects: Some(Vec::new()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let listed = TeacherService::list(&db).await.unwrap();
    assert!(listed[0].subjects.is_empty());
    assert_eq!(teacher_subjects::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_without_subjects_keeps_them() {
    let db = setup_with_subjects().await;
    let class = create_class(&db, "Primary Five", &["English", "Mathematics"]).await;

    let updated = ClassService::update(
        &db,
        class.class.id,
        ClassChanges {
            room: Some("B12".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.class.room.as_deref(), Some("B12"));
    assert_eq!(updated.subjects, names(&["English", "Mathematics"]));
}

#[tokio::test]
async fn test_update_with_unknown_subject_keeps_previous_state() {
    let db = setup_with_subjects().await;
    let teacher = create_teacher(&db, "T-001", &["English"]).await;

    let err = TeacherService::update(
        &db,
        teacher.teacher.id,
        TeacherChanges {
            first_name: Some("Janet".to_string()),
            subjects: Some(names(&["Science", "Astrology"])),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::UnresolvedAssociation { .. }));

    let current = TeacherService::get(&db, teacher.teacher.id).await.unwrap();
    assert_eq!(current.teacher.first_name, "Jane");
    assert_eq!(current.subjects, names(&["English"]));
}

#[tokio::test]
async fn test_sync_is_idempotent() {
    let db = setup_with_subjects().await;
    let class = create_class(&db, "Primary Five", &[]).await;
    let wanted = names(&["English", "Science"]);

    let txn = db.begin().await.unwrap();
    let first =
        association::sync_subjects::<class_subjects::Entity, _>(&txn, class.class.id, &wanted)
            .await
            .unwrap();
    let second =
        association::sync_subjects::<class_subjects::Entity, _>(&txn, class.class.id, &wanted)
            .await
            .unwrap();
    txn.commit().await.unwrap();

    assert_eq!(
        first,
        SyncOutcome {
            added: 2,
            removed: 0
        }
    );
    assert_eq!(second, SyncOutcome::default());
    assert_eq!(
        ClassService::get(&db, class.class.id)
            .await
            .unwrap()
            .subjects,
        wanted
    );
}

#[tokio::test]
async fn test_failed_insert_rolls_back_removed_links() {
    let db = setup_with_subjects().await;
    let teacher = create_teacher(&db, "T-001", &["English", "Science"]).await;

    db.execute_unprepared(
        "CREATE TRIGGER reject_teacher_links BEFORE INSERT ON teacher_subjects \
         BEGIN SELECT RAISE(ABORT, 'link rejected'); END;",
    )
    .await
    .unwrap();

    // Science is removed first, then inserting Mathematics fails
    let err = TeacherService::update(
        &db,
        teacher.teacher.id,
        TeacherChanges {
            last_name: Some("Smith".to_string()),
            subjects: Some(names(&["English", "Mathematics"])),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Store(_)));

    db.execute_unprepared("DROP TRIGGER reject_teacher_links;")
        .await
        .unwrap();

    let current = TeacherService::get(&db, teacher.teacher.id).await.unwrap();
    assert_eq!(current.subjects, names(&["English", "Science"]));
    assert_eq!(current.teacher.last_name, "Doe");
}

#[tokio::test]
async fn test_failed_create_leaves_no_entity_row() {
    let db = setup_with_subjects().await;

    db.execute_unprepared(
        "CREATE TRIGGER reject_teacher_links BEFORE INSERT ON teacher_subjects \
         BEGIN SELECT RAISE(ABORT, 'link rejected'); END;",
    )
    .await
    .unwrap();

    let result = TeacherService::create(&db, new_teacher("T-002", &["English"])).await;
    assert!(matches!(result, Err(ServiceError::Store(_))));

    assert_eq!(teachers::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_subject_names_by_owner_skips_owners_without_links() {
    let db = setup_with_subjects().await;
    let linked = create_teacher(&db, "T-001", &["Science", "English"]).await;
    let unlinked = create_teacher(&db, "T-002", &[]).await;

    let by_owner = association::subject_names_by_owner::<teacher_subjects::Entity, _>(
        &db,
        &[linked.teacher.id, unlinked.teacher.id],
    )
    .await
    .unwrap();

    assert_eq!(by_owner.len(), 1);
    assert_eq!(by_owner[&linked.teacher.id], names(&["English", "Science"]));
}
