use crate::m20250801_000001_create_school_tables::{
    ClassSubjects, Classes, Exams, StudentFees, Students, TeacherSubjects, Terms,
};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on students.class_id for class rosters
        manager
            .create_index(
                Index::create()
                    .name("idx_students_class_id")
                    .table(Students::Table)
                    .col(Students::ClassId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_classes_class_teacher_id")
                    .table(Classes::Table)
                    .col(Classes::ClassTeacherId)
                    .to_owned(),
            )
            .await?;

        // Indexes on the columns lists are ordered by
        manager
            .create_index(
                Index::create()
                    .name("idx_classes_grade")
                    .table(Classes::Table)
                    .col(Classes::Grade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_terms_start_date")
                    .table(Terms::Table)
                    .col(Terms::StartDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_exams_exam_date")
                    .table(Exams::Table)
                    .col(Exams::ExamDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_student_fees_due_date")
                    .table(StudentFees::Table)
                    .col(StudentFees::DueDate)
                    .to_owned(),
            )
            .await?;

        // Indexes on exam and fee foreign keys for faster joins
        manager
            .create_index(
                Index::create()
                    .name("idx_exams_subject_id")
                    .table(Exams::Table)
                    .col(Exams::SubjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_exams_class_id")
                    .table(Exams::Table)
                    .col(Exams::ClassId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_student_fees_student_id")
                    .table(StudentFees::Table)
                    .col(StudentFees::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_student_fees_fee_type_id")
                    .table(StudentFees::Table)
                    .col(StudentFees::FeeTypeId)
                    .to_owned(),
            )
            .await?;

        // The junction primary keys lead with the owner column, so only the
        // subject side needs its own index
        manager
            .create_index(
                Index::create()
                    .name("idx_teacher_subjects_subject_id")
                    .table(TeacherSubjects::Table)
                    .col(TeacherSubjects::SubjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_class_subjects_subject_id")
                    .table(ClassSubjects::Table)
                    .col(ClassSubjects::SubjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_students_class_id")
                    .table(Students::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_classes_class_teacher_id")
                    .table(Classes::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_classes_grade")
                    .table(Classes::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_terms_start_date")
                    .table(Terms::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_exams_exam_date")
                    .table(Exams::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_student_fees_due_date")
                    .table(StudentFees::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_exams_subject_id")
                    .table(Exams::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_exams_class_id")
                    .table(Exams::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_student_fees_student_id")
                    .table(StudentFees::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_student_fees_fee_type_id")
                    .table(StudentFees::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_teacher_subjects_subject_id")
                    .table(TeacherSubjects::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_class_subjects_subject_id")
                    .table(ClassSubjects::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
