use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create academic_years table
        manager
            .create_table(
                Table::create()
                    .table(AcademicYears::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AcademicYears::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AcademicYears::Name).string().not_null())
                    .col(ColumnDef::new(AcademicYears::StartDate).date().not_null())
                    .col(ColumnDef::new(AcademicYears::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(AcademicYears::IsCurrent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(AcademicYears::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AcademicYears::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create fee_types table
        manager
            .create_table(
                Table::create()
                    .table(FeeTypes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(FeeTypes::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(FeeTypes::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(FeeTypes::Description).text())
                    .col(ColumnDef::new(FeeTypes::Amount).double())
                    .col(
                        ColumnDef::new(FeeTypes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(FeeTypes::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(FeeTypes::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Create subjects table, the reference table for subject associations
        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Subjects::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Subjects::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Subjects::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Subjects::Description).text())
                    .col(ColumnDef::new(Subjects::Category).string().not_null())
                    .col(ColumnDef::new(Subjects::Credits).integer())
                    .col(ColumnDef::new(Subjects::TotalMarks).integer())
                    .col(ColumnDef::new(Subjects::PassingMarks).integer())
                    .col(ColumnDef::new(Subjects::DurationHours).integer())
                    .col(ColumnDef::new(Subjects::Objectives).text())
                    .col(ColumnDef::new(Subjects::Syllabus).text())
                    .col(ColumnDef::new(Subjects::Prerequisites).text())
                    .col(
                        ColumnDef::new(Subjects::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Subjects::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Subjects::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Create teachers table
        manager
            .create_table(
                Table::create()
                    .table(Teachers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Teachers::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Teachers::EmployeeId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Teachers::FirstName).string().not_null())
                    .col(ColumnDef::new(Teachers::LastName).string().not_null())
                    .col(ColumnDef::new(Teachers::Email).string().not_null())
                    .col(ColumnDef::new(Teachers::Phone).string())
                    .col(ColumnDef::new(Teachers::DateOfBirth).date())
                    .col(ColumnDef::new(Teachers::Gender).string())
                    .col(ColumnDef::new(Teachers::Address).text())
                    .col(ColumnDef::new(Teachers::PhotoUrl).string())
                    .col(ColumnDef::new(Teachers::Designation).string().not_null())
                    .col(ColumnDef::new(Teachers::Qualification).string().not_null())
                    .col(ColumnDef::new(Teachers::Experience).integer())
                    .col(ColumnDef::new(Teachers::JoiningDate).date().not_null())
                    .col(ColumnDef::new(Teachers::Salary).double())
                    .col(ColumnDef::new(Teachers::EmergencyContactName).string())
                    .col(ColumnDef::new(Teachers::EmergencyContactPhone).string())
                    .col(
                        ColumnDef::new(Teachers::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Teachers::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Teachers::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Create classes table
        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Classes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Classes::Name).string().not_null())
                    .col(ColumnDef::new(Classes::Section).string().not_null())
                    .col(ColumnDef::new(Classes::Grade).string().not_null())
                    .col(ColumnDef::new(Classes::AcademicYearId).uuid())
                    .col(ColumnDef::new(Classes::ClassTeacherId).uuid())
                    .col(ColumnDef::new(Classes::Room).string())
                    .col(ColumnDef::new(Classes::Capacity).integer())
                    .col(ColumnDef::new(Classes::CurrentStudents).integer())
                    .col(ColumnDef::new(Classes::Schedule).text())
                    .col(ColumnDef::new(Classes::Description).text())
                    .col(
                        ColumnDef::new(Classes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Classes::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Classes::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-classes-academic_year_id")
                            .from(Classes::Table, Classes::AcademicYearId)
                            .to(AcademicYears::Table, AcademicYears::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-classes-class_teacher_id")
                            .from(Classes::Table, Classes::ClassTeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create students table
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Students::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Students::StudentId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::FirstName).string().not_null())
                    .col(ColumnDef::new(Students::LastName).string().not_null())
                    .col(ColumnDef::new(Students::Email).string())
                    .col(ColumnDef::new(Students::Phone).string())
                    .col(ColumnDef::new(Students::DateOfBirth).date())
                    .col(ColumnDef::new(Students::Gender).string())
                    .col(ColumnDef::new(Students::Address).text())
                    .col(ColumnDef::new(Students::BloodGroup).string())
                    .col(ColumnDef::new(Students::PhotoUrl).string())
                    .col(ColumnDef::new(Students::ParentName).string())
                    .col(ColumnDef::new(Students::ParentPhone).string())
                    .col(ColumnDef::new(Students::ParentEmail).string())
                    .col(ColumnDef::new(Students::ClassId).uuid())
                    .col(ColumnDef::new(Students::RollNumber).string())
                    .col(ColumnDef::new(Students::AdmissionDate).date())
                    .col(ColumnDef::new(Students::AdmissionNumber).string())
                    .col(
                        ColumnDef::new(Students::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Students::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-students-class_id")
                            .from(Students::Table, Students::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create terms table
        manager
            .create_table(
                Table::create()
                    .table(Terms::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Terms::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Terms::Name).string().not_null())
                    .col(ColumnDef::new(Terms::Code).string())
                    .col(ColumnDef::new(Terms::AcademicYearId).uuid())
                    .col(ColumnDef::new(Terms::StartDate).date().not_null())
                    .col(ColumnDef::new(Terms::EndDate).date().not_null())
                    .col(ColumnDef::new(Terms::RegistrationStart).date())
                    .col(ColumnDef::new(Terms::RegistrationEnd).date())
                    .col(ColumnDef::new(Terms::ExamStart).date())
                    .col(ColumnDef::new(Terms::ExamEnd).date())
                    .col(ColumnDef::new(Terms::ResultDate).date())
                    .col(
                        ColumnDef::new(Terms::Status)
                            .string()
                            .not_null()
                            .default("upcoming"),
                    )
                    .col(ColumnDef::new(Terms::TotalWeeks).integer())
                    .col(ColumnDef::new(Terms::HolidayDays).integer())
                    .col(ColumnDef::new(Terms::FeeAmount).double())
                    .col(ColumnDef::new(Terms::Description).text())
                    .col(
                        ColumnDef::new(Terms::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Terms::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Terms::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-terms-academic_year_id")
                            .from(Terms::Table, Terms::AcademicYearId)
                            .to(AcademicYears::Table, AcademicYears::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create exams table
        manager
            .create_table(
                Table::create()
                    .table(Exams::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Exams::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Exams::Name).string().not_null())
                    .col(ColumnDef::new(Exams::ExamType).string().not_null())
                    .col(ColumnDef::new(Exams::SubjectId).uuid().not_null())
                    .col(ColumnDef::new(Exams::ClassId).uuid().not_null())
                    .col(ColumnDef::new(Exams::TermId).uuid())
                    .col(ColumnDef::new(Exams::ExamDate).date().not_null())
                    .col(ColumnDef::new(Exams::StartTime).time().not_null())
                    .col(ColumnDef::new(Exams::DurationMinutes).integer())
                    .col(ColumnDef::new(Exams::TotalMarks).integer().not_null())
                    .col(ColumnDef::new(Exams::PassingMarks).integer())
                    .col(ColumnDef::new(Exams::Instructions).text())
                    .col(ColumnDef::new(Exams::Venue).string())
                    .col(
                        ColumnDef::new(Exams::Status)
                            .string()
                            .not_null()
                            .default("scheduled"),
                    )
                    .col(ColumnDef::new(Exams::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Exams::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-exams-subject_id")
                            .from(Exams::Table, Exams::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-exams-class_id")
                            .from(Exams::Table, Exams::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-exams-term_id")
                            .from(Exams::Table, Exams::TermId)
                            .to(Terms::Table, Terms::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Create student_fees table
        manager
            .create_table(
                Table::create()
                    .table(StudentFees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentFees::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StudentFees::StudentId).uuid().not_null())
                    .col(ColumnDef::new(StudentFees::TermId).uuid())
                    .col(ColumnDef::new(StudentFees::FeeTypeId).uuid().not_null())
                    .col(ColumnDef::new(StudentFees::TotalAmount).double().not_null())
                    .col(
                        ColumnDef::new(StudentFees::PaidAmount)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(StudentFees::DiscountAmount)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(StudentFees::LateFeePenalty)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(StudentFees::DueDate).date().not_null())
                    .col(ColumnDef::new(StudentFees::PaymentDate).date())
                    .col(ColumnDef::new(StudentFees::PaymentMethod).string())
                    .col(ColumnDef::new(StudentFees::Description).text())
                    .col(
                        ColumnDef::new(StudentFees::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(StudentFees::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentFees::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-student_fees-student_id")
                            .from(StudentFees::Table, StudentFees::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-student_fees-term_id")
                            .from(StudentFees::Table, StudentFees::TermId)
                            .to(Terms::Table, Terms::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-student_fees-fee_type_id")
                            .from(StudentFees::Table, StudentFees::FeeTypeId)
                            .to(FeeTypes::Table, FeeTypes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Create teacher_subjects junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(TeacherSubjects::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TeacherSubjects::TeacherId).uuid().not_null())
                    .col(ColumnDef::new(TeacherSubjects::SubjectId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .name("pk-teacher_subjects")
                            .col(TeacherSubjects::TeacherId)
                            .col(TeacherSubjects::SubjectId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-teacher_subjects-teacher_id")
                            .from(TeacherSubjects::Table, TeacherSubjects::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-teacher_subjects-subject_id")
                            .from(TeacherSubjects::Table, TeacherSubjects::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create class_subjects junction table (many-to-many)
        manager
            .create_table(
                Table::create()
                    .table(ClassSubjects::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ClassSubjects::ClassId).uuid().not_null())
                    .col(ColumnDef::new(ClassSubjects::SubjectId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .name("pk-class_subjects")
                            .col(ClassSubjects::ClassId)
                            .col(ClassSubjects::SubjectId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-class_subjects-class_id")
                            .from(ClassSubjects::Table, ClassSubjects::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-class_subjects-subject_id")
                            .from(ClassSubjects::Table, ClassSubjects::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse dependency order
        manager
            .drop_table(Table::drop().table(ClassSubjects::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(TeacherSubjects::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(StudentFees::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Exams::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Terms::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Classes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(FeeTypes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(AcademicYears::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum AcademicYears {
    Table,
    Id,
    Name,
    StartDate,
    EndDate,
    IsCurrent,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum FeeTypes {
    Table,
    Id,
    Name,
    Description,
    Amount,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Subjects {
    Table,
    Id,
    Code,
    Name,
    Description,
    Category,
    Credits,
    TotalMarks,
    PassingMarks,
    DurationHours,
    Objectives,
    Syllabus,
    Prerequisites,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Teachers {
    Table,
    Id,
    EmployeeId,
    FirstName,
    LastName,
    Email,
    Phone,
    DateOfBirth,
    Gender,
    Address,
    PhotoUrl,
    Designation,
    Qualification,
    Experience,
    JoiningDate,
    Salary,
    EmergencyContactName,
    EmergencyContactPhone,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Classes {
    Table,
    Id,
    Name,
    Section,
    Grade,
    AcademicYearId,
    ClassTeacherId,
    Room,
    Capacity,
    CurrentStudents,
    Schedule,
    Description,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Students {
    Table,
    Id,
    StudentId,
    FirstName,
    LastName,
    Email,
    Phone,
    DateOfBirth,
    Gender,
    Address,
    BloodGroup,
    PhotoUrl,
    ParentName,
    ParentPhone,
    ParentEmail,
    ClassId,
    RollNumber,
    AdmissionDate,
    AdmissionNumber,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Terms {
    Table,
    Id,
    Name,
    Code,
    AcademicYearId,
    StartDate,
    EndDate,
    RegistrationStart,
    RegistrationEnd,
    ExamStart,
    ExamEnd,
    ResultDate,
    Status,
    TotalWeeks,
    HolidayDays,
    FeeAmount,
    Description,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Exams {
    Table,
    Id,
    Name,
    ExamType,
    SubjectId,
    ClassId,
    TermId,
    ExamDate,
    StartTime,
    DurationMinutes,
    TotalMarks,
    PassingMarks,
    Instructions,
    Venue,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum StudentFees {
    Table,
    Id,
    StudentId,
    TermId,
    FeeTypeId,
    TotalAmount,
    PaidAmount,
    DiscountAmount,
    LateFeePenalty,
    DueDate,
    PaymentDate,
    PaymentMethod,
    Description,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum TeacherSubjects {
    Table,
    TeacherId,
    SubjectId,
}

#[derive(DeriveIden)]
pub(crate) enum ClassSubjects {
    Table,
    ClassId,
    SubjectId,
}
