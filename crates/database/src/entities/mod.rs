pub mod academic_years;
pub mod class_subjects;
pub mod classes;
pub mod exams;
pub mod fee_types;
pub mod student_fees;
pub mod students;
pub mod subjects;
pub mod teacher_subjects;
pub mod teachers;
pub mod terms;
