pub mod m202510010001_create_users;
pub mod m202510010002_create_courses;
pub mod m202510010003_create_enrollments;
pub mod m202510010004_create_grades;
pub mod m202510010005_create_ai_models;
pub mod m202510010006_create_files;
pub mod m202510010007_create_assessments;
pub mod m202510010008_create_assigned_assessments;
pub mod m202510010009_create_student_answers;
