pub mod ai_model;
pub mod archived_student_answer;
pub mod assessment;
pub mod assigned_assessment;
pub mod course;
pub mod enrollment;
pub mod file;
pub mod grade;
pub mod grade_range;
pub mod question;
pub mod student_answer;
pub mod text_list;
pub mod user;

pub use ai_model::Entity as AiModel;
pub use archived_student_answer::Entity as ArchivedStudentAnswer;
pub use assessment::Entity as Assessment;
pub use assigned_assessment::Entity as AssignedAssessment;
pub use course::Entity as Course;
pub use enrollment::Entity as Enrollment;
pub use file::Entity as File;
pub use grade::Entity as Grade;
pub use grade_range::Entity as GradeRange;
pub use question::Entity as Question;
pub use student_answer::Entity as StudentAnswer;
pub use text_list::TextList;
pub use user::Entity as User;
