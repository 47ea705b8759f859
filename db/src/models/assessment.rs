use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{PaginatorTrait, QueryOrder};
use serde::Serialize;

use super::text_list::TextList;

/// An assessment generated from an uploaded file by the AI extraction endpoint.
///
/// `(course_id, file_id)` identifies an assessment for upserts: regenerating from
/// the same file replaces the previous questions.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "assessments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub course_id: String,
    pub file_id: Option<String>,
    pub grade_id: String,
    pub ai_model_id: String,
    pub name: String,
    pub assessment_type: String,
    #[sea_orm(column_type = "Json")]
    pub assessment_instruction: TextList,
    #[sea_orm(column_type = "Text")]
    pub case_study_context: String,
    /// Duration text as returned by extraction, e.g. `"90 minutes"`.
    pub duration: String,
    /// Parsed from `duration`; 0 for untimed assessments.
    pub duration_seconds: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::question::Entity")]
    Question,
}

impl Related<super::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id.to_owned()).one(db).await
    }

    pub async fn find_by_course_and_file<C: ConnectionTrait>(
        db: &C,
        course_id: &str,
        file_id: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::FileId.eq(file_id))
            .one(db)
            .await
    }

    pub async fn for_course<C: ConnectionTrait>(db: &C, course_id: &str) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::CreatedAt)
            .all(db)
            .await
    }

    pub async fn find_by_ids<C: ConnectionTrait>(db: &C, ids: &[String]) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::Id.is_in(ids.iter().cloned()))
            .all(db)
            .await
    }

    /// Number of assessments whose `column` equals `value`. Used for dependent-delete checks.
    pub async fn count_where<C: ConnectionTrait>(db: &C, column: Column, value: &str) -> Result<u64, DbErr> {
        Entity::find().filter(column.eq(value)).count(db).await
    }
}
