//! Frozen copies of student answers taken when an assessment is reassigned.
//! Rows are only ever inserted or deleted.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, QueryOrder};
use serde::Serialize;
use util::object_id;

use super::student_answer;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "archived_student_answers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Id the answer had while live.
    pub original_id: String,
    pub user_id: String,
    pub question_id: String,
    #[sea_orm(column_type = "Text")]
    pub student_answer: String,
    pub formatted_answer: Option<String>,
    pub first_score: Option<f64>,
    pub second_score: Option<f64>,
    pub first_score_feedback: Option<String>,
    pub second_score_feedback: Option<String>,
    pub human_assess_remarks: Option<String>,
    pub is_marked: bool,
    pub answered_at: DateTime<Utc>,
    pub archived_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Builds the archive row for `answer`, stamped with `archived_at`.
    pub fn from_answer(answer: &student_answer::Model, archived_at: DateTime<Utc>) -> ActiveModel {
        ActiveModel {
            id: Set(object_id::new_id()),
            original_id: Set(answer.id.clone()),
            user_id: Set(answer.user_id.clone()),
            question_id: Set(answer.question_id.clone()),
            student_answer: Set(answer.student_answer.clone()),
            formatted_answer: Set(answer.formatted_answer.clone()),
            first_score: Set(answer.first_score),
            second_score: Set(answer.second_score),
            first_score_feedback: Set(answer.first_score_feedback.clone()),
            second_score_feedback: Set(answer.second_score_feedback.clone()),
            human_assess_remarks: Set(answer.human_assess_remarks.clone()),
            is_marked: Set(answer.is_marked),
            answered_at: Set(answer.updated_at),
            archived_at: Set(archived_at),
        }
    }

    pub async fn for_questions<C: ConnectionTrait>(db: &C, question_ids: &[String]) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::QuestionId.is_in(question_ids.iter().cloned()))
            .order_by_desc(Column::ArchivedAt)
            .all(db)
            .await
    }

    pub async fn for_user_and_question<C: ConnectionTrait>(
        db: &C,
        user_id: &str,
        question_id: &str,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::QuestionId.eq(question_id))
            .order_by_desc(Column::ArchivedAt)
            .all(db)
            .await
    }

    pub async fn delete_for_user_and_question<C: ConnectionTrait>(
        db: &C,
        user_id: &str,
        question_id: &str,
    ) -> Result<u64, DbErr> {
        let res = Entity::delete_many()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::QuestionId.eq(question_id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}
