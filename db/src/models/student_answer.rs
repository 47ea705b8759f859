use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, QueryOrder};
use serde::Serialize;
use util::object_id;

/// A learner's answer to one question, with the two AI scores.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "student_answers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::question::Entity",
        from = "Column::QuestionId",
        to = "super::question::Column::Id",
        on_delete = "Cascade"
    )]
    Question,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        user_id: &str,
        question_id: &str,
        student_answer: &str,
        formatted_answer: Option<String>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        ActiveModel {
            id: Set(object_id::new_id()),
            user_id: Set(user_id.to_owned()),
            question_id: Set(question_id.to_owned()),
            student_answer: Set(student_answer.to_owned()),
            formatted_answer: Set(formatted_answer),
            first_score: Set(None),
            second_score: Set(None),
            first_score_feedback: Set(None),
            second_score_feedback: Set(None),
            human_assess_remarks: Set(None),
            is_marked: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id.to_owned()).one(db).await
    }

    pub async fn find_by_user_and_question<C: ConnectionTrait>(
        db: &C,
        user_id: &str,
        question_id: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::QuestionId.eq(question_id))
            .order_by_desc(Column::UpdatedAt)
            .one(db)
            .await
    }

    /// Answers by `user_id` to any of `question_ids`.
    pub async fn for_user_and_questions<C: ConnectionTrait>(
        db: &C,
        user_id: &str,
        question_ids: &[String],
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::QuestionId.is_in(question_ids.iter().cloned()))
            .order_by_asc(Column::CreatedAt)
            .all(db)
            .await
    }

    /// Answers by any user to any of `question_ids`.
    pub async fn for_questions<C: ConnectionTrait>(db: &C, question_ids: &[String]) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::QuestionId.is_in(question_ids.iter().cloned()))
            .order_by_asc(Column::CreatedAt)
            .all(db)
            .await
    }

    pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, DbErr> {
        Entity::find().order_by_asc(Column::CreatedAt).all(db).await
    }

    pub async fn delete_by_ids<C: ConnectionTrait>(db: &C, ids: &[String]) -> Result<u64, DbErr> {
        let res = Entity::delete_many()
            .filter(Column::Id.is_in(ids.iter().cloned()))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}
