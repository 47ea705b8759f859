use sea_orm::entity::prelude::*;
use sea_orm::{PaginatorTrait, QueryOrder, QuerySelect};
use serde::Serialize;

use super::text_list::TextList;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub assessment_id: String,
    /// Order within the assessment, from extraction.
    pub position: i32,
    pub question_number: String,
    #[sea_orm(column_type = "Text")]
    pub question: String,
    #[sea_orm(column_type = "Text")]
    pub question_instruction: String,
    #[sea_orm(column_type = "Json")]
    pub suggested_answer: TextList,
    #[sea_orm(column_type = "Text")]
    pub comparison_instruction: String,
    pub comparison_count: i32,
    /// Sampling temperature passed to the evaluator for this question.
    pub temperature: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assessment::Entity",
        from = "Column::AssessmentId",
        to = "super::assessment::Column::Id",
        on_delete = "Cascade"
    )]
    Assessment,
}

impl Related<super::assessment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id.to_owned()).one(db).await
    }

    /// Questions of an assessment in paper order.
    pub async fn for_assessment<C: ConnectionTrait>(db: &C, assessment_id: &str) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .order_by_asc(Column::Position)
            .all(db)
            .await
    }

    pub async fn ids_for_assessment<C: ConnectionTrait>(db: &C, assessment_id: &str) -> Result<Vec<String>, DbErr> {
        Entity::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .select_only()
            .column(Column::Id)
            .order_by_asc(Column::Position)
            .into_tuple()
            .all(db)
            .await
    }

    pub async fn count_for_assessment<C: ConnectionTrait>(db: &C, assessment_id: &str) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .count(db)
            .await
    }

    pub async fn delete_for_assessment<C: ConnectionTrait>(db: &C, assessment_id: &str) -> Result<u64, DbErr> {
        let res = Entity::delete_many()
            .filter(Column::AssessmentId.eq(assessment_id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}
