use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, PaginatorTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use util::object_id;

/// One `[start_range, end_range] -> label` band of a grade.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "grade_ranges")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub grade_id: String,
    pub label: RangeLabel,
    pub start_range: f64,
    pub end_range: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "kebab-case")]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum RangeLabel {
    #[sea_orm(string_value = "competent")]
    Competent,

    #[sea_orm(string_value = "not-competent")]
    NotCompetent,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::grade::Entity",
        from = "Column::GradeId",
        to = "super::grade::Column::Id",
        on_delete = "Cascade"
    )]
    Grade,
}

impl Related<super::grade::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grade.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        grade_id: &str,
        label: RangeLabel,
        start_range: f64,
        end_range: f64,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        ActiveModel {
            id: Set(object_id::new_id()),
            grade_id: Set(grade_id.to_owned()),
            label: Set(label),
            start_range: Set(start_range),
            end_range: Set(end_range),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id.to_owned()).one(db).await
    }

    /// Ranges of a grade ordered by lower bound. Lookup order follows this ordering.
    pub async fn for_grade<C: ConnectionTrait>(db: &C, grade_id: &str) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::GradeId.eq(grade_id))
            .order_by_asc(Column::StartRange)
            .order_by_asc(Column::CreatedAt)
            .all(db)
            .await
    }

    pub async fn count_for_grade<C: ConnectionTrait>(db: &C, grade_id: &str) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::GradeId.eq(grade_id))
            .count(db)
            .await
    }

    pub async fn delete_for_grade<C: ConnectionTrait>(db: &C, grade_id: &str) -> Result<u64, DbErr> {
        let res = Entity::delete_many()
            .filter(Column::GradeId.eq(grade_id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}
