use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use serde::Serialize;

/// Represents a course in the `courses` table.
///
/// Enrollment is not stored here; it is counted from `enrollments` on read.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    /// Unique human-facing code, e.g. `BUS101`. Users are bound to codes.
    pub code: String,
    pub description: Option<String>,
    pub visibility: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub live_assessment_available: bool,
    pub grade_id: Option<String>,
    pub total_marks: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::file::Entity")]
    File,
}

impl Related<super::file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::File.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id.to_owned()).one(db).await
    }

    pub async fn find_by_code<C: ConnectionTrait>(db: &C, code: &str) -> Result<Option<Model>, DbErr> {
        Entity::find().filter(Column::Code.eq(code)).one(db).await
    }

    pub async fn find_by_codes<C: ConnectionTrait>(db: &C, codes: &[String]) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::Code.is_in(codes.iter().cloned()))
            .order_by_asc(Column::Code)
            .all(db)
            .await
    }

    pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, DbErr> {
        Entity::find().order_by_asc(Column::Code).all(db).await
    }
}
