use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{FromQueryResult, QueryOrder, QuerySelect};
use serde::Serialize;

/// An uploaded source document and the text extracted from it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "files")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub course_id: String,
    pub title: String,
    /// Stored blob name under the storage root: `{unix_ms}_{original_name}`.
    pub file_name: String,
    pub original_name: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// File metadata without the extracted text.
#[derive(Clone, Debug, PartialEq, Serialize, FromQueryResult)]
pub struct FileSummary {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub file_name: String,
    pub original_name: String,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id.to_owned()).one(db).await
    }

    pub async fn summaries_for_course<C: ConnectionTrait>(
        db: &C,
        course_id: &str,
    ) -> Result<Vec<FileSummary>, DbErr> {
        Entity::find()
            .select_only()
            .columns([
                Column::Id,
                Column::CourseId,
                Column::Title,
                Column::FileName,
                Column::OriginalName,
                Column::UploadedAt,
                Column::UpdatedAt,
            ])
            .filter(Column::CourseId.eq(course_id))
            .order_by_desc(Column::UploadedAt)
            .into_model::<FileSummary>()
            .all(db)
            .await
    }

    pub async fn for_course<C: ConnectionTrait>(db: &C, course_id: &str) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .all(db)
            .await
    }
}
