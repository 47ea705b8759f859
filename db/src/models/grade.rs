use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveValue::Set, QueryOrder};
use serde::Serialize;
use util::object_id;

/// A named competency scale. `configured` is true once it has at least one range.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub configured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::grade_range::Entity")]
    GradeRange,
}

impl Related<super::grade_range::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GradeRange.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(db: &C, name: &str) -> Result<Model, DbErr> {
        let now = Utc::now();
        ActiveModel {
            id: Set(object_id::new_id()),
            name: Set(name.to_owned()),
            configured: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id.to_owned()).one(db).await
    }

    pub async fn list<C: ConnectionTrait>(db: &C, configured_only: bool) -> Result<Vec<Model>, DbErr> {
        let mut query = Entity::find();
        if configured_only {
            query = query.filter(Column::Configured.eq(true));
        }
        query.order_by_asc(Column::Name).all(db).await
    }

    pub async fn set_configured<C: ConnectionTrait>(db: &C, id: &str, configured: bool) -> Result<(), DbErr> {
        Entity::update_many()
            .col_expr(Column::Configured, Expr::value(configured))
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(())
    }
}
