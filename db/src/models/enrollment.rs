//! Course codes a user is bound to. One row per (user, code).

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ActiveValue::Set, PaginatorTrait, QuerySelect};

use super::user::{self, Role};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Course codes of `user_id`, sorted.
    pub async fn codes_for_user<C: ConnectionTrait>(db: &C, user_id: &str) -> Result<Vec<String>, DbErr> {
        let mut codes: Vec<String> = Entity::find()
            .filter(Column::UserId.eq(user_id))
            .select_only()
            .column(Column::CourseCode)
            .into_tuple()
            .all(db)
            .await?;
        codes.sort();
        Ok(codes)
    }

    /// Binds `user_id` to each code; existing bindings are left alone.
    pub async fn add_codes<C: ConnectionTrait>(db: &C, user_id: &str, codes: &[String]) -> Result<(), DbErr> {
        if codes.is_empty() {
            return Ok(());
        }
        let rows = codes.iter().map(|code| ActiveModel {
            user_id: Set(user_id.to_owned()),
            course_code: Set(code.clone()),
        });
        Entity::insert_many(rows)
            .on_conflict(
                OnConflict::columns([Column::UserId, Column::CourseCode])
                    .do_nothing()
                    .to_owned(),
            )
            .do_nothing()
            .exec(db)
            .await?;
        Ok(())
    }

    /// Replaces the whole code set of `user_id`.
    pub async fn replace_codes<C: ConnectionTrait>(db: &C, user_id: &str, codes: &[String]) -> Result<(), DbErr> {
        Entity::delete_many()
            .filter(Column::UserId.eq(user_id))
            .exec(db)
            .await?;
        Self::add_codes(db, user_id, codes).await
    }

    pub async fn rename_code<C: ConnectionTrait>(db: &C, from: &str, to: &str) -> Result<(), DbErr> {
        Entity::update_many()
            .col_expr(Column::CourseCode, Expr::value(to))
            .filter(Column::CourseCode.eq(from))
            .exec(db)
            .await?;
        Ok(())
    }

    pub async fn remove_code<C: ConnectionTrait>(db: &C, code: &str) -> Result<(), DbErr> {
        Entity::delete_many()
            .filter(Column::CourseCode.eq(code))
            .exec(db)
            .await?;
        Ok(())
    }

    /// Number of learners bound to `code`. This is the course's enrollment.
    pub async fn count_learners<C: ConnectionTrait>(db: &C, code: &str) -> Result<u64, DbErr> {
        Entity::find()
            .inner_join(user::Entity)
            .filter(Column::CourseCode.eq(code))
            .filter(user::Column::Role.eq(Role::Learner))
            .count(db)
            .await
    }

    /// Ids of users bound to `code`.
    pub async fn user_ids_for_code<C: ConnectionTrait>(db: &C, code: &str) -> Result<Vec<String>, DbErr> {
        Entity::find()
            .filter(Column::CourseCode.eq(code))
            .select_only()
            .column(Column::UserId)
            .into_tuple()
            .all(db)
            .await
    }
}
