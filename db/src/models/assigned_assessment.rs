use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, PaginatorTrait, QueryOrder};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use util::object_id;

/// Binds a learner to an assessment and tracks their attempt.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "assigned_assessments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub assessment_id: String,
    pub status: AssignmentStatus,
    /// Seconds left on the clock; only decremented while `in_progress`.
    pub remaining_time: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle: `pending -> in_progress -> {completed | resubmission | rejected}`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AssignmentStatus {
    #[sea_orm(string_value = "pending")]
    Pending,

    #[sea_orm(string_value = "in_progress")]
    InProgress,

    #[sea_orm(string_value = "completed")]
    Completed,

    #[sea_orm(string_value = "resubmission")]
    Resubmission,

    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl AssignmentStatus {
    /// Whether a status update may move an assignment from `self` to `next`.
    ///
    /// `completed` and `rejected` are terminal for submission: only staff review
    /// (`resubmission`, or `rejected` for a completed attempt) moves them on.
    pub fn can_transition_to(self, next: AssignmentStatus) -> bool {
        use AssignmentStatus::*;
        matches!(
            (self, next),
            (Pending, InProgress | Completed | Rejected)
                | (InProgress, Completed | Resubmission | Rejected)
                | (Resubmission, InProgress | Completed | Rejected)
                | (Completed, Resubmission | Rejected)
                | (Rejected, Resubmission)
        )
    }
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

    #[sea_orm(
        belongs_to = "super::assessment::Entity",
        from = "Column::AssessmentId",
        to = "super::assessment::Column::Id",
        on_delete = "Cascade"
    )]
    Assessment,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::assessment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assessment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        user_id: &str,
        assessment_id: &str,
        remaining_time: i64,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        ActiveModel {
            id: Set(object_id::new_id()),
            user_id: Set(user_id.to_owned()),
            assessment_id: Set(assessment_id.to_owned()),
            status: Set(AssignmentStatus::Pending),
            remaining_time: Set(remaining_time),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
    }

    pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id.to_owned()).one(db).await
    }

    pub async fn find_by_user_and_assessment<C: ConnectionTrait>(
        db: &C,
        user_id: &str,
        assessment_id: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::AssessmentId.eq(assessment_id))
            .one(db)
            .await
    }

    pub async fn for_assessment<C: ConnectionTrait>(db: &C, assessment_id: &str) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .order_by_asc(Column::CreatedAt)
            .all(db)
            .await
    }

    pub async fn for_user<C: ConnectionTrait>(db: &C, user_id: &str) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::CreatedAt)
            .all(db)
            .await
    }

    pub async fn with_status<C: ConnectionTrait>(db: &C, status: AssignmentStatus) -> Result<Vec<Model>, DbErr> {
        Entity::find().filter(Column::Status.eq(status)).all(db).await
    }

    pub async fn count_for_user<C: ConnectionTrait>(db: &C, user_id: &str) -> Result<u64, DbErr> {
        Entity::find().filter(Column::UserId.eq(user_id)).count(db).await
    }

    pub async fn count_for_assessment<C: ConnectionTrait>(db: &C, assessment_id: &str) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .count(db)
            .await
    }

    pub fn is_live(&self) -> bool {
        self.status != AssignmentStatus::Completed
    }
}
