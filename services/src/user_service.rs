use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use db::models::{
    assessment, assigned_assessment, course, enrollment,
    user::{self, Role},
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, IntoActiveModel, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use crate::error::{ServiceError, ServiceResult};
use crate::validation::ensure_id;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct NewUser {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: String,
    #[validate(contains(pattern = "@", message = "Email must contain '@'."))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters."))]
    pub password: String,
    pub role: String,
    pub course_codes: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UserUpdate {
    #[validate(length(min = 1, message = "Name is required."))]
    pub name: Option<String>,
    #[validate(contains(pattern = "@", message = "Email must contain '@'."))]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters."))]
    pub password: Option<String>,
    pub role: Option<String>,
    pub course_codes: Option<Vec<String>>,
}

/// A user as exposed over the API: no password hash, with course codes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub course_codes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupedUsers {
    pub super_admins: Vec<UserView>,
    pub admins: Vec<UserView>,
    pub learners: Vec<UserView>,
    pub assessors: Vec<UserView>,
}

/// Identity of a bulk entry that could not be created.
#[derive(Debug, Clone, Serialize)]
pub struct FailedUserRef {
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedUser {
    pub user: FailedUserRef,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkOutcome {
    pub created_users: Vec<UserView>,
    pub failed_users: Vec<FailedUser>,
    pub success_count: usize,
    pub failed_count: usize,
}

pub async fn view(db: &DatabaseConnection, user: user::Model) -> ServiceResult<UserView> {
    let course_codes = enrollment::Model::codes_for_user(db, &user.id).await?;
    Ok(UserView {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
        course_codes,
        created_at: user.created_at,
        updated_at: user.updated_at,
    })
}

fn parse_role(raw: &str) -> ServiceResult<Role> {
    Role::from_str(raw.trim()).map_err(|_| ServiceError::bad_request("Invalid role."))
}

fn normalize_codes(codes: &[String]) -> Vec<String> {
    codes
        .iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

async fn ensure_courses_exist(db: &DatabaseConnection, codes: &[String]) -> ServiceResult<()> {
    let found = course::Model::find_by_codes(db, codes).await?;
    if let Some(missing) = codes.iter().find(|code| !found.iter().any(|c| &c.code == *code)) {
        return Err(ServiceError::BadRequest(format!("Course {missing} does not exist.")));
    }
    Ok(())
}

pub async fn get_user(db: &DatabaseConnection, user_id: &str) -> ServiceResult<UserView> {
    ensure_id(user_id, "user_id")?;
    let user = user::Model::find_by_id(db, user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("User not found."))?;
    view(db, user).await
}

/// Creates one user with their course bindings.
pub async fn create_user(db: &DatabaseConnection, input: NewUser) -> ServiceResult<UserView> {
    input.validate()?;
    let role = parse_role(&input.role)?;
    let codes = normalize_codes(&input.course_codes);
    if role.needs_courses() && codes.is_empty() {
        return Err(ServiceError::bad_request(
            "Course codes are required for learners and assessors.",
        ));
    }
    let email = input.email.trim().to_string();
    if user::Model::find_by_email(db, &email).await?.is_some() {
        return Err(ServiceError::Conflict("Email already exists.".into()));
    }
    ensure_courses_exist(db, &codes).await?;

    let txn = db.begin().await?;
    let created = user::Model::create(&txn, input.name.trim(), &email, &input.password, role).await?;
    enrollment::Model::add_codes(&txn, &created.id, &codes).await?;
    txn.commit().await?;

    info!(user_id = %created.id, role = %role, "user created");
    view(db, created).await
}

/// Creates each entry independently; a failing entry is reported and skipped.
pub async fn bulk_create(db: &DatabaseConnection, users: Vec<NewUser>) -> ServiceResult<BulkOutcome> {
    let mut outcome = BulkOutcome::default();
    for input in users {
        let reference = FailedUserRef {
            name: input.name.clone(),
            email: input.email.clone(),
            role: input.role.clone(),
        };
        match create_user(db, input).await {
            Ok(created) => outcome.created_users.push(created),
            Err(err) => {
                warn!(email = %reference.email, error = %err, "bulk user entry rejected");
                outcome.failed_users.push(FailedUser {
                    user: reference,
                    error: err.to_string(),
                });
            }
        }
    }
    outcome.success_count = outcome.created_users.len();
    outcome.failed_count = outcome.failed_users.len();
    Ok(outcome)
}

pub async fn list_grouped(db: &DatabaseConnection) -> ServiceResult<GroupedUsers> {
    let mut grouped = GroupedUsers::default();
    for user in user::Model::list_all(db).await? {
        let role = user.role;
        let v = view(db, user).await?;
        match role {
            Role::SuperAdmin => grouped.super_admins.push(v),
            Role::Admin => grouped.admins.push(v),
            Role::Learner => grouped.learners.push(v),
            Role::Assessor => grouped.assessors.push(v),
        }
    }
    Ok(grouped)
}

pub async fn list_by_role(db: &DatabaseConnection, role: &str) -> ServiceResult<Vec<UserView>> {
    let role = parse_role(role)?;
    let users = user::Model::list_by_role(db, role).await?;
    if users.is_empty() {
        return Err(ServiceError::NotFound(format!("No users found with role {role}.")));
    }
    let mut views = Vec::with_capacity(users.len());
    for user in users {
        views.push(view(db, user).await?);
    }
    Ok(views)
}

/// Partial update. `course_codes`, when present, replaces the whole set.
pub async fn update_user(db: &DatabaseConnection, user_id: &str, input: UserUpdate) -> ServiceResult<UserView> {
    ensure_id(user_id, "user_id")?;
    input.validate()?;
    let existing = user::Model::find_by_id(db, user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("User not found."))?;

    let role = match input.role.as_deref() {
        Some(raw) => parse_role(raw)?,
        None => existing.role,
    };
    let codes = input.course_codes.as_deref().map(normalize_codes);
    if let Some(codes) = &codes {
        if role.needs_courses() && codes.is_empty() {
            return Err(ServiceError::bad_request(
                "Course codes are required for learners and assessors.",
            ));
        }
        ensure_courses_exist(db, codes).await?;
    }
    if let Some(email) = input.email.as_deref().map(str::trim) {
        if let Some(other) = user::Model::find_by_email(db, email).await? {
            if other.id != existing.id {
                return Err(ServiceError::Conflict("Email already exists.".into()));
            }
        }
    }

    let mut active = existing.into_active_model();
    if let Some(name) = input.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(email) = input.email {
        active.email = Set(email.trim().to_string());
    }
    if let Some(password) = input.password {
        active.password_hash = Set(user::Model::hash_password(&password)?);
    }
    active.role = Set(role);
    active.updated_at = Set(Utc::now());

    let txn = db.begin().await?;
    let updated = active.update(&txn).await?;
    if let Some(codes) = &codes {
        enrollment::Model::replace_codes(&txn, &updated.id, codes).await?;
    }
    txn.commit().await?;

    view(db, updated).await
}

/// Rebinds a user to courses.
///
/// Codes of courses where the user still has a live (not completed) assignment
/// are kept; supplied codes naming existing courses are merged in; unknown
/// supplied codes are dropped.
pub async fn assign_courses(db: &DatabaseConnection, user_id: &str, codes: &[String]) -> ServiceResult<UserView> {
    ensure_id(user_id, "user_id")?;
    let existing = user::Model::find_by_id(db, user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("User not found."))?;

    let mut next: BTreeSet<String> = BTreeSet::new();

    let live: Vec<_> = assigned_assessment::Model::for_user(db, user_id)
        .await?
        .into_iter()
        .filter(|a| a.is_live())
        .map(|a| a.assessment_id)
        .collect();
    if !live.is_empty() {
        let course_ids: Vec<String> = assessment::Model::find_by_ids(db, &live)
            .await?
            .into_iter()
            .map(|a| a.course_id)
            .collect();
        let current = enrollment::Model::codes_for_user(db, user_id).await?;
        for id in course_ids {
            if let Some(c) = course::Model::find_by_id(db, &id).await? {
                if current.contains(&c.code) {
                    next.insert(c.code);
                }
            }
        }
    }

    let requested = normalize_codes(codes);
    for c in course::Model::find_by_codes(db, &requested).await? {
        next.insert(c.code);
    }
    let next: Vec<String> = next.into_iter().collect();

    let txn = db.begin().await?;
    enrollment::Model::replace_codes(&txn, user_id, &next).await?;
    txn.commit().await?;

    view(db, existing).await
}

/// Deletes a user that is neither the super admin nor assigned any assessment.
pub async fn delete_user(db: &DatabaseConnection, user_id: &str) -> ServiceResult<()> {
    ensure_id(user_id, "user_id")?;
    let existing = user::Model::find_by_id(db, user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("User not found."))?;

    if existing.role == Role::SuperAdmin {
        return Err(ServiceError::bad_request("The super admin cannot be deleted."));
    }
    if assigned_assessment::Model::count_for_user(db, user_id).await? > 0 {
        return Err(ServiceError::bad_request(
            "User has assigned assessments and cannot be deleted.",
        ));
    }

    let txn = db.begin().await?;
    enrollment::Model::replace_codes(&txn, user_id, &[]).await?;
    user::Entity::delete_by_id(existing.id.clone()).exec(&txn).await?;
    txn.commit().await?;

    info!(user_id = %existing.id, "user deleted");
    Ok(())
}
