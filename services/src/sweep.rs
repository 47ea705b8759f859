//! Countdown of timed assignments.
//!
//! Each pass subtracts the wall-clock seconds since the last pass from every
//! `in_progress` assignment. An assignment whose clock runs out is closed:
//! `completed` when every question has an answer, `rejected` otherwise.

use std::collections::HashSet;
use std::time::Duration;

use ai::AiClient;
use chrono::{DateTime, TimeDelta, Utc};
use db::models::{
    assessment,
    assigned_assessment::{self, AssignmentStatus},
    question, student_answer,
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, IntoActiveModel};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::error::ServiceResult;
use crate::evaluation;

#[derive(Debug, Default)]
pub struct SweepReport {
    /// In-progress timed assignments looked at.
    pub checked: usize,
    /// Assignments closed in this pass, with their new status.
    pub closed: Vec<assigned_assessment::Model>,
}

pub async fn sweep_timers(db: &DatabaseConnection) -> ServiceResult<SweepReport> {
    sweep_timers_at(db, Utc::now()).await
}

/// Runs one pass as if the current time were `now`.
///
/// `updated_at` advances by the whole seconds charged, so sub-second
/// remainders carry over to the next pass. Untimed assessments are skipped.
pub async fn sweep_timers_at(db: &DatabaseConnection, now: DateTime<Utc>) -> ServiceResult<SweepReport> {
    let mut report = SweepReport::default();

    for assignment in assigned_assessment::Model::with_status(db, AssignmentStatus::InProgress).await? {
        let Some(assessment) = assessment::Model::find_by_id(db, &assignment.assessment_id).await? else {
            continue;
        };
        if assessment.duration_seconds <= 0 {
            continue;
        }
        report.checked += 1;

        let elapsed = (now - assignment.updated_at).num_seconds().max(0);
        if elapsed == 0 && assignment.remaining_time > 0 {
            continue;
        }
        let remaining = (assignment.remaining_time - elapsed).max(0);

        let status = if remaining == 0 {
            if all_answered(db, &assignment).await? {
                AssignmentStatus::Completed
            } else {
                AssignmentStatus::Rejected
            }
        } else {
            AssignmentStatus::InProgress
        };

        let stamp = assignment.updated_at + TimeDelta::seconds(elapsed);
        let mut active = assignment.into_active_model();
        active.remaining_time = Set(remaining);
        active.status = Set(status);
        active.updated_at = Set(stamp);
        let saved = active.update(db).await?;

        if status != AssignmentStatus::InProgress {
            info!(assignment_id = %saved.id, status = %status, "assignment timed out");
            report.closed.push(saved);
        }
    }

    debug!(checked = report.checked, closed = report.closed.len(), "timer sweep done");
    Ok(report)
}

async fn all_answered(db: &DatabaseConnection, assignment: &assigned_assessment::Model) -> ServiceResult<bool> {
    let ids = question::Model::ids_for_assessment(db, &assignment.assessment_id).await?;
    let answered: HashSet<String> = student_answer::Model::for_user_and_questions(db, &assignment.user_id, &ids)
        .await?
        .into_iter()
        .map(|a| a.question_id)
        .collect();
    Ok(ids.iter().all(|id| answered.contains(id)))
}

/// One sweep, then evaluation of every assignment it completed.
///
/// Evaluation failures are logged and do not stop the pass.
pub async fn sweep_and_evaluate(db: &DatabaseConnection, ai: &AiClient) -> ServiceResult<SweepReport> {
    let report = sweep_timers(db).await?;
    for assignment in report.closed.iter().filter(|a| a.status == AssignmentStatus::Completed) {
        if let Err(e) = evaluation::evaluate_assignment(db, ai, assignment).await {
            error!(assignment_id = %assignment.id, error = %e, "evaluation after timeout failed");
        }
    }
    Ok(report)
}

/// Runs [`sweep_and_evaluate`] every `period` for the life of the process.
pub fn spawn_sweeper(db: DatabaseConnection, ai: AiClient, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(e) = sweep_and_evaluate(&db, &ai).await {
                error!(error = %e, "timer sweep failed");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{seed_assessment_fixture, seed_learner};
    use db::test_utils::setup_test_db;

    async fn started(db: &DatabaseConnection, assessment_id: &str, remaining: i64) -> assigned_assessment::Model {
        let learner = seed_learner(db, &format!("{}@x.com", util::object_id::new_id()), &[]).await;
        let a = assigned_assessment::Model::create(db, &learner.id, assessment_id, remaining)
            .await
            .unwrap();
        let mut active = a.into_active_model();
        active.status = Set(AssignmentStatus::InProgress);
        active.update(db).await.unwrap()
    }

    #[tokio::test]
    async fn clock_runs_down_by_elapsed_seconds() {
        let db = setup_test_db().await;
        let fx = seed_assessment_fixture(&db, 1).await;
        let a = started(&db, &fx.assessment.id, 3600).await;

        let report = sweep_timers_at(&db, a.updated_at + TimeDelta::seconds(90)).await.unwrap();
        assert_eq!(report.checked, 1);
        assert!(report.closed.is_empty());

        let after = assigned_assessment::Model::find_by_id(&db, &a.id).await.unwrap().unwrap();
        assert_eq!(after.remaining_time, 3510);
        assert_eq!(after.status, AssignmentStatus::InProgress);
        assert_eq!(after.updated_at, a.updated_at + TimeDelta::seconds(90));
    }

    #[tokio::test]
    async fn expiry_completes_or_rejects() {
        let db = setup_test_db().await;
        let fx = seed_assessment_fixture(&db, 2).await;
        let done = started(&db, &fx.assessment.id, 30).await;
        let partial = started(&db, &fx.assessment.id, 30).await;
        for q in &fx.questions {
            student_answer::Model::create(&db, &done.user_id, &q.id, "answer", None).await.unwrap();
        }
        student_answer::Model::create(&db, &partial.user_id, &fx.questions[0].id, "answer", None)
            .await
            .unwrap();

        let now = done.updated_at.max(partial.updated_at) + TimeDelta::seconds(31);
        let report = sweep_timers_at(&db, now).await.unwrap();
        assert_eq!(report.closed.len(), 2);

        let done = assigned_assessment::Model::find_by_id(&db, &done.id).await.unwrap().unwrap();
        let partial = assigned_assessment::Model::find_by_id(&db, &partial.id).await.unwrap().unwrap();
        assert_eq!(done.status, AssignmentStatus::Completed);
        assert_eq!(done.remaining_time, 0);
        assert_eq!(partial.status, AssignmentStatus::Rejected);
    }

    #[tokio::test]
    async fn untimed_and_idle_assignments_are_left_alone() {
        let db = setup_test_db().await;
        let fx = seed_assessment_fixture(&db, 1).await;
        let mut untimed = fx.assessment.clone().into_active_model();
        untimed.duration_seconds = Set(0);
        untimed.update(&db).await.unwrap();
        let a = started(&db, &fx.assessment.id, 0).await;

        let report = sweep_timers_at(&db, a.updated_at + TimeDelta::seconds(10_000)).await.unwrap();
        assert_eq!(report.checked, 0);
        let after = assigned_assessment::Model::find_by_id(&db, &a.id).await.unwrap().unwrap();
        assert_eq!(after.status, AssignmentStatus::InProgress);

        let pending_fx = seed_assessment_fixture(&db, 1).await;
        let learner = seed_learner(&db, "p@x.com", &[]).await;
        assigned_assessment::Model::create(&db, &learner.id, &pending_fx.assessment.id, 10)
            .await
            .unwrap();
        let report = sweep_timers_at(&db, Utc::now() + TimeDelta::seconds(100)).await.unwrap();
        assert_eq!(report.checked, 0);
    }
}
