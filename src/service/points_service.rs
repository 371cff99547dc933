//! Point accounting and anti-fraud heuristics for completed jobs.
//!
//! Everything here is a pure decision over values the job service reads
//! from the store; detection only surfaces jobs for manual review, it never
//! punishes on its own.

use chrono::{DateTime, Duration, Utc};

/// Points a worker earns per estimated hour of a completed job.
pub const HOURLY_POINT_RATE: i32 = 10;

/// Hard ceiling on a worker's point income per calendar day. Overflow is
/// clipped to the remaining headroom, never rejected.
pub const WORKER_DAILY_POINT_CAP: i32 = 100;

/// Fixed bonus the client receives for confirming a completed job.
pub const CLIENT_COMPLETION_POINTS: i32 = 10;

/// Default ban length applied by a `punished` verdict.
pub const DEFAULT_BAN_DAYS: i64 = 7;

/// Audit trigger identifiers stored in `jobs.audit_data.reasons`.
pub const REASON_FINISHED_EARLY: &str = "finished_early";
pub const REASON_REPEATED_PAIR_SAME_DAY: &str = "repeated_pair_same_day";
pub const REASON_PAIR_ON_PREVIOUS_DAY: &str = "pair_on_previous_day";

/// Inputs for one worker award decision, gathered at confirmation time.
#[derive(Debug, Clone, Copy)]
pub struct WorkerAwardContext {
    pub estimated_hours: i32,
    /// Points already credited to this worker for jobs completed today.
    pub points_earned_today: i32,
    /// Jobs this client+worker pair already completed today, excluding the
    /// one being confirmed.
    pub pair_jobs_completed_today: i64,
    pub is_audited: bool,
}

/// Worker points for a completed job: hours × rate, clipped to the daily
/// headroom. Audited jobs and same-day repeats for the same pair award zero.
pub fn worker_award(ctx: &WorkerAwardContext) -> i32 {
    if ctx.is_audited {
        return 0;
    }

    if ctx.pair_jobs_completed_today > 0 {
        return 0;
    }

    let raw = ctx.estimated_hours.saturating_mul(HOURLY_POINT_RATE);
    let headroom = (WORKER_DAILY_POINT_CAP - ctx.points_earned_today).max(0);

    raw.min(headroom)
}

/// Inputs for the audit decision, gathered when the worker submits evidence.
#[derive(Debug, Clone, Copy)]
pub struct AuditContext {
    pub accepted_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub estimated_hours: i32,
    /// Jobs this pair already completed today, excluding the one being
    /// finished.
    pub pair_jobs_completed_today: i64,
    /// Whether the pair had another job yesterday. The job under evaluation
    /// never counts, so a job accepted yesterday and finished today is not
    /// its own history.
    pub pair_had_job_yesterday: bool,
}

/// Triggered audit reasons; an empty vector means the job passes. Any single
/// reason suffices to flag the job for the red list.
pub fn audit_reasons(ctx: &AuditContext) -> Vec<String> {
    let mut reasons = Vec::new();

    let estimated = Duration::hours(ctx.estimated_hours as i64);
    if ctx.finished_at - ctx.accepted_at < estimated {
        reasons.push(REASON_FINISHED_EARLY.to_string());
    }

    // the job being finished counts as the pair's Nth of the day
    if ctx.pair_jobs_completed_today > 0 {
        reasons.push(REASON_REPEATED_PAIR_SAME_DAY.to_string());
    }

    if ctx.pair_had_job_yesterday {
        reasons.push(REASON_PAIR_ON_PREVIOUS_DAY.to_string());
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;

    fn award_ctx() -> WorkerAwardContext {
        WorkerAwardContext {
            estimated_hours: 2,
            points_earned_today: 0,
            pair_jobs_completed_today: 0,
            is_audited: false,
        }
    }

    fn audit_ctx(accepted_hours_ago: i64) -> AuditContext {
        let now = Utc::now();
        AuditContext {
            accepted_at: now - Duration::hours(accepted_hours_ago),
            finished_at: now,
            estimated_hours: 2,
            pair_jobs_completed_today: 0,
            pair_had_job_yesterday: false,
        }
    }

    #[test]
    fn first_job_of_day_awards_hours_times_rate() {
        assert_eq!(worker_award(&award_ctx()), 20);
    }

    #[test]
    fn award_is_clipped_to_daily_headroom() {
        let ctx = WorkerAwardContext {
            points_earned_today: 90,
            ..award_ctx()
        };
        // 2h * 10 = 20 raw, but only 10 points of headroom remain
        assert_eq!(worker_award(&ctx), 10);

        let ctx = WorkerAwardContext {
            points_earned_today: WORKER_DAILY_POINT_CAP,
            ..award_ctx()
        };
        assert_eq!(worker_award(&ctx), 0);

        // cap already overshot (e.g. admin credit): clip to zero, not negative
        let ctx = WorkerAwardContext {
            points_earned_today: WORKER_DAILY_POINT_CAP + 50,
            ..award_ctx()
        };
        assert_eq!(worker_award(&ctx), 0);
    }

    #[test]
    fn second_same_day_pair_job_awards_zero() {
        let ctx = WorkerAwardContext {
            pair_jobs_completed_today: 1,
            ..award_ctx()
        };
        assert_eq!(worker_award(&ctx), 0);
    }

    #[test]
    fn audited_job_awards_zero_regardless() {
        let ctx = WorkerAwardContext {
            is_audited: true,
            points_earned_today: 0,
            ..award_ctx()
        };
        assert_eq!(worker_award(&ctx), 0);
    }

    #[test]
    fn finishing_under_the_estimate_triggers_audit() {
        // accepted one hour ago, estimated two
        let reasons = audit_reasons(&audit_ctx(1));
        assert_eq!(reasons, vec![REASON_FINISHED_EARLY.to_string()]);

        // accepted three hours ago, estimate satisfied
        assert!(audit_reasons(&audit_ctx(3)).is_empty());
    }

    #[test]
    fn repeated_pair_today_triggers_audit() {
        let ctx = AuditContext {
            pair_jobs_completed_today: 1,
            ..audit_ctx(3)
        };
        assert_eq!(
            audit_reasons(&ctx),
            vec![REASON_REPEATED_PAIR_SAME_DAY.to_string()]
        );
    }

    #[test]
    fn overnight_job_with_no_prior_pair_history_passes() {
        // accepted yesterday 18:00, finished this morning, estimate satisfied;
        // the job's own acceptance date is not pair history
        let ctx = AuditContext {
            pair_had_job_yesterday: false,
            ..audit_ctx(16)
        };
        assert!(audit_reasons(&ctx).is_empty());
    }

    #[test]
    fn pair_active_yesterday_triggers_audit() {
        let ctx = AuditContext {
            pair_had_job_yesterday: true,
            ..audit_ctx(3)
        };
        assert_eq!(
            audit_reasons(&ctx),
            vec![REASON_PAIR_ON_PREVIOUS_DAY.to_string()]
        );
    }

    #[test]
    fn multiple_triggers_all_recorded() {
        let ctx = AuditContext {
            pair_jobs_completed_today: 2,
            pair_had_job_yesterday: true,
            ..audit_ctx(1)
        };
        let reasons = audit_reasons(&ctx);
        assert_eq!(reasons.len(), 3);
        assert!(reasons.contains(&REASON_FINISHED_EARLY.to_string()));
        assert!(reasons.contains(&REASON_REPEATED_PAIR_SAME_DAY.to_string()));
        assert!(reasons.contains(&REASON_PAIR_ON_PREVIOUS_DAY.to_string()));
    }
}
