use std::future::Future;
use std::str::FromStr;

use chrono::Local;
use cron::Schedule;

use crate::backup::ScheduleError;

/// Fires a job on a cron schedule in local time. Expressions have six fields with seconds first
/// (`sec min hour day-of-month month day-of-week`), an optional seventh field restricts the year.
pub struct Scheduler {
    expression: String,
    schedule: Schedule,
}

impl Scheduler {
    /// Parses the configured expression. A blank expression means there is no schedule at all.
    pub fn from_expression(expression: &str) -> Result<Option<Self>, ScheduleError> {
        let expression = expression.trim();
        if expression.is_empty() {
            return Ok(None);
        }

        let schedule =
            Schedule::from_str(expression).map_err(|err| ScheduleError::InvalidExpression {
                expression: expression.to_string(),
                source: err,
            })?;

        Ok(Some(Self {
            expression: expression.to_string(),
            schedule,
        }))
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Sleeps until each upcoming firing and runs the job to completion before looking for the
    /// next one, so firings never overlap. With no limit this only returns if the expression
    /// has no future firings left. Returns the number of firings performed.
    pub async fn run<F, Fut>(&self, max_firings: Option<usize>, mut job: F) -> usize
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        tracing::info!(schedule = %self.expression, "starting scheduled backups");

        let mut firings = 0;

        loop {
            if max_firings.is_some_and(|max| firings >= max) {
                break;
            }

            let Some(next) = self.schedule.upcoming(Local).next() else {
                tracing::warn!(schedule = %self.expression, "schedule has no future firings");
                break;
            };

            tracing::debug!(next = %next, "waiting for next scheduled backup");

            let wait = (next - Local::now()).to_std().unwrap_or_default();
            tokio::time::sleep(wait).await;

            tracing::info!(schedule = %self.expression, "scheduled backup triggered");
            job().await;
            firings += 1;
        }

        firings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_blank_expression_is_no_schedule() {
        assert!(Scheduler::from_expression("").unwrap().is_none());
        assert!(Scheduler::from_expression("   \t").unwrap().is_none());
    }

    #[test]
    fn test_valid_expression() {
        let scheduler = Scheduler::from_expression(" 0 30 2 * * * ").unwrap().unwrap();
        assert_eq!(scheduler.expression(), "0 30 2 * * *");
    }

    #[test]
    fn test_malformed_expression_rejected() {
        for expression in ["every day", "61 * * * * *", "* * *"] {
            let result = Scheduler::from_expression(expression);
            assert!(
                matches!(result, Err(ScheduleError::InvalidExpression { .. })),
                "{expression} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_bounded_firings() {
        let scheduler = Scheduler::from_expression("* * * * * *").unwrap().unwrap();
        let counter = AtomicUsize::new(0);
        let counter_ref = &counter;

        let fired = scheduler
            .run(Some(2), move || async move {
                counter_ref.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        assert_eq!(fired, 2);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_zero_firings_returns_immediately() {
        let scheduler = Scheduler::from_expression("0 0 0 1 1 * 2099").unwrap().unwrap();
        let fired = scheduler.run(Some(0), || async {}).await;
        assert_eq!(fired, 0);
    }
}
