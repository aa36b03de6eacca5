use crate::core::stats::StatsAggregator;
use crate::models::stats::SubjectStats;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum Metric {
    CompletionRate,
    AcknowledgmentRate,
    TotalCompleted,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::CompletionRate => "completion-rate",
            Metric::AcknowledgmentRate => "acknowledgment-rate",
            Metric::TotalCompleted => "total-completed",
        }
    }

    fn value_for(&self, subject: &SubjectStats) -> i64 {
        match self {
            Metric::CompletionRate => subject.completion_rate(),
            Metric::AcknowledgmentRate => subject.acknowledgment_rate(),
            Metric::TotalCompleted => subject.total_completed,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardRow {
    pub subject_id: String,
    pub subject_name: String,
    pub metric_value: i64,
    pub total_completed: i64,
    pub total_assigned: i64,
}

/// Read-only view over the aggregator: one row per subject with at least
/// one event, descending by the chosen metric. Ties keep first-seen order
/// (stable sort over the aggregator's insertion order).
pub struct Leaderboard;

impl Leaderboard {
    pub fn rank(stats: &StatsAggregator, metric: Metric) -> Vec<LeaderboardRow> {
        let mut rows: Vec<LeaderboardRow> = stats
            .subjects_in_order()
            .map(|subject| LeaderboardRow {
                subject_id: subject.subject_id.clone(),
                subject_name: subject.subject_name.clone(),
                metric_value: metric.value_for(subject),
                total_completed: subject.total_completed,
                total_assigned: subject.total_assigned,
            })
            .collect();

        rows.sort_by(|a, b| b.metric_value.cmp(&a.metric_value));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::action::Action;
    use crate::models::event::EventDraft;
    use chrono::Local;

    fn apply_n(agg: &mut StatsAggregator, subject: &str, action: Action, n: i64, base: i64) {
        for i in 0..n {
            let draft = EventDraft::new(action, subject);
            agg.apply(&draft.seal(base + i, Local::now()));
        }
    }

    #[test]
    fn sorted_descending_with_stable_ties() {
        let mut agg = StatsAggregator::default();
        // emp-a: 2 completed, emp-b: 5, emp-c: 2 (tie with emp-a, seen later)
        apply_n(&mut agg, "emp-a", Action::Completed, 2, 1);
        apply_n(&mut agg, "emp-b", Action::Completed, 5, 10);
        apply_n(&mut agg, "emp-c", Action::Completed, 2, 20);

        let rows = Leaderboard::rank(&agg, Metric::TotalCompleted);
        let ids: Vec<&str> = rows.iter().map(|r| r.subject_id.as_str()).collect();
        assert_eq!(ids, ["emp-b", "emp-a", "emp-c"]);
    }

    #[test]
    fn one_row_per_subject_with_events() {
        let mut agg = StatsAggregator::default();
        apply_n(&mut agg, "emp-a", Action::Created, 1, 1);
        apply_n(&mut agg, "emp-b", Action::ClockIn, 1, 2);

        let rows = Leaderboard::rank(&agg, Metric::CompletionRate);
        assert_eq!(rows.len(), 2);
    }
}
