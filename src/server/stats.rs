use crate::domain::model::Category;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;

/// Dashboard-level counters for the current session.
#[derive(Debug, Clone)]
pub struct SessionStats {
    start_time: DateTime<Utc>,
    total_queries: u64,
    topics_covered: HashSet<Category>,
    avg_response_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub total_queries: u64,
    pub topics_covered: usize,
    pub avg_response_time: f64,
    pub duration: String,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            start_time: Utc::now(),
            total_queries: 0,
            topics_covered: HashSet::new(),
            avg_response_time: 0.0,
        }
    }

    pub fn record(&mut self, category: Category, elapsed: Duration) {
        self.total_queries += 1;
        self.topics_covered.insert(category);
        let n = self.total_queries as f64;
        self.avg_response_time =
            (self.avg_response_time * (n - 1.0) + elapsed.as_secs_f64()) / n;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.snapshot_at(Utc::now())
    }

    fn snapshot_at(&self, now: DateTime<Utc>) -> StatsSnapshot {
        let elapsed = (now - self.start_time).num_seconds().max(0);
        StatsSnapshot {
            total_queries: self.total_queries,
            topics_covered: self.topics_covered.len(),
            avg_response_time: round2(self.avg_response_time),
            duration: format!("{}m {}s", elapsed / 60, elapsed % 60),
        }
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
