//! Stress history and the scoreboard of converged runs

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::config::SimulationParams;
use crate::core::types::Tick;

/// Ticks between history samples
pub const HISTORY_INTERVAL: Tick = 5;

/// Samples kept in the rolling history
pub const HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub tick: Tick,
    pub total_stress: f32,
    /// Agents carrying no stress at all
    pub settled_count: usize,
}

/// Rolling window of total-stress samples for charting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StressHistory {
    points: VecDeque<HistoryPoint>,
}

impl StressHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sample if `point.tick` falls on the sampling interval
    pub fn record(&mut self, point: HistoryPoint) -> bool {
        if point.tick % HISTORY_INTERVAL != 0 {
            return false;
        }
        if self.points.len() == HISTORY_CAPACITY {
            self.points.pop_front();
        }
        self.points.push_back(point);
        true
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest(&self) -> Option<&HistoryPoint> {
        self.points.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryPoint> {
        self.points.iter()
    }
}

/// A converged run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub run_id: u64,
    pub ticks: Tick,
    pub params: SimulationParams,
    pub timestamp: DateTime<Utc>,
}

/// Converged runs, fastest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    records: Vec<ScoreRecord>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert keeping ascending tick order; equal tick counts keep arrival order
    pub fn record(&mut self, record: ScoreRecord) {
        let at = self.records.partition_point(|r| r.ticks <= record.ticks);
        self.records.insert(at, record);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn best(&self) -> Option<&ScoreRecord> {
        self.records.first()
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
