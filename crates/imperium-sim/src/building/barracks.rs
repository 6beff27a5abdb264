//! Unit training at military buildings.

use std::collections::VecDeque;

use imperium_core::units::UnitData;
use serde::{Deserialize, Serialize};

/// One unit in training plus a bounded line of waiting units.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingQueue {
    current: Option<UnitData>,
    /// Progress of `current` in [0, 1].
    progress: f32,
    waiting: VecDeque<UnitData>,
    max_waiting: usize,
}

impl TrainingQueue {
    pub fn new(max_waiting: usize) -> Self {
        Self {
            max_waiting,
            ..Self::default()
        }
    }

    pub fn is_training(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&UnitData> {
        self.current.as_ref()
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Units waiting behind the current one.
    pub fn waiting(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_full(&self) -> bool {
        self.current.is_some() && self.waiting.len() >= self.max_waiting
    }

    /// Start training `unit`, or line it up behind the current one.
    /// False when the line is full.
    pub fn enqueue(&mut self, unit: UnitData) -> bool {
        if self.is_full() {
            return false;
        }
        if self.current.is_none() {
            self.current = Some(unit);
            self.progress = 0.0;
        } else {
            self.waiting.push_back(unit);
        }
        true
    }

    /// Drop the unit in training and start the next. Returns the dropped unit.
    pub fn cancel(&mut self) -> Option<UnitData> {
        let cancelled = self.current.take()?;
        self.start_next();
        Some(cancelled)
    }

    /// Drop everything. Returns the units that never finished, current first.
    pub fn clear(&mut self) -> Vec<UnitData> {
        self.progress = 0.0;
        self.current.take().into_iter().chain(self.waiting.drain(..)).collect()
    }

    /// Advance training by `dt` seconds. Returns the unit finished this call.
    pub fn advance(&mut self, dt: f32) -> Option<UnitData> {
        let time = self.current.as_ref()?.training_time;
        self.progress = if time > 0.0 {
            self.progress + dt.max(0.0) / time
        } else {
            1.0
        };
        if self.progress < 1.0 {
            return None;
        }
        let trained = self.current.take();
        self.start_next();
        trained
    }

    fn start_next(&mut self) {
        self.progress = 0.0;
        self.current = self.waiting.pop_front();
    }
}
