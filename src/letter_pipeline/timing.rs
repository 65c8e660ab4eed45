//! Per-stage wall-clock timings for one normalization run.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::letter_pipeline::common::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTiming {
    pub name: &'static str,
    pub duration: Duration,
}

/// Stages in execution order. A stage name may repeat; lookups sum every run.
#[derive(Debug, Default, Clone)]
pub struct PipelineTimings {
    stages: Vec<StageTiming>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `stage` inside a tracing span named after it and records how long it took.
    /// Failed stages are not recorded.
    pub fn record<T>(&mut self, name: &'static str, stage: impl FnOnce() -> Result<T>) -> Result<T> {
        let _span = tracing::info_span!("stage", stage = name).entered();
        let start = Instant::now();
        let output = stage()?;
        let duration = start.elapsed();
        debug!(elapsed_us = duration.as_micros() as u64, "Stage finished");
        self.add_stage(name, duration);
        Ok(output)
    }

    pub fn add_stage(&mut self, name: &'static str, duration: Duration) {
        self.stages.push(StageTiming { name, duration });
    }

    pub fn total_duration(&self) -> Duration {
        self.stages.iter().map(|s| s.duration).sum()
    }

    pub fn get_stage(&self, name: &str) -> Option<Duration> {
        self.stages
            .iter()
            .filter(|s| s.name == name)
            .map(|s| s.duration)
            .reduce(|a, b| a + b)
    }

    pub fn slowest(&self) -> Option<&StageTiming> {
        self.stages.iter().max_by_key(|s| s.duration)
    }

    pub fn stages(&self) -> &[StageTiming] {
        &self.stages
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name).collect()
    }
}

impl fmt::Display for PipelineTimings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total_duration().as_secs_f64();
        writeln!(f, "{:<20} {:>10} {:>7}", "stage", "ms", "share")?;
        for stage in &self.stages {
            let ms = stage.duration.as_secs_f64() * 1000.0;
            let share = if total > 0.0 {
                stage.duration.as_secs_f64() / total * 100.0
            } else {
                0.0
            };
            writeln!(f, "{:<20} {:>10.3} {:>6.1}%", stage.name, ms, share)?;
        }
        write!(f, "{:<20} {:>10.3}", "total", total * 1000.0)
    }
}
