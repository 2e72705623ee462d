//! Stage timings for a pipeline run.
use chrono::{DateTime, Utc};
use colored::*;
use instant::Instant;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
pub struct StageMetrics {
    pub stage: PipelineStage,
    pub state: Option<String>,
    pub duration_ms: u64,
    pub batches_processed: Option<u64>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PipelineStage {
    Download,
    Loading,
    Calculation,
    CsvExport,
    Plotting,
    Complete,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStage::Download => write!(f, "download"),
            PipelineStage::Loading => write!(f, "loading"),
            PipelineStage::Calculation => write!(f, "calculation"),
            PipelineStage::CsvExport => write!(f, "csv_export"),
            PipelineStage::Plotting => write!(f, "plotting"),
            PipelineStage::Complete => write!(f, "complete"),
        }
    }
}

#[derive(Default)]
pub struct MetricsCollector {
    stage_timers: HashMap<String, Instant>,
    recorded: Vec<StageMetrics>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing a stage
    pub fn start_stage(&mut self, stage_key: &str) {
        self.stage_timers
            .insert(stage_key.to_string(), Instant::now());
    }

    /// End timing a stage and keep its metrics. A key that was never started
    /// records a zero duration.
    pub fn end_stage(
        &mut self,
        stage_key: &str,
        stage: PipelineStage,
        state: Option<&str>,
        batches_processed: Option<u64>,
    ) -> StageMetrics {
        let duration = self
            .stage_timers
            .remove(stage_key)
            .map(|start| start.elapsed().as_millis() as u64)
            .unwrap_or(0);

        let metrics = StageMetrics {
            stage,
            state: state.map(|s| s.to_string()),
            duration_ms: duration,
            batches_processed,
            timestamp: Utc::now(),
        };

        self.recorded.push(metrics.clone());
        metrics
    }

    pub fn recorded(&self) -> &[StageMetrics] {
        &self.recorded
    }

    /// Total time spent per stage, in first-seen order.
    pub fn stage_totals(&self) -> Vec<(PipelineStage, u64, u64)> {
        let mut totals: Vec<(PipelineStage, u64, u64)> = Vec::new();
        for metric in &self.recorded {
            let batches = metric.batches_processed.unwrap_or(0);
            match totals.iter_mut().find(|(stage, _, _)| *stage == metric.stage) {
                Some(entry) => {
                    entry.1 += metric.duration_ms;
                    entry.2 += batches;
                }
                None => totals.push((metric.stage, metric.duration_ms, batches)),
            }
        }
        totals
    }

    /// Print performance summary
    pub fn print_summary(&self) {
        println!("\n{}", "📊 Pipeline Performance Summary".bright_cyan().bold());
        println!("{}", "=".repeat(50).bright_cyan());

        let mut total_duration = 0u64;
        let mut total_batches = 0u64;

        for (stage, duration_ms, batches) in self.stage_totals() {
            if stage == PipelineStage::Complete {
                continue;
            }
            total_duration += duration_ms;
            if stage == PipelineStage::Calculation {
                total_batches += batches;
            }

            let stage_color = match stage {
                PipelineStage::Download => "yellow",
                PipelineStage::Loading => "blue",
                PipelineStage::Calculation => "green",
                PipelineStage::CsvExport => "magenta",
                PipelineStage::Plotting => "cyan",
                PipelineStage::Complete => "bright_green",
            };

            println!(
                "{}: {} ms{}",
                format!("{:?}", stage).color(stage_color),
                duration_ms.to_string().bright_white(),
                if batches > 0 {
                    format!(" ({} batches)", batches.to_string().bright_yellow())
                } else {
                    String::new()
                }
            );
        }

        println!("{}", "-".repeat(50).bright_cyan());
        println!(
            "{}: {} ms",
            "Total Duration".bright_white().bold(),
            total_duration.to_string().bright_green().bold()
        );

        if total_batches > 0 {
            println!(
                "{}: {}",
                "Total Batches".bright_white().bold(),
                total_batches.to_string().bright_green().bold()
            );
        }

        println!();
    }
}
