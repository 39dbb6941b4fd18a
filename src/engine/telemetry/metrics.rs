use std::collections::VecDeque;

use super::event::TelemetryEvent;
use crate::engine::event::ActionKind;

#[derive(Debug, Clone, Default)]
pub struct TelemetrySnapshot {
    pub engagement_stats: EngagementStats,
    pub replacement_stats: ReplacementStats,
    pub completion_stats: CompletionStats,
}

#[derive(Debug, Clone, Default)]
pub struct EngagementStats {
    pub likes: u64,
    pub saves: u64,
    pub repeat_actions: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ReplacementStats {
    pub served: u64,
    pub same_group: u64,
    pub fallback: u64,
    pub exhausted: u64,
    pub settled: u64,
    pub same_group_ratio: f64,
}

#[derive(Debug, Clone, Default)]
pub struct CompletionStats {
    pub armed: bool,
    pub completed: bool,
    pub duration_ticks: u64,
    pub final_polarization: u32,
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    for event in events {
        match event {
            TelemetryEvent::ActionRecorded { kind, counted, .. } => {
                if *counted {
                    match kind {
                        ActionKind::Like => snap.engagement_stats.likes += 1,
                        ActionKind::Save => snap.engagement_stats.saves += 1,
                    }
                } else {
                    snap.engagement_stats.repeat_actions += 1;
                }
            }
            TelemetryEvent::ReplacementServed { same_group, .. } => {
                snap.replacement_stats.served += 1;
                if *same_group {
                    snap.replacement_stats.same_group += 1;
                } else {
                    snap.replacement_stats.fallback += 1;
                }
            }
            TelemetryEvent::ReplacementExhausted { .. } => {
                snap.replacement_stats.exhausted += 1;
            }
            TelemetryEvent::SlotSettled { .. } => {
                snap.replacement_stats.settled += 1;
            }
            TelemetryEvent::CompletionArmed { .. } => {
                snap.completion_stats.armed = true;
            }
            TelemetryEvent::SessionCompleted {
                duration_ticks,
                polarization_score,
                ..
            } => {
                snap.completion_stats.completed = true;
                snap.completion_stats.duration_ticks = *duration_ticks;
                snap.completion_stats.final_polarization = *polarization_score;
            }
        }
    }

    if snap.replacement_stats.served > 0 {
        snap.replacement_stats.same_group_ratio =
            snap.replacement_stats.same_group as f64 / snap.replacement_stats.served as f64;
    }

    snap
}
