use super::time::Tick;

/// Timer-driven transition edges. These are the only suspension points in
/// the session: fade-out end, fade-in settle, and the completion settle
/// delay between crossing the thresholds and revealing "Module Complete".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    FadeOut { slot: usize },
    Settle { slot: usize },
    CompletionSettle,
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    due: Tick,
    kind: TimerKind,
}

/// Tick-deadline scheduler. The reactor drains due timers once per step, so
/// transition logic is testable without real time. Timers are never
/// cancelled or extended; a fade cycle always runs to completion.
#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Vec<PendingTimer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Tick, kind: TimerKind) {
        self.pending.push(PendingTimer { due, kind });
    }

    /// Expired timers in deadline order; same-deadline timers keep their
    /// scheduling order (stable sort).
    pub fn drain_due(&mut self, now: Tick) -> Vec<TimerKind> {
        let mut due = Vec::new();
        let mut rest = Vec::new();
        for timer in self.pending.drain(..) {
            if timer.due <= now {
                due.push(timer);
            } else {
                rest.push(timer);
            }
        }
        self.pending = rest;

        due.sort_by_key(|timer| timer.due);
        due.into_iter().map(|timer| timer.kind).collect()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

/// Side effects for the driver loop. The core never performs I/O itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
    Log(String),
    /// The single completion signal for the navigation collaborator.
    ModuleComplete { module_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_only_expired_timers_in_deadline_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(Tick { frame: 5 }, TimerKind::Settle { slot: 1 });
        scheduler.schedule(Tick { frame: 3 }, TimerKind::FadeOut { slot: 0 });
        scheduler.schedule(Tick { frame: 9 }, TimerKind::CompletionSettle);

        let due = scheduler.drain_due(Tick { frame: 5 });
        assert_eq!(
            due,
            vec![TimerKind::FadeOut { slot: 0 }, TimerKind::Settle { slot: 1 }]
        );
        assert_eq!(scheduler.pending_len(), 1);

        let rest = scheduler.drain_due(Tick { frame: 20 });
        assert_eq!(rest, vec![TimerKind::CompletionSettle]);
        assert_eq!(scheduler.pending_len(), 0);
    }
}
