use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::completion::{CompletionGate, Phase};
use super::config::SessionConfig;
use super::error::EngineError;
use super::event::{Event, InputContent, InputEvent, UserAction};
use super::pool::ContentListing;
use super::scheduler::{Scheduler, SideEffect, TimerKind};
use super::selector;
use super::slots::TransitionState;
use super::state::{SessionState, StateDelta};
use super::telemetry::event::TelemetryEvent;
use super::telemetry::recorder::TelemetryRecorder;
use super::time::{Tick, TICK_MS};

/// Owns one exercise session. `tick_step` is the entire engine: it advances
/// the logical clock, applies user actions, expires due transition timers
/// and returns side effects for the driver. It never awaits, so tests drive
/// it tick by tick without real timers.
pub struct Reactor {
    pub receiver: mpsc::Receiver<Event>,
    pub state: SessionState,
    pub scheduler: Scheduler,
    pub telemetry: TelemetryRecorder,
    pub tick: Tick,
    pub config: SessionConfig,
    pub session_id: Uuid,
    gate: CompletionGate,
    rng: StdRng,
}

impl Reactor {
    pub fn new(receiver: mpsc::Receiver<Event>, config: SessionConfig) -> Self {
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            receiver,
            state: SessionState::new(),
            scheduler: Scheduler::new(),
            telemetry: TelemetryRecorder::new(),
            tick: Tick::new(),
            gate: CompletionGate::new(&config),
            config,
            session_id: Uuid::new_v4(),
            rng,
        }
    }

    /// Feed the listing from the storage collaborator. Idempotent: a second
    /// call is logged and ignored, the first order stands.
    pub fn load_pool(&mut self, listings: Vec<ContentListing>) {
        match self
            .state
            .load_pool(listings, self.config.max_visible, &mut self.rng)
        {
            Ok(count) => info!(records = count, "content pool loaded"),
            Err(EngineError::AlreadyLoaded) => warn!("pool load ignored: already loaded"),
            Err(err) => warn!(%err, "pool load failed"),
        }
    }

    pub fn polarization_score(&self) -> u32 {
        self.state
            .engagement
            .polarization_score(self.config.like_target)
    }

    /// Pure step: advances the tick, applies events, expires timers.
    /// MUST NOT await I/O or real time.
    pub fn tick_step(&mut self, events: Vec<Event>) -> Vec<SideEffect> {
        self.tick = self.tick.next();
        self.state.reduce(StateDelta::Tick(self.tick));
        let mut effects = Vec::new();

        for event in events {
            match event {
                Event::Input(input) => self.apply_input(input),
            }
        }

        for due in self.scheduler.drain_due(self.tick) {
            match due {
                TimerKind::FadeOut { slot } => self.finish_fade_out(slot, &mut effects),
                TimerKind::Settle { slot } => {
                    self.state.reduce(StateDelta::SlotSettled { slot });
                    self.telemetry
                        .record(TelemetryEvent::SlotSettled { slot, tick: self.tick });
                }
                TimerKind::CompletionSettle => {
                    if self.state.phase == Phase::Completing {
                        self.state.reduce(StateDelta::Completed);
                        self.telemetry.record(TelemetryEvent::SessionCompleted {
                            session_id: self.session_id,
                            duration_ticks: self.tick.frame,
                            polarization_score: self.polarization_score(),
                        });
                        effects.push(SideEffect::ModuleComplete {
                            module_id: self.config.module_id.clone(),
                        });
                    }
                }
            }
        }

        effects
    }

    /// A like/save lands on a slot. Engagement is recorded and the
    /// completion gate evaluated synchronously, before the fade-out timer
    /// starts; a slot already mid-transition (or empty) drops the action
    /// entirely so two cycles can never target the same slot.
    fn apply_input(&mut self, input: InputEvent) {
        let InputContent::Action(UserAction { slot_index, kind }) = input.content;

        // Complete is terminal for the session.
        if self.state.phase == Phase::Complete {
            debug!(source = %input.source, "action after completion dropped");
            return;
        }

        let record_id = match self.state.board.slot(slot_index) {
            Some(slot) if slot.transition == TransitionState::Idle => {
                match &slot.occupant {
                    Some(record) => record.id,
                    None => {
                        debug!(slot = slot_index, source = %input.source, "action on empty slot dropped");
                        return;
                    }
                }
            }
            Some(slot) => {
                debug!(
                    slot = slot_index,
                    transition = ?slot.transition,
                    "action on transitioning slot dropped"
                );
                return;
            }
            None => {
                debug!(slot = slot_index, "action on unknown slot dropped");
                return;
            }
        };

        let likes_before = self.state.like_count();
        let saves_before = self.state.save_count();
        self.state
            .reduce(StateDelta::ActionRecorded { id: record_id, kind });
        let counted =
            self.state.like_count() != likes_before || self.state.save_count() != saves_before;
        self.telemetry.record(TelemetryEvent::ActionRecorded {
            kind,
            counted,
            tick: self.tick,
        });

        if self
            .gate
            .should_arm(self.state.phase, self.state.like_count(), self.state.save_count())
        {
            self.state.reduce(StateDelta::CompletionArmed);
            self.telemetry
                .record(TelemetryEvent::CompletionArmed { tick: self.tick });
            self.scheduler.schedule(
                self.tick.advanced_by(self.config.completion_settle_ticks()),
                TimerKind::CompletionSettle,
            );
            info!(
                likes = self.state.like_count(),
                saves = self.state.save_count(),
                "engagement thresholds met, completing"
            );
        }

        self.state.reduce(StateDelta::FadeOutStarted { slot: slot_index });
        self.scheduler.schedule(
            self.tick.advanced_by(self.config.fade_out_ticks()),
            TimerKind::FadeOut { slot: slot_index },
        );
    }

    /// Fade-out expired: pick the replacement and swap it in. Pool
    /// exhaustion vacates the slot; that is the normal terminal condition,
    /// not a failure.
    fn finish_fade_out(&mut self, slot: usize, effects: &mut Vec<SideEffect>) {
        let vacating = match self.state.board.occupant(slot) {
            Some(record) => record.clone(),
            None => {
                debug!(slot, "fade-out expired on an empty slot");
                return;
            }
        };

        let visible = self.state.board.visible_ids();
        let next = selector::select(
            &vacating,
            &self.state.pool,
            self.state.engagement.displayed(),
            &visible,
            &mut self.rng,
        )
        .cloned();

        match &next {
            Some(record) => {
                self.telemetry.record(TelemetryEvent::ReplacementServed {
                    slot,
                    same_group: record.group_key == vacating.group_key,
                });
            }
            None => {
                self.telemetry
                    .record(TelemetryEvent::ReplacementExhausted { slot });
                effects.push(SideEffect::Log(format!(
                    "{}, slot left vacant",
                    EngineError::NoReplacementAvailable { slot }
                )));
            }
        }

        let has_next = next.is_some();
        self.state.reduce(StateDelta::SlotSwapped { slot, next });

        if has_next {
            self.scheduler.schedule(
                self.tick.advanced_by(self.config.fade_in_ticks()),
                TimerKind::Settle { slot },
            );
        }
    }

    /// Async driver loop. The cadence interval is the only real timer; all
    /// session timing lives in the tick scheduler.
    pub async fn run(&mut self) {
        info!(tick_ms = TICK_MS, "session loop started");

        let mut cadence = interval(Duration::from_millis(TICK_MS));
        cadence.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            cadence.tick().await;

            let mut events: Vec<Event> = Vec::new();
            while let Ok(event) = self.receiver.try_recv() {
                events.push(event);
            }

            let effects = self.tick_step(events);

            for effect in effects {
                match effect {
                    SideEffect::Log(msg) => info!("{msg}"),
                    SideEffect::ModuleComplete { module_id } => {
                        info!(%module_id, "module finished");
                        return;
                    }
                }
            }
        }
    }
}
