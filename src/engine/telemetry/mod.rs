//! Session instrumentation.
//!
//! # SAFETY INVARIANT
//! Telemetry is a READ-ONLY side-effect layer. It must **NEVER** be read
//! inside decision logic (reactor, selector, or completion gate). It exists
//! solely for observability.
//!
//! # PRIVACY INVARIANT
//! Telemetry events must **NEVER** contain content (labels, media refs).
//! Only record ids, slot indices, ticks, counts and enums are allowed.

pub mod event;
pub mod metrics;
pub mod recorder;
