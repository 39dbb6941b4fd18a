pub mod completion;
pub mod config;
pub mod engagement;
pub mod error;
pub mod event;
pub mod pool;
pub mod reactor;
pub mod scheduler;
pub mod selector;
pub mod slots;
pub mod state;
pub mod telemetry;
pub mod time;
