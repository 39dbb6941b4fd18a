pub mod engine;

// Re-export specific items if needed for convenient access
pub use engine::reactor::Reactor;
