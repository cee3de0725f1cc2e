//! Randomized depth-first maze traversal.
//!
//! This crate provides the traversal engine and its collaborators:
//! a grid model with randomly sampled obstacles, a seeded source of
//! move orderings, and a step-driven DFS state machine that reports
//! the discovered path and an efficiency score.
//!
//! Rendering and pacing live outside the crate; callers observe the
//! search through read-only snapshots emitted after each step.

pub mod engine;
pub mod grid;
pub mod rng;

pub use engine::{
    EngineError, Status, StepOutcome, TraversalEngine, TraversalObserver, TraversalReport,
    TraversalSnapshot,
};
pub use grid::{Cell, ConfigurationError, Direction, GridModel};
pub use rng::RandomMoveSource;

/// Score awarded for each newly discovered cell, on top of its parent's score.
pub const DISCOVERY_SCORE: u64 = 10;
