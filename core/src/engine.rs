//! Depth-first traversal engine with explicit backtracking.
//!
//! The engine owns an explicit stack of [`SearchFrame`]s and drives a
//! randomized DFS one step at a time:
//!
//! 1. Peek at the top frame; reaching the target freezes the search.
//! 2. If the frame has no pending moves yet, draw a fresh shuffled
//!    ordering of the four directions (once per frame, never redrawn).
//! 3. Pop directions until one leads to an unvisited, unblocked cell
//!    that is not a self-loop; push it as the new top frame.
//! 4. A frame that runs out of directions is a dead end: pop it and
//!    its path entry together, unwinding until the stack empties.
//!
//! Each step performs exactly one push or one pop and emits one
//! snapshot to the observer. Visited cells are never revisited, which
//! keeps the search loop-free and bounds it at one push and one pop
//! per cell.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::{Cell, Direction, GridModel};
use crate::rng::RandomMoveSource;
use crate::DISCOVERY_SCORE;

/// One stack entry: a cell and the directions not yet tried from it.
///
/// `pending` is consumed by popping from the end; a direction is tried
/// at most once per frame. The remainder stays queued for when the
/// frame becomes the top of the stack again after a backtrack.
#[derive(Debug, Clone)]
struct SearchFrame {
    cell: Cell,
    pending: Vec<Direction>,
}

impl SearchFrame {
    fn new(cell: Cell) -> Self {
        Self {
            cell,
            pending: Vec::new(),
        }
    }
}

/// Lifecycle of a traversal. `Found` and `Exhausted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The search is still advancing or backtracking.
    Exploring,
    /// The target was reached; stack and path are frozen as the solution.
    Found,
    /// The stack emptied without reaching the target. A normal outcome
    /// (no path exists for this obstacle layout), not a fault.
    Exhausted,
}

/// What a single [`TraversalEngine::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A forward move: one new cell pushed and discovered.
    Advanced,
    /// A dead end: the top frame and its path entry were popped.
    Backtracked,
    /// The top frame was the target; the engine is now terminal.
    Found,
    /// The last frame was popped without reaching the target.
    Exhausted,
}

/// Driving a terminal engine is a usage error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("step() called on a terminal engine ({0:?})")]
    Terminal(Status),
}

/// Read-only view of traversal state, emitted once per step.
///
/// Observers must not retain the borrows past the callback; the engine
/// resumes mutating its state as soon as `on_step` returns.
#[derive(Debug)]
pub struct TraversalSnapshot<'a> {
    pub rows: usize,
    pub cols: usize,
    pub blocked: &'a HashSet<Cell>,
    /// Current root-to-frontier path, bottom of the stack first.
    pub path: &'a [Cell],
    /// The frontier cell, `None` once the stack has fully unwound.
    pub current: Option<Cell>,
    pub target: Cell,
    pub step_count: u64,
}

/// Collaborator boundary for rendering and logging. The core has no
/// notion of timing, drawing, or frame rate; it only hands out
/// snapshots synchronously after each push or pop.
pub trait TraversalObserver {
    fn on_step(&mut self, snapshot: &TraversalSnapshot<'_>);
}

/// No-op observer for callers that only want the final report.
impl TraversalObserver for () {
    fn on_step(&mut self, _snapshot: &TraversalSnapshot<'_>) {}
}

/// Final outcome of a traversal run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalReport {
    pub status: Status,
    /// The solution path when `Found`; empty when `Exhausted` (the
    /// unwind pops the start entry along with its frame).
    pub path: Vec<Cell>,
    /// Forward moves only; backtracks are not counted.
    pub step_count: u64,
    /// Sum of all discovered cells' scores, including branches later
    /// abandoned by backtracking. Discovery is what scores, not
    /// membership in the final path.
    pub score: u64,
}

/// The DFS state machine. Owns its grid, its randomness, and its
/// traversal state exclusively; nothing is shared across instances.
#[derive(Debug)]
pub struct TraversalEngine {
    grid: GridModel,
    moves: RandomMoveSource,
    stack: Vec<SearchFrame>,
    visited: HashSet<Cell>,
    path: Vec<Cell>,
    score_map: HashMap<Cell, u64>,
    step_count: u64,
    status: Status,
}

impl TraversalEngine {
    pub fn new(grid: GridModel, moves: RandomMoveSource) -> Self {
        let start = grid.start();
        Self {
            grid,
            moves,
            stack: vec![SearchFrame::new(start)],
            visited: HashSet::from([start]),
            path: vec![start],
            score_map: HashMap::from([(start, 0)]),
            step_count: 0,
            status: Status::Exploring,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    /// Current root-to-frontier path.
    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// A consistent read-only view of the current state.
    pub fn snapshot(&self) -> TraversalSnapshot<'_> {
        TraversalSnapshot {
            rows: self.grid.rows(),
            cols: self.grid.cols(),
            blocked: self.grid.blocked(),
            path: &self.path,
            current: self.stack.last().map(|frame| frame.cell),
            target: self.grid.target(),
            step_count: self.step_count,
        }
    }

    /// The final report for the state reached so far.
    pub fn report(&self) -> TraversalReport {
        TraversalReport {
            status: self.status,
            path: self.path.clone(),
            step_count: self.step_count,
            score: self.score_map.values().sum(),
        }
    }

    /// Advance the search by exactly one push or pop.
    ///
    /// Returns the outcome of the transition, or `EngineError::Terminal`
    /// if the engine already reached `Found` or `Exhausted`. The state
    /// is internally consistent on every return, so a caller may stop
    /// stepping at any point between calls.
    pub fn step(&mut self, observer: &mut dyn TraversalObserver) -> Result<StepOutcome, EngineError> {
        if self.status != Status::Exploring {
            return Err(EngineError::Terminal(self.status));
        }

        // Exploring implies a non-empty stack.
        let (curr, needs_refill) = match self.stack.last() {
            Some(top) => (top.cell, top.pending.is_empty()),
            None => {
                self.status = Status::Exhausted;
                return Ok(StepOutcome::Exhausted);
            }
        };

        if curr == self.grid.target() {
            self.status = Status::Found;
            tracing::debug!(cell = curr, steps = self.step_count, "target reached");
            observer.on_step(&self.snapshot());
            return Ok(StepOutcome::Found);
        }

        // Lazy refill: a frame's move ordering is drawn the first time the
        // frame is inspected with nothing pending, and kept across later
        // visits rather than redrawn.
        if needs_refill {
            let order = self.moves.shuffled_directions();
            if let Some(top) = self.stack.last_mut() {
                top.pending.extend(order);
            }
        }

        while let Some(direction) = self.stack.last_mut().and_then(|top| top.pending.pop()) {
            let next = self.grid.neighbor(curr, direction);
            // Out-of-bounds moves come back as self-loops; reject those
            // along with blocked and already-visited cells.
            if next == curr || self.grid.is_blocked(next) || self.visited.contains(&next) {
                continue;
            }

            // Forward move. The old top keeps its reduced pending list for
            // when a backtrack makes it the frontier again.
            self.stack.push(SearchFrame::new(next));
            self.visited.insert(next);
            self.path.push(next);
            let parent_score = self.score_map.get(&curr).copied().unwrap_or(0);
            self.score_map.insert(next, parent_score + DISCOVERY_SCORE);
            self.step_count += 1;
            tracing::trace!(from = curr, to = next, "advanced");
            observer.on_step(&self.snapshot());
            return Ok(StepOutcome::Advanced);
        }

        // Dead end: drop the frame and its path entry together.
        self.stack.pop();
        self.path.pop();
        if self.stack.is_empty() {
            self.status = Status::Exhausted;
            tracing::debug!(steps = self.step_count, "search exhausted, no path exists");
            observer.on_step(&self.snapshot());
            return Ok(StepOutcome::Exhausted);
        }
        tracing::trace!(from = curr, "backtracked");
        observer.on_step(&self.snapshot());
        Ok(StepOutcome::Backtracked)
    }

    /// Step until the search terminates, then return the report.
    ///
    /// `Exhausted` is a normal outcome here, not an error. Calling `run`
    /// on an already-terminal engine just returns the existing report.
    pub fn run(&mut self, observer: &mut dyn TraversalObserver) -> Result<TraversalReport, EngineError> {
        while self.status == Status::Exploring {
            self.step(observer)?;
        }
        Ok(self.report())
    }
}
