//! Heuristic move selection.
//!
//! The selector scores every plausible empty point with the heuristics its
//! [`Profile`] enables and picks one, occasionally exploring among the top
//! few. Per decision:
//! 1. Enumerate empty points and prune them by game phase
//! 2. Drop points that are illegal for the side to move
//! 3. Sum weighted heuristic scores plus a small random jitter
//! 4. Sort descending and pick, exploring with the profile's probability
//!
//! All work happens on a detached copy of the board taken when the decision
//! starts; the caller commits the chosen point through
//! [`BoardState::place_stone`] like any other move.

use std::fmt;
use std::thread;
use std::time::Duration;

use log::{debug, info, trace};

use crate::board::{Color, Grid, Point};
use crate::constants::{
    CROWDED_EMPTY_THRESHOLD, EXPLORE_TOP_K, JITTER_MAX, MIN_NEARBY_CANDIDATES, NEARBY_RADIUS,
    OPENING_LINE_MAX, OPENING_LINE_MIN, OPENING_MOVES,
};
use crate::eval::Heuristic;
use crate::position::BoardState;
use crate::profile::Profile;

/// A scored candidate point.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub point: Point,
    pub score: f64,
    /// Explaining heuristics that contributed a positive amount
    pub tags: Vec<Heuristic>,
}

impl Candidate {
    /// Human-readable summary of why this point scored well.
    pub fn rationale(&self) -> String {
        if self.tags.is_empty() {
            return "positional".to_string();
        }
        self.tags.iter().map(|h| h.tag()).collect::<Vec<_>>().join(", ")
    }
}

/// Outcome of one decision.
#[derive(Clone, Debug, PartialEq)]
pub enum Decision {
    Move(Candidate),
    /// No legal placement exists; the game ends in the opponent's favour.
    NoLegalMove,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectorState {
    Idle,
    Thinking,
    Decided,
    NoLegalMove,
}

/// Supplies the artificial "thinking" pause before a decision is returned.
pub trait Pacer {
    fn pause(&self, duration: Duration);
}

/// Blocks the current thread for the requested time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pause(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Returns immediately; used by tests and batch play.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

impl Pacer for NoDelay {
    fn pause(&self, _duration: Duration) {}
}

pub struct MoveSelector {
    profile: Profile,
    rng: fastrand::Rng,
    state: SelectorState,
}

impl fmt::Debug for MoveSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoveSelector")
            .field("profile", &self.profile.name())
            .field("state", &self.state)
            .finish()
    }
}

impl MoveSelector {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            rng: fastrand::Rng::new(),
            state: SelectorState::Idle,
        }
    }

    /// A selector whose jitter and exploration are reproducible.
    pub fn with_seed(profile: Profile, seed: u64) -> Self {
        Self {
            profile,
            rng: fastrand::Rng::with_seed(seed),
            state: SelectorState::Idle,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = profile;
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    /// Decide a move after the profile's thinking time, paced by `pacer`.
    ///
    /// The board stays borrowed for the whole call, so the decision reflects
    /// the position at the moment of the call.
    pub fn decide(&mut self, board: &BoardState, pacer: &dyn Pacer) -> Decision {
        self.state = SelectorState::Thinking;
        pacer.pause(self.profile.thinking());
        self.choose(board)
    }

    /// Decide a move immediately.
    pub fn choose(&mut self, board: &BoardState) -> Decision {
        self.state = SelectorState::Thinking;
        let ranked = self.rank(board);
        let decision = self.select(ranked);
        self.state = match decision {
            Decision::Move(_) => SelectorState::Decided,
            Decision::NoLegalMove => SelectorState::NoLegalMove,
        };
        decision
    }

    /// Score every legal candidate and sort best first.
    pub fn rank(&mut self, board: &BoardState) -> Vec<Candidate> {
        let points = candidate_points(board);
        let scratch = board.detached();
        let color = scratch.to_move();
        let legal: Vec<Point> = points.into_iter().filter(|&p| scratch.is_legal(p)).collect();
        debug!("{} legal candidates for {}", legal.len(), color);

        let mut ranked: Vec<Candidate> = legal
            .into_iter()
            .map(|pt| {
                let (base, tags) = score_point(scratch.grid(), pt, color, &self.profile);
                Candidate {
                    point: pt,
                    score: base + self.rng.f64() * JITTER_MAX,
                    tags,
                }
            })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    fn select(&mut self, ranked: Vec<Candidate>) -> Decision {
        if ranked.is_empty() {
            info!("no legal move");
            return Decision::NoLegalMove;
        }
        let index = if self.rng.f64() < self.profile.exploration() {
            self.rng.usize(..ranked.len().min(EXPLORE_TOP_K))
        } else {
            0
        };
        let Some(chosen) = ranked.into_iter().nth(index) else {
            return Decision::NoLegalMove;
        };
        info!(
            "{} AI picks {:?} (rank {}, score {:.1}, {})",
            self.profile.name(),
            chosen.point,
            index + 1,
            chosen.score,
            chosen.rationale()
        );
        Decision::Move(chosen)
    }
}

/// Weighted heuristic score of one point, without jitter, and the
/// explaining heuristics that contributed positively.
pub fn score_point(grid: &Grid, pt: Point, color: Color, profile: &Profile) -> (f64, Vec<Heuristic>) {
    let mut total = 0.0;
    let mut tags = Vec::new();
    for &(h, weight) in profile.weights() {
        let value = h.evaluate(grid, pt, color) as f64 * weight;
        trace!("{:?} {} = {:.2}", pt, h, value);
        if value > 0.0 && h.explains() {
            tags.push(h);
        }
        total += value;
    }
    (total, tags)
}

/// Empty points worth evaluating at this stage of the game.
///
/// In the opening only points between the third and sixth lines are kept.
/// Later, on a mostly empty board, only points within two of an existing
/// stone are kept unless that leaves too few.
pub fn candidate_points(board: &BoardState) -> Vec<Point> {
    let grid = board.grid();
    let empty = grid.empty_points();

    if board.moves_played() < OPENING_MOVES {
        let opening: Vec<Point> = empty
            .iter()
            .copied()
            .filter(|&p| (OPENING_LINE_MIN..=OPENING_LINE_MAX).contains(&grid.line(p)))
            .collect();
        return if opening.is_empty() { empty } else { opening };
    }

    if empty.len() > CROWDED_EMPTY_THRESHOLD {
        let nearby: Vec<Point> = empty
            .iter()
            .copied()
            .filter(|&p| has_stone_within(grid, p, NEARBY_RADIUS))
            .collect();
        if nearby.len() >= MIN_NEARBY_CANDIDATES {
            return nearby;
        }
    }
    empty
}

fn has_stone_within(grid: &Grid, (row, col): Point, radius: usize) -> bool {
    let last = grid.size() - 1;
    (row.saturating_sub(radius)..=(row + radius).min(last)).any(|r| {
        (col.saturating_sub(radius)..=(col + radius).min(last)).any(|c| grid.get((r, c)).is_some())
    })
}
