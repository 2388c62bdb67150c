//! Constants for board geometry, candidate filtering, and heuristic scoring.
//!
//! This module contains all the tuning parameters of the engine. Board size is
//! chosen at runtime, so nothing here depends on N except through the helper
//! functions in the modules that use these values.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size used by the CLI and the text protocol.
pub const DEFAULT_SIZE: usize = 19;

/// Largest board the text coordinates can address (A-Z without I).
pub const MAX_SIZE: usize = 25;

/// Offsets to the four orthogonal neighbours as (row, col).
/// Order: North, South, West, East
pub const DELTA4: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Offsets to all eight surrounding points as (row, col), row by row.
pub const DELTA8: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

// =============================================================================
// Candidate Filtering
// =============================================================================

/// Below this many completed moves the opening filter is applied.
pub const OPENING_MOVES: usize = 10;

/// Opening candidates must sit on lines [OPENING_LINE_MIN, OPENING_LINE_MAX]
/// (0-indexed distance to the nearest edge).
pub const OPENING_LINE_MIN: usize = 2;
pub const OPENING_LINE_MAX: usize = 5;

/// Past the opening, boards with more empty points than this are pruned
/// down to points near existing stones.
pub const CROWDED_EMPTY_THRESHOLD: usize = 100;

/// Chebyshev radius around stones kept by the middle-game filter.
pub const NEARBY_RADIUS: usize = 2;

/// The middle-game filter is abandoned if it keeps fewer points than this.
pub const MIN_NEARBY_CANDIDATES: usize = 21;

// =============================================================================
// Move Selection
// =============================================================================

/// Upper bound (exclusive) of the uniform tie-breaking jitter.
pub const JITTER_MAX: f64 = 2.0;

/// Exploration picks uniformly among this many top candidates.
pub const EXPLORE_TOP_K: usize = 5;

/// Number of history snapshots sent to the remote move service.
pub const REMOTE_HISTORY_WINDOW: usize = 10;

/// Maximum number of hints returned by `BoardState::suggestions`.
pub const SUGGESTION_LIMIT: usize = 3;

/// Failed attempts after which a problem session offers its solution.
pub const HINT_AFTER_ATTEMPTS: u32 = 2;

// =============================================================================
// Heuristic Coefficients
// =============================================================================

/// Survival: friendly groups at or below this many liberties are rewarded.
pub const SURVIVAL_MAX_LIBS: usize = 3;
pub const SURVIVAL_FACTOR: i32 = 20;

/// Capture: reward per stone of an opponent group left without liberties.
pub const CAPTURE_FACTOR: i32 = 15;

/// Defense: friendly groups at or below this many liberties are rewarded.
pub const DEFENSE_MAX_LIBS: usize = 2;
pub const DEFENSE_FACTOR: i32 = 10;

/// Connect: reward per friendly group touched (two or more).
pub const CONNECT_FACTOR: i32 = 8;

/// Cut: reward per opponent group touched (two or more).
pub const CUT_FACTOR: i32 = 6;

/// Attack: opponent groups at or below this many liberties are rewarded.
pub const ATTACK_MAX_LIBS: usize = 2;
pub const ATTACK_FACTOR: i32 = 5;

/// Territory: per friendly / enemy stone in the 8-neighbourhood.
pub const TERRITORY_FRIEND: i32 = 2;
pub const TERRITORY_ENEMY: i32 = 3;

/// Key points bonuses and the first-line penalty.
pub const STAR_POINT_BONUS: i32 = 5;
pub const CORNER_BAND_BONUS: i32 = 3;
pub const CORNER_BAND: (usize, usize) = (2, 3);
pub const FIRST_LINE_PENALTY: i32 = 5;

/// Liberties: reward per liberty of the resulting group.
pub const LIBERTY_FACTOR: i32 = 2;
