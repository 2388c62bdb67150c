//! Optional remote move service with local fallback.
//!
//! [`AiService`] is the one entry point for "what should the AI play here".
//! If a [`RemoteMoveService`] is attached it is asked first; any failure,
//! or a reply that is not legal on the live board, is logged and the local
//! [`MoveSelector`] answers instead. Callers never see a remote error.

use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Captures, Color, Point};
use crate::constants::REMOTE_HISTORY_WINDOW;
use crate::history::Snapshot;
use crate::position::BoardState;
use crate::profile::Difficulty;
use crate::selector::{Decision, MoveSelector, NoDelay, Pacer, SleepPacer};

/// Ways the remote service can fail. All of them trigger the local fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    #[error("remote service unavailable: {0}")]
    Unavailable(String),
    #[error("remote service returned status {0}")]
    Status(u16),
    #[error("remote service timed out")]
    Timeout,
    #[error("malformed remote reply: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for RemoteError {
    fn from(e: serde_json::Error) -> Self {
        RemoteError::Malformed(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub board: Vec<Vec<u8>>,
    pub current_player: Color,
    pub captured_stones: Captures,
    pub ko_point: Option<Point>,
}

impl From<&Snapshot> for HistoryEntry {
    fn from(s: &Snapshot) -> Self {
        Self {
            board: s.grid.code_rows(),
            current_player: s.to_move,
            captured_stones: s.captures,
            ko_point: s.ko,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub board: Vec<Vec<u8>>,
    pub current_player: Color,
    pub size: usize,
    pub level: Difficulty,
    /// Up to the last ten pre-move snapshots, oldest first
    pub history: Vec<HistoryEntry>,
    pub captured_stones: Captures,
    pub ko_point: Option<Point>,
}

impl MoveRequest {
    pub fn from_board(board: &BoardState, level: Difficulty) -> Self {
        Self {
            board: board.grid().code_rows(),
            current_player: board.to_move(),
            size: board.size(),
            level,
            history: board
                .history()
                .recent(REMOTE_HISTORY_WINDOW)
                .iter()
                .map(HistoryEntry::from)
                .collect(),
            captured_stones: board.captures(),
            ko_point: board.ko_point(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    pub row: usize,
    pub col: usize,
    #[serde(default)]
    pub evaluation: f64,
    #[serde(default)]
    pub reasoning: Option<String>,
    /// Milliseconds spent by the remote engine
    #[serde(default)]
    pub compute_time: Option<u64>,
}

pub trait RemoteMoveService {
    /// Ask for a move. Only called while [`health`](Self::health) is true.
    fn request_move(&self, request: &MoveRequest) -> Result<MoveResponse, RemoteError>;

    fn health(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    Local,
    Remote,
}

/// A move proposed for the side to move, not yet played.
#[derive(Debug, Clone, PartialEq)]
pub struct AiMove {
    pub point: Point,
    pub score: f64,
    pub rationale: String,
    pub source: MoveSource,
    pub compute_time: Option<Duration>,
}

pub struct AiService {
    selector: MoveSelector,
    remote: Option<Box<dyn RemoteMoveService>>,
    pacer: Box<dyn Pacer>,
}

impl AiService {
    /// Local-only service that honours the profile's thinking time.
    pub fn new(selector: MoveSelector) -> Self {
        Self {
            selector,
            remote: None,
            pacer: Box::new(SleepPacer),
        }
    }

    pub fn with_remote(mut self, remote: Box<dyn RemoteMoveService>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn with_pacer(mut self, pacer: Box<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    /// Skip the artificial thinking time.
    pub fn without_delay(self) -> Self {
        self.with_pacer(Box::new(NoDelay))
    }

    pub fn selector(&self) -> &MoveSelector {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut MoveSelector {
        &mut self.selector
    }

    /// Propose a move for the side to move, or `None` if there is no legal
    /// placement.
    pub fn propose(&mut self, board: &BoardState) -> Option<AiMove> {
        if let Some(mv) = self.ask_remote(board) {
            return Some(mv);
        }
        match self.selector.decide(board, self.pacer.as_ref()) {
            Decision::Move(c) => Some(AiMove {
                point: c.point,
                rationale: c.rationale(),
                score: c.score,
                source: MoveSource::Local,
                compute_time: None,
            }),
            Decision::NoLegalMove => None,
        }
    }

    fn ask_remote(&self, board: &BoardState) -> Option<AiMove> {
        let remote = self.remote.as_ref()?;
        if !remote.health() {
            warn!("remote service reports unhealthy; falling back to local AI");
            return None;
        }
        let request = MoveRequest::from_board(board, self.selector.profile().difficulty());
        let reply = match remote.request_move(&request) {
            Ok(reply) => reply,
            Err(e) => {
                warn!("{e}; falling back to local AI");
                return None;
            }
        };
        let point = (reply.row, reply.col);
        if let Err(e) = board.check_legal(point) {
            warn!("remote suggested {point:?} ({e}); falling back to local AI");
            return None;
        }
        Some(AiMove {
            point,
            score: reply.evaluation,
            rationale: reply.reasoning.unwrap_or_else(|| "remote suggestion".to_string()),
            source: MoveSource::Remote,
            compute_time: reply.compute_time.map(Duration::from_millis),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    struct Down;
    impl RemoteMoveService for Down {
        fn request_move(&self, _: &MoveRequest) -> Result<MoveResponse, RemoteError> {
            Err(RemoteError::Status(503))
        }
        fn health(&self) -> bool {
            false
        }
    }

    struct Fixed(usize, usize);
    impl RemoteMoveService for Fixed {
        fn request_move(&self, _: &MoveRequest) -> Result<MoveResponse, RemoteError> {
            Ok(MoveResponse {
                row: self.0,
                col: self.1,
                evaluation: 0.7,
                reasoning: Some("joseki".into()),
                compute_time: Some(120),
            })
        }
    }

    /// Healthy only while `up` is set; counts move requests.
    struct Flaky {
        up: bool,
        requests: Rc<Cell<u32>>,
    }
    impl RemoteMoveService for Flaky {
        fn request_move(&self, _: &MoveRequest) -> Result<MoveResponse, RemoteError> {
            self.requests.set(self.requests.get() + 1);
            Ok(MoveResponse {
                row: 2,
                col: 6,
                evaluation: 0.0,
                reasoning: None,
                compute_time: None,
            })
        }
        fn health(&self) -> bool {
            self.up
        }
    }

    fn service(seed: u64) -> AiService {
        AiService::new(MoveSelector::with_seed(Difficulty::Easy.profile(), seed)).without_delay()
    }

    #[test]
    fn test_local_only() {
        let board = BoardState::new(9);
        let mv = service(1).propose(&board).unwrap();
        assert_eq!(mv.source, MoveSource::Local);
        assert!(board.is_legal(mv.point));
    }

    #[test]
    fn test_fallback_on_remote_error() {
        let board = BoardState::new(9);
        let remote = Down;
        assert!(!remote.health());
        let mut ai = service(2).with_remote(Box::new(remote));
        let mv = ai.propose(&board).unwrap();
        assert_eq!(mv.source, MoveSource::Local);
    }

    #[test]
    fn test_unhealthy_remote_is_not_asked() {
        let board = BoardState::new(9);
        let requests = Rc::new(Cell::new(0));

        let mut down = service(5).with_remote(Box::new(Flaky {
            up: false,
            requests: Rc::clone(&requests),
        }));
        assert_eq!(down.propose(&board).unwrap().source, MoveSource::Local);
        assert_eq!(requests.get(), 0);

        let mut up = service(5).with_remote(Box::new(Flaky {
            up: true,
            requests: Rc::clone(&requests),
        }));
        assert_eq!(up.propose(&board).unwrap().source, MoveSource::Remote);
        assert_eq!(requests.get(), 1);
    }

    #[test]
    fn test_remote_move_used_when_legal() {
        let board = BoardState::new(9);
        let mut ai = service(3).with_remote(Box::new(Fixed(2, 6)));
        let mv = ai.propose(&board).unwrap();
        assert_eq!(mv.source, MoveSource::Remote);
        assert_eq!(mv.point, (2, 6));
        assert_eq!(mv.rationale, "joseki");
        assert_eq!(mv.compute_time, Some(Duration::from_millis(120)));
    }

    #[test]
    fn test_illegal_remote_move_falls_back() {
        let mut board = BoardState::new(9);
        board.place_stone((2, 6)).unwrap();
        let mut ai = service(4).with_remote(Box::new(Fixed(2, 6)));
        let mv = ai.propose(&board).unwrap();
        assert_eq!(mv.source, MoveSource::Local);
        assert_ne!(mv.point, (2, 6));

        let mut off_board = service(4).with_remote(Box::new(Fixed(40, 0)));
        assert_eq!(off_board.propose(&board).unwrap().source, MoveSource::Local);
    }

    #[test]
    fn test_request_shape() {
        let mut board = BoardState::new(3);
        board.place_stone((0, 0)).unwrap();
        let req = MoveRequest::from_board(&board, Difficulty::Hard);
        assert_eq!(req.history.len(), 1);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["board"][0][0], 1);
        assert_eq!(json["currentPlayer"], 2);
        assert_eq!(json["level"], "HARD");
        assert_eq!(json["capturedStones"]["black"], 0);
        assert!(json["koPoint"].is_null());
    }

    #[test]
    fn test_history_window() {
        let mut board = BoardState::new(9);
        for pt in [(0, 0), (8, 8), (0, 2), (8, 6), (0, 4), (8, 4), (0, 6), (8, 2), (2, 0), (6, 0), (2, 8), (6, 8)] {
            board.place_stone(pt).unwrap();
        }
        let req = MoveRequest::from_board(&board, Difficulty::Easy);
        assert_eq!(req.history.len(), REMOTE_HISTORY_WINDOW);
    }

    #[test]
    fn test_response_defaults() {
        let reply: MoveResponse = serde_json::from_str(r#"{"row":3,"col":4}"#).unwrap();
        assert_eq!(reply.evaluation, 0.0);
        assert!(reply.reasoning.is_none());
        let err: RemoteError = serde_json::from_str::<MoveResponse>("{").unwrap_err().into();
        assert!(matches!(err, RemoteError::Malformed(_)));
    }
}
