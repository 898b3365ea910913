use crate::engine::config::{ConfigError, EngineConfig};
use crate::engine::search::MinimaxEngine;
use crate::engine::{Evaluator, PlayOutcome};
use crate::logic::board::{Board, BoardError, Player, Position};
use crate::logic::generator::{MoveEntry, MoveGenerator, Targets};
use crate::logic::rules::{MoveError, MoveOutcome};
use crate::logic::state_counter::StateCounter;
use log::info;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DRAW_MOVE_LIMIT: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won(Player),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: Player,
    pub from: Position,
    pub to: Position,
    pub captured: bool,
    pub by_engine: bool,
}

/// One game: the board, its repetition counter and turn bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub state_counter: StateCounter,
    pub turn: Player,
    pub status: GameStatus,
    /// Moves since the last capture; reaching `draw_move_limit` draws.
    pub moves_without_capture: u32,
    pub draw_move_limit: u32,
    /// Square of a piece that must keep capturing before the turn passes.
    pub pending_chain: Option<Position>,
    pub history: Vec<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_board(Board::default(), Player::Black)
    }
}

impl GameState {
    /// Standard starting position, Black to move.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        Ok(Self::with_board(Board::new(size)?, Player::Black))
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut game = Self::new(config.board_size)?;
        game.draw_move_limit = config.draw_move_limit;
        Ok(game)
    }

    pub fn with_board(board: Board, turn: Player) -> Self {
        let mut game = Self {
            board,
            state_counter: StateCounter::new(),
            turn,
            status: GameStatus::Playing,
            moves_without_capture: 0,
            draw_move_limit: DEFAULT_DRAW_MOVE_LIMIT,
            pending_chain: None,
            history: Vec::new(),
        };
        game.update_status();
        game
    }

    pub fn snapshot(&self) -> Board {
        self.board.snapshot()
    }

    pub fn targets_from(&self, pos: Position) -> Targets {
        MoveGenerator::new().targets_from(&self.board, pos)
    }

    pub fn moves_for(&self, player: Player) -> Vec<MoveEntry> {
        MoveGenerator::new().moves_for(&self.board, player)
    }

    /// Moves available to the side to move. During a capture chain only the
    /// chaining piece's captures are allowed.
    pub fn legal_moves(&self) -> Vec<MoveEntry> {
        if self.status != GameStatus::Playing {
            return Vec::new();
        }
        match self.pending_chain {
            Some(pos) => {
                let captures = MoveGenerator::new().captures_from(&self.board, pos);
                vec![MoveEntry::new(pos, captures)]
            }
            None => self.moves_for(self.turn),
        }
    }

    pub fn is_legal(&self, from: Position, to: Position) -> bool {
        self.legal_moves()
            .iter()
            .any(|entry| entry.origin == from && entry.targets.contains(&to))
    }

    /// Plays one human move. A capture that can continue keeps the turn with
    /// `pending_chain` set to the landing square.
    pub fn make_move(&mut self, from: Position, to: Position) -> Result<MoveOutcome, MoveError> {
        if self.status != GameStatus::Playing {
            return Err(MoveError::GameOver);
        }
        if !self.is_legal(from, to) {
            return Err(MoveError::IllegalMove { from, to });
        }

        let outcome = self.board.apply(from, to)?;
        self.history.push(MoveRecord {
            player: self.turn,
            from,
            to,
            captured: outcome.is_capture(),
            by_engine: false,
        });
        self.count_move(outcome.is_capture());

        if outcome.can_chain
            && !MoveGenerator::new()
                .captures_from(&self.board, to)
                .is_empty()
        {
            self.pending_chain = Some(to);
            return Ok(outcome);
        }

        self.pending_chain = None;
        self.pass_turn();
        Ok(outcome)
    }

    /// Lets the engine play the whole turn for the side to move.
    pub fn play_engine_turn(
        &mut self,
        engine: &mut MinimaxEngine,
        evaluator: &dyn Evaluator,
    ) -> Result<PlayOutcome, MoveError> {
        if self.status != GameStatus::Playing {
            return Err(MoveError::GameOver);
        }
        if let Some(pos) = self.pending_chain {
            return Err(MoveError::ChainPending(pos));
        }

        let player = self.turn;
        let depth_limit = engine.config().depth_limit;
        let outcome = engine.play_best_move(
            &mut self.board,
            &mut self.state_counter,
            player,
            depth_limit,
            evaluator,
        )?;

        if !outcome.has_further_play {
            self.status = GameStatus::Won(player.opposite());
            return Ok(outcome);
        }

        self.history
            .extend(outcome.moves_played.iter().map(|&(from, to)| MoveRecord {
                player,
                from,
                to,
                captured: from.row_distance(to) == 2,
                by_engine: true,
            }));
        self.count_move(outcome.reset_draw_counter);
        self.pass_turn();
        Ok(outcome)
    }

    fn count_move(&mut self, captured: bool) {
        if captured {
            self.moves_without_capture = 0;
        } else {
            self.moves_without_capture += 1;
        }
    }

    fn pass_turn(&mut self) {
        self.turn = self.turn.opposite();
        self.update_status();
    }

    fn update_status(&mut self) {
        if self.moves_without_capture >= self.draw_move_limit {
            info!(
                "draw after {} moves without a capture",
                self.moves_without_capture
            );
            self.status = GameStatus::Draw;
        } else if !MoveGenerator::new().has_legal_moves(&self.board, self.turn) {
            info!("{} cannot move, {} wins", self.turn, self.turn.opposite());
            self.status = GameStatus::Won(self.turn.opposite());
        }
    }
}
