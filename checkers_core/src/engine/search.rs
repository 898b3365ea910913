use crate::engine::config::EngineConfig;
use crate::engine::eval::state_value;
use crate::engine::{Evaluator, PlayOutcome, SearchStats};
use crate::logic::board::{Board, Player, Position};
use crate::logic::generator::{MoveEntry, MoveGenerator};
use crate::logic::rules::MoveError;
use crate::logic::state_counter::StateCounter;
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Instant;

pub const SCORE_INFINITY: i32 = i32::MAX;

/// Parameters fixed for the whole of one search.
#[derive(Clone, Copy)]
pub struct SearchContext<'a> {
    pub maximizer: Player,
    pub depth_limit: u8,
    pub evaluator: &'a dyn Evaluator,
}

/// Minimax with alpha-beta pruning over a single board that is mutated in
/// place and restored after every child.
pub struct MinimaxEngine {
    config: Arc<EngineConfig>,
    generator: MoveGenerator,
    rng: Option<StdRng>,
    nodes_searched: u32,
}

impl MinimaxEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            config,
            generator: MoveGenerator::new(),
            rng: None,
            nodes_searched: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Full-window search from depth 0 with `active` to move.
    pub fn search(
        &mut self,
        board: &mut Board,
        ctx: &SearchContext<'_>,
        active: Player,
    ) -> Result<i32, MoveError> {
        self.alpha_beta(board, ctx, active, 0, -SCORE_INFINITY, SCORE_INFINITY, None)
    }

    /// Value of `board` for `ctx.maximizer` with `active` to move. When
    /// `forced` is given only those moves are tried; this is how a capture
    /// chain keeps the same side on move. The board is restored before
    /// returning, errors included.
    #[allow(clippy::too_many_arguments)]
    pub fn alpha_beta(
        &mut self,
        board: &mut Board,
        ctx: &SearchContext<'_>,
        active: Player,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        forced: Option<Vec<MoveEntry>>,
    ) -> Result<i32, MoveError> {
        self.nodes_searched = self.nodes_searched.saturating_add(1);

        let mut moves = forced.unwrap_or_else(|| self.generator.moves_for(board, active));
        if moves.is_empty() || depth >= ctx.depth_limit {
            return Ok(ctx.evaluator.evaluate(board, ctx.maximizer));
        }

        let maximizing = active == ctx.maximizer;
        let mut best_score = if maximizing {
            -SCORE_INFINITY
        } else {
            SCORE_INFINITY
        };

        // Pieces with fewer destinations first.
        moves.sort_by_key(|entry| entry.targets.len());

        'origins: for entry in &moves {
            for (from, to) in entry.pairs() {
                let outcome = board.apply(from, to)?;

                let continuation = if outcome.can_chain {
                    self.generator.captures_from(board, to)
                } else {
                    Vec::new()
                };
                let child = if continuation.is_empty() {
                    self.alpha_beta(board, ctx, active.opposite(), depth + 1, alpha, beta, None)
                } else {
                    let chain = vec![MoveEntry::new(to, continuation)];
                    self.alpha_beta(board, ctx, active, depth + 1, alpha, beta, Some(chain))
                };

                board.revoke(from, to, outcome);
                let score = child?;

                if maximizing {
                    best_score = best_score.max(score);
                    alpha = alpha.max(best_score);
                } else {
                    best_score = best_score.min(score);
                    beta = beta.min(best_score);
                }

                if alpha >= beta {
                    trace!("cutoff at depth {depth} after {from} -> {to}");
                    break 'origins;
                }
            }
        }

        Ok(best_score)
    }

    /// Picks and plays the best move for `player`, continuing any capture
    /// chain it starts. Returns `has_further_play == false` when `player`
    /// has no legal move.
    pub fn play_best_move(
        &mut self,
        board: &mut Board,
        counter: &mut StateCounter,
        player: Player,
        depth_limit: u8,
        evaluator: &dyn Evaluator,
    ) -> Result<PlayOutcome, MoveError> {
        let start = Instant::now();
        self.nodes_searched = 0;
        self.rng = self.config.shuffle_seed.map(StdRng::seed_from_u64);

        let ctx = SearchContext {
            maximizer: player,
            depth_limit,
            evaluator,
        };
        let mut moves_played = Vec::new();
        let (has_further_play, reset_draw_counter) =
            self.play_turn(board, counter, &ctx, None, &mut moves_played)?;

        let stats = SearchStats {
            depth: depth_limit,
            nodes: self.nodes_searched,
            time_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        };
        debug!("search stats: {stats:?}");

        Ok(PlayOutcome {
            has_further_play,
            reset_draw_counter,
            moves_played,
            stats,
        })
    }

    fn play_turn(
        &mut self,
        board: &mut Board,
        counter: &mut StateCounter,
        ctx: &SearchContext<'_>,
        forced: Option<Vec<MoveEntry>>,
        moves_played: &mut Vec<(Position, Position)>,
    ) -> Result<(bool, bool), MoveError> {
        let player = ctx.maximizer;
        let moves = forced.unwrap_or_else(|| self.generator.moves_for(board, player));
        if moves.is_empty() {
            info!("{} has no legal move, {} wins", player, player.opposite());
            return Ok((false, false));
        }

        counter.record(board);

        let mut candidates: Vec<(Position, Position)> =
            moves.iter().flat_map(|entry| entry.pairs()).collect();
        if let Some(rng) = self.rng.as_mut() {
            candidates.shuffle(rng);
        }

        let penalty_scale = self.config.repetition_penalty_scale;
        let mut best: Option<(Position, Position, i32)> = None;
        for &(from, to) in &candidates {
            let outcome = board.apply(from, to)?;
            let searched = self.search(board, ctx, player.opposite());
            let penalty = state_value(board, counter, player);
            board.revoke(from, to, outcome);

            let score = searched?.saturating_add(penalty_scale.saturating_mul(penalty));
            debug!("{player} candidate {from} -> {to}: {score}");
            if best.map_or(true, |(_, _, best_score)| score > best_score) {
                best = Some((from, to, score));
            }
        }

        let Some((from, to, score)) = best else {
            return Ok((false, false));
        };
        info!("{player} plays {from} -> {to} (score {score})");
        let outcome = board.apply(from, to)?;
        moves_played.push((from, to));

        if outcome.can_chain {
            let captures = self.generator.captures_from(board, to);
            if !captures.is_empty() {
                info!("{player} continues the capture chain from {to}");
                let chain = vec![MoveEntry::new(to, captures)];
                self.play_turn(board, counter, ctx, Some(chain), moves_played)?;
            }
        }

        counter.record(board);
        Ok((true, outcome.is_capture()))
    }
}
