//! Iterative-deepening alpha-beta lookahead.
//!
//! Every speculative branch is a snapshot of the position: a clone of the
//! `MatchState` (structural sharing through `im`) whose random source is
//! replaced by a fork of the search's own. Moves are played through the
//! same [`RulesEngine`] path as a human move, so the lookahead sees exactly
//! the rules the server enforces and never touches the caller's state.
//!
//! ## Time budget
//!
//! The clock is checked at every node. When it runs out the current
//! iteration is abandoned and the answer of the deepest completed
//! iteration is returned. If not even depth 1 finished, the best action
//! seen so far is returned instead.

use std::time::{Duration, Instant};

use crate::core::{Action, GameRng, MatchState, PlayerId};
use crate::rules::RulesEngine;

use super::config::LookaheadConfig;
use super::eval::evaluate;
use super::stats::LookaheadStats;

struct Clock {
    start: Instant,
    budget: Option<Duration>,
}

impl Clock {
    fn expired(&self) -> bool {
        self.budget.is_some_and(|budget| self.start.elapsed() >= budget)
    }
}

/// Lookahead search context.
///
/// Generic over the rules engine type. Owns the configuration and the
/// random source handed to speculative branches.
pub struct LookaheadSearch<E: RulesEngine> {
    engine: E,
    config: LookaheadConfig,
    rng: GameRng,
    stats: LookaheadStats,
}

impl<E: RulesEngine> LookaheadSearch<E> {
    /// Create a new lookahead context.
    pub fn new(engine: E, config: LookaheadConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            engine,
            config,
            rng,
            stats: LookaheadStats::default(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &LookaheadConfig {
        &self.config
    }

    /// Statistics of the last decision.
    pub fn stats(&self) -> &LookaheadStats {
        &self.stats
    }

    /// Pick an action for `player`.
    ///
    /// Returns `None` if the seat has no legal action.
    pub fn best_action(&mut self, state: &MatchState, player: PlayerId) -> Option<Action> {
        self.stats.reset();
        let clock = Clock {
            start: Instant::now(),
            budget: (self.config.time_budget_ms > 0)
                .then(|| Duration::from_millis(self.config.time_budget_ms)),
        };

        let actions = self.candidates(state, player);
        let choice = match actions.len() {
            0 => None,
            1 => actions.into_iter().next(),
            _ => self.deepen(state, player, actions, &clock),
        };

        self.stats.elapsed_us = u64::try_from(clock.start.elapsed().as_micros()).unwrap_or(u64::MAX);
        log::debug!(
            "lookahead for {}: {:?} (depth {}, {} nodes, timed out: {})",
            player,
            choice,
            self.stats.completed_depth,
            self.stats.nodes,
            self.stats.timed_out
        );
        choice
    }

    fn deepen(
        &mut self,
        state: &MatchState,
        player: PlayerId,
        mut order: Vec<Action>,
        clock: &Clock,
    ) -> Option<Action> {
        let mut best = None;

        for depth in 1..=self.config.max_depth.max(1) {
            let mut alpha = i64::MIN;
            let mut leader: Option<Action> = None;
            let mut finished = true;

            for action in &order {
                let Some(branch) = self.speculate(state, player, action) else {
                    continue;
                };
                let Some(value) = self.minimax(&branch, depth - 1, alpha, i64::MAX, player, clock)
                else {
                    finished = false;
                    break;
                };
                if leader.is_none() || value > alpha {
                    alpha = value;
                    leader = Some(action.clone());
                }
            }

            if !finished {
                if best.is_none() {
                    best = leader;
                }
                break;
            }

            self.stats.completed_depth = depth;
            if let Some(action) = leader {
                // Search the previous answer first next time; it tightens alpha early.
                order.retain(|candidate| *candidate != action);
                order.insert(0, action.clone());
                best = Some(action);
            }
        }

        best.or_else(|| order.first().cloned())
    }

    fn minimax(
        &mut self,
        state: &MatchState,
        depth: u32,
        mut alpha: i64,
        mut beta: i64,
        me: PlayerId,
        clock: &Clock,
    ) -> Option<i64> {
        self.stats.nodes += 1;
        if clock.expired() {
            self.stats.timed_out = true;
            return None;
        }
        if depth == 0 || self.engine.is_terminal(state).is_some() {
            return Some(evaluate(state, me));
        }

        let to_move = self.engine.to_move(state);
        let maximizing = to_move == me;
        let mut best: Option<i64> = None;

        for action in self.candidates(state, to_move) {
            let Some(branch) = self.speculate(state, to_move, &action) else {
                continue;
            };
            let value = self.minimax(&branch, depth - 1, alpha, beta, me, clock)?;
            if maximizing {
                best = Some(best.map_or(value, |b| b.max(value)));
                alpha = alpha.max(value);
            } else {
                best = Some(best.map_or(value, |b| b.min(value)));
                beta = beta.min(value);
            }
            if alpha >= beta {
                break;
            }
        }

        Some(best.unwrap_or_else(|| evaluate(state, me)))
    }

    fn candidates(&self, state: &MatchState, player: PlayerId) -> Vec<Action> {
        let mut actions = self.engine.legal_actions(state, player);
        if self.config.max_branching > 0 {
            actions.truncate(self.config.max_branching);
        }
        actions
    }

    /// Play `action` on a snapshot of `state`.
    fn speculate(&mut self, state: &MatchState, player: PlayerId, action: &Action) -> Option<MatchState> {
        let mut branch = state.clone();
        branch.rng = self.rng.fork();
        match self.engine.apply_action(&mut branch, player, action) {
            Ok(_) => Some(branch),
            Err(err) => {
                log::trace!("lookahead skips {:?}: {}", action, err);
                None
            }
        }
    }
}
