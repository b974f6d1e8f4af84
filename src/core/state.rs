//! Match state.
//!
//! ## MatchState
//!
//! Everything about one match:
//! - Both seats (hand, deck, discard pile, score)
//! - The board and the hydration cache of every card in play
//! - Turn, status and winner
//! - The match random source and event clock
//! - The outbound analytics queue
//!
//! All collections are `im` persistent structures, so cloning a state is
//! O(1). The engine clones before every operation and commits only on
//! success; the lookahead clones once per speculative branch.
//!
//! State is only mutated through [`MatchEngine`](crate::rules::MatchEngine)
//! and the ability context. Fields are public for inspection and for
//! building test positions.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::entity::InstanceId;
use super::error::{CardDataError, EngineError, EngineResult};
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::board::{Board, BoardQuery};
use crate::cards::InGameCard;
use crate::outbound::AnalyticsEvent;
use crate::triggers::{EventKind, GameEvent};

/// The hydration cache: every card reachable from a hand, deck or the board.
pub type CardArena = OrdMap<InstanceId, InGameCard>;

/// Whether the match still accepts actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    Active,
    Completed,
}

/// One seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub user_id: String,

    /// Draw order. Display-only.
    pub hand: Vector<InstanceId>,

    /// Front is the next draw.
    pub deck: Vector<InstanceId>,

    pub discard_pile: Vector<InstanceId>,

    /// Board cells this seat owns. Recomputed after every placement.
    pub score: u32,
}

impl Player {
    /// Create a seat with a deck and empty hand.
    #[must_use]
    pub fn new(user_id: impl Into<String>, deck: impl IntoIterator<Item = InstanceId>) -> Self {
        Self {
            user_id: user_id.into(),
            hand: Vector::new(),
            deck: deck.into_iter().collect(),
            discard_pile: Vector::new(),
            score: 0,
        }
    }

    #[must_use]
    pub fn hand_contains(&self, card: InstanceId) -> bool {
        self.hand.iter().any(|c| *c == card)
    }

    /// Check if this seat has nothing left to place.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.hand.is_empty() && self.deck.is_empty()
    }
}

/// Complete state of one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    // === Seats ===
    pub players: PlayerMap<Player>,

    // === Board ===
    pub board: Board,

    pub cards: CardArena,

    // === Progression ===
    pub current_player: PlayerId,

    /// Starts at 1, increments once per completed turn.
    pub turn_number: u32,

    pub status: MatchStatus,

    /// `None` while active or after a draw.
    pub winner: Option<PlayerId>,

    // === Limits ===
    pub max_cards_in_hand: usize,

    pub max_chain_depth: u32,

    pub event_batch_size: usize,

    // === Bookkeeping ===
    pub rng: GameRng,

    next_seq: u64,

    outbound: Vector<AnalyticsEvent>,

    /// Accepted actions, oldest first.
    pub history: Vector<ActionRecord>,
}

impl MatchState {
    /// Create an active match on turn 1 with seat one to move.
    ///
    /// Hands, decks and the card cache are filled in by the caller;
    /// [`MatchEngine::initialize`](crate::rules::MatchEngine::initialize)
    /// is the normal way to build a match.
    #[must_use]
    pub fn new(players: PlayerMap<Player>, rng: GameRng) -> Self {
        Self {
            players,
            board: Board::new(),
            cards: CardArena::new(),
            current_player: PlayerId::ONE,
            turn_number: 1,
            status: MatchStatus::Active,
            winner: None,
            max_cards_in_hand: 5,
            max_chain_depth: 8,
            event_batch_size: 6,
            rng,
            next_seq: 0,
            outbound: Vector::new(),
            history: Vector::new(),
        }
    }

    // === Seats ===

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &Player {
        &self.players[player]
    }

    pub fn player_mut(&mut self, player: PlayerId) -> &mut Player {
        &mut self.players[player]
    }

    /// Resolve a user id to its seat.
    pub fn seat_of(&self, user_id: &str) -> EngineResult<PlayerId> {
        self.players
            .iter()
            .find(|(_, player)| player.user_id == user_id)
            .map(|(seat, _)| seat)
            .ok_or_else(|| EngineError::UnknownUser(user_id.to_string()))
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == MatchStatus::Active
    }

    /// Scores as `(seat one, seat two)`.
    #[must_use]
    pub fn scores(&self) -> (u32, u32) {
        (self.players[PlayerId::ONE].score, self.players[PlayerId::TWO].score)
    }

    // === Cards ===

    #[must_use]
    pub fn card(&self, id: InstanceId) -> Option<&InGameCard> {
        self.cards.get(&id)
    }

    pub fn card_mut(&mut self, id: InstanceId) -> Option<&mut InGameCard> {
        self.cards.get_mut(&id)
    }

    /// A card that must be hydrated.
    pub fn hydrated(&self, id: InstanceId) -> Result<&InGameCard, CardDataError> {
        self.cards.get(&id).ok_or(CardDataError::NotHydrated(id))
    }

    /// Read-only board queries.
    #[must_use]
    pub fn query(&self) -> BoardQuery<'_> {
        BoardQuery::new(&self.board, &self.cards)
    }

    /// Recompute `current_power` for every card on the board.
    pub fn recompute_board_power(&mut self) {
        let on_board: Vec<_> = self.board.occupied().map(|(_, id)| id).collect();
        self.recompute(&on_board);
    }

    /// Recompute `current_power` for every card in both hands.
    pub fn recompute_hand_power(&mut self) {
        let in_hand: Vec<_> = self
            .players
            .iter()
            .flat_map(|(_, player)| player.hand.iter().copied())
            .collect();
        self.recompute(&in_hand);
    }

    fn recompute(&mut self, ids: &[InstanceId]) {
        for id in ids {
            if let Some(card) = self.cards.get_mut(id) {
                card.recompute_power();
            }
        }
    }

    /// Set both scores to the number of cells each seat owns.
    pub fn recompute_scores(&mut self) {
        for seat in PlayerId::all() {
            let owned = self.query().owned_count(seat);
            self.players[seat].score = u32::try_from(owned).unwrap_or(u32::MAX);
        }
    }

    // === Hand, deck and discard ===

    /// Move the top of `player`'s deck into their hand, if there is room.
    pub fn draw_into_hand(&mut self, player: PlayerId) -> Option<InstanceId> {
        let max = self.max_cards_in_hand;
        let seat = &mut self.players[player];
        if seat.hand.len() >= max {
            return None;
        }
        let card = seat.deck.pop_front()?;
        seat.hand.push_back(card);
        Some(card)
    }

    /// Remove a card from `player`'s hand. Returns false if it was not there.
    pub fn remove_from_hand(&mut self, player: PlayerId, card: InstanceId) -> bool {
        let hand = &mut self.players[player].hand;
        match hand.index_of(&card) {
            Some(index) => {
                hand.remove(index);
                true
            }
            None => false,
        }
    }

    /// Move the hand card at `index` to the discard pile.
    pub fn discard_at(&mut self, player: PlayerId, index: usize) -> EngineResult<InstanceId> {
        let seat = &mut self.players[player];
        let len = seat.hand.len();
        if len == 0 {
            return Err(EngineError::EmptyHand(player));
        }
        if index >= len {
            return Err(EngineError::InvalidDiscardIndex { index, len });
        }
        let card = seat.hand.remove(index);
        seat.discard_pile.push_back(card);
        Ok(card)
    }

    /// Locate a card in a hand.
    #[must_use]
    pub fn hand_holding(&self, card: InstanceId) -> Option<PlayerId> {
        PlayerId::all().find(|seat| self.players[*seat].hand_contains(card))
    }

    /// Check that every card in a hand, deck or on the board is hydrated.
    pub fn check_hydration(&self) -> Result<(), CardDataError> {
        let in_zones = self.players.iter().flat_map(|(_, player)| {
            player.hand.iter().chain(player.deck.iter()).copied()
        });
        let on_board = self.board.occupied().map(|(_, id)| id);
        match in_zones.chain(on_board).find(|id| !self.cards.contains_key(id)) {
            Some(missing) => Err(CardDataError::NotHydrated(missing)),
            None => Ok(()),
        }
    }

    // === Events ===

    /// Create an event stamped with the next logical timestamp and
    /// attributed to the current player.
    pub fn event(&mut self, kind: EventKind) -> GameEvent {
        let seq = self.next_seq;
        self.next_seq += 1;
        GameEvent::new(seq, kind).with_player(self.current_player)
    }

    /// Timestamp the next event will receive.
    #[must_use]
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    // === Outbound ===

    /// Queue a best-effort analytics event for the caller to deliver.
    pub fn track(&mut self, event: AnalyticsEvent) {
        self.outbound.push_back(event);
    }

    /// Take every queued analytics event.
    pub fn drain_outbound(&mut self) -> Vec<AnalyticsEvent> {
        std::mem::take(&mut self.outbound).into_iter().collect()
    }

    #[must_use]
    pub fn pending_outbound(&self) -> usize {
        self.outbound.len()
    }

    // === Encoding ===

    /// Canonical binary encoding, used to compare states byte for byte.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }
}
