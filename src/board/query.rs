//! Read-only board queries.
//!
//! [`BoardQuery`] borrows the board together with the hydration cache and
//! answers the geometric and relational questions abilities and combat
//! ask: who is adjacent, who is an enemy, who is strongest. Nothing here
//! mutates; callers apply changes through the match state.
//!
//! ## Iteration order
//!
//! Every query that returns more than one result follows the adjacency
//! order (up, right, down, left) or row-major board order. Tie-breaks are
//! "first encountered wins", so results never depend on hash order.

use smallvec::SmallVec;

use super::cell::Board;
use super::position::{BoardPosition, Direction};
use crate::cards::InGameCard;
use crate::core::{CardArena, PlayerId};

/// Ownership relation relative to a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Relation {
    Ally,
    Enemy,
}

/// Filter for card queries. The default matches every occupied cell.
///
/// ```
/// use mythic_triad::board::CardFilter;
/// use mythic_triad::core::PlayerId;
///
/// let filter = CardFilter::enemies_of(PlayerId::ONE).with_tag("Norse");
/// assert!(!filter.include_empty);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardFilter {
    pub relation: Option<(Relation, PlayerId)>,
    pub tag: Option<String>,
    pub name: Option<String>,
    /// Also yield empty cells (which bypass the card filters).
    pub include_empty: bool,
}

impl CardFilter {
    /// Match every card.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Cards owned by `player`.
    #[must_use]
    pub fn allies_of(player: PlayerId) -> Self {
        Self {
            relation: Some((Relation::Ally, player)),
            ..Self::default()
        }
    }

    /// Cards not owned by `player`.
    #[must_use]
    pub fn enemies_of(player: PlayerId) -> Self {
        Self {
            relation: Some((Relation::Enemy, player)),
            ..Self::default()
        }
    }

    /// Require a tag (builder pattern).
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Require an exact card name (builder pattern).
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Also yield empty cells (builder pattern).
    #[must_use]
    pub fn including_empty(mut self) -> Self {
        self.include_empty = true;
        self
    }

    /// Check a card against the filter.
    #[must_use]
    pub fn matches(&self, card: &InGameCard) -> bool {
        let relation_ok = match self.relation {
            Some((Relation::Ally, player)) => card.owner == player,
            Some((Relation::Enemy, player)) => card.owner != player,
            None => true,
        };
        relation_ok
            && self.tag.as_deref().map_or(true, |tag| card.has_tag(tag))
            && self.name.as_deref().map_or(true, |name| card.name() == name)
    }
}

/// A position and what stands on it.
#[derive(Clone, Copy, Debug)]
pub struct CellView<'a> {
    pub position: BoardPosition,
    pub card: Option<&'a InGameCard>,
}

/// Read-only view over the board and the cards on it.
#[derive(Clone, Copy)]
pub struct BoardQuery<'a> {
    board: &'a Board,
    cards: &'a CardArena,
}

impl<'a> BoardQuery<'a> {
    /// Create a query view.
    #[must_use]
    pub fn new(board: &'a Board, cards: &'a CardArena) -> Self {
        Self { board, cards }
    }

    #[must_use]
    pub fn board(&self) -> &'a Board {
        self.board
    }

    /// The card on `pos`, resolved through the hydration cache.
    #[must_use]
    pub fn card_at(&self, pos: BoardPosition) -> Option<&'a InGameCard> {
        self.board.card_at(pos).and_then(|id| self.cards.get(&id))
    }

    /// Orthogonal in-bounds neighbors, up/right/down/left.
    #[must_use]
    pub fn adjacent_positions(&self, pos: BoardPosition) -> SmallVec<[BoardPosition; 4]> {
        pos.adjacent().into_iter().map(|(_, p)| p).collect()
    }

    /// Diagonal in-bounds neighbors.
    #[must_use]
    pub fn diagonal_positions(&self, pos: BoardPosition) -> SmallVec<[BoardPosition; 4]> {
        pos.diagonals()
    }

    /// Resolve positions to cells, keeping those that pass `filter`.
    #[must_use]
    pub fn cards_at(
        &self,
        positions: impl IntoIterator<Item = BoardPosition>,
        filter: &CardFilter,
    ) -> Vec<CellView<'a>> {
        positions
            .into_iter()
            .filter_map(|position| match self.card_at(position) {
                Some(card) if filter.matches(card) => Some(CellView {
                    position,
                    card: Some(card),
                }),
                Some(_) => None,
                None if filter.include_empty => Some(CellView {
                    position,
                    card: None,
                }),
                None => None,
            })
            .collect()
    }

    /// Adjacent cards passing `filter`, in adjacency order.
    #[must_use]
    pub fn adjacent_cards(
        &self,
        pos: BoardPosition,
        filter: &CardFilter,
    ) -> Vec<(BoardPosition, &'a InGameCard)> {
        self.cards_at(self.adjacent_positions(pos), filter)
            .into_iter()
            .filter_map(|view| view.card.map(|card| (view.position, card)))
            .collect()
    }

    /// Adjacent cards owned by `player`.
    #[must_use]
    pub fn adjacent_allies(
        &self,
        pos: BoardPosition,
        player: PlayerId,
    ) -> Vec<(BoardPosition, &'a InGameCard)> {
        self.adjacent_cards(pos, &CardFilter::allies_of(player))
    }

    /// Adjacent cards not owned by `player`.
    #[must_use]
    pub fn adjacent_enemies(
        &self,
        pos: BoardPosition,
        player: PlayerId,
    ) -> Vec<(BoardPosition, &'a InGameCard)> {
        self.adjacent_cards(pos, &CardFilter::enemies_of(player))
    }

    /// Adjacent cells with no card that could still take one.
    #[must_use]
    pub fn adjacent_open(&self, pos: BoardPosition) -> Vec<BoardPosition> {
        self.adjacent_positions(pos)
            .into_iter()
            .filter(|p| self.board.cell(*p).is_open())
            .collect()
    }

    /// All board cards passing `filter`, row-major.
    #[must_use]
    pub fn all_cards(&self, filter: &CardFilter) -> Vec<(BoardPosition, &'a InGameCard)> {
        self.board
            .occupied()
            .filter_map(|(pos, id)| self.cards.get(&id).map(|card| (pos, card)))
            .filter(|(_, card)| filter.matches(card))
            .collect()
    }

    /// Number of board cells `player` owns.
    #[must_use]
    pub fn owned_count(&self, player: PlayerId) -> usize {
        self.all_cards(&CardFilter::allies_of(player)).len()
    }

    /// Check if at least two orthogonal neighbors are occupied.
    #[must_use]
    pub fn is_surrounded(&self, pos: BoardPosition) -> bool {
        self.adjacent_positions(pos)
            .into_iter()
            .filter(|p| self.board.card_at(*p).is_some())
            .count()
            >= 2
    }

    /// Check if `pos` sits between two enemies of `player`, either
    /// left/right or above/below.
    #[must_use]
    pub fn is_flanked_by_enemies(&self, pos: BoardPosition, player: PlayerId) -> bool {
        let is_enemy = |direction: Direction| {
            pos.neighbor(direction)
                .and_then(|p| self.card_at(p))
                .is_some_and(|card| card.owner != player)
        };
        (is_enemy(Direction::Left) && is_enemy(Direction::Right))
            || (is_enemy(Direction::Up) && is_enemy(Direction::Down))
    }

    /// The adjacent enemy with the highest total power.
    ///
    /// Ties go to the first in adjacency order.
    #[must_use]
    pub fn strongest_adjacent_enemy(
        &self,
        pos: BoardPosition,
        player: PlayerId,
    ) -> Option<(BoardPosition, &'a InGameCard)> {
        self.adjacent_enemies(pos, player)
            .into_iter()
            .fold(None, |best, candidate| match best {
                Some((_, card)) if card_total(card) >= card_total(candidate.1) => best,
                _ => Some(candidate),
            })
    }

    /// The adjacent enemy with the lowest total power.
    ///
    /// Ties go to the first in adjacency order.
    #[must_use]
    pub fn weakest_adjacent_enemy(
        &self,
        pos: BoardPosition,
        player: PlayerId,
    ) -> Option<(BoardPosition, &'a InGameCard)> {
        self.adjacent_enemies(pos, player)
            .into_iter()
            .fold(None, |best, candidate| match best {
                Some((_, card)) if card_total(card) <= card_total(candidate.1) => best,
                _ => Some(candidate),
            })
    }
}

fn card_total(card: &InGameCard) -> i32 {
    card.current_power.total()
}
