//! Board cells and tile effects.

use serde::{Deserialize, Serialize};

use super::position::{BoardPosition, CELL_COUNT};
use crate::core::{InstanceId, PlayerId};
use crate::effects::PowerDelta;

/// Status a tile effect puts on a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileStatus {
    /// No card may be placed here until the effect expires.
    Blocked,
    /// The tile is gone until the effect expires.
    Removed,
    /// A negative power transfer waits for the next card placed here.
    Cursed,
    /// A positive power transfer waits for the next card placed here.
    Boosted,
}

/// A timed status on a cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileEffect {
    pub status: TileStatus,

    /// Turns remaining. The tile resets to plain when this reaches 0.
    pub turns_left: u32,

    /// Power handed to the next card placed on the tile.
    #[serde(default)]
    pub power: PowerDelta,

    /// Only cards placed by this seat receive the power.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applies_to: Option<PlayerId>,

    /// Opaque presentation hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<String>,
}

impl TileEffect {
    /// Create a tile effect with no power transfer.
    #[must_use]
    pub fn new(status: TileStatus, turns_left: u32) -> Self {
        Self {
            status,
            turns_left,
            power: PowerDelta::default(),
            applies_to: None,
            animation: None,
        }
    }

    /// Set the power transfer (builder pattern).
    #[must_use]
    pub fn with_power(mut self, power: PowerDelta) -> Self {
        self.power = power;
        self
    }

    /// Restrict the power transfer to one seat (builder pattern).
    #[must_use]
    pub fn for_player(mut self, player: PlayerId) -> Self {
        self.applies_to = Some(player);
        self
    }

    /// Set the presentation hint (builder pattern).
    #[must_use]
    pub fn with_animation(mut self, animation: impl Into<String>) -> Self {
        self.animation = Some(animation.into());
        self
    }

    /// Check if this effect keeps cards off the cell.
    #[must_use]
    pub fn forbids_cards(&self) -> bool {
        matches!(self.status, TileStatus::Blocked | TileStatus::Removed)
    }

    /// Check if a card placed by `player` would receive the power.
    #[must_use]
    pub fn transfers_to(&self, player: PlayerId) -> bool {
        !self.power.is_zero() && self.applies_to.map_or(true, |seat| seat == player)
    }
}

/// One board cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub card: Option<InstanceId>,
    pub tile_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_effect: Option<TileEffect>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            card: None,
            tile_enabled: true,
            tile_effect: None,
        }
    }
}

impl Cell {
    /// Check if a card could be placed here (ignoring occupancy).
    #[must_use]
    pub fn can_hold_card(&self) -> bool {
        self.tile_enabled && !self.tile_effect.as_ref().is_some_and(TileEffect::forbids_cards)
    }

    /// Check if the cell is out of play: disabled or removed.
    ///
    /// Cards on disabled cells do not take part in combat.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        !self.tile_enabled
            || self
                .tile_effect
                .as_ref()
                .is_some_and(|effect| effect.status == TileStatus::Removed)
    }

    /// Check if a card could be placed here right now.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.card.is_none() && self.can_hold_card()
    }

    #[must_use]
    pub fn status(&self) -> Option<TileStatus> {
        self.tile_effect.as_ref().map(|effect| effect.status)
    }
}

/// The 4x4 grid.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with every tile enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::default(); CELL_COUNT],
        }
    }

    #[must_use]
    pub fn cell(&self, pos: BoardPosition) -> &Cell {
        &self.cells[pos.index()]
    }

    pub fn cell_mut(&mut self, pos: BoardPosition) -> &mut Cell {
        &mut self.cells[pos.index()]
    }

    /// The card on `pos`, if any.
    #[must_use]
    pub fn card_at(&self, pos: BoardPosition) -> Option<InstanceId> {
        self.cell(pos).card
    }

    /// Find where a card sits.
    #[must_use]
    pub fn position_of(&self, card: InstanceId) -> Option<BoardPosition> {
        self.cells
            .iter()
            .position(|cell| cell.card == Some(card))
            .and_then(BoardPosition::from_index)
    }

    /// Put a card on an open cell. Returns false (and changes nothing) if
    /// the cell is occupied or cannot hold a card.
    pub fn place(&mut self, pos: BoardPosition, card: InstanceId) -> bool {
        let cell = self.cell_mut(pos);
        if !cell.is_open() {
            return false;
        }
        cell.card = Some(card);
        true
    }

    /// Lift the card off a cell.
    pub fn take(&mut self, pos: BoardPosition) -> Option<InstanceId> {
        self.cell_mut(pos).card.take()
    }

    /// Positions that could receive a card right now, row-major.
    pub fn open_positions(&self) -> impl Iterator<Item = BoardPosition> + '_ {
        BoardPosition::all().filter(|pos| self.cell(*pos).is_open())
    }

    /// Occupied positions with their cards, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (BoardPosition, InstanceId)> + '_ {
        BoardPosition::all().filter_map(|pos| self.card_at(pos).map(|card| (pos, card)))
    }

    /// Number of cards on the board.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.card.is_some()).count()
    }

    /// Check if every cell holds a card or is permanently disabled.
    ///
    /// Blocked and removed tiles come back when their effect decays, so
    /// they do not make the board full.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.card.is_some() || !cell.tile_enabled)
    }

    /// Put a tile effect on a cell, replacing any previous one.
    pub fn set_tile_effect(&mut self, pos: BoardPosition, effect: TileEffect) {
        self.cell_mut(pos).tile_effect = Some(effect);
    }

    /// Advance every tile effect by one turn.
    ///
    /// Effects reaching zero are cleared; `tile_enabled` is left as it was.
    /// Returns the positions that were reset together with the status they lost.
    pub fn decay_tiles(&mut self) -> Vec<(BoardPosition, TileStatus)> {
        let mut reset = Vec::new();
        for (index, cell) in self.cells.iter_mut().enumerate() {
            let expired = match cell.tile_effect.as_mut() {
                Some(effect) => {
                    effect.turns_left = effect.turns_left.saturating_sub(1);
                    effect.turns_left == 0
                }
                None => false,
            };
            if expired {
                if let (Some(effect), Some(pos)) =
                    (cell.tile_effect.take(), BoardPosition::from_index(index))
                {
                    reset.push((pos, effect.status));
                }
            }
        }
        reset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocked_cells_refuse_cards() {
        let mut board = Board::new();
        let pos = BoardPosition::new(2, 2);
        board.set_tile_effect(pos, TileEffect::new(TileStatus::Blocked, 2));

        assert!(!board.cell(pos).can_hold_card());
        assert!(!board.place(pos, InstanceId(1)));
        assert_eq!(board.card_at(pos), None);
        assert_eq!(board.open_positions().count(), CELL_COUNT - 1);
    }

    #[test]
    fn test_disabled_tile() {
        let mut board = Board::new();
        let pos = BoardPosition::new(0, 3);
        board.cell_mut(pos).tile_enabled = false;
        assert!(board.cell(pos).is_disabled());
        assert!(!board.place(pos, InstanceId(1)));
    }

    #[test]
    fn test_cursed_and_boosted_cells_accept_cards() {
        let mut board = Board::new();
        let pos = BoardPosition::new(1, 1);
        board.set_tile_effect(
            pos,
            TileEffect::new(TileStatus::Cursed, 3).with_power(PowerDelta::uniform(-1)),
        );
        assert!(board.place(pos, InstanceId(7)));
        assert_eq!(board.position_of(InstanceId(7)), Some(pos));
        assert!(!board.place(pos, InstanceId(8)));
    }

    #[test]
    fn test_decay_resets_tile() {
        let mut board = Board::new();
        let pos = BoardPosition::new(3, 0);
        board.set_tile_effect(pos, TileEffect::new(TileStatus::Removed, 2));

        assert!(board.decay_tiles().is_empty());
        assert!(board.cell(pos).is_disabled());

        assert_eq!(board.decay_tiles(), vec![(pos, TileStatus::Removed)]);
        assert_eq!(board.cell(pos), &Cell::default());
    }

    #[test]
    fn test_full_board_ignores_temporary_blocks() {
        let mut board = Board::new();
        for (i, pos) in BoardPosition::all().enumerate() {
            if i == 0 {
                board.set_tile_effect(pos, TileEffect::new(TileStatus::Blocked, 5));
            } else {
                assert!(board.place(pos, InstanceId(i as u32)));
            }
        }
        assert!(!board.is_full());
        assert_eq!(board.open_positions().count(), 0);

        board.cell_mut(BoardPosition::new(0, 0)).tile_enabled = false;
        assert!(board.is_full());
        assert_eq!(board.occupied_count(), CELL_COUNT - 1);
    }

    #[test]
    fn test_transfer_restriction() {
        let effect = TileEffect::new(TileStatus::Boosted, 2)
            .with_power(PowerDelta::uniform(1))
            .for_player(PlayerId::TWO);
        assert!(effect.transfers_to(PlayerId::TWO));
        assert!(!effect.transfers_to(PlayerId::ONE));
        assert!(!TileEffect::new(TileStatus::Blocked, 1).transfers_to(PlayerId::ONE));
    }

    #[test]
    fn test_expiry_keeps_permanent_disable() {
        let mut board = Board::new();
        let pos = BoardPosition::new(3, 0);
        board.cell_mut(pos).tile_enabled = false;
        board.set_tile_effect(pos, TileEffect::new(TileStatus::Cursed, 1));

        assert_eq!(board.decay_tiles(), vec![(pos, TileStatus::Cursed)]);
        assert!(board.cell(pos).tile_effect.is_none());
        assert!(board.cell(pos).is_disabled());
        assert!(!board.cell(pos).can_hold_card());
    }
}
