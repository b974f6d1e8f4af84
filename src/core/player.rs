//! The two seats of a match.
//!
//! `PlayerId::ONE` moves first and opens each round; `PlayerId::TWO` moves
//! second and its turn end closes the round. [`PlayerMap`] holds one value
//! per seat.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Number of seats in a match.
pub const SEAT_COUNT: usize = 2;

/// A seat at the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The seat that moves first.
    pub const ONE: PlayerId = PlayerId(0);
    /// The seat that moves second.
    pub const TWO: PlayerId = PlayerId(1);

    /// 0 for seat one, 1 for seat two.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - (self.0 & 1))
    }

    /// Both seats in turn order.
    ///
    /// ```
    /// use mythic_triad::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all().collect();
    /// assert_eq!(seats, vec![PlayerId::ONE, PlayerId::TWO]);
    /// ```
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..SEAT_COUNT as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// One value per seat, indexable by [`PlayerId`].
///
/// ```
/// use mythic_triad::core::{PlayerId, PlayerMap};
///
/// let mut cells = PlayerMap::from_pair(0u32, 0u32);
/// cells[PlayerId::TWO] += 3;
/// assert_eq!(cells.totals(), (0, 3));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; SEAT_COUNT],
}

impl<T> PlayerMap<T> {
    /// Seat one's value first.
    pub fn from_pair(first: T, second: T) -> Self {
        Self {
            data: [first, second],
        }
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Seats in turn order with their values.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all().zip(self.data.iter())
    }

    /// Both values as a `(seat one, seat two)` tuple.
    #[must_use]
    pub fn totals(&self) -> (T, T)
    where
        T: Copy,
    {
        (self.data[0], self.data[1])
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
