//! Player identification and per-player data storage.
//!
//! Cassino is strictly a two-player game, so `PlayerId` admits exactly
//! two values and `PlayerPair` stores one entry per seat with O(1)
//! access. `opponent()` gives the binary turn flip the round controller
//! relies on.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two seats. Seat indices are 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    /// The first player (dealt to first, acts first).
    pub const ZERO: PlayerId = PlayerId(0);

    /// The second player.
    pub const ONE: PlayerId = PlayerId(1);

    /// Both seats, in seat order.
    pub const BOTH: [PlayerId; 2] = [PlayerId::ZERO, PlayerId::ONE];

    /// Create a player ID from a raw seat index.
    ///
    /// Panics if `id` is not 0 or 1; use [`PlayerId::try_new`] for
    /// untrusted input.
    #[must_use]
    pub fn new(id: u8) -> Self {
        Self::try_new(id).expect("Cassino has exactly 2 players")
    }

    /// Create a player ID from untrusted input.
    #[must_use]
    pub const fn try_new(id: u8) -> Option<Self> {
        match id {
            0 | 1 => Some(Self(id)),
            _ => None,
        }
    }

    /// Raw seat index (0 or 1).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        PlayerId::try_new(id).ok_or_else(|| format!("invalid player index {id}"))
    }
}

impl From<PlayerId> for u8 {
    fn from(id: PlayerId) -> u8 {
        id.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use cassino_engine::core::{PlayerId, PlayerPair};
///
/// let mut piles: PlayerPair<Vec<u8>> = PlayerPair::default();
/// piles[PlayerId::ZERO].push(7);
///
/// assert_eq!(piles[PlayerId::ZERO], vec![7]);
/// assert!(piles[PlayerId::ONE].is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPair<T> {
    data: [T; 2],
}

impl<T: Default> Default for PlayerPair<T> {
    fn default() -> Self {
        Self::new(|_| T::default())
    }
}

impl<T> PlayerPair<T> {
    /// Create a pair with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::ZERO), factory(PlayerId::ONE)],
        }
    }

    /// Create a pair with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::BOTH.into_iter().zip(self.data.iter())
    }

    /// Map both entries, preserving seat order.
    pub fn map<U>(&self, f: impl Fn(PlayerId, &T) -> U) -> PlayerPair<U> {
        PlayerPair {
            data: [
                f(PlayerId::ZERO, &self.data[0]),
                f(PlayerId::ONE, &self.data[1]),
            ],
        }
    }
}

impl<T> Index<PlayerId> for PlayerPair<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerPair<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        assert_eq!(PlayerId::ZERO.index(), 0);
        assert_eq!(PlayerId::ONE.index(), 1);
        assert_eq!(format!("{}", PlayerId::ZERO), "Player 0");
    }

    #[test]
    fn test_opponent_flips() {
        assert_eq!(PlayerId::ZERO.opponent(), PlayerId::ONE);
        assert_eq!(PlayerId::ONE.opponent(), PlayerId::ZERO);
        assert_eq!(PlayerId::ZERO.opponent().opponent(), PlayerId::ZERO);
    }

    #[test]
    fn test_try_new_rejects_out_of_range() {
        assert_eq!(PlayerId::try_new(0), Some(PlayerId::ZERO));
        assert_eq!(PlayerId::try_new(1), Some(PlayerId::ONE));
        assert_eq!(PlayerId::try_new(2), None);
        assert_eq!(PlayerId::try_new(255), None);
    }

    #[test]
    #[should_panic(expected = "exactly 2 players")]
    fn test_new_panics_out_of_range() {
        let _ = PlayerId::new(3);
    }

    #[test]
    fn test_player_pair_factory_and_index() {
        let pair: PlayerPair<usize> = PlayerPair::new(|p| p.index() * 10);

        assert_eq!(pair[PlayerId::ZERO], 0);
        assert_eq!(pair[PlayerId::ONE], 10);
    }

    #[test]
    fn test_player_pair_mutation() {
        let mut pair: PlayerPair<i32> = PlayerPair::with_value(0);
        pair[PlayerId::ONE] = 5;

        assert_eq!(pair[PlayerId::ZERO], 0);
        assert_eq!(pair[PlayerId::ONE], 5);
    }

    #[test]
    fn test_player_pair_iter_order() {
        let pair: PlayerPair<i32> = PlayerPair::new(|p| p.index() as i32);
        let pairs: Vec<_> = pair.iter().collect();

        assert_eq!(pairs, vec![(PlayerId::ZERO, &0), (PlayerId::ONE, &1)]);
    }

    #[test]
    fn test_player_id_deserialize_rejects_invalid() {
        let ok: PlayerId = serde_json::from_str("1").unwrap();
        assert_eq!(ok, PlayerId::ONE);

        let err = serde_json::from_str::<PlayerId>("4");
        assert!(err.is_err());
    }

    #[test]
    fn test_player_pair_serialization() {
        let pair: PlayerPair<i32> = PlayerPair::new(|p| p.index() as i32 + 1);
        let json = serde_json::to_string(&pair).unwrap();
        let deserialized: PlayerPair<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(pair, deserialized);
    }
}
