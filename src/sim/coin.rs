//! The coin face

use serde::{Deserialize, Serialize};

/// Which face of the coin is up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Coin {
    #[default]
    Heads,
    Tails,
}

impl Coin {
    /// The opposite face
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Coin::Heads => Coin::Tails,
            Coin::Tails => Coin::Heads,
        }
    }

    /// Turn the coin over in place, returning the new face
    pub fn flip(&mut self) -> Self {
        *self = self.toggle();
        *self
    }

    /// Face showing after `half_turns` half-rotations
    #[must_use]
    pub fn after_flips(self, half_turns: u32) -> Self {
        if half_turns % 2 == 1 { self.toggle() } else { self }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Coin::Heads => "Heads",
            Coin::Tails => "Tails",
        }
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
