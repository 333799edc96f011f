//! Cat-related components: marker, name, coat, hearts, arrival stamp, mood.

use serde::{Deserialize, Serialize};

use purrhaven_logic::state::CatState;

/// Marker component identifying an entity as a cat.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Cat;

/// Display name, chosen at creation and never changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatName(pub String);

impl CatName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Coat color, rolled at creation. Drives the display icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coat {
    Orange,
    Calico,
    White,
    Black,
    Tabby,
    Sesame,
}

impl Coat {
    /// All coat colors, in the order the shipped game lists them.
    pub const ALL: [Coat; 6] = [
        Coat::Orange,
        Coat::Calico,
        Coat::White,
        Coat::Black,
        Coat::Tabby,
        Coat::Sesame,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Coat::Orange => "orange",
            Coat::Calico => "calico",
            Coat::White => "white",
            Coat::Black => "black",
            Coat::Tabby => "tabby",
            Coat::Sesame => "sesame",
        }
    }

    /// Display icon for this coat.
    pub fn icon(self) -> &'static str {
        match self {
            Coat::Orange => "🐱",
            Coat::Calico => "🐈",
            Coat::White => "🤍",
            Coat::Black => "🐈‍⬛",
            Coat::Tabby => "🐯",
            Coat::Sesame => "🦁",
        }
    }
}

impl std::fmt::Display for Coat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Life points. Starts full at 3; only ever decreases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hearts(u8);

impl Hearts {
    /// Hearts every cat starts with.
    pub const MAX: u8 = 3;

    pub fn full() -> Self {
        Self(Self::MAX)
    }

    pub fn count(self) -> u8 {
        self.0
    }

    pub fn is_exhausted(self) -> bool {
        self.0 == 0
    }

    /// Drop one heart. Returns `true` exactly when this decrement brings the
    /// count to zero; a cat already at zero is a no-op returning `false`.
    pub fn lose(&mut self) -> bool {
        if self.0 == 0 {
            return false;
        }
        self.0 -= 1;
        self.0 == 0
    }
}

impl Default for Hearts {
    fn default() -> Self {
        Self::full()
    }
}

/// When the cat entered the shelter (sim-time seconds). Immutable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Arrival {
    pub at: f64,
}

impl Arrival {
    pub fn seconds_since(&self, now: f64) -> f32 {
        (now - self.at).max(0.0) as f32
    }

    pub fn minutes_since(&self, now: f64) -> f32 {
        self.seconds_since(now) / 60.0
    }
}

/// Cached derived emotional state. Recomputed after every need or heart
/// mutation and once per engine tick; external callers never write it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mood(pub CatState);

/// Deadline for the next neglect heart loss (sim-time seconds). Armed while
/// the cat has unmet needs, cleared when its need set empties.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NeglectClock {
    pub deadline: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hearts_lose_signals_exhaustion_once() {
        let mut hearts = Hearts::full();
        assert!(!hearts.lose()); // 3 -> 2
        assert!(!hearts.lose()); // 2 -> 1
        assert!(hearts.lose()); // 1 -> 0, eviction-eligible
        assert!(hearts.is_exhausted());
        assert!(!hearts.lose(), "already-exhausted hearts are a no-op");
        assert_eq!(hearts.count(), 0);
    }

    #[test]
    fn test_arrival_elapsed() {
        let arrival = Arrival { at: 30.0 };
        assert_eq!(arrival.seconds_since(150.0), 120.0);
        assert_eq!(arrival.minutes_since(150.0), 2.0);
        // Clock skew before arrival clamps to zero.
        assert_eq!(arrival.seconds_since(0.0), 0.0);
    }

    #[test]
    fn test_every_coat_has_an_icon() {
        for coat in Coat::ALL {
            assert!(!coat.icon().is_empty());
            assert!(!coat.as_str().is_empty());
        }
    }
}
