use svh_cards::Ranking;
use svh_core::Points;
use svh_core::Seed;

/// Structured messages emitted by state transitions.
///
/// Events are data, not prose: the core never produces UI strings. Each
/// variant carries the parameters its message key needs at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Started { seed: Seed },
    Scored { ranking: Ranking, points: Points },
    Discarded { count: usize },
    Jumped { step: usize },
    Ended { score: Points },
    Passed { score: Points, target: Points },
    Failed { score: Points, target: Points },
}

impl Event {
    /// Stable message key for the boundary.
    pub fn key(&self) -> &'static str {
        match self {
            Event::Started { .. } => "game.started",
            Event::Scored { .. } => "play.scored",
            Event::Discarded { .. } => "discard.performed",
            Event::Jumped { .. } => "game.jumped",
            Event::Ended { .. } => "game.ended",
            Event::Passed { .. } => "game.passed",
            Event::Failed { .. } => "game.failed",
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Event::Started { seed } => write!(f, "game.started seed={}", seed),
            Event::Scored { ranking, points } => {
                write!(f, "play.scored {} +{}", ranking, points)
            }
            Event::Discarded { count } => write!(f, "discard.performed n={}", count),
            Event::Jumped { step } => write!(f, "game.jumped step={}", step),
            Event::Ended { score } => write!(f, "game.ended score={}", score),
            Event::Passed { score, target } => {
                write!(f, "game.passed {} >= {}", score, target)
            }
            Event::Failed { score, target } => {
                write!(f, "game.failed {} < {}", score, target)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_stable() {
        assert_eq!(Event::Started { seed: 1 }.key(), "game.started");
        assert_eq!(Event::Discarded { count: 3 }.key(), "discard.performed");
        assert_eq!(
            Event::Scored { ranking: Ranking::Flush, points: 360 }.key(),
            "play.scored",
        );
    }
}
