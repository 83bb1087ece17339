//! Turn classifier.
//!
//! Selects the conversational phase purely from (mode, interaction count).
//! The classifier holds no state of its own: the count is supplied by the
//! caller each turn, so two calls with identical inputs always agree.

use atelier_core::Mode;

/// The three routing phases of a turn.
///
/// Deep reflection splits further into matched/ambiguous once the keyword
/// matcher has seen the utterance; that split is not a function of
/// (mode, count) and therefore lives outside this classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    Normal,
    Transition,
    DeepReflection,
}

/// Classifies a turn.
///
/// General mode is always Normal. For the three reflective modes the caller's
/// interaction count drives escalation: the first turn is Normal, exactly the
/// second is Transition, the third and beyond are DeepReflection. A count of
/// zero is not a defined state and is treated as Normal by explicit policy
/// (the count type rules out negatives).
///
/// Transition firing only at count == 2 is a strict caller contract: a caller
/// that skips a count never visits Transition, and one that replays count 2
/// sees it twice. Monotonicity is not validated here.
pub fn classify(mode: Mode, interaction_count: u32) -> TurnPhase {
    if !mode.is_reflective() {
        return TurnPhase::Normal;
    }
    match interaction_count {
        0 | 1 => TurnPhase::Normal,
        2 => TurnPhase::Transition,
        _ => TurnPhase::DeepReflection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_is_always_normal() {
        for count in [0, 1, 2, 3, 10, 1000] {
            assert_eq!(classify(Mode::General, count), TurnPhase::Normal);
        }
    }

    #[test]
    fn test_reflective_modes_escalate() {
        for mode in Mode::REFLECTIVE {
            assert_eq!(classify(mode, 1), TurnPhase::Normal);
            assert_eq!(classify(mode, 2), TurnPhase::Transition);
            assert_eq!(classify(mode, 3), TurnPhase::DeepReflection);
            assert_eq!(classify(mode, 7), TurnPhase::DeepReflection);
        }
    }

    #[test]
    fn test_zero_count_is_normal() {
        for mode in Mode::REFLECTIVE {
            assert_eq!(classify(mode, 0), TurnPhase::Normal);
        }
    }

    #[test]
    fn test_classification_is_pure() {
        for mode in [
            Mode::Explainable,
            Mode::Explorative,
            Mode::Transformative,
            Mode::General,
        ] {
            for count in 0..8 {
                assert_eq!(classify(mode, count), classify(mode, count));
            }
        }
    }
}
