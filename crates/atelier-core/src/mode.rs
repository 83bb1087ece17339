//! Conversational modes and the deep-reflection vocabulary.
//!
//! Both `Mode` and `ReflectionCategory` are closed enums so that every
//! mode-keyed table in the workspace is an exhaustive match: an unhandled
//! combination fails to compile instead of silently falling back.

use crate::error::AtelierError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four conversational stances a turn can declare.
///
/// The three reflective modes share the transition/deep-reflection state
/// machine; `General` always takes the normal chat path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Explainable,
    Explorative,
    Transformative,
    General,
}

impl Mode {
    /// The three modes that participate in transition and deep reflection.
    pub const REFLECTIVE: [Mode; 3] = [Mode::Explainable, Mode::Explorative, Mode::Transformative];

    /// Returns the wire name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Explainable => "explainable",
            Mode::Explorative => "explorative",
            Mode::Transformative => "transformative",
            Mode::General => "general",
        }
    }

    /// True for the three special modes that can escalate beyond normal chat.
    pub fn is_reflective(&self) -> bool {
        !matches!(self, Mode::General)
    }

    /// Parses a mode string, falling back to `General` for anything outside
    /// the closed enumeration. This is the lenient form used where a default
    /// exists; use `FromStr` where an unknown mode must fail the turn.
    pub fn parse_or_general(s: &str) -> Mode {
        s.parse().unwrap_or(Mode::General)
    }
}

impl FromStr for Mode {
    type Err = AtelierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "explainable" => Ok(Mode::Explainable),
            "explorative" => Ok(Mode::Explorative),
            "transformative" => Ok(Mode::Transformative),
            "general" => Ok(Mode::General),
            other => Err(AtelierError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named sub-topic within a mode's deep-reflection vocabulary.
///
/// Each category binds exactly one matching keyword and (in the application
/// layer) one question template. Variant order within a mode is the scanning
/// order of the keyword matcher, which is first-match-wins by design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReflectionCategory {
    // explainable
    MotivationExplanation,
    VisualGoalClarification,
    DetailDecisionExplanation,
    // explorative
    ConceptConnection,
    ModuleExperienceRelation,
    VisualEmotionConsistency,
    // transformative
    CreativeDirectionShift,
    FunctionalRethink,
    VisualStyleAdjustment,
}

impl ReflectionCategory {
    /// The mode this category belongs to.
    pub fn mode(&self) -> Mode {
        use ReflectionCategory::*;
        match self {
            MotivationExplanation | VisualGoalClarification | DetailDecisionExplanation => {
                Mode::Explainable
            }
            ConceptConnection | ModuleExperienceRelation | VisualEmotionConsistency => {
                Mode::Explorative
            }
            CreativeDirectionShift | FunctionalRethink | VisualStyleAdjustment => {
                Mode::Transformative
            }
        }
    }

    /// The display name of this category, as surfaced to users in templates
    /// and transition advice.
    pub fn label(&self) -> &'static str {
        use ReflectionCategory::*;
        match self {
            MotivationExplanation => "动机说明",
            VisualGoalClarification => "视觉目标澄清",
            DetailDecisionExplanation => "细节决策说明",
            ConceptConnection => "概念联系探索",
            ModuleExperienceRelation => "模块体验关系",
            VisualEmotionConsistency => "视觉情感一致性",
            CreativeDirectionShift => "创意方向转变",
            FunctionalRethink => "功能方法重思",
            VisualStyleAdjustment => "视觉风格调整",
        }
    }

    /// The literal keyword that selects this category when it appears as a
    /// substring of the user utterance. A few keywords differ from the
    /// display label; both are part of the frozen vocabulary.
    pub fn keyword(&self) -> &'static str {
        use ReflectionCategory::*;
        match self {
            MotivationExplanation => "动机说明",
            VisualGoalClarification => "阐明目标",
            DetailDecisionExplanation => "细节决策说明",
            ConceptConnection => "概念联系探索",
            ModuleExperienceRelation => "模块体验关系",
            VisualEmotionConsistency => "情感视觉一致性",
            CreativeDirectionShift => "创意方法改变",
            FunctionalRethink => "功能方法重思",
            VisualStyleAdjustment => "视觉风格调整",
        }
    }

    /// The vocabulary of a mode, in matcher scanning order.
    ///
    /// `General` has no deep-reflection vocabulary and yields an empty slice.
    pub fn vocabulary(mode: Mode) -> &'static [ReflectionCategory] {
        use ReflectionCategory::*;
        match mode {
            Mode::Explainable => &[
                MotivationExplanation,
                VisualGoalClarification,
                DetailDecisionExplanation,
            ],
            Mode::Explorative => &[
                ConceptConnection,
                ModuleExperienceRelation,
                VisualEmotionConsistency,
            ],
            Mode::Transformative => &[
                CreativeDirectionShift,
                FunctionalRethink,
                VisualStyleAdjustment,
            ],
            Mode::General => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_round_trip() {
        for mode in [
            Mode::Explainable,
            Mode::Explorative,
            Mode::Transformative,
            Mode::General,
        ] {
            assert_eq!(mode.as_str().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_unknown_mode_fails_strict_parse() {
        let err = "reflective".parse::<Mode>().unwrap_err();
        assert!(matches!(err, AtelierError::InvalidMode(_)));
    }

    #[test]
    fn test_unknown_mode_falls_back_to_general() {
        assert_eq!(Mode::parse_or_general("reflective"), Mode::General);
        assert_eq!(Mode::parse_or_general("explorative"), Mode::Explorative);
    }

    #[test]
    fn test_reflective_split() {
        assert!(Mode::Explainable.is_reflective());
        assert!(Mode::Explorative.is_reflective());
        assert!(Mode::Transformative.is_reflective());
        assert!(!Mode::General.is_reflective());
    }

    #[test]
    fn test_vocabulary_covers_every_mode() {
        for mode in Mode::REFLECTIVE {
            let vocabulary = ReflectionCategory::vocabulary(mode);
            assert_eq!(vocabulary.len(), 3);
            for category in vocabulary {
                assert_eq!(category.mode(), mode);
                assert!(!category.keyword().is_empty());
                assert!(!category.label().is_empty());
            }
        }
        assert!(ReflectionCategory::vocabulary(Mode::General).is_empty());
    }

    #[test]
    fn test_keyword_label_divergences() {
        // These three categories match on a keyword that differs from the
        // display label; the divergence is frozen vocabulary data.
        assert_eq!(ReflectionCategory::VisualGoalClarification.keyword(), "阐明目标");
        assert_eq!(ReflectionCategory::VisualGoalClarification.label(), "视觉目标澄清");
        assert_eq!(ReflectionCategory::VisualEmotionConsistency.keyword(), "情感视觉一致性");
        assert_eq!(ReflectionCategory::CreativeDirectionShift.keyword(), "创意方法改变");
    }
}
