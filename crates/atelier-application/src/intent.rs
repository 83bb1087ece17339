//! Keyword intent matcher.
//!
//! Detects an explicit reflection category by scanning the mode's vocabulary
//! in declaration order and testing each keyword for literal, case-sensitive
//! substring containment in the raw utterance. No normalization, no
//! tokenization, no scoring: the first hit wins. Overlapping keywords
//! therefore favor declaration order, a behavior preserved deliberately for
//! reproducibility.

use atelier_core::{Mode, ReflectionCategory};

/// Returns the first category whose keyword appears in the utterance.
///
/// Side-effect-free; `None` for general mode (empty vocabulary) or when no
/// keyword is present.
pub fn match_category(mode: Mode, utterance: &str) -> Option<ReflectionCategory> {
    ReflectionCategory::vocabulary(mode)
        .iter()
        .copied()
        .find(|category| utterance.contains(category.keyword()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_single_keyword() {
        let category = match_category(Mode::Explorative, "我想做一些概念联系探索方面的思考");
        assert_eq!(category, Some(ReflectionCategory::ConceptConnection));
    }

    #[test]
    fn test_first_match_wins_in_declaration_order() {
        // Utterance contains keywords of both the first and third explainable
        // categories; the first declared one must win.
        let utterance = "请给我细节决策说明，也讲讲动机说明";
        let category = match_category(Mode::Explainable, utterance);
        assert_eq!(category, Some(ReflectionCategory::MotivationExplanation));
    }

    #[test]
    fn test_matching_is_mode_scoped() {
        // An explorative keyword in a transformative turn matches nothing.
        assert_eq!(match_category(Mode::Transformative, "概念联系探索"), None);
    }

    #[test]
    fn test_keyword_differs_from_label() {
        // VisualGoalClarification matches on "阐明目标", not its label.
        let category = match_category(Mode::Explainable, "帮我阐明目标");
        assert_eq!(category, Some(ReflectionCategory::VisualGoalClarification));
        assert_eq!(match_category(Mode::Explainable, "视觉目标澄清"), None);
    }

    #[test]
    fn test_no_keyword_is_none() {
        assert_eq!(match_category(Mode::Explainable, "这个颜色好看吗"), None);
    }

    #[test]
    fn test_general_mode_never_matches() {
        assert_eq!(match_category(Mode::General, "动机说明"), None);
    }

    #[test]
    fn test_matching_is_case_and_byte_sensitive() {
        // Substring containment over the opaque Unicode string; a partial
        // keyword does not match.
        assert_eq!(match_category(Mode::Explainable, "动机"), None);
    }
}
