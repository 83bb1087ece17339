//! Deep-reflection template bank and resolver.
//!
//! Each reflection category binds exactly one canned question template with a
//! `{topic}` placeholder. The bank is an exhaustive match over the category
//! enum, so keyword table and template table cannot drift apart at runtime.

use atelier_core::error::{AtelierError, Result};
use atelier_core::{Mode, ReflectionCategory};

const TOPIC_PLACEHOLDER: &str = "{topic}";

/// The canned reflection question for a category.
pub fn template(category: ReflectionCategory) -> &'static str {
    use ReflectionCategory::*;
    match category {
        MotivationExplanation => {
            "💬 你提到{topic}时，背后想表达的核心感受或体验是什么？这个想法与你以往的创作、经历或目标有什么联系？"
        }
        VisualGoalClarification => {
            "💬 你实现{topic}这个功能时，想要呈现的视觉体验或交互感受是什么？它与整个项目的创意目标之间有何关联？"
        }
        DetailDecisionExplanation => {
            "💬 你做出{topic}这个细节调整时，背后的设计动机或想营造的感受是什么？这个细节是否强化了你的表达？"
        }
        ConceptConnection => {
            "💬 你的灵感{topic}中有没有哪些元素可以结合起来，产生新的想象或叙事线索？"
        }
        ModuleExperienceRelation => {
            "💬 你能否思考一下当前的{topic} 几个功能模块，它们之间是否能更协调地服务于整体的视觉叙事或交互体验？"
        }
        VisualEmotionConsistency => {
            "💬 在你的作品中，{topic} 这些视觉元素之间是否保持了统一的风格和情绪？有没有可以更好融合它们的方式？"
        }
        CreativeDirectionShift => {
            "💬 如果从另一种角度（例如 {topic}）讲述这个故事，比如换一种情绪基调，会发生什么变化？"
        }
        FunctionalRethink => {
            "💬 目前 {topic} 的功能效果是否与你想象中的体验存在偏差？如果是，有没有其他方式可以更贴切地表达你的意图？"
        }
        VisualStyleAdjustment => {
            "💬 现在 {topic} 的整体风格是否与你想传达的核心感受完全契合？如果偏离了，你愿意在哪些部分做出调整以重建风格一致性？"
        }
    }
}

/// Resolves the template for (mode, category) and substitutes the topic.
///
/// The matcher only ever produces categories belonging to the mode, so a
/// mismatch here is an internal consistency violation: it fails the turn and
/// is logged loudly, never silently defaulted.
pub fn resolve(mode: Mode, category: ReflectionCategory, topic: &str) -> Result<String> {
    if category.mode() != mode {
        tracing::error!(
            mode = %mode,
            category = category.label(),
            "template lookup reached with a category outside the mode's vocabulary"
        );
        return Err(AtelierError::TemplateMissing {
            mode: mode.as_str().to_string(),
            category: category.label().to_string(),
        });
    }
    Ok(template(category).replace(TOPIC_PLACEHOLDER, topic))
}

/// Renders a mode's full vocabulary as prompt context for the generative
/// fallback, one `- label: "template"` line per category.
pub fn format_vocabulary(mode: Mode) -> String {
    ReflectionCategory::vocabulary(mode)
        .iter()
        .map(|category| format!("- {}: \"{}\"", category.label(), template(*category)))
        .collect::<Vec<_>>()
        .join("\n")
}
