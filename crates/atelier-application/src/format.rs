//! Prompt-ready rendering of retrieved memory and short-term history.

use atelier_core::memory::MemoryRecord;
use atelier_core::turn::ChatTurn;

/// Sentinel rendered when retrieval produced no records.
pub const NO_MEMORY_SENTINEL: &str = "No relevant historical versions found.";

/// Sentinel rendered when the short-term history is empty.
pub const NO_HISTORY_SENTINEL: &str = "No recent conversation history.";

/// Renders retrieved version records as a numbered narrative block,
/// in receipt order (retrieval already ranked them; no re-sorting).
pub fn format_memories(records: &[MemoryRecord]) -> String {
    if records.is_empty() {
        return NO_MEMORY_SENTINEL.to_string();
    }
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            format!(
                "Memory {} (Version ID: {}):\n- 版本总结: {}\n",
                i + 1,
                record.version_id,
                record.ai_summary
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the turn log as `Role: content` lines, chronological order,
/// role capitalized.
pub fn format_history(history: &[ChatTurn]) -> String {
    if history.is_empty() {
        return NO_HISTORY_SENTINEL.to_string();
    }
    history
        .iter()
        .map(|turn| format!("{}: {}", capitalize(&turn.role), turn.content))
        .collect::<Vec<_>>()
        .join("\n")
}

fn capitalize(role: &str) -> String {
    let mut chars = role.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_memory_sentinel() {
        assert_eq!(format_memories(&[]), NO_MEMORY_SENTINEL);
    }

    #[test]
    fn test_single_memory_block() {
        let records = vec![MemoryRecord {
            version_id: "v1".to_string(),
            ai_summary: "s1".to_string(),
        }];
        let formatted = format_memories(&records);
        assert_eq!(formatted, "Memory 1 (Version ID: v1):\n- 版本总结: s1\n");
    }

    #[test]
    fn test_memories_keep_receipt_order() {
        let records = vec![
            MemoryRecord {
                version_id: "vb".to_string(),
                ai_summary: "later".to_string(),
            },
            MemoryRecord {
                version_id: "va".to_string(),
                ai_summary: "earlier".to_string(),
            },
        ];
        let formatted = format_memories(&records);
        assert!(formatted.starts_with("Memory 1 (Version ID: vb)"));
        assert!(formatted.contains("Memory 2 (Version ID: va)"));
    }

    #[test]
    fn test_empty_history_sentinel() {
        assert_eq!(format_history(&[]), NO_HISTORY_SENTINEL);
    }

    #[test]
    fn test_history_lines_capitalized_and_ordered() {
        let history = vec![
            ChatTurn::new("user", "加点颜色"),
            ChatTurn::new("assistant", "好的"),
        ];
        assert_eq!(format_history(&history), "User: 加点颜色\nAssistant: 好的");
    }

    #[test]
    fn test_role_tail_is_lowercased() {
        let history = vec![ChatTurn::new("ASSISTANT", "好的")];
        assert_eq!(format_history(&history), "Assistant: 好的");
    }
}
