use std::collections::HashMap;

use crate::models::{GenerationRecord, PromptCount, RecentPrompt, StatsSummary};

/// How many top prompts a summary reports.
const TOP_N: usize = 5;
/// How many recent entries a summary reports.
const RECENT_N: usize = 5;

/// Summarize a newest-first history log.
///
/// Pure function of its input: `total` is the log length, `top_prompts` the
/// five most frequent prompts (ties keep the order in which a prompt first
/// appears in the log) and `recent` the first five entries.
pub fn summarize(log: &[GenerationRecord]) -> StatsSummary {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for record in log {
        let count = counts.entry(record.prompt.as_str()).or_insert(0);
        if *count == 0 {
            first_seen.push(record.prompt.as_str());
        }
        *count += 1;
    }

    let mut top_prompts: Vec<PromptCount> = first_seen
        .into_iter()
        .map(|prompt| PromptCount {
            prompt: prompt.to_string(),
            count: counts[prompt],
        })
        .collect();
    // Stable sort keeps first-appearance order among equal counts.
    top_prompts.sort_by(|a, b| b.count.cmp(&a.count));
    top_prompts.truncate(TOP_N);

    let recent = log
        .iter()
        .take(RECENT_N)
        .map(|r| RecentPrompt {
            prompt: r.prompt.clone(),
            timestamp: r.timestamp.clone(),
        })
        .collect();

    StatsSummary {
        total: log.len(),
        top_prompts,
        recent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(prompt: &str, timestamp: &str) -> GenerationRecord {
        GenerationRecord {
            prompt: prompt.to_string(),
            timestamp: timestamp.to_string(),
            image_url: format!("/image/{prompt}.png"),
        }
    }

    #[test]
    fn empty_log_yields_empty_summary() {
        let summary = summarize(&[]);

        assert_eq!(summary.total, 0);
        assert!(summary.top_prompts.is_empty());
        assert!(summary.recent.is_empty());
    }

    #[test]
    fn counts_group_by_exact_prompt() {
        let log = vec![
            record("cat", "2026-08-05T10:00:02"),
            record("dog", "2026-08-05T10:00:01"),
            record("cat", "2026-08-05T10:00:00"),
        ];

        let summary = summarize(&log);

        assert_eq!(summary.total, 3);
        assert_eq!(
            summary.top_prompts,
            vec![
                PromptCount { prompt: "cat".to_string(), count: 2 },
                PromptCount { prompt: "dog".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn ties_keep_first_appearance_order() {
        let log = vec![
            record("b", "t3"),
            record("a", "t2"),
            record("c", "t1"),
        ];

        let summary = summarize(&log);

        let prompts: Vec<&str> = summary.top_prompts.iter().map(|p| p.prompt.as_str()).collect();
        assert_eq!(prompts, ["b", "a", "c"]);
    }

    #[test]
    fn top_prompts_and_recents_are_capped_at_five() {
        let log: Vec<GenerationRecord> = (0..8)
            .map(|i| record(&format!("p{i}"), &format!("t{i}")))
            .collect();

        let summary = summarize(&log);

        assert_eq!(summary.total, 8);
        assert_eq!(summary.top_prompts.len(), 5);
        assert_eq!(summary.recent.len(), 5);
        // Recents are the first five entries of the newest-first log.
        assert_eq!(summary.recent[0].prompt, "p0");
        assert_eq!(summary.recent[4].prompt, "p4");
    }

    #[test]
    fn summarize_is_deterministic() {
        let log = vec![
            record("cat", "t2"),
            record("dog", "t1"),
            record("cat", "t0"),
        ];

        assert_eq!(summarize(&log), summarize(&log));
    }
}
