//! Best-effort recovery of an event plan from raw model output. Total: every
//! input yields a usable plan, so downstream rendering never sees an absent
//! case. Availability is traded for precision; only trailing truncation is
//! repaired, not corruption.

use chrono::{Duration, Utc};

use crate::plan::{
    CarouselSlide, ContentMechanics, EventData, EventPlan, Goal, PostFormat, PostFormats,
    StoryFrame,
};

/// How the plan was obtained, so callers and tests can tell a clean parse
/// from a repaired or substituted one.
#[derive(Debug, Clone, PartialEq)]
pub enum Recovery {
    /// The whole raw text parsed as-is.
    Parsed(EventPlan),
    /// The plan came from the extracted-and-balanced candidate substring.
    Repaired(EventPlan),
    /// Recovery failed; this is the fixed placeholder plan.
    Fallback(EventPlan),
}

impl Recovery {
    pub fn plan(&self) -> &EventPlan {
        match self {
            Recovery::Parsed(p) | Recovery::Repaired(p) | Recovery::Fallback(p) => p,
        }
    }

    pub fn into_plan(self) -> EventPlan {
        match self {
            Recovery::Parsed(p) | Recovery::Repaired(p) | Recovery::Fallback(p) => p,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Recovery::Fallback(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Recovery::Parsed(_) => "parsed",
            Recovery::Repaired(_) => "repaired",
            Recovery::Fallback(_) => "fallback",
        }
    }
}

/// First success wins:
/// 1. parse the whole text;
/// 2. take the substring from the first `{` to the last `}` (drops commentary
///    the model wrapped around the payload);
/// 3. append closers for any excess of `{`/`[` openers, then parse;
/// 4. fall back to the fixed placeholder plan.
pub fn recover(raw: &str) -> Recovery {
    if let Ok(plan) = serde_json::from_str::<EventPlan>(raw) {
        return Recovery::Parsed(plan);
    }
    if let Some(candidate) = extract_candidate(raw) {
        if let Ok(plan) = serde_json::from_str::<EventPlan>(&balance(&candidate)) {
            return Recovery::Repaired(plan);
        }
    }
    Recovery::Fallback(fallback_plan())
}

fn extract_candidate(s: &str) -> Option<&str> {
    let start = s.find('{')?;
    let end = s.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&s[start..=end])
}

/// Append-only repair: counts braces and brackets and pads the tail with
/// closers. Excess closers and misordered nesting are left for the parse to
/// reject.
fn balance(s: &str) -> String {
    let mut braces = 0i64;
    let mut brackets = 0i64;
    for c in s.chars() {
        match c {
            '{' => braces += 1,
            '}' => braces -= 1,
            '[' => brackets += 1,
            ']' => brackets -= 1,
            _ => {}
        }
    }
    let mut out = s.to_string();
    for _ in 0..braces.max(0) {
        out.push('}');
    }
    for _ in 0..brackets.max(0) {
        out.push(']');
    }
    out
}

/// The fixed plan substituted when recovery fails entirely: one placeholder
/// event with minimally valid values for every field a rendering path reads.
pub fn fallback_plan() -> EventPlan {
    let start = Utc::now().date_naive();
    let end = start + Duration::days(14);

    let event = EventData {
        start_date: start.format("%Y-%m-%d").to_string(),
        end_date: end.format("%Y-%m-%d").to_string(),
        event_concept: "The model response could not be parsed. This placeholder plan stands in; regenerate or adjust the prompt templates.".to_string(),
        content_mechanics: ContentMechanics {
            process: vec![
                "1. Draft the plan".to_string(),
                "2. Run the event".to_string(),
                "3. Review the results".to_string(),
            ],
            post_formats: PostFormats {
                feed: PostFormat {
                    carousel_slides: Some(vec![
                        CarouselSlide { slide: 1, concept: "Placeholder slide 1".to_string() },
                        CarouselSlide { slide: 2, concept: "Placeholder slide 2".to_string() },
                    ]),
                    caption: Some("Placeholder caption.".to_string()),
                    hashtags: vec!["#event".to_string(), "#brand".to_string()],
                    ..Default::default()
                },
                reels: PostFormat {
                    duration: Some("15s".to_string()),
                    hook_first_3s: Some("Placeholder hook".to_string()),
                    main_scenes: Some("Placeholder scene outline".to_string()),
                    audio: Some("Placeholder track".to_string()),
                    caption: Some("Placeholder reels caption.".to_string()),
                    hashtags: vec!["#reels".to_string(), "#event".to_string()],
                    ..Default::default()
                },
                stories: PostFormat {
                    frame1: Some(StoryFrame {
                        kind: "poll".to_string(),
                        text: "Placeholder poll".to_string(),
                        sticker: Some("poll".to_string()),
                    }),
                    frame2: Some(StoryFrame {
                        kind: "quiz".to_string(),
                        text: "Placeholder quiz".to_string(),
                        sticker: Some("quiz".to_string()),
                    }),
                    frame3: Some(StoryFrame {
                        kind: "cta".to_string(),
                        text: "Placeholder CTA".to_string(),
                        sticker: None,
                    }),
                    hashtags: vec!["#stories".to_string(), "#event".to_string()],
                    ..Default::default()
                },
            },
        },
        goal: Goal {
            quantitative: "Grow brand awareness by 10%\nHit a 5% engagement rate".to_string(),
            qualitative: "Placeholder qualitative goal.".to_string(),
        },
        performance_metric: "KPIs are reviewed weekly.".to_string(),
        rewards: "Prize lineup to be confirmed.".to_string(),
        budget: "100".to_string(),
    };

    let mut plan = EventPlan::default();
    plan.0.insert("event1".to_string(), event);
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_plan() -> EventPlan {
        let text = r##"{
          "event1": {
            "startDate": "2026-09-01",
            "endDate": "2026-09-15",
            "eventConcept": "UGC challenge",
            "contentMechanics": {
              "process": ["tease", "launch", "wrap up"],
              "postFormats": {
                "feed": { "caption": "join in", "hashtags": ["#go"] },
                "reels": { "duration": "15s", "hashtags": ["#reels"] },
                "stories": { "hashtags": ["#stories"] }
              }
            },
            "goal": { "quantitative": "reach 10k", "qualitative": "brand love" },
            "performanceMetric": "weekly KPI review",
            "rewards": "one grand prize",
            "budget": "500"
          },
          "event2": {
            "startDate": "2026-10-01",
            "endDate": "2026-10-10",
            "eventConcept": "photo contest",
            "budget": "300"
          }
        }"##;
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn valid_document_round_trips_as_parsed() {
        let plan = sample_plan();
        let raw = serde_json::to_string_pretty(&plan).unwrap();
        match recover(&raw) {
            Recovery::Parsed(p) => assert_eq!(p, plan),
            other => panic!("expected Parsed, got {}", other.label()),
        }
    }

    #[test]
    fn wrapped_document_is_repaired_intact() {
        let plan = sample_plan();
        let raw = format!(
            "Here is your event plan:\n\n{}\n\nLet me know what you think!",
            serde_json::to_string_pretty(&plan).unwrap()
        );
        match recover(&raw) {
            Recovery::Repaired(p) => assert_eq!(p, plan),
            other => panic!("expected Repaired, got {}", other.label()),
        }
    }

    #[test]
    fn truncated_tail_is_repaired_or_falls_back() {
        let plan = sample_plan();
        let raw = serde_json::to_string(&plan).unwrap();
        // Drop the final closing brace: append-only balancing restores it.
        let truncated = &raw[..raw.len() - 1];
        match recover(truncated) {
            Recovery::Repaired(p) => {
                assert!(p.0.contains_key("event1"));
                assert!(p.0.contains_key("event2"));
            }
            Recovery::Fallback(_) => {}
            Recovery::Parsed(_) => panic!("truncated text must not parse whole"),
        }
    }

    #[test]
    fn truncation_mid_string_keeps_complete_events() {
        let plan = sample_plan();
        let raw = serde_json::to_string(&plan).unwrap();
        // Cut inside event2's concept string: the candidate substring ends at
        // event1's closing brace, so event1 survives and event2 is dropped.
        let cut = raw.find("photo contest").unwrap();
        match recover(&raw[..cut]) {
            Recovery::Repaired(p) => {
                assert!(p.0.contains_key("event1"));
                assert!(!p.0.contains_key("event2"));
            }
            Recovery::Fallback(_) => {}
            Recovery::Parsed(_) => panic!("truncated text must not parse whole"),
        }
    }

    #[test]
    fn numeric_budget_does_not_demote_a_valid_document() {
        let recovery = recover(r#"{"event1": {"eventConcept": "c", "budget": 500}}"#);
        match recovery {
            Recovery::Parsed(p) => assert_eq!(p.0["event1"].budget, "500"),
            other => panic!("expected Parsed, got {}", other.label()),
        }
    }

    #[test]
    fn garbage_yields_the_fixed_fallback() {
        let recovery = recover("not json at all");
        assert!(recovery.is_fallback());

        let plan = recovery.into_plan();
        let (key, ev) = plan.events().next().unwrap();
        assert_eq!(key, "event1");
        assert!(!ev.event_concept.is_empty());

        let start = NaiveDate::parse_from_str(&ev.start_date, "%Y-%m-%d").unwrap();
        let end = NaiveDate::parse_from_str(&ev.end_date, "%Y-%m-%d").unwrap();
        assert_eq!(end - start, Duration::days(14));
        assert!(ev.budget.chars().all(|c| c.is_ascii_digit()));
        assert!(!ev.content_mechanics.post_formats.feed.hashtags.is_empty());
        assert!(!ev.content_mechanics.post_formats.stories.hashtags.is_empty());
    }

    #[test]
    fn misordered_brackets_are_not_repaired() {
        // Counting alone cannot fix nesting; the parse rejects it.
        assert!(recover("]}{").is_fallback());
        assert!(recover(r#"{"event1": ]}"#).is_fallback());
    }
}
