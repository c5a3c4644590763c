use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

pub mod example;

/// The structured output of a generate/refine call: event key ("event1",
/// "event2", ...) to event record, kept in the order the model emitted them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventPlan(pub IndexMap<String, EventData>);

impl EventPlan {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn events(&self) -> impl Iterator<Item = (&String, &EventData)> {
        self.0.iter()
    }
}

/// One proposed event. Every field defaults so that a syntactically valid but
/// partial document still parses; recovery passes such documents through
/// unchanged rather than rejecting them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventData {
    pub start_date: String,
    pub end_date: String,
    pub event_concept: String,
    pub content_mechanics: ContentMechanics,
    pub goal: Goal,
    pub performance_metric: String,
    pub rewards: String,
    /// Digits-only string; the budget-sum invariant is a prompt instruction,
    /// not validated here. Models sometimes emit a bare number instead, so
    /// both forms deserialize.
    #[serde(deserialize_with = "string_or_number")]
    pub budget: String,
}

fn string_or_number<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }
    Ok(match Raw::deserialize(de)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

fn number_or_string<'de, D>(de: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }
    match Raw::deserialize(de)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentMechanics {
    pub process: Vec<String>,
    pub post_formats: PostFormats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostFormats {
    pub feed: PostFormat,
    pub reels: PostFormat,
    pub stories: PostFormat,
}

/// Shared shape for the feed/reels/stories blocks; each surface fills a
/// different subset of the optional fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carousel_slides: Option<Vec<CarouselSlide>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub hashtags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(rename = "hookFirst3s", skip_serializing_if = "Option::is_none")]
    pub hook_first_3s: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_scenes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame1: Option<StoryFrame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame2: Option<StoryFrame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame3: Option<StoryFrame>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselSlide {
    #[serde(deserialize_with = "number_or_string")]
    pub slide: u32,
    pub concept: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryFrame {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticker: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Goal {
    pub quantitative: String,
    pub qualitative: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_event_insertion_order() {
        let text = r#"{"event2":{"budget":"2"},"event1":{"budget":"1"}}"#;
        let plan: EventPlan = serde_json::from_str(text).unwrap();
        let keys: Vec<&String> = plan.0.keys().collect();
        assert_eq!(keys, ["event2", "event1"]);

        let out = serde_json::to_string(&plan).unwrap();
        assert!(out.find("event2").unwrap() < out.find("event1").unwrap());
    }

    #[test]
    fn partial_event_parses_with_defaults() {
        let plan: EventPlan = serde_json::from_str(r#"{"event1":{}}"#).unwrap();
        let ev = &plan.0["event1"];
        assert_eq!(ev.budget, "");
        assert!(ev.content_mechanics.process.is_empty());
    }

    #[test]
    fn numeric_budget_and_slide_still_parse() {
        let text = r#"{
          "event1": {
            "budget": 500,
            "contentMechanics": {
              "postFormats": {
                "feed": { "carouselSlides": [{ "slide": "2", "concept": "c" }] }
              }
            }
          }
        }"#;
        let plan: EventPlan = serde_json::from_str(text).unwrap();
        let ev = &plan.0["event1"];
        assert_eq!(ev.budget, "500");
        let slides = ev.content_mechanics.post_formats.feed.carousel_slides.as_ref().unwrap();
        assert_eq!(slides[0].slide, 2);
    }

    #[test]
    fn camel_case_wire_names_round_trip() {
        let text = r##"{
          "event1": {
            "startDate": "2026-09-01",
            "endDate": "2026-09-15",
            "eventConcept": "c",
            "contentMechanics": {
              "process": ["p1"],
              "postFormats": {
                "feed": { "hashtags": ["#a"] },
                "reels": { "duration": "15s", "hookFirst3s": "hook", "hashtags": [] },
                "stories": { "frame1": { "type": "poll", "text": "q", "sticker": "poll" }, "hashtags": [] }
              }
            },
            "goal": { "quantitative": "q1", "qualitative": "q2" },
            "performanceMetric": "m",
            "rewards": "r",
            "budget": "100"
          }
        }"##;
        let plan: EventPlan = serde_json::from_str(text).unwrap();
        let ev = &plan.0["event1"];
        assert_eq!(ev.start_date, "2026-09-01");
        assert_eq!(
            ev.content_mechanics.post_formats.reels.hook_first_3s.as_deref(),
            Some("hook")
        );
        assert_eq!(
            ev.content_mechanics.post_formats.stories.frame1.as_ref().unwrap().kind,
            "poll"
        );

        let round: EventPlan =
            serde_json::from_str(&serde_json::to_string(&plan).unwrap()).unwrap();
        assert_eq!(round, plan);
    }
}
