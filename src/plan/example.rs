//! Canned payloads used when no API credential is configured, shaped exactly
//! like the output the model is instructed to produce so the rest of the
//! pipeline can be exercised offline.

use chrono::{Duration, Utc};

use super::{
    CarouselSlide, ContentMechanics, EventData, EventPlan, Goal, PostFormat, PostFormats,
    StoryFrame,
};
use crate::brief::Brief;

/// Digits-only extraction of a budget string; "100" when nothing numeric
/// survives.
pub fn numeric_budget(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        "100".to_string()
    } else {
        digits
    }
}

pub fn example_plan(brief: &Brief) -> EventPlan {
    let start = Utc::now().date_naive();
    let end = start + Duration::days(14);
    let name = &brief.product_name;
    let category = &brief.product_category;
    let first_feature = brief
        .product_features
        .split(',')
        .next()
        .unwrap_or("")
        .trim()
        .to_string();

    let feed = PostFormat {
        carousel_slides: Some(vec![
            CarouselSlide { slide: 1, concept: format!("Introduce the {name} challenge with the brand logo and product shots") },
            CarouselSlide { slide: 2, concept: "Step-by-step participation guide".to_string() },
            CarouselSlide { slide: 3, concept: "Prize lineup and winner announcement schedule".to_string() },
        ]),
        caption: Some(format!(
            "🎉 Share your moment with #{name}Challenge! ✨\n\n📸 Capture a creative moment with {name}\n🏆 Special gifts for 10 winners!\n\nHow to join 👇\n① Shoot a photo or video with the product\n② Post it with the hashtags\n③ Write a creative caption\n\nDeadline: {}\nWinners announced within 3 days\n\n✨ Join right now! ✨",
            end.format("%Y-%m-%d")
        )),
        hashtags: vec![
            format!("#{name}Challenge"),
            format!("#{category}"),
            format!("#{name}"),
            "#event".to_string(),
        ],
        ..Default::default()
    };

    let reels = PostFormat {
        duration: Some("15s".to_string()),
        hook_first_3s: Some("Wow, never seen an event like this! 🤩".to_string()),
        main_scenes: Some(
            "Product in use → creative twists → hashtag reveal → CTA".to_string(),
        ),
        audio: Some("NewJeans - Get Up (bright, trend-friendly mood)".to_string()),
        caption: Some(format!(
            "💫 Discover what makes {name} special in 15 seconds! 💫\n\nUse the product your own way\nThe most creative clip wins a special gift! 🎁\n\n#{name}Challenge"
        )),
        hashtags: vec![
            format!("#{name}Challenge"),
            format!("#{category}"),
            "#reelsChallenge".to_string(),
        ],
        ..Default::default()
    };

    let stories = PostFormat {
        frame1: Some(StoryFrame {
            kind: "poll".to_string(),
            text: format!("Have you tried {name} yet?"),
            sticker: Some("poll".to_string()),
        }),
        frame2: Some(StoryFrame {
            kind: "quiz".to_string(),
            text: format!("What is {name}'s core feature? Answer: {first_feature}"),
            sticker: Some("quiz".to_string()),
        }),
        frame3: Some(StoryFrame {
            kind: "cta".to_string(),
            text: "Join the challenge and grab your gift! 👆 Tap the link".to_string(),
            sticker: None,
        }),
        hashtags: vec![format!("#{name}Challenge"), format!("#{category}")],
        ..Default::default()
    };

    let event = EventData {
        start_date: start.format("%Y-%m-%d").to_string(),
        end_date: end.format("%Y-%m-%d").to_string(),
        event_concept: format!(
            "A creative UGC challenge built around {name}. Participants share their own moments with the product on SNS, lifting brand awareness and engagement at the same time."
        ),
        content_mechanics: ContentMechanics {
            process: vec![
                "Seed teaser content (D-7): influencers preview the challenge".to_string(),
                "Official launch (D-Day): brand account posts the how-to and prizes".to_string(),
                "Midway reminder (D+7): showcase standout entries, nudge participation".to_string(),
                "Last call (D+12): final reminder before the deadline".to_string(),
                "Winner announcement (D+14): select and announce 10 winners".to_string(),
            ],
            post_formats: PostFormats { feed, reels, stories },
        },
        goal: Goal {
            quantitative: "Reach 10,000+ accounts with event posts\nCollect 1,000+ combined likes, comments and saves\nDrive 100+ DM inquiries\nHit a 10%+ engagement rate".to_string(),
            qualitative: format!(
                "Strengthen positive brand perception\nDeepen the emotional bond with customers\nGrow the Gen-MZ customer base\nRaise awareness of {name}'s value"
            ),
        },
        performance_metric: format!(
            "Track the key KPIs ({}) weekly.\nIf engagement falls under 10%, consider adding influencers.\nIf it passes 15%, consider extending the event window.",
            brief.kpi_metrics.join(", ")
        ),
        rewards: "1st (1 winner): full product set worth 300,000 KRW\n2nd (3 winners): new product package worth 150,000 KRW\n3rd (6 winners): mini sampler set worth 50,000 KRW\nWinners are contacted individually to collect shipping details".to_string(),
        budget: numeric_budget(&brief.budget),
    };

    let mut plan = EventPlan::default();
    plan.0.insert("event1".to_string(), event);
    plan
}

/// Offline refine: echo the previous plan with the first event's concept
/// annotated with a feedback excerpt.
pub fn example_refined(previous: &EventPlan, feedback: &str) -> EventPlan {
    let mut plan = previous.clone();
    if let Some((_, event)) = plan.0.iter_mut().next() {
        let excerpt: String = feedback.chars().take(30).collect();
        event.event_concept = format!(
            "{} Revised per feedback: addressed \"{excerpt}...\".",
            event.event_concept
        );
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brief() -> Brief {
        Brief {
            product_name: "GlowServe".to_string(),
            product_category: "beauty".to_string(),
            product_features: "hydration, glow".to_string(),
            kpi_metrics: vec!["팔로워 증가".to_string()],
            budget: "500".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn example_plan_is_keyed_under_event1() {
        let plan = example_plan(&brief());
        let (key, ev) = plan.events().next().unwrap();
        assert_eq!(key, "event1");
        assert_eq!(ev.budget, "500");
        assert!(ev.event_concept.contains("GlowServe"));
        assert!(!ev.content_mechanics.post_formats.feed.hashtags.is_empty());
    }

    #[test]
    fn budget_extraction_keeps_digits_only() {
        assert_eq!(numeric_budget("₩500만"), "500");
        assert_eq!(numeric_budget("1,200,000 KRW"), "1200000");
        assert_eq!(numeric_budget("to be decided"), "100");
    }

    #[test]
    fn refined_example_annotates_first_event_only() {
        let plan = example_plan(&brief());
        let refined = example_refined(&plan, "make the prizes bigger");
        let ev = refined.events().next().unwrap().1;
        assert!(ev.event_concept.contains("make the prizes bigger"));
        assert_eq!(ev.budget, "500");
    }
}
