//! Built-in defaults for the three prompt template slots. Editable copies live
//! in the template store; these are the values a fresh (or upgraded) store
//! starts from.

/// Bumping this forces every store to re-seed its slots on the next run,
/// pushing customized values to history first.
pub const TEMPLATE_VERSION: &str = "3.0";

pub const DEFAULT_SYSTEM_INSTRUCTION: &str = r##"###Instructions
Using the product information supplied by the user, recommend Instagram-only SNS
events that honor every guideline below, and write the full plan for each one.

###SEO guidelines
- Keyword (primary + LSI) density 1.5% ±0.5%.
- Hashtags: three layers (brand, campaign, LSI), 5-8 total.
- Optimal posting time: within the event window, 05:00 or Tue/Wed 09:00-11:00.
- KPI "engagement rate" = (likes + comments + saves) / reach x 100, target >= 10%.

###Composition rules
- Each event must propose a distinct idea, tactic, and schedule; avoid overlap.
- Account for the season, public holidays, and timing of the event dates.
- The duration and budget indicate the intended scale; size each event to them.
- "process" lists the entire SNS event workflow in real chronological order,
  with no phase headings and no step omitted.
- Verify that itemized budget lines sum exactly to the "budget" value.

###Sentence rules
- Clipped list-style phrases take no trailing period ("Grow brand awareness").
- Complete sentences take a period ("We aim to grow brand awareness.").
- In performanceMetric and rewards, break sentences onto separate lines (\n).

###feed.caption style
1. Open with onomatopoeia/emoji for a scroll-stopping headline.
2. Emotion-then-benefit arc: a short emotional hook, then the concrete reward.
3. Scannable layout: numbered steps and icons for how/when/where/prizes.
4. One line, one message; short rows over long sentences.
5. Strong imperative calls to action with exclamation marks.
6. Mark mandatory notices (privacy, closures) with * or ※ at the end.
7. Close on a warm, rhyming sign-off that invites shares and comments.

###Output shape
{
  "event1": {
    "startDate": "YYYY-MM-DD",
    "endDate": "YYYY-MM-DD",
    "eventConcept": "<summary of the event: what it is, how it runs, what the prizes are>",
    "contentMechanics": {
      "process": ["<workflow step 1>", "<workflow step 2>", ...],
      "postFormats": {
        "feed": {
          "carouselSlides": [
            { "slide": 1, "concept": "<visual concept>" },
            { "slide": 2, "concept": "..." },
            { "slide": 3, "concept": "..." }, ...
          ],
          "caption": "<keywords (primary + LSI) and CTA, with emoji>",
          "hashtags": ["#brand", "#campaign", "#relatedKeyword", ...]
        },
        "reels": {
          "duration": "15s",
          "hookFirst3s": "<attention-grabbing opening line or scene>",
          "mainScenes": "<key message flow and B-roll ideas>",
          "audio": "<artist - track, on-theme and popular in reels>",
          "caption": "<keywords (primary + LSI) and CTA, with emoji>",
          "hashtags": ["#brand", "#campaign", "#relatedKeyword", ...]
        },
        "stories": {
          "frame1": { "type": "poll",  "text": "<poll question>", "sticker": "poll" },
          "frame2": { "type": "quiz",  "text": "<quiz question and answer>", "sticker": "quiz" },
          "frame3": { "type": "cta",   "text": "<swipe-up / link sticker guidance>" },
          "hashtags": ["#brand", "#campaign", "#relatedKeyword", ...]
        }
      }
    },
    "goal": {
      "quantitative": "<quantitative goals, one sentence per line>",
      "qualitative": "<qualitative goals, one sentence per line>"
    },
    "performanceMetric": "<KPI review cadence and the simple strategy tied to hitting or missing targets>",
    "rewards": "<prizes, quantities, selection criteria, delivery>",
    "budget": "<digits only>"
  },
  "event2": {
    ...
  },
  "eventN": {
    ...
  }
}"##;

pub const DEFAULT_USER_INPUT_TEMPLATE: &str = r#"###Product/service category
{productCategory}
###Product/service name
{productName}
###Features and core value
{productFeatures}
###Target KPIs
{kpiMetrics}
###Target audience
{targetAudience}
###Budget
{budget}
###Event duration
{eventDuration}"#;

pub const DEFAULT_FEEDBACK_TEMPLATE: &str = r##"===Original input conditions===
Product/service category: {productCategory}
Product/service name: {productName}
Features and core value: {productFeatures}
Target KPIs: {kpiMetrics}
Target audience: {targetAudience}
Budget: {budget}
Event duration: {eventDuration}

===Previously generated event plan===
{existingEventPlan}

===User feedback===
"{feedback}"

**Important**: keep every original input condition (budget, product details,
audience, KPIs) while revising the plan above to reflect the feedback. Never
exceed the budget of {budget}, and keep the target audience and product
features as given.

Respond with JSON in exactly this form:

{
  "event1": {
    "startDate": "YYYY-MM-DD",
    "endDate": "YYYY-MM-DD",
    "eventConcept": "<revised event summary>",
    "contentMechanics": {
      "process": ["<revised workflow step 1>", "<revised workflow step 2>", ...],
      "postFormats": {
        "feed": {
          "carouselSlides": [
            { "slide": 1, "concept": "<revised visual concept>" },
            { "slide": 2, "concept": "..." },
            { "slide": 3, "concept": "..." }, ...
          ],
          "caption": "<revised caption with keywords and CTA>",
          "hashtags": ["#brand", "#campaign", "#relatedKeyword", ...]
        },
        "reels": {
          "duration": "15s",
          "hookFirst3s": "<revised opening hook>",
          "mainScenes": "<revised key message flow and B-roll ideas>",
          "audio": "<revised track choice>",
          "caption": "<revised caption with keywords and CTA>",
          "hashtags": ["#brand", "#campaign", "#relatedKeyword", ...]
        },
        "stories": {
          "frame1": { "type": "poll", "text": "<revised poll question>", "sticker": "poll" },
          "frame2": { "type": "quiz", "text": "<revised quiz question and answer>", "sticker": "quiz" },
          "frame3": { "type": "cta", "text": "<revised swipe-up / link sticker guidance>" },
          "hashtags": ["#brand", "#campaign", "#relatedKeyword", ...]
        }
      }
    },
    "goal": {
      "quantitative": "<revised quantitative goals, one sentence per line>",
      "qualitative": "<revised qualitative goals, one sentence per line>"
    },
    "performanceMetric": "<revised KPI cadence and strategy>",
    "rewards": "<revised prizes, quantities, selection criteria, delivery>",
    "budget": "<revised budget, digits only>"
  }
}"##;
