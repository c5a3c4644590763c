//! Plan export: a self-contained HTML document (no external assets) and the
//! pretty-JSON form used to feed a later `refine`.

use anyhow::Result;
use fs_err as fs;
use std::fmt::Write as _;
use std::path::Path;

use crate::plan::{EventPlan, PostFormat};

pub fn write_json(path: &Path, plan: &EventPlan) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(plan)?)?;
    Ok(())
}

pub fn write_html(path: &Path, plan: &EventPlan) -> Result<()> {
    fs::write(path, to_html(plan))?;
    Ok(())
}

pub fn to_html(plan: &EventPlan) -> String {
    let mut body = String::new();
    for (key, ev) in plan.events() {
        let _ = write!(
            body,
            r#"<section class="event">
<h2>{key}</h2>
<p class="dates">{start} → {end}</p>
<p>{concept}</p>
<h3>Process</h3>
<ol>{process}</ol>
<h3>Post formats</h3>
{feed}{reels}{stories}
<h3>Goals</h3>
<p>{quant}</p>
<p>{qual}</p>
<h3>Performance metric</h3>
<p>{metric}</p>
<h3>Rewards</h3>
<p>{rewards}</p>
<p class="budget">Budget: {budget}</p>
</section>
"#,
            key = esc(key),
            start = esc(&ev.start_date),
            end = esc(&ev.end_date),
            concept = multiline(&ev.event_concept),
            process = ev
                .content_mechanics
                .process
                .iter()
                .map(|s| format!("<li>{}</li>", esc(s)))
                .collect::<String>(),
            feed = format_card("Feed", &ev.content_mechanics.post_formats.feed),
            reels = format_card("Reels", &ev.content_mechanics.post_formats.reels),
            stories = format_card("Stories", &ev.content_mechanics.post_formats.stories),
            quant = multiline(&ev.goal.quantitative),
            qual = multiline(&ev.goal.qualitative),
            metric = multiline(&ev.performance_metric),
            rewards = multiline(&ev.rewards),
            budget = esc(&ev.budget),
        );
    }

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Event Plan</title>
<style>
body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; color: #222; }}
section.event {{ border: 1px solid #ddd; border-radius: 8px; padding: 1rem 1.5rem; margin-bottom: 1.5rem; }}
h2 {{ margin-top: 0; }}
.dates {{ color: #666; }}
.card {{ background: #f7f7f7; border-radius: 6px; padding: .5rem 1rem; margin: .5rem 0; }}
.hashtags {{ color: #3366cc; }}
.budget {{ font-weight: bold; }}
</style>
</head>
<body>
<h1>Event Plan</h1>
{body}</body>
</html>
"#
    )
}

fn format_card(name: &str, format: &PostFormat) -> String {
    let mut out = format!("<div class=\"card\"><h4>{}</h4>", esc(name));
    if let Some(slides) = &format.carousel_slides {
        out.push_str("<ul>");
        for s in slides {
            let _ = write!(out, "<li>slide {}: {}</li>", s.slide, esc(&s.concept));
        }
        out.push_str("</ul>");
    }
    for (label, value) in [
        ("Duration", &format.duration),
        ("Hook", &format.hook_first_3s),
        ("Scenes", &format.main_scenes),
        ("Audio", &format.audio),
    ] {
        if let Some(v) = value {
            let _ = write!(out, "<p>{label}: {}</p>", esc(v));
        }
    }
    if let Some(caption) = &format.caption {
        let _ = write!(out, "<p>{}</p>", multiline(caption));
    }
    for frame in [&format.frame1, &format.frame2, &format.frame3]
        .into_iter()
        .flatten()
    {
        let _ = write!(out, "<p>[{}] {}</p>", esc(&frame.kind), esc(&frame.text));
    }
    if !format.hashtags.is_empty() {
        let tags = format
            .hashtags
            .iter()
            .map(|t| esc(t))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = write!(out, "<p class=\"hashtags\">{tags}</p>");
    }
    out.push_str("</div>");
    out
}

fn esc(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn multiline(s: &str) -> String {
    esc(s).replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recover::fallback_plan;

    #[test]
    fn html_document_is_self_contained_and_escaped() {
        let mut plan = fallback_plan();
        if let Some((_, ev)) = plan.0.iter_mut().next() {
            ev.event_concept = "a <b>bold</b> & risky concept".to_string();
        }
        let html = to_html(&plan);
        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("event1"));
        assert!(html.contains("a &lt;b&gt;bold&lt;/b&gt; &amp; risky concept"));
        assert!(!html.contains("<b>bold</b>"));
        // Every rendering path has data even for the fallback plan.
        assert!(html.contains("#event"));
        assert!(html.contains("Budget: 100"));
    }
}
