use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;

use crate::plan::{EventPlan, PostFormat};

pub fn show_plan(plan: &EventPlan) {
    println!(
        "\n{}",
        "┏━━━━━━━━━━━━━━━━━━━━━━━ Event Plan ━━━━━━━━━━━━━━━━━━━━━━┓".bold()
    );
    if plan.is_empty() {
        println!("(no events)");
    }
    for (key, ev) in plan.events() {
        println!("\n{} {}", "[EVENT]".green().bold(), key.bold());
        println!("  {}  {} → {}", "Dates".bold(), ev.start_date, ev.end_date);
        println!("  {}  {}", "Concept".bold(), ev.event_concept);

        if !ev.content_mechanics.process.is_empty() {
            println!("  {}", "Process".bold());
            for (i, step) in ev.content_mechanics.process.iter().enumerate() {
                println!("    {}. {}", i + 1, step);
            }
        }

        let formats = &ev.content_mechanics.post_formats;
        show_format("Feed", &formats.feed);
        show_format("Reels", &formats.reels);
        show_format("Stories", &formats.stories);

        println!("  {}", "Goals".bold());
        println!("{}", indent(&ev.goal.quantitative, 4));
        println!("{}", indent(&ev.goal.qualitative, 4));
        println!("  {}", "Performance metric".bold());
        println!("{}", indent(&ev.performance_metric, 4));
        println!("  {}", "Rewards".bold());
        println!("{}", indent(&ev.rewards, 4));
        println!("  {}  {}", "Budget".bold(), ev.budget);
    }
    println!(
        "\n{}",
        "┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛".bold()
    );
}

fn show_format(name: &str, format: &PostFormat) {
    println!("  {} {}", "[POST]".cyan().bold(), name.bold());
    if let Some(slides) = &format.carousel_slides {
        for s in slides {
            println!("    slide {}: {}", s.slide, s.concept);
        }
    }
    if let Some(duration) = &format.duration {
        println!("    duration: {duration}");
    }
    if let Some(hook) = &format.hook_first_3s {
        println!("    hook: {hook}");
    }
    if let Some(scenes) = &format.main_scenes {
        println!("    scenes: {scenes}");
    }
    if let Some(audio) = &format.audio {
        println!("    audio: {audio}");
    }
    if let Some(caption) = &format.caption {
        println!("    caption:\n{}", indent(caption, 6));
    }
    for frame in [&format.frame1, &format.frame2, &format.frame3]
        .into_iter()
        .flatten()
    {
        println!("    frame [{}]: {}", frame.kind, frame.text);
    }
    if !format.hashtags.is_empty() {
        println!("    {}", format.hashtags.join(" "));
    }
}

pub fn confirm(prompt: &str) -> bool {
    print!("{} [y/N]: ", prompt);
    let _ = io::stdout().flush();
    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        let ans = s.trim().to_lowercase();
        ans == "y" || ans == "yes"
    } else {
        false
    }
}

/// Non-fatal problems the user should see but that must not stop the run.
pub fn notice(msg: &str) {
    eprintln!("{} {}", "notice:".yellow().bold(), msg);
}

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner());
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

fn indent(s: &str, n: usize) -> String {
    let pad = " ".repeat(n);
    s.lines()
        .map(|l| format!("{}{}", pad, l))
        .collect::<Vec<_>>()
        .join("\n")
}
