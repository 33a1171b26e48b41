use chrono::Local;
use console::style;
use nexus::config::Config;
use nexus::content::DailyAsset;
use nexus::cycle::{Severity, SystemLogEntry};
use nexus::profile::UserConfig;
use std::fmt::Display;

fn header<D: Display>(text: D) -> String {
    style(text).white().bold().to_string()
}

fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

fn accent<D: Display>(text: D) -> String {
    style(text).cyan().bold().to_string()
}

fn value<D: Display>(text: D) -> String {
    style(text).green().to_string()
}

fn list_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

/// One log line: local time, severity tag, message.
pub fn render_entry(entry: &SystemLogEntry) -> String {
    let time = entry.timestamp.with_timezone(&Local).format("%H:%M:%S");
    let tag = format!("{:<7}", entry.severity.to_string().to_uppercase());
    let tag = match entry.severity {
        Severity::Info => style(tag).cyan(),
        Severity::Success => style(tag).green().bold(),
        Severity::Warning => style(tag).yellow(),
        Severity::Error => style(tag).red().bold(),
    };
    format!("{} {tag} {}", dim(time), entry.message)
}

pub fn render_asset(asset: &DailyAsset) -> String {
    let content = &asset.selected_content;
    let mut lines = vec![
        format!(
            "◆ {} {}",
            header("Daily asset"),
            dim(asset.date.format("%Y-%m-%d"))
        ),
        String::new(),
        format!("  {}     {}", accent("Topic"), value(&content.topic)),
        format!("  {}     {:.1}", accent("Score"), content.score),
        String::new(),
        header("Post"),
        content.post_text.clone(),
        String::new(),
        header("Carousel"),
    ];
    lines.extend(
        content
            .carousel
            .iter()
            .enumerate()
            .map(|(i, slide)| format!("  {}. {slide}", i + 1)),
    );

    lines.push(String::new());
    lines.push(header("Reel"));
    for scene in &content.reel_script.scenes {
        lines.push(format!("  {} {}", dim(format!("[{}]", scene.instruction)), scene.text));
    }
    lines.push(format!("  {} {}", dim("Narration:"), content.reel_script.narration));

    if !content.story_frames.is_empty() {
        lines.push(String::new());
        lines.push(header("Stories"));
        lines.extend(content.story_frames.iter().map(|f| format!("  - {f}")));
    }

    lines.extend([
        String::new(),
        header("Caption"),
        content.caption.clone(),
        dim(content.hashtags.join(" ")),
        String::new(),
        header("Why it wins"),
        asset.insights.clone(),
    ]);
    lines.join("\n")
}

pub fn render_profile(profile: &UserConfig) -> String {
    let brand = &profile.brand;
    let constraints = &profile.constraints;
    let connected: Vec<String> = profile
        .connections
        .connected()
        .into_iter()
        .map(String::from)
        .collect();

    [
        format!("◆ {}", header("Brand profile")),
        String::new(),
        format!("  Niche       {}", value(&brand.primary_niche)),
        format!("  Sub-niches  {}", list_or_dash(&brand.sub_niches)),
        format!("  Audience    {}", brand.target_audience),
        format!("  Tone        {}", brand.tone),
        String::new(),
        format!("  Avoid       {}", list_or_dash(&constraints.topics_to_avoid)),
        format!("  Banned      {}", list_or_dash(&constraints.words_to_avoid)),
        format!("  Platforms   {}", list_or_dash(&constraints.priority_platforms)),
        format!("  Frequency   {}", constraints.frequency),
        format!("  Connected   {}", list_or_dash(&connected)),
        format!("  Samples     {}", profile.training.sample_count()),
    ]
    .join("\n")
}

pub fn render_status(config: &Config, profile_present: bool, has_auth: bool) -> String {
    let intel = &config.intelligence;
    let check = |ok: bool, yes: &str, no: &str| {
        if ok {
            format!("✓ {yes}")
        } else {
            format!("✗ {no}")
        }
    };
    [
        format!("◆ {}", header("Nexus status")),
        String::new(),
        format!("Version     {}", env!("CARGO_PKG_VERSION")),
        format!("Config      {}", config.config_path.display()),
        format!("Profile     {}", config.profile_path.display()),
        String::new(),
        format!("  Research    {}", intel.research_model),
        format!(
            "  Generation  {} (thinking budget {})",
            intel.generation_model, intel.thinking_budget
        ),
        format!("  Insight     {}", intel.insight_model),
        format!(
            "  Search      {}",
            if intel.live_research { "live" } else { "off" }
        ),
        format!("  Schedule    every {}h", config.schedule.interval_hours),
        format!("  Log level   {}", config.observability.log_level),
        String::new(),
        format!("  Onboarded   {}", check(profile_present, "yes", "run `nexus onboard`")),
        format!("  API key     {}", check(has_auth, "found", "missing")),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use console::strip_ansi_codes;
    use nexus::content::{ContentSet, ReelScript, Scene};

    fn asset() -> DailyAsset {
        DailyAsset {
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            selected_content: ContentSet {
                id: "w".into(),
                topic: "Dialing in light roasts".into(),
                post_text: "Light roasts need a finer grind.".into(),
                carousel: vec!["Grind finer".into(), "Pull longer".into()],
                reel_script: ReelScript {
                    scenes: vec![Scene {
                        instruction: "Close-up of grinder".into(),
                        text: "Two clicks finer".into(),
                    }],
                    narration: "Light roasts fight back.".into(),
                },
                story_frames: Vec::new(),
                caption: "Try it tomorrow".into(),
                hashtags: vec!["#espresso".into(), "#lightroast".into()],
                score: 87.5,
            },
            insights: "Specific, actionable and timely.".into(),
        }
    }

    #[test]
    fn entry_shows_severity_and_message() {
        let entry = SystemLogEntry {
            timestamp: Utc::now(),
            message: "PHASE 5: Firing content generation engine...".into(),
            severity: Severity::Warning,
        };
        let plain = strip_ansi_codes(&render_entry(&entry)).to_string();
        assert!(plain.contains("WARNING"));
        assert!(plain.ends_with("PHASE 5: Firing content generation engine..."));
    }

    #[test]
    fn asset_block_lists_every_section() {
        let plain = strip_ansi_codes(&render_asset(&asset())).to_string();
        assert!(plain.contains("2026-03-14"));
        assert!(plain.contains("Dialing in light roasts"));
        assert!(plain.contains("87.5"));
        assert!(plain.contains("  2. Pull longer"));
        assert!(plain.contains("[Close-up of grinder] Two clicks finer"));
        assert!(plain.contains("#espresso #lightroast"));
        assert!(plain.contains("Specific, actionable and timely."));
        assert!(!plain.contains("Stories"));
    }

    #[test]
    fn status_points_at_onboarding_when_profile_missing() {
        let plain = strip_ansi_codes(&render_status(&Config::default(), false, true)).to_string();
        assert!(plain.contains("run `nexus onboard`"));
        assert!(plain.contains("gemini-3-pro-preview"));
        assert!(plain.contains("✓ found"));
    }
}
