//! Prompt text for the three cycle calls.

use crate::content::{CANDIDATES_PER_CYCLE, ContentSet};
use crate::profile::UserConfig;
use std::fmt::Write as _;

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

pub fn research_prompt(profile: &UserConfig) -> String {
    let brand = &profile.brand;
    format!(
        "Act as an elite content strategist.\n\
         Research the top 100 creators in the niche: \"{niche}\".\n\
         Target Audience: {audience}.\n\
         \n\
         Identify:\n\
         1. Top 5 creators by engagement rate.\n\
         2. Dominant content formats.\n\
         3. Highest performing hook patterns in this niche.\n\
         4. Common CTAs and storytelling structures.\n\
         \n\
         Create a \"Niche Performance Blueprint\" summarizing these patterns.",
        niche = brand.primary_niche,
        audience = brand.target_audience,
    )
}

pub fn generation_prompt(
    profile: &UserConfig,
    blueprint: &str,
    recent_topics: &[String],
) -> String {
    let brand = &profile.brand;
    let constraints = &profile.constraints;

    let mut prompt = format!(
        "Based on this Niche Performance Blueprint:\n\"{blueprint}\"\n\n\
         And the user's brand profile:\n\
         Niche: {niche}\n\
         Sub-niches: {subs}\n\
         Target Audience: {audience}\n\
         Tone: {tone}\n\n\
         Generate {count} unique content sets.\n\
         Avoid topics like: {topics}.\n\
         Never use these words: {words}.\n",
        niche = brand.primary_niche,
        subs = list_or_none(&brand.sub_niches),
        audience = brand.target_audience,
        tone = brand.tone,
        count = CANDIDATES_PER_CYCLE,
        topics = list_or_none(&constraints.topics_to_avoid),
        words = list_or_none(&constraints.words_to_avoid),
    );

    if !constraints.priority_platforms.is_empty() {
        let _ = writeln!(
            prompt,
            "Optimize primarily for: {}.",
            constraints.priority_platforms.join(", ")
        );
    }
    if !recent_topics.is_empty() {
        let _ = writeln!(
            prompt,
            "These topics were already published recently; do not repeat them: {}.",
            recent_topics.join("; ")
        );
    }

    let _ = write!(
        prompt,
        "\nEach set must be structurally inspired but semantically original.\n\
         Give every set a distinct id and a predictive engagement score from 0 to 100.\n\
         Return exactly {CANDIDATES_PER_CYCLE} sets in JSON format."
    );
    prompt
}

pub fn insight_prompt(selected: &ContentSet) -> String {
    format!(
        "Analyze the potential of this content: \"{topic}\". \
         Why was it selected as the top choice today? \
         Provide logical reasoning based on current social media trends.",
        topic = selected.topic
    )
}
