use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub instruction: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReelScript {
    #[serde(default)]
    pub scenes: Vec<Scene>,
    #[serde(default)]
    pub narration: String,
}

/// One generated content package competing for selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSet {
    pub id: String,
    pub topic: String,
    pub post_text: String,
    pub carousel: Vec<String>,
    pub reel_script: ReelScript,
    #[serde(default)]
    pub story_frames: Vec<String>,
    pub caption: String,
    pub hashtags: Vec<String>,
    /// Predictive engagement score in `0..=100`.
    pub score: f64,
}

/// The cycle's deliverable: the winning candidate and why it won.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAsset {
    pub date: NaiveDate,
    pub selected_content: ContentSet,
    pub insights: String,
}

#[cfg(test)]
pub(crate) fn candidate(id: &str, score: f64) -> ContentSet {
    ContentSet {
        id: id.to_string(),
        topic: format!("topic {id}"),
        post_text: "Dialing in a new bag of beans".into(),
        carousel: vec!["Slide 1".into(), "Slide 2".into()],
        reel_script: ReelScript {
            scenes: vec![Scene {
                instruction: "Close-up of the portafilter".into(),
                text: "Watch the flow".into(),
            }],
            narration: "Today we pull three shots.".into(),
        },
        story_frames: vec!["Poll: light or dark roast?".into()],
        caption: "Which shot wins?".into(),
        hashtags: vec!["#espresso".into()],
        score,
    }
}
