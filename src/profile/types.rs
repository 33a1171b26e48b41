use crate::error::ProfileError;
use anyhow::{Context, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialConnections {
    #[serde(default)]
    pub instagram: bool,
    #[serde(default)]
    pub youtube: bool,
    #[serde(default)]
    pub x: bool,
    #[serde(default)]
    pub linkedin: bool,
    #[serde(default)]
    pub tiktok: bool,
}

impl SocialConnections {
    /// Names of the connected platforms, in a fixed order.
    pub fn connected(&self) -> Vec<&'static str> {
        [
            ("instagram", self.instagram),
            ("youtube", self.youtube),
            ("x", self.x),
            ("linkedin", self.linkedin),
            ("tiktok", self.tiktok),
        ]
        .into_iter()
        .filter_map(|(name, on)| on.then_some(name))
        .collect()
    }

    /// Flip on a platform by name. Returns `false` for unknown names.
    pub fn connect(&mut self, platform: &str) -> bool {
        let flag = match platform.trim().to_ascii_lowercase().as_str() {
            "instagram" => &mut self.instagram,
            "youtube" => &mut self.youtube,
            "x" | "twitter" => &mut self.x,
            "linkedin" => &mut self.linkedin,
            "tiktok" => &mut self.tiktok,
            _ => return false,
        };
        *flag = true;
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandInputs {
    pub primary_niche: String,
    #[serde(default)]
    pub sub_niches: Vec<String>,
    pub target_audience: String,
    pub tone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentConstraints {
    #[serde(default)]
    pub topics_to_avoid: Vec<String>,
    #[serde(default)]
    pub words_to_avoid: Vec<String>,
    #[serde(default)]
    pub priority_platforms: Vec<String>,
    #[serde(default)]
    pub frequency: String,
}

/// Base64-encoded creator samples.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingData {
    #[serde(default)]
    pub videos: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_sample: Option<String>,
}

impl TrainingData {
    /// Read sample files from disk and base64-encode them.
    pub fn from_files<P: AsRef<Path>>(
        videos: &[P],
        images: &[P],
        voice: Option<&Path>,
    ) -> Result<Self> {
        Ok(Self {
            videos: encode_all(videos)?,
            images: encode_all(images)?,
            voice_sample: voice.map(encode_file).transpose()?,
        })
    }

    pub fn sample_count(&self) -> usize {
        self.videos.len() + self.images.len() + usize::from(self.voice_sample.is_some())
    }

    fn validate(&self) -> Result<(), ProfileError> {
        for (field, samples) in [("videos", &self.videos), ("images", &self.images)] {
            if let Some(index) = samples.iter().position(|s| STANDARD.decode(s).is_err()) {
                return Err(ProfileError::InvalidSample { field, index });
            }
        }
        if let Some(voice) = &self.voice_sample
            && STANDARD.decode(voice).is_err()
        {
            return Err(ProfileError::InvalidSample {
                field: "voiceSample",
                index: 0,
            });
        }
        Ok(())
    }
}

fn encode_all<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<String>> {
    paths.iter().map(|p| encode_file(p.as_ref())).collect()
}

fn encode_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read training sample {}", path.display()))?;
    Ok(STANDARD.encode(bytes))
}

/// Everything onboarding captured about the creator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub connections: SocialConnections,
    pub brand: BrandInputs,
    #[serde(default)]
    pub training: TrainingData,
    #[serde(default)]
    pub constraints: ContentConstraints,
}

impl UserConfig {
    pub fn validate(&self) -> Result<(), ProfileError> {
        let brand = &self.brand;
        for (field, value) in [
            ("primary niche", &brand.primary_niche),
            ("target audience", &brand.target_audience),
            ("tone", &brand.tone),
        ] {
            if value.trim().is_empty() {
                return Err(ProfileError::Invalid(format!("{field} must not be empty")));
            }
        }
        if brand.sub_niches.iter().any(|s| s.trim().is_empty()) {
            return Err(ProfileError::Invalid("sub-niches must not be blank".into()));
        }
        self.training.validate()
    }
}

#[cfg(test)]
pub(crate) fn sample_profile() -> UserConfig {
    UserConfig {
        connections: SocialConnections {
            instagram: true,
            tiktok: true,
            ..SocialConnections::default()
        },
        brand: BrandInputs {
            primary_niche: "home espresso".into(),
            sub_niches: vec!["latte art".into(), "grinder reviews".into()],
            target_audience: "hobbyist baristas".into(),
            tone: "warm, nerdy".into(),
        },
        training: TrainingData::default(),
        constraints: ContentConstraints {
            topics_to_avoid: vec!["instant coffee".into()],
            words_to_avoid: vec!["hack".into()],
            priority_platforms: vec!["instagram".into()],
            frequency: "daily".into(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn sample_profile_is_valid() {
        sample_profile().validate().unwrap();
    }

    #[test]
    fn blank_niche_is_rejected() {
        let mut profile = sample_profile();
        profile.brand.primary_niche = "   ".into();
        let err = profile.validate().unwrap_err();
        assert!(err.to_string().contains("primary niche"));
    }

    #[test]
    fn bad_base64_sample_is_reported_by_position() {
        let mut profile = sample_profile();
        profile.training.images = vec!["aGVsbG8=".into(), "not base64!".into()];
        let err = profile.validate().unwrap_err();
        assert!(matches!(
            err,
            ProfileError::InvalidSample {
                field: "images",
                index: 1
            }
        ));
    }

    #[test]
    fn wire_format_uses_camel_case() {
        let json = serde_json::to_value(sample_profile()).unwrap();
        assert_eq!(json["brand"]["primaryNiche"], "home espresso");
        assert_eq!(json["constraints"]["topicsToAvoid"][0], "instant coffee");
        assert!(json["training"].get("voiceSample").is_none());
    }

    #[test]
    fn connect_accepts_known_platforms_only() {
        let mut connections = SocialConnections::default();
        assert!(connections.connect("YouTube"));
        assert!(connections.connect("twitter"));
        assert!(!connections.connect("myspace"));
        assert_eq!(connections.connected(), vec!["youtube", "x"]);
    }

    #[test]
    fn from_files_encodes_samples() {
        let tmp = TempDir::new().unwrap();
        let image = tmp.path().join("frame.png");
        let voice = tmp.path().join("voice.wav");
        std::fs::write(&image, b"hello").unwrap();
        std::fs::write(&voice, b"hi").unwrap();

        let training =
            TrainingData::from_files(&[] as &[&Path], &[image.as_path()], Some(voice.as_path()))
                .unwrap();

        assert_eq!(training.images, vec!["aGVsbG8=".to_string()]);
        assert_eq!(training.voice_sample.as_deref(), Some("aGk="));
        assert_eq!(training.sample_count(), 2);
    }

    #[test]
    fn from_files_reports_missing_file() {
        let err = TrainingData::from_files(&[Path::new("/definitely/missing.mp4")], &[], None)
            .unwrap_err();
        assert!(err.to_string().contains("missing.mp4"));
    }
}
