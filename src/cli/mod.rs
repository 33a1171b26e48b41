use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// `Nexus` - autonomous daily content engine for creators.
#[derive(Parser, Debug)]
#[command(name = "nexus")]
#[command(version)]
#[command(
    about = "Research your niche, generate ten content sets, ship the best one.",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Capture your brand profile and training samples
    Onboard(OnboardArgs),

    /// Run one content cycle now
    Run {
        /// Print the daily asset as JSON instead of a formatted block
        #[arg(long)]
        json: bool,
    },

    /// Run a content cycle on the configured schedule until interrupted
    Daily,

    /// Show the stored brand profile
    Profile,

    /// Show configuration, models and profile status
    Status,
}

#[derive(Args, Debug, Default)]
pub struct OnboardArgs {
    /// Load the whole profile from a JSON file (other flags are ignored)
    #[arg(long, value_name = "PATH")]
    pub from_file: Option<PathBuf>,

    /// Primary niche, e.g. "home espresso"
    #[arg(long)]
    pub niche: Option<String>,

    /// Sub-niches (repeat or comma-separate)
    #[arg(long = "sub-niche", value_delimiter = ',')]
    pub sub_niches: Vec<String>,

    /// Who the content is for
    #[arg(long)]
    pub audience: Option<String>,

    /// Brand voice, e.g. "warm, nerdy"
    #[arg(long)]
    pub tone: Option<String>,

    /// Topics the engine must never cover
    #[arg(long = "avoid-topic", value_delimiter = ',')]
    pub avoid_topics: Vec<String>,

    /// Words the engine must never use
    #[arg(long = "avoid-word", value_delimiter = ',')]
    pub avoid_words: Vec<String>,

    /// Platforms to optimize for, most important first
    #[arg(long = "platform", value_delimiter = ',')]
    pub platforms: Vec<String>,

    /// Posting cadence, e.g. "daily"
    #[arg(long, default_value = "daily")]
    pub frequency: String,

    /// Connected accounts (instagram, youtube, x, linkedin, tiktok)
    #[arg(long = "connect", value_delimiter = ',')]
    pub connections: Vec<String>,

    /// Video samples of past content
    #[arg(long = "video", value_name = "PATH")]
    pub videos: Vec<PathBuf>,

    /// Image samples of past content
    #[arg(long = "image", value_name = "PATH")]
    pub images: Vec<PathBuf>,

    /// A recording of your voice
    #[arg(long, value_name = "PATH")]
    pub voice: Option<PathBuf>,
}
