use crate::app::render::{render_asset, render_entry, render_profile, render_status};
use crate::cli::{Cli, Commands, OnboardArgs};
use anyhow::{Context, Result, bail};
use nexus::Config;
use nexus::cycle::{CycleOutcome, Orchestrator};
use nexus::llm::GeminiClient;
use nexus::profile::{
    BrandInputs, ContentConstraints, ProfileStore, SocialConnections, TrainingData, UserConfig,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::TryRecvError;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    let store = ProfileStore::new(&config.profile_path);

    match cli.command {
        Commands::Onboard(args) => {
            let profile = profile_from_args(args)?;
            store.save(&profile)?;
            println!("{}", render_profile(&profile));
            println!();
            println!("Profile saved to {}", store.path().display());
            Ok(())
        }

        Commands::Run { json } => {
            let orchestrator = build_orchestrator(&config, &store)?;
            let cancel = cancel_on_ctrl_c();
            match drive_cycle(&orchestrator, &cancel).await {
                CycleOutcome::Completed(asset) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&asset)?);
                    } else {
                        println!();
                        println!("{}", render_asset(&asset));
                    }
                    Ok(())
                }
                CycleOutcome::Cancelled => {
                    eprintln!("Cycle cancelled.");
                    Ok(())
                }
                CycleOutcome::Failed(error) | CycleOutcome::Rejected(error) => {
                    Err(error).context("content cycle did not complete")
                }
            }
        }

        Commands::Daily => run_daily(&config, &store).await,

        Commands::Profile => {
            let profile = store.load_required()?;
            println!("{}", render_profile(&profile));
            Ok(())
        }

        Commands::Status => {
            let has_auth = GeminiClient::from_config(&config).has_any_auth();
            println!("{}", render_status(&config, store.exists(), has_auth));
            Ok(())
        }
    }
}

/// Build a profile from onboarding flags, or read it whole from `--from-file`.
fn profile_from_args(args: OnboardArgs) -> Result<UserConfig> {
    if let Some(path) = &args.from_file {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile file {}", path.display()))?;
        let profile: UserConfig =
            serde_json::from_str(&raw).context("Failed to parse profile file")?;
        profile.validate()?;
        return Ok(profile);
    }

    let mut connections = SocialConnections::default();
    for platform in &args.connections {
        if !connections.connect(platform) {
            bail!(
                "Unknown platform '{platform}' (expected instagram, youtube, x, linkedin, tiktok)"
            );
        }
    }

    let training = TrainingData::from_files(&args.videos, &args.images, args.voice.as_deref())?;

    let profile = UserConfig {
        connections,
        brand: BrandInputs {
            primary_niche: args.niche.context("--niche is required")?,
            sub_niches: args.sub_niches,
            target_audience: args.audience.context("--audience is required")?,
            tone: args.tone.context("--tone is required")?,
        },
        training,
        constraints: ContentConstraints {
            topics_to_avoid: args.avoid_topics,
            words_to_avoid: args.avoid_words,
            priority_platforms: args.platforms,
            frequency: args.frequency,
        },
    };
    profile.validate()?;
    Ok(profile)
}

fn build_orchestrator(config: &Config, store: &ProfileStore) -> Result<Orchestrator> {
    let profile = store.load_required()?;
    let client = GeminiClient::from_config(config);
    if !client.has_any_auth() {
        bail!(
            "No Gemini API key found. Set GEMINI_API_KEY or intelligence.api_key in {}",
            config.config_path.display()
        );
    }

    let orchestrator = Orchestrator::new(Arc::new(client));
    orchestrator.complete_onboarding(Arc::new(profile))?;
    Ok(orchestrator)
}

/// Token cancelled by the first Ctrl-C.
fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received; stopping after the current step");
            token.cancel();
        }
    });
    cancel
}

/// Run one cycle, printing log entries to stderr as they are appended.
async fn drive_cycle(orchestrator: &Orchestrator, cancel: &CancellationToken) -> CycleOutcome {
    let mut live = orchestrator.event_log().subscribe();
    let cycle = orchestrator.run_cycle_with_cancel(cancel);
    tokio::pin!(cycle);

    loop {
        tokio::select! {
            outcome = &mut cycle => {
                loop {
                    match live.try_recv() {
                        Ok(entry) => eprintln!("{}", render_entry(&entry)),
                        Err(TryRecvError::Lagged(_)) => {}
                        Err(_) => break,
                    }
                }
                return outcome;
            }
            Ok(entry) = live.recv() => eprintln!("{}", render_entry(&entry)),
        }
    }
}

async fn run_daily(config: &Config, store: &ProfileStore) -> Result<()> {
    let orchestrator = build_orchestrator(config, store)?;
    let cancel = cancel_on_ctrl_c();
    let every = Duration::from_secs(config.schedule.interval_hours * 3600);
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(interval_hours = config.schedule.interval_hours, "daily schedule started");
    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        match drive_cycle(&orchestrator, &cancel).await {
            CycleOutcome::Completed(asset) => {
                println!();
                println!("{}", render_asset(&asset));
            }
            CycleOutcome::Cancelled => break,
            CycleOutcome::Failed(error) => {
                eprintln!(
                    "Cycle failed: {error}. Next attempt in {}h.",
                    config.schedule.interval_hours
                );
            }
            CycleOutcome::Rejected(error) => return Err(error.into()),
        }
    }

    info!("daily schedule stopped");
    Ok(())
}
