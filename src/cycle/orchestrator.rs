use super::log::EventLog;
use super::phase::Phase;
use crate::content::{CANDIDATES_PER_CYCLE, ContentSet, DailyAsset, select_best};
use crate::error::CycleError;
use crate::llm::IntelligenceClient;
use crate::profile::UserConfig;
use chrono::Local;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

/// Insights text used when synthesis fails.
pub const INSIGHT_PLACEHOLDER: &str = "No insights available due to processing error.";

/// Past winning topics fed back into generation.
const RECENT_TOPIC_MEMORY: usize = 30;

/// How a `run_cycle` call ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Completed(DailyAsset),
    /// A step failed; the phase is back at `Ready`.
    Failed(CycleError),
    Cancelled,
    /// The cycle never started.
    Rejected(CycleError),
}

impl CycleOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn asset(&self) -> Option<&DailyAsset> {
        match self {
            Self::Completed(asset) => Some(asset),
            _ => None,
        }
    }
}

struct CycleState {
    phase: Phase,
    profile: Option<Arc<UserConfig>>,
    daily_asset: Option<DailyAsset>,
    recent_topics: VecDeque<String>,
}

impl CycleState {
    fn transition(&mut self, to: Phase) -> Result<(), CycleError> {
        if !self.phase.can_transition_to(to) {
            return Err(CycleError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        tracing::debug!(from = %self.phase, to = %to, "phase transition");
        self.phase = to;
        Ok(())
    }

    fn remember_topic(&mut self, topic: &str) {
        self.recent_topics.push_front(topic.to_string());
        self.recent_topics.truncate(RECENT_TOPIC_MEMORY);
    }
}

/// Drives the research → generation → selection → insight pipeline and owns
/// everything the presentation surface reads.
pub struct Orchestrator {
    client: Arc<dyn IntelligenceClient>,
    log: Arc<EventLog>,
    state: Mutex<CycleState>,
    in_flight: AtomicBool,
}

/// Marks a cycle as in flight. Dropping it without `settle` (the cycle
/// future was dropped mid-step) puts the phase back to `Ready`.
struct InFlight<'a> {
    orchestrator: &'a Orchestrator,
    settled: bool,
}

impl InFlight<'_> {
    fn settle(mut self) {
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            let mut state = self.orchestrator.lock_state();
            if state.phase == Phase::Processing {
                state.phase = Phase::Ready;
                drop(state);
                self.orchestrator
                    .log
                    .warning("Cycle interrupted before completion. System returned to ready.");
            }
        }
        self.orchestrator.in_flight.store(false, Ordering::Release);
    }
}

impl Orchestrator {
    pub fn new(client: Arc<dyn IntelligenceClient>) -> Self {
        Self::with_log(client, Arc::new(EventLog::new()))
    }

    /// Build an orchestrator that appends to a log shared with the host.
    pub fn with_log(client: Arc<dyn IntelligenceClient>, log: Arc<EventLog>) -> Self {
        log.success("System initialized. Nexus Content Engine ready.");
        Self {
            client,
            log,
            state: Mutex::new(CycleState {
                phase: Phase::Onboarding,
                profile: None,
                daily_asset: None,
                recent_topics: VecDeque::new(),
            }),
            in_flight: AtomicBool::new(false),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, CycleState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    // ── Read accessors ──────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.lock_state().phase
    }

    /// Log entries, newest first.
    pub fn log(&self) -> Vec<super::SystemLogEntry> {
        self.log.entries()
    }

    pub fn event_log(&self) -> &Arc<EventLog> {
        &self.log
    }

    pub fn daily_asset(&self) -> Option<DailyAsset> {
        self.lock_state().daily_asset.clone()
    }

    pub fn is_processing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Topics of recent winners, most recent first.
    pub fn recent_topics(&self) -> Vec<String> {
        self.lock_state().recent_topics.iter().cloned().collect()
    }

    // ── Mutating entry points ───────────────────────────────────────────

    /// Hand over the onboarding profile and move to `Ready`. One-time only.
    pub fn complete_onboarding(&self, profile: Arc<UserConfig>) -> Result<(), CycleError> {
        profile
            .validate()
            .map_err(|e| CycleError::InvalidProfile(e.to_string()))?;

        let mut state = self.lock_state();
        state.transition(Phase::Ready)?;
        state.profile = Some(profile);
        drop(state);

        self.log.success("Onboarding sequence complete. Training data ingested.");
        Ok(())
    }

    pub async fn run_cycle(&self) -> CycleOutcome {
        self.run_cycle_with_cancel(&CancellationToken::new()).await
    }

    /// Run one cycle, honouring `cancel` at each step boundary.
    pub async fn run_cycle_with_cancel(&self, cancel: &CancellationToken) -> CycleOutcome {
        let (guard, profile, recent_topics) = match self.begin() {
            Ok(started) => started,
            Err(error) => {
                tracing::warn!(%error, "cycle request rejected");
                return CycleOutcome::Rejected(error);
            }
        };

        let span = tracing::info_span!(
            "cycle",
            id = %Uuid::new_v4(),
            client = self.client.name()
        );
        let result = self
            .execute(&profile, &recent_topics, cancel)
            .instrument(span)
            .await;

        let outcome = self.finish(result);
        guard.settle();
        outcome
    }

    fn begin(&self) -> Result<(InFlight<'_>, Arc<UserConfig>, Vec<String>), CycleError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(CycleError::AlreadyRunning);
        }
        let guard = InFlight {
            orchestrator: self,
            settled: false,
        };

        let mut state = self.lock_state();
        let Some(profile) = state.profile.clone() else {
            return Err(CycleError::NotOnboarded);
        };
        state.transition(Phase::Processing)?;
        let recent = state.recent_topics.iter().cloned().collect();
        drop(state);

        Ok((guard, profile, recent))
    }

    fn checkpoint(cancel: &CancellationToken) -> Result<(), CycleError> {
        if cancel.is_cancelled() {
            Err(CycleError::Cancelled)
        } else {
            Ok(())
        }
    }

    async fn execute(
        &self,
        profile: &UserConfig,
        recent_topics: &[String],
        cancel: &CancellationToken,
    ) -> Result<DailyAsset, CycleError> {
        Self::checkpoint(cancel)?;
        let blueprint = self.research_step(profile).await?;

        Self::checkpoint(cancel)?;
        let candidates = self
            .generation_step(profile, &blueprint, recent_topics)
            .await?;

        Self::checkpoint(cancel)?;
        let selected = self.selection_step(&candidates)?;

        Self::checkpoint(cancel)?;
        let insights = self.insight_step(&selected).await;

        Ok(DailyAsset {
            date: Local::now().date_naive(),
            selected_content: selected,
            insights,
        })
    }

    async fn research_step(&self, profile: &UserConfig) -> Result<String, CycleError> {
        self.log.info("PHASE 3: Initiating internet surfing & creator intelligence...");
        let blueprint = self
            .client
            .research(profile)
            .await
            .map_err(|e| CycleError::Research(e.to_string()))?;
        tracing::info!(
            stage = "research",
            sources = blueprint.sources.len(),
            "blueprint ready"
        );
        self.log.success("PHASE 4: Blueprint generated. Hook patterns extracted.");
        Ok(blueprint.render())
    }

    async fn generation_step(
        &self,
        profile: &UserConfig,
        blueprint: &str,
        recent_topics: &[String],
    ) -> Result<Vec<ContentSet>, CycleError> {
        self.log.info("PHASE 5: Firing content generation engine...");
        let candidates = self
            .client
            .generate(profile, blueprint, recent_topics)
            .await
            .map_err(|e| CycleError::Generation(e.to_string()))?;

        if candidates.is_empty() {
            return Err(CycleError::Generation(
                "the service returned no valid candidates".into(),
            ));
        }
        if candidates.len() != CANDIDATES_PER_CYCLE {
            tracing::warn!(
                stage = "generation",
                candidates = candidates.len(),
                expected = CANDIDATES_PER_CYCLE,
                "partial batch; selecting from what was returned"
            );
        }

        self.log.success(format!(
            "PHASE 6: {} content sets generated. Scoring performance...",
            candidates.len()
        ));
        Ok(candidates)
    }

    fn selection_step(&self, candidates: &[ContentSet]) -> Result<ContentSet, CycleError> {
        self.log.info(format!(
            "Ranking {} candidates by predictive score...",
            candidates.len()
        ));
        let selected = select_best(candidates)
            .cloned()
            .ok_or_else(|| CycleError::Generation("nothing to score".into()))?;
        tracing::info!(
            stage = "selection",
            id = %selected.id,
            score = selected.score,
            "winner selected"
        );
        self.log.success(format!(
            "PHASE 7: Logic-based selection complete. Winner: \"{}\" (Score: {})",
            selected.topic, selected.score
        ));
        Ok(selected)
    }

    async fn insight_step(&self, selected: &ContentSet) -> String {
        self.log.info("Synthesizing trend insights for the winning set...");
        match self.client.synthesize_insight(selected).await {
            Ok(insights) => {
                self.log.success("Insight synthesis complete.");
                insights
            }
            Err(error) => {
                tracing::warn!(stage = "insight", %error, "insight synthesis failed");
                self.log.warning("Insight synthesis unavailable. Using placeholder analysis.");
                INSIGHT_PLACEHOLDER.to_string()
            }
        }
    }

    fn finish(&self, result: Result<DailyAsset, CycleError>) -> CycleOutcome {
        match result {
            Ok(asset) => {
                self.log.info(
                    "PHASE 8: Logging selection to memory database. Preventing future repetition.",
                );
                let mut state = self.lock_state();
                state.remember_topic(&asset.selected_content.topic);
                state.daily_asset = Some(asset.clone());
                if let Err(error) = state.transition(Phase::Completed) {
                    tracing::error!(%error, "unexpected phase at cycle completion");
                    state.phase = Phase::Completed;
                }
                CycleOutcome::Completed(asset)
            }
            Err(error) => {
                if error.is_fatal_stage() {
                    tracing::error!(stage = error.stage(), %error, "cycle aborted");
                    self.log.error(format!("CRITICAL SYSTEM ALERT: Cycle failed. {error}"));
                } else {
                    tracing::warn!(stage = error.stage(), %error, "cycle stopped");
                    self.log.warning("Cycle cancelled. System returned to ready.");
                }
                let mut state = self.lock_state();
                if let Err(transition_error) = state.transition(Phase::Ready) {
                    tracing::error!(%transition_error, "unexpected phase at cycle abort");
                    state.phase = Phase::Ready;
                }
                drop(state);

                if error == CycleError::Cancelled {
                    CycleOutcome::Cancelled
                } else {
                    CycleOutcome::Failed(error)
                }
            }
        }
    }
}
