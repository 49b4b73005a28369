use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Snapshots buffered per subscriber before the slowest one starts lagging.
const SNAPSHOT_CHANNEL_CAPACITY: usize = 32;

pub const DEPOSIT_STEP: &str = "deposit";
pub const MINT_STEP: &str = "mint";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl StepStatus {
    fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Processing => 1,
            Self::Completed | Self::Failed => 2,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionStep {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: StepStatus,
    pub tx_hash: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    /// Failure reason, set by `ProgressTracker::fail`.
    pub detail: Option<String>,
}

impl TransactionStep {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            status: StepStatus::Pending,
            tx_hash: None,
            timestamp: None,
            detail: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerState {
    Running,
    Succeeded,
    Failed,
}

/// Copy of the tracker published to subscribers after every accepted update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackerSnapshot {
    pub steps: Vec<TransactionStep>,
    pub state: TrackerState,
    pub progress_percent: f64,
}

/// Ordered, sequential multi-step operation.
///
/// Steps only move forward (`pending -> processing -> completed | failed`) and a
/// step may only start once every step before it completed. The first failure
/// makes the whole tracker `Failed`; from then on every update is refused and the
/// progress stays where it was.
#[derive(Debug)]
pub struct ProgressTracker {
    steps: Vec<TransactionStep>,
    state: TrackerState,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    sender: broadcast::Sender<TrackerSnapshot>,
}

impl ProgressTracker {
    /// Builds a tracker over `steps`, all reset to pending.
    ///
    /// # Arguments
    /// * `steps` - Non-empty list with unique step ids, in execution order
    pub fn new(steps: Vec<TransactionStep>) -> Result<Self, ProgressError> {
        if steps.is_empty() {
            return Err(ProgressError::NoSteps);
        }
        for (i, step) in steps.iter().enumerate() {
            if steps[..i].iter().any(|s| s.id == step.id) {
                return Err(ProgressError::DuplicateStep(step.id.clone()));
            }
        }

        let mut tracker = Self::from_template(steps);
        tracker.clear_steps();
        Ok(tracker)
    }

    /// Fund transfer followed by the remote mint trigger.
    pub fn deposit_and_mint() -> Self {
        Self::from_template(vec![
            TransactionStep::new(
                DEPOSIT_STEP,
                "Deposit to Gateway",
                "Locking funds with the ZetaChain gateway on Solana",
            ),
            TransactionStep::new(
                MINT_STEP,
                "Mint on ZetaChain",
                "Sending the mint message to ZetaChain",
            ),
        ])
    }

    /// Local NFT mint flow.
    pub fn nft_mint() -> Self {
        Self::from_template(vec![
            TransactionStep::new(
                "upload",
                "Upload Image to IPFS",
                "Uploading your NFT image to decentralized storage",
            ),
            TransactionStep::new(
                "metadata",
                "Create Metadata",
                "Generating NFT metadata and uploading to IPFS",
            ),
            TransactionStep::new(
                MINT_STEP,
                "Mint NFT",
                "Creating your NFT on the Solana blockchain",
            ),
            TransactionStep::new(
                "verify",
                "Verify Ownership",
                "Confirming NFT ownership and updating records",
            ),
        ])
    }

    fn from_template(steps: Vec<TransactionStep>) -> Self {
        let (sender, _) = broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY);
        Self {
            steps,
            state: TrackerState::Running,
            started_at: Utc::now(),
            finished_at: None,
            sender,
        }
    }

    /// Moves one step forward and publishes a snapshot.
    ///
    /// # Arguments
    /// * `step_id`   - Id of the step to update
    /// * `status`    - New status, never behind the current one
    /// * `tx_hash`   - Transaction identifier to attach, if any
    /// * `timestamp` - Time of the update, defaults to now
    pub fn advance(
        &mut self,
        step_id: &str,
        status: StepStatus,
        tx_hash: Option<String>,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<(), ProgressError> {
        let index = self.check_update(step_id, status)?;
        self.apply(index, status, tx_hash, timestamp);
        Ok(())
    }

    /// Marks `step_id` failed with a reason.
    pub fn fail(
        &mut self,
        step_id: &str,
        detail: impl Into<String>,
        tx_hash: Option<String>,
    ) -> Result<(), ProgressError> {
        let index = self.check_update(step_id, StepStatus::Failed)?;
        self.steps[index].detail = Some(detail.into());
        self.apply(index, StepStatus::Failed, tx_hash, None);
        Ok(())
    }

    fn check_update(&self, step_id: &str, status: StepStatus) -> Result<usize, ProgressError> {
        if self.state == TrackerState::Failed {
            return Err(ProgressError::TrackerFailed);
        }

        let index = self
            .steps
            .iter()
            .position(|s| s.id == step_id)
            .ok_or_else(|| ProgressError::UnknownStep(step_id.to_string()))?;

        let current = self.steps[index].status;
        if current.is_terminal() {
            return Err(ProgressError::StepFinished(step_id.to_string()));
        }
        if status.rank() < current.rank() {
            return Err(ProgressError::BackwardTransition {
                step: step_id.to_string(),
                from: current,
                to: status,
            });
        }
        if status != StepStatus::Pending {
            if let Some(blocked_by) = self.steps[..index]
                .iter()
                .find(|s| s.status != StepStatus::Completed)
            {
                return Err(ProgressError::OutOfOrder {
                    step: step_id.to_string(),
                    blocked_by: blocked_by.id.clone(),
                });
            }
        }

        Ok(index)
    }

    fn apply(
        &mut self,
        index: usize,
        status: StepStatus,
        tx_hash: Option<String>,
        timestamp: Option<DateTime<Utc>>,
    ) {
        let now = timestamp.unwrap_or_else(Utc::now);
        let step = &mut self.steps[index];
        step.status = status;
        step.timestamp = Some(now);
        if tx_hash.is_some() {
            step.tx_hash = tx_hash;
        }

        if status == StepStatus::Failed {
            self.state = TrackerState::Failed;
            self.finished_at = Some(now);
        } else if self.steps.iter().all(|s| s.status == StepStatus::Completed) {
            self.state = TrackerState::Succeeded;
            self.finished_at = Some(now);
        }

        // Nobody listening is fine
        let _ = self.sender.send(self.snapshot());
    }

    /// Completed steps over total steps, in percent.
    pub fn progress_percent(&self) -> f64 {
        let completed = self
            .steps
            .iter()
            .filter(|s| s.status == StepStatus::Completed)
            .count();
        completed as f64 / self.steps.len() as f64 * 100.0
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn steps(&self) -> &[TransactionStep] {
        &self.steps
    }

    pub fn step(&self, step_id: &str) -> Option<&TransactionStep> {
        self.steps.iter().find(|s| s.id == step_id)
    }

    /// The failed step, or the first one not completed yet.
    pub fn current_step(&self) -> Option<&TransactionStep> {
        self.steps
            .iter()
            .find(|s| s.status == StepStatus::Failed)
            .or_else(|| self.steps.iter().find(|s| s.status != StepStatus::Completed))
    }

    /// Time since start, frozen once the tracker reached a final state.
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at.unwrap_or_else(Utc::now) - self.started_at
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        TrackerSnapshot {
            steps: self.steps.clone(),
            state: self.state,
            progress_percent: self.progress_percent(),
        }
    }

    /// Receives a snapshot after each accepted update. Dropping the receiver
    /// only stops observation.
    pub fn subscribe(&self) -> broadcast::Receiver<TrackerSnapshot> {
        self.sender.subscribe()
    }

    /// A new tracker over the same steps, all pending, with its own subscriber
    /// channel. `self` keeps its state.
    pub fn reset(&self) -> Self {
        let mut tracker = Self::from_template(self.steps.clone());
        tracker.clear_steps();
        tracker
    }

    fn clear_steps(&mut self) {
        for step in &mut self.steps {
            step.status = StepStatus::Pending;
            step.tx_hash = None;
            step.timestamp = None;
            step.detail = None;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    #[error("A tracker needs at least one step")]
    NoSteps,
    #[error("Duplicate step id {0:?}")]
    DuplicateStep(String),
    #[error("Unknown step {0:?}")]
    UnknownStep(String),
    #[error("Step {0:?} already finished")]
    StepFinished(String),
    #[error("Step {step:?} cannot go from {from:?} to {to:?}")]
    BackwardTransition {
        step: String,
        from: StepStatus,
        to: StepStatus,
    },
    #[error("Step {step:?} cannot start before {blocked_by:?} completes")]
    OutOfOrder { step: String, blocked_by: String },
    #[error("Tracker already failed")]
    TrackerFailed,
}
