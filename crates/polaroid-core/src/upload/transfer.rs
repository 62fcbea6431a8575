use std::future::Future;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tokio::time::sleep;

use super::error::UploadError;
use crate::config::SimulationConfig;
use crate::consts::PROGRESS_CEILING;
use crate::error::Result;

/// What a transfer needs to know about one file.
#[derive(Clone, Debug)]
pub struct TransferRequest {
    pub file_id: String,
    /// Position of the file within its batch.
    pub ordinal: usize,
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub preview_url: String,
}

/// Progress update travelling from a transfer task back to its session.
#[derive(Debug)]
pub(crate) struct ProgressEvent {
    pub file_id: String,
    pub percent: f64,
}

/// Where a transfer reports how far along it is.
#[derive(Clone, Debug)]
pub struct ProgressSink {
    file_id: String,
    tx: mpsc::UnboundedSender<ProgressEvent>,
}

impl ProgressSink {
    pub(crate) fn new(file_id: String, tx: mpsc::UnboundedSender<ProgressEvent>) -> Self {
        Self { file_id, tx }
    }

    /// Report progress as a percentage. Dropped silently once the session
    /// stopped listening.
    pub fn report(&self, percent: f64) {
        let _ = self.tx.send(ProgressEvent {
            file_id: self.file_id.clone(),
            percent,
        });
    }
}

/// Moves one file to storage.
///
/// Implementations run as independent tasks, one per file; a failure is
/// returned for that file alone and never affects the others.
pub trait Transfer: Send + Sync + 'static {
    fn transfer(
        &self,
        request: TransferRequest,
        progress: ProgressSink,
    ) -> impl Future<Output = std::result::Result<(), UploadError>> + Send;
}

/// Stand-in for a real backend: fake progress on a timer, then a weighted coin
/// flip for the outcome.
#[derive(Clone, Debug)]
pub struct SimulatedTransfer {
    config: SimulationConfig,
    seed: Option<u64>,
}

impl SimulatedTransfer {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, seed: None })
    }

    /// Reproducible progress and outcomes: each file draws from a generator
    /// seeded with `seed` plus its ordinal in the batch.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

impl Transfer for SimulatedTransfer {
    fn transfer(
        &self,
        request: TransferRequest,
        progress: ProgressSink,
    ) -> impl Future<Output = std::result::Result<(), UploadError>> + Send {
        let config = self.config.clone();
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(request.ordinal as u64)),
            None => StdRng::from_entropy(),
        };

        async move {
            let mut percent = 0.0;
            while percent < PROGRESS_CEILING {
                sleep(config.tick()).await;
                percent += rng.gen_range(0.0..config.max_increment);
                progress.report(percent.min(PROGRESS_CEILING));
            }

            sleep(config.settle()).await;
            if rng.gen_bool(config.success_rate) {
                Ok(())
            } else {
                Err(UploadError::TransferFailed)
            }
        }
    }
}
