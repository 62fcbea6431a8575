use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::error::{describe_types, UploadError};
use super::file::{FileCandidate, UploadFile, UploadStatus};
use super::preview::PreviewRegistry;
use super::transfer::{ProgressEvent, ProgressSink, Transfer, TransferRequest};
use crate::config::UploadConfig;
use crate::consts::UPLOAD_ID_PREFIX;
use crate::ids::generate_id;
use crate::photo::{Dimensions, Photo};
use crate::rotation::upload_rotation;

/// Live feedback while a batch uploads. All methods default to no-ops.
pub trait UploadObserver {
    /// A file reported new progress.
    fn on_progress(&mut self, _file: &UploadFile) {}

    /// A file reached success or error.
    fn on_settled(&mut self, _file: &UploadFile) {}

    /// The batch finished with at least one success.
    fn on_upload(&mut self, _photos: &[Photo]) {}
}

/// Mutable view of the session's files for the duration of one batch.
///
/// Dropping it fails every file still uploading. On normal completion every
/// file is already terminal and this is a no-op; when the `upload()` future is
/// dropped mid-batch it moves the abandoned files to `Error`.
struct InFlight<'a> {
    files: &'a mut Vec<UploadFile>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut abandoned = 0usize;
        for file in self.files.iter_mut() {
            if file.status() == UploadStatus::Uploading && file.fail(UploadError::TransferFailed) {
                abandoned += 1;
            }
        }
        if abandoned > 0 {
            warn!(abandoned, "Upload cancelled, in-flight files failed");
        }
    }
}

/// Observer that ignores everything.
#[derive(Debug, Default)]
pub struct NoOpObserver;
impl UploadObserver for NoOpObserver {}

/// Outcome of one `upload()` call.
#[derive(Debug, Default)]
pub struct UploadSummary {
    /// Records for the files that succeeded in this batch.
    pub photos: Vec<Photo>,
    pub succeeded: usize,
    pub failed: usize,
}

/// A batch of staged files for one target year.
#[derive(Debug)]
pub struct UploadSession {
    year: i32,
    config: UploadConfig,
    files: Vec<UploadFile>,
    previews: Arc<PreviewRegistry>,
    rng: StdRng,
}

impl UploadSession {
    pub fn new(year: i32, config: UploadConfig) -> Self {
        Self::with_previews(year, config, PreviewRegistry::new())
    }

    /// Session whose preview URLs are tracked by a shared registry.
    pub fn with_previews(year: i32, config: UploadConfig, previews: Arc<PreviewRegistry>) -> Self {
        Self {
            year,
            config,
            files: Vec::new(),
            previews,
            rng: StdRng::from_entropy(),
        }
    }

    /// Make id suffixes and upload tilts reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    pub fn previews(&self) -> &Arc<PreviewRegistry> {
        &self.previews
    }

    pub fn files(&self) -> &[UploadFile] {
        &self.files
    }

    pub fn file(&self, id: &str) -> Option<&UploadFile> {
        self.files.iter().find(|f| f.id() == id)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.count(UploadStatus::Pending)
    }

    pub fn has_pending(&self) -> bool {
        self.pending_count() > 0
    }

    pub fn has_successes(&self) -> bool {
        self.count(UploadStatus::Success) > 0
    }

    fn count(&self, status: UploadStatus) -> usize {
        self.files.iter().filter(|f| f.status() == status).count()
    }

    /// Check a candidate against the type allowlist, then the size limit.
    pub fn validate(&self, candidate: &FileCandidate) -> Result<(), UploadError> {
        if !self.config.accepts(&candidate.mime_type) {
            return Err(UploadError::InvalidType {
                mime_type: candidate.mime_type.clone(),
                allowed: describe_types(&self.config.accepted_types),
            });
        }
        if candidate.size > self.config.max_file_size {
            return Err(UploadError::TooLarge {
                size: candidate.size,
                max_size: self.config.max_file_size,
            });
        }
        Ok(())
    }

    /// Stage files until the session holds `max_files` entries.
    ///
    /// Every staged file gets an id and a preview; files failing validation
    /// are staged in `Error` status with the reason. Returns the appended
    /// entries.
    pub fn add_files<I>(&mut self, candidates: I) -> &[UploadFile]
    where
        I: IntoIterator<Item = FileCandidate>,
    {
        let start = self.files.len();
        let mut dropped = 0usize;
        for candidate in candidates {
            if self.files.len() >= self.config.max_files {
                dropped += 1;
                continue;
            }
            let validation = self.validate(&candidate);
            if let Err(ref err) = validation {
                warn!(file = candidate.name.as_str(), reason = %err, "Rejected file");
            }
            let id = generate_id(UPLOAD_ID_PREFIX, &mut self.rng);
            let preview = self.previews.create();
            self.files
                .push(UploadFile::new(id, candidate, preview, validation));
        }
        if dropped > 0 {
            warn!(
                dropped,
                max_files = self.config.max_files,
                "Session is full, ignoring extra files"
            );
        }
        debug!(added = self.files.len() - start, total = self.files.len(), "Files staged");
        &self.files[start..]
    }

    /// Remove a file and release its preview. Unknown ids are a no-op.
    pub fn remove_file(&mut self, id: &str) -> bool {
        match self.files.iter().position(|f| f.id() == id) {
            Some(index) => {
                self.files.remove(index);
                debug!(file_id = id, "File removed");
                true
            }
            None => false,
        }
    }

    /// Set a caption. Files that already succeeded keep theirs.
    pub fn update_caption(&mut self, id: &str, caption: impl Into<String>) -> bool {
        match self.files.iter_mut().find(|f| f.id() == id) {
            Some(file) if file.status() != UploadStatus::Success => {
                file.set_caption(caption.into());
                true
            }
            _ => false,
        }
    }

    /// Drop every file, releasing all previews.
    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Upload every pending file concurrently and wait for all of them.
    ///
    /// Each file runs as its own task; progress flows back over a channel and
    /// is applied here, so the session stays the single owner of its state.
    /// A failed file never cancels the others. Dropping the returned future
    /// aborts the transfers still in flight and fails their files with
    /// [`UploadError::TransferFailed`], so no file is left uploading.
    pub async fn upload<T, O>(&mut self, transfer: Arc<T>, observer: &mut O) -> UploadSummary
    where
        T: Transfer,
        O: UploadObserver + ?Sized,
    {
        let batch: Vec<usize> = self
            .files
            .iter()
            .enumerate()
            .filter(|(_, f)| f.status() == UploadStatus::Pending)
            .map(|(i, _)| i)
            .collect();
        if batch.is_empty() {
            debug!("Nothing to upload");
            return UploadSummary::default();
        }

        info!(files = batch.len(), year = self.year, "Starting upload");

        let in_flight = InFlight { files: &mut self.files };
        let (tx, mut rx) = mpsc::unbounded_channel::<ProgressEvent>();
        let mut tasks = JoinSet::new();
        let mut task_files = HashMap::with_capacity(batch.len());

        for (ordinal, &index) in batch.iter().enumerate() {
            let file = &mut in_flight.files[index];
            file.transition(UploadStatus::Uploading);

            let request = TransferRequest {
                file_id: file.id().to_string(),
                ordinal,
                name: file.source().name.clone(),
                mime_type: file.source().mime_type.clone(),
                size: file.source().size,
                preview_url: file.preview_url().to_string(),
            };
            let sink = ProgressSink::new(request.file_id.clone(), tx.clone());
            let transfer = Arc::clone(&transfer);
            let file_id = request.file_id.clone();

            let handle = tasks.spawn(async move {
                let outcome = transfer.transfer(request, sink).await;
                (file_id, outcome)
            });
            task_files.insert(handle.id(), file.id().to_string());
        }
        drop(tx);

        let mut succeeded_ids = Vec::new();
        let mut failed = 0usize;

        loop {
            tokio::select! {
                biased;

                Some(event) = rx.recv() => {
                    if let Some(file) = in_flight.files.iter_mut().find(|f| f.id() == event.file_id) {
                        if file.set_progress(event.percent) {
                            observer.on_progress(file);
                        }
                    }
                }
                joined = tasks.join_next() => {
                    let (file_id, outcome) = match joined {
                        Some(Ok(result)) => result,
                        Some(Err(err)) => {
                            let Some(file_id) = task_files.get(&err.id()).cloned() else {
                                continue;
                            };
                            warn!(
                                file_id = file_id.as_str(),
                                error = %err,
                                "Transfer task died"
                            );
                            (file_id, Err(UploadError::TransferFailed))
                        }
                        None => break,
                    };
                    let Some(file) = in_flight.files.iter_mut().find(|f| f.id() == file_id) else {
                        continue;
                    };
                    match outcome {
                        Ok(()) => {
                            if file.succeed() {
                                debug!(file_id = file_id.as_str(), "Upload succeeded");
                                succeeded_ids.push(file_id);
                            }
                        }
                        Err(err) => {
                            warn!(
                                file_id = file_id.as_str(),
                                file = file.source().name.as_str(),
                                "Upload failed"
                            );
                            if file.fail(err) {
                                failed += 1;
                            }
                        }
                    }
                    observer.on_settled(file);
                }
            }
        }

        drop(in_flight);

        let uploaded_at = Utc::now();
        let mut photos = Vec::with_capacity(succeeded_ids.len());
        for id in &succeeded_ids {
            let Some(file) = self.files.iter().find(|f| f.id() == id.as_str()) else {
                continue;
            };
            let caption = Some(file.caption().to_string()).filter(|c| !c.trim().is_empty());
            photos.push(Photo {
                id: file.id().to_string(),
                filename: file.source().name.clone(),
                url: file.preview_url().to_string(),
                caption,
                year: self.year,
                position: None,
                rotation_angle: Some(upload_rotation(&mut self.rng)),
                is_favorite: None,
                uploaded_at,
                taken_at: None,
                file_size: file.source().size,
                dimensions: Dimensions::default(),
            });
        }

        info!(succeeded = photos.len(), failed, "Upload finished");
        if !photos.is_empty() {
            observer.on_upload(&photos);
        }

        UploadSummary {
            succeeded: photos.len(),
            failed,
            photos,
        }
    }
}
