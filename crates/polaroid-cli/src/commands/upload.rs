use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use clap::Args;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use polaroid_core::collection::merge_uploaded;
use polaroid_core::config::GalleryConfig;
use polaroid_core::photo::{load_photos, save_photos, Photo};
use polaroid_core::upload::{
    FileCandidate, SimulatedTransfer, UploadFile, UploadObserver, UploadSession, UploadStatus,
};
use tracing::info;

#[derive(Args)]
pub struct UploadArgs {
    /// Image files to stage
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Year the photos belong to (defaults to the current year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Caption applied to every staged file
    #[arg(long)]
    pub caption: Option<String>,

    /// Seed for ids, tilts and simulated outcomes
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the simulated success rate (0.0-1.0)
    #[arg(long)]
    pub success_rate: Option<f64>,

    /// Append uploaded records to this JSON file (created if missing)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Declared type, guessed from the extension.
fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("avif") => "image/avif",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

fn candidate(path: &Path) -> Result<FileCandidate> {
    let meta = std::fs::metadata(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(FileCandidate::new(name, mime_type_for(path), meta.len()))
}

/// One progress bar per file being transferred.
struct BarObserver {
    _multi: MultiProgress,
    bars: HashMap<String, ProgressBar>,
}

impl BarObserver {
    fn new(files: &[UploadFile]) -> Result<Self> {
        let multi = MultiProgress::new();
        let style = ProgressStyle::default_bar()
            .template("{prefix:28} [{bar:40}] {pos:>3}% {msg}")?
            .progress_chars("=> ");
        let bars = files
            .iter()
            .filter(|f| f.status() == UploadStatus::Pending)
            .map(|f| {
                let bar = multi.add(ProgressBar::new(100));
                bar.set_style(style.clone());
                bar.set_prefix(f.source().name.clone());
                (f.id().to_string(), bar)
            })
            .collect();
        Ok(Self {
            _multi: multi,
            bars,
        })
    }
}

impl UploadObserver for BarObserver {
    fn on_progress(&mut self, file: &UploadFile) {
        if let Some(bar) = self.bars.get(file.id()) {
            bar.set_position(file.progress() as u64);
        }
    }

    fn on_settled(&mut self, file: &UploadFile) {
        let Some(bar) = self.bars.get(file.id()) else {
            return;
        };
        bar.set_position(file.progress() as u64);
        match file.error() {
            Some(err) => bar.abandon_with_message(err.to_string()),
            None => bar.finish_with_message("done"),
        }
    }
}

pub fn run(args: &UploadArgs, config: &GalleryConfig) -> Result<()> {
    let candidates = args
        .files
        .iter()
        .map(|p| candidate(p))
        .collect::<Result<Vec<_>>>()?;

    let mut simulation = config.simulation.clone();
    if let Some(rate) = args.success_rate {
        simulation.success_rate = rate;
    }
    let mut transfer = SimulatedTransfer::new(simulation).context("Invalid simulation settings")?;
    if let Some(seed) = args.seed {
        transfer = transfer.with_seed(seed);
    }

    let year = args.year.unwrap_or_else(|| Utc::now().year());
    let mut session = UploadSession::new(year, config.upload.clone());
    if let Some(seed) = args.seed {
        session = session.with_seed(seed);
    }

    session.add_files(candidates);
    if let Some(ref caption) = args.caption {
        let ids: Vec<String> = session.files().iter().map(|f| f.id().to_string()).collect();
        for id in ids {
            session.update_caption(&id, caption.as_str());
        }
    }
    crate::summary::print_staged(session.files());

    if !session.has_pending() {
        println!("Nothing to upload.");
        return Ok(());
    }

    info!(year, simulation = %transfer.config(), "Uploading");
    let mut observer = BarObserver::new(session.files())?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start the async runtime")?;
    let summary = runtime.block_on(session.upload(Arc::new(transfer), &mut observer));

    crate::summary::print_upload_summary(&summary, session.files());

    if let Some(ref path) = args.output {
        let records = on_disk_records(summary.photos, &session, &args.files);
        let mut collection = if path.exists() {
            load_photos(path)
                .with_context(|| format!("Failed to load photos from {}", path.display()))?
        } else {
            Vec::new()
        };
        let added = merge_uploaded(&mut collection, records);
        save_photos(path, &collection)
            .with_context(|| format!("Failed to write photos to {}", path.display()))?;
        println!("Added {} photo(s) to {}", added, path.display());
    }

    Ok(())
}

/// Preview URLs die with the session, so saved records point at the source file.
fn on_disk_records(photos: Vec<Photo>, session: &UploadSession, paths: &[PathBuf]) -> Vec<Photo> {
    photos
        .into_iter()
        .map(|mut photo| {
            let index = session.files().iter().position(|f| f.id() == photo.id);
            if let Some(path) = index.and_then(|i| paths.get(i)) {
                photo.url = path.display().to_string();
            }
            photo
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_from_extension() {
        assert_eq!(mime_type_for(Path::new("a/IMG_1.JPG")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("b.webp")), "image/webp");
        assert_eq!(mime_type_for(Path::new("c.gif")), "image/gif");
        assert_eq!(mime_type_for(Path::new("notes")), "application/octet-stream");
    }
}
