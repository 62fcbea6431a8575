use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use polaroid_core::collection::{year_summaries, PhotoFilter, SortKey, SortOrder};
use polaroid_core::photo::load_photos;

#[derive(Clone, ValueEnum)]
pub enum SortArg {
    Uploaded,
    Taken,
    Filename,
}

impl From<&SortArg> for SortKey {
    fn from(arg: &SortArg) -> Self {
        match arg {
            SortArg::Uploaded => SortKey::UploadedAt,
            SortArg::Taken => SortKey::TakenAt,
            SortArg::Filename => SortKey::Filename,
        }
    }
}

#[derive(Args)]
pub struct YearsArgs {
    /// Photo records (JSON array)
    #[arg(long)]
    pub photos: PathBuf,

    /// List the photos of one year
    #[arg(long)]
    pub year: Option<i32>,

    /// Only list favorites
    #[arg(long)]
    pub favorites: bool,

    /// Sort key for the listing
    #[arg(long, value_enum, default_value = "uploaded")]
    pub sort: SortArg,

    /// Oldest / A-Z first
    #[arg(long)]
    pub asc: bool,
}

pub fn run(args: &YearsArgs) -> Result<()> {
    let photos = load_photos(&args.photos)
        .with_context(|| format!("Failed to load photos from {}", args.photos.display()))?;

    crate::summary::print_years(&year_summaries(&photos));

    if args.year.is_none() && !args.favorites {
        return Ok(());
    }

    let filter = PhotoFilter {
        year: args.year,
        favorite: args.favorites.then_some(true),
        has_caption: None,
        sort_by: SortKey::from(&args.sort),
        order: if args.asc {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        },
    };
    let selected = filter.apply(&photos);
    println!("  {} photo(s), sorted by {}", selected.len(), filter.sort_by);
    crate::summary::print_photo_list(&selected);
    Ok(())
}
