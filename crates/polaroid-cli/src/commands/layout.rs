use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use polaroid_core::config::GalleryConfig;
use polaroid_core::ids::generate_id;
use polaroid_core::layout::{Layout, LayoutCallbacks};
use polaroid_core::photo::{load_photos, save_photos, Photo};
use rand::Rng;
use tracing::warn;

use super::rng_from;

/// A drop of one photo, given as `ID:X:Y`.
#[derive(Clone, Debug)]
pub struct Drag {
    pub photo_id: String,
    pub x: f64,
    pub y: f64,
}

fn parse_drag(s: &str) -> std::result::Result<Drag, String> {
    let mut parts = s.rsplitn(3, ':');
    let (Some(y), Some(x), Some(id)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected ID:X:Y, got '{s}'"));
    };
    if id.is_empty() {
        return Err("photo id must not be empty".to_string());
    }
    let x = x.parse().map_err(|_| format!("invalid x coordinate '{x}'"))?;
    let y = y.parse().map_err(|_| format!("invalid y coordinate '{y}'"))?;
    Ok(Drag {
        photo_id: id.to_string(),
        x,
        y,
    })
}

/// Collects delete requests so they can be applied after the drags.
#[derive(Default)]
struct Deletions {
    ids: Vec<String>,
}

impl LayoutCallbacks for Deletions {
    fn on_delete(&mut self, photo: &Photo) {
        self.ids.push(photo.id.clone());
    }
}

#[derive(Args)]
pub struct LayoutArgs {
    /// Photo records (JSON array)
    #[arg(long, conflicts_with = "demo")]
    pub photos: Option<PathBuf>,

    /// Generate this many demo photos instead of reading a file
    #[arg(long)]
    pub demo: Option<usize>,

    /// Seed for placement and demo ids
    #[arg(long)]
    pub seed: Option<u64>,

    /// Drop a photo at ID:X:Y after layout (repeatable)
    #[arg(long = "drag", value_parser = parse_drag)]
    pub drags: Vec<Drag>,

    /// Remove a photo from the collage (repeatable)
    #[arg(long = "delete", value_name = "ID")]
    pub deletes: Vec<String>,

    /// Save the records with their final positions
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &LayoutArgs, config: &GalleryConfig) -> Result<()> {
    let mut rng = rng_from(args.seed);

    let mut photos = match (&args.photos, args.demo) {
        (Some(path), _) => load_photos(path)
            .with_context(|| format!("Failed to load photos from {}", path.display()))?,
        (None, Some(count)) => demo_photos(count, &mut rng),
        (None, None) => bail!("Pass --photos FILE or --demo N"),
    };

    let bounds = config.layout.bounds();
    let mut layout = Layout::new(bounds);
    layout.sync(&photos, bounds, &mut rng);

    for drag in &args.drags {
        if !layout.begin_drag(&drag.photo_id) {
            warn!(photo_id = drag.photo_id.as_str(), "No such photo, drag ignored");
            continue;
        }
        layout.on_drag_end(&drag.photo_id, drag.x, drag.y);
    }

    let mut deletions = Deletions::default();
    for id in &args.deletes {
        if !layout.request_delete(&photos, id, &mut deletions) {
            warn!(photo_id = id.as_str(), "No such photo, delete ignored");
        }
    }
    if !deletions.ids.is_empty() {
        photos.retain(|p| !deletions.ids.contains(&p.id));
        layout.sync(&photos, bounds, &mut rng);
    }

    crate::summary::print_layout(&layout, &photos, &bounds);

    if let Some(ref path) = args.output {
        let committed = layout.commit_positions(&mut photos);
        save_photos(path, &photos)
            .with_context(|| format!("Failed to write photos to {}", path.display()))?;
        println!("Saved {} positions to {}", committed, path.display());
    }

    Ok(())
}

fn demo_photos<R: Rng>(count: usize, rng: &mut R) -> Vec<Photo> {
    (0..count)
        .map(|i| {
            let id = generate_id("photo", &mut *rng);
            let mut photo = Photo::new(id, format!("demo://photos/{i}.jpg"), 2024 - (i % 3) as i32);
            photo.filename = format!("IMG_{:04}.jpg", i + 1);
            if i % 2 == 0 {
                photo.caption = Some(format!("Memory #{}", i + 1));
            }
            photo
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_drag() {
        let d = parse_drag("p1:10:-2.5").unwrap();
        assert_eq!(d.photo_id, "p1");
        assert_eq!((d.x, d.y), (10.0, -2.5));
    }

    #[test]
    fn test_parse_drag_id_with_colon() {
        let d = parse_drag("id:abc:3:4").unwrap();
        assert_eq!(d.photo_id, "id:abc");
    }

    #[test]
    fn test_deletions_collect_requested_ids() {
        let mut rng = rng_from(Some(1));
        let photos = demo_photos(3, &mut rng);
        let bounds = GalleryConfig::default().layout.bounds();
        let mut layout = Layout::new(bounds);
        layout.sync(&photos, bounds, &mut rng);

        let mut deletions = Deletions::default();
        assert!(layout.request_delete(&photos, &photos[1].id, &mut deletions));
        assert!(!layout.request_delete(&photos, "missing", &mut deletions));
        assert_eq!(deletions.ids, vec![photos[1].id.clone()]);
    }

    #[test]
    fn test_parse_drag_rejects_bad_input() {
        assert!(parse_drag("p1:10").is_err());
        assert!(parse_drag(":1:2").is_err());
        assert!(parse_drag("p1:x:2").is_err());
    }
}
