use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use console::Style;
use polaroid_core::photo::{load_photos, Photo};
use polaroid_core::scroll::ScrollContext;
use polaroid_core::viewer::{Viewer, ViewerCallbacks, ViewerCommand};

#[derive(Args)]
pub struct ViewArgs {
    /// Photo records (JSON array)
    #[arg(long)]
    pub photos: PathBuf,

    /// Id of the photo to open on
    #[arg(long)]
    pub start: String,

    /// Steps to replay: key names (Escape, ArrowLeft, ArrowRight, +, =, -, 0),
    /// click, controls, favorite, edit, download, share, or pan:DX:DY
    #[arg(long, value_delimiter = ',')]
    pub keys: Vec<String>,
}

/// Prints every notification the viewer sends its host.
struct PrintCallbacks {
    style: Style,
}

impl PrintCallbacks {
    fn emit(&self, event: &str, photo: Option<&Photo>) {
        match photo {
            Some(photo) => println!("      {} {}", self.style.apply_to(event), photo.id),
            None => println!("      {}", self.style.apply_to(event)),
        }
    }
}

impl ViewerCallbacks for PrintCallbacks {
    fn on_close(&mut self) {
        self.emit("close", None);
    }
    fn on_next(&mut self) {
        self.emit("next", None);
    }
    fn on_previous(&mut self) {
        self.emit("previous", None);
    }
    fn on_toggle_favorite(&mut self, photo: &Photo) {
        self.emit("favorite", Some(photo));
    }
    fn on_edit(&mut self, photo: &Photo) {
        self.emit("edit", Some(photo));
    }
    fn on_download(&mut self, photo: &Photo) {
        self.emit("download", Some(photo));
    }
    fn on_share(&mut self, photo: &Photo) {
        self.emit("share", Some(photo));
    }
}

pub fn run(args: &ViewArgs) -> Result<()> {
    let photos = load_photos(&args.photos)
        .with_context(|| format!("Failed to load photos from {}", args.photos.display()))?;

    let callbacks = PrintCallbacks {
        style: Style::new().magenta(),
    };
    let mut viewer = Viewer::new(callbacks);
    viewer.open(photos, args.start.as_str());
    crate::summary::print_viewer_step("open", viewer.current().is_some(), viewer.session());

    for step in &args.keys {
        let handled = apply_step(&mut viewer, step.trim())?;
        crate::summary::print_viewer_step(step, handled, viewer.session());
    }

    let scroll = if ScrollContext::global().is_suspended() {
        "suspended"
    } else {
        "restored"
    };
    println!("\n  Page scroll {scroll}");
    Ok(())
}

fn apply_step<C: ViewerCallbacks>(viewer: &mut Viewer<C>, step: &str) -> Result<bool> {
    if let Some(delta) = step.strip_prefix("pan:") {
        let (dx, dy) = delta
            .split_once(':')
            .with_context(|| format!("Expected pan:DX:DY, got '{step}'"))?;
        let dx: f64 = dx.parse().with_context(|| format!("Invalid pan dx '{dx}'"))?;
        let dy: f64 = dy.parse().with_context(|| format!("Invalid pan dy '{dy}'"))?;
        let started = viewer.pointer_down();
        let moved = viewer.pointer_move(dx, dy);
        viewer.pointer_up();
        return Ok(started && moved);
    }

    let handled = match step {
        "click" => viewer.click(),
        "controls" => viewer.dispatch(ViewerCommand::ToggleControls),
        "favorite" => viewer.dispatch(ViewerCommand::ToggleFavorite),
        "edit" => viewer.dispatch(ViewerCommand::Edit),
        "download" => viewer.dispatch(ViewerCommand::Download),
        "share" => viewer.dispatch(ViewerCommand::Share),
        key => viewer.handle_key(key),
    };
    Ok(handled)
}
