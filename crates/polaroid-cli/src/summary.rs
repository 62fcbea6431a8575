use console::Style;
use polaroid_core::collection::{format_file_size, YearSummary};
use polaroid_core::layout::{Layout, LayoutBounds};
use polaroid_core::photo::Photo;
use polaroid_core::rotation::{display_rotation, rotation_css};
use polaroid_core::upload::{UploadFile, UploadStatus, UploadSummary};
use polaroid_core::viewer::ViewerSession;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    ok: Style,
    error: Style,
    disabled: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            ok: Style::new().green(),
            error: Style::new().red(),
            disabled: Style::new().dim().yellow(),
        }
    }
}

fn rule(len: usize) -> String {
    "\u{2550}".repeat(len)
}

pub fn print_layout(layout: &Layout, photos: &[Photo], bounds: &LayoutBounds) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Collage"));
    println!("  {}", s.title.apply_to(rule(7)));
    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Container"),
        s.value.apply_to(format!(
            "{} x {}",
            bounds.container_width, bounds.container_height
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Polaroid"),
        s.value.apply_to(format!(
            "{} x {}",
            bounds.element_width, bounds.element_height
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Photos"),
        s.value.apply_to(photos.len())
    );
    println!();

    println!("  {}", s.header.apply_to("Stack (bottom to top)"));
    for p in layout.render_order() {
        let tilt = photos
            .iter()
            .find(|photo| photo.id == p.photo_id)
            .map(|photo| rotation_css(display_rotation(photo)))
            .unwrap_or_default();
        println!(
            "    {:<24}{:>9.1} {:>9.1}  z {:<4} {}",
            p.photo_id,
            p.x,
            p.y,
            s.value.apply_to(p.z_index),
            s.label.apply_to(tilt)
        );
    }
    println!();
}

pub fn print_viewer_step(step: &str, handled: bool, session: Option<&ViewerSession>) {
    let s = Styles::new();

    let marker = if handled {
        s.ok.apply_to("\u{2713}")
    } else {
        s.disabled.apply_to("-")
    };
    let Some(session) = session else {
        println!("  {} {:<12}{}", marker, step, s.disabled.apply_to("closed"));
        return;
    };
    let title = session.title().unwrap_or_else(|| "(nothing)".to_string());
    let position = session.position_label().unwrap_or_default();
    let pan = session.pan();
    println!(
        "  {} {:<12}{:<24}{:<10}{:>5}%  pan ({:.1}, {:.1})  controls {}",
        marker,
        step,
        s.value.apply_to(title),
        s.label.apply_to(position),
        session.zoom_percent(),
        pan.x,
        pan.y,
        if session.controls_visible() { "on" } else { "off" }
    );
}

pub fn print_staged(files: &[UploadFile]) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Staged files"));
    println!("  {}", s.title.apply_to(rule(12)));
    for file in files {
        let size = format_file_size(file.source().size, 2);
        match file.error() {
            Some(err) => println!(
                "    {:<28}{:>10}  {}",
                file.source().name,
                size,
                s.error.apply_to(err)
            ),
            None => println!(
                "    {:<28}{:>10}  {}",
                file.source().name,
                size,
                s.label.apply_to(file.status())
            ),
        }
    }
    println!();
}

pub fn print_upload_summary(summary: &UploadSummary, files: &[UploadFile]) {
    let s = Styles::new();

    println!();
    println!("  {}", s.header.apply_to("Upload"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Succeeded"),
        s.ok.apply_to(summary.succeeded)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Failed"),
        if summary.failed > 0 {
            s.error.apply_to(summary.failed)
        } else {
            s.value.apply_to(summary.failed)
        }
    );
    let rejected = files
        .iter()
        .filter(|f| f.error().is_some_and(|e| e.is_validation()))
        .count();
    if rejected > 0 {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Rejected"),
            s.disabled.apply_to(rejected)
        );
    }
    println!();

    for photo in &summary.photos {
        println!(
            "    {:<28}{:<8}{}",
            photo.filename,
            photo.year,
            s.label.apply_to(rotation_css(display_rotation(photo)))
        );
    }
    for file in files.iter().filter(|f| f.status() == UploadStatus::Error) {
        if let Some(err) = file.error() {
            println!("    {:<28}{}", file.source().name, s.error.apply_to(err));
        }
    }
    println!();
}

pub fn print_years(years: &[YearSummary]) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Timeline"));
    println!("  {}", s.title.apply_to(rule(8)));
    if years.is_empty() {
        println!("    {}", s.disabled.apply_to("no photos"));
    }
    for y in years {
        let noun = if y.photo_count == 1 { "photo" } else { "photos" };
        println!(
            "    {:<8}{} {}",
            s.value.apply_to(y.year),
            y.photo_count,
            s.label.apply_to(noun)
        );
    }
    println!();
}

pub fn print_photo_list(photos: &[&Photo]) {
    let s = Styles::new();

    for photo in photos {
        let star = if photo.is_favorite() { "\u{2605}" } else { " " };
        println!(
            "    {} {:<24}{:<8}{:<20}{}",
            s.ok.apply_to(star),
            photo.id,
            photo.year,
            photo.uploaded_at.format("%Y-%m-%d %H:%M"),
            s.label.apply_to(photo.caption_text().unwrap_or(""))
        );
    }
    println!();
}
