//! Full-screen single-photo viewer.
//!
//! The viewer is either closed or open on an ordered collection. While open it
//! tracks the current photo, zoom, pan offset and whether controls are shown,
//! and it holds a [`ScrollGuard`] so the page behind it cannot scroll.
//! Operations that make no sense in the current state are no-ops that return
//! `false` rather than errors.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::consts::{MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
use crate::photo::Photo;
use crate::scroll::{ScrollContext, ScrollGuard};

/// Notifications sent to whoever hosts the viewer.
///
/// All methods default to no-ops; implement only what the host cares about.
/// Photo actions receive the photo on screen and change no viewer state.
pub trait ViewerCallbacks {
    fn on_close(&mut self) {}
    fn on_next(&mut self) {}
    fn on_previous(&mut self) {}
    fn on_toggle_favorite(&mut self, _photo: &Photo) {}
    fn on_edit(&mut self, _photo: &Photo) {}
    fn on_download(&mut self, _photo: &Photo) {}
    fn on_share(&mut self, _photo: &Photo) {}
}

/// Host that ignores every notification.
#[derive(Debug, Default)]
pub struct NoCallbacks;
impl ViewerCallbacks for NoCallbacks {}

/// Everything the viewer can be asked to do, from keys or control buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerCommand {
    Close,
    Next,
    Previous,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    ToggleControls,
    ToggleFavorite,
    Edit,
    Download,
    Share,
}

impl ViewerCommand {
    /// Keyboard binding, using DOM `KeyboardEvent.key` names.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Escape" => Some(Self::Close),
            "ArrowLeft" => Some(Self::Previous),
            "ArrowRight" => Some(Self::Next),
            "+" | "=" => Some(Self::ZoomIn),
            "-" => Some(Self::ZoomOut),
            "0" => Some(Self::ResetZoom),
            _ => None,
        }
    }
}

impl fmt::Display for ViewerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Close => write!(f, "Close"),
            Self::Next => write!(f, "Next"),
            Self::Previous => write!(f, "Previous"),
            Self::ZoomIn => write!(f, "Zoom in"),
            Self::ZoomOut => write!(f, "Zoom out"),
            Self::ResetZoom => write!(f, "Reset zoom"),
            Self::ToggleControls => write!(f, "Toggle controls"),
            Self::ToggleFavorite => write!(f, "Toggle favorite"),
            Self::Edit => write!(f, "Edit"),
            Self::Download => write!(f, "Download"),
            Self::Share => write!(f, "Share"),
        }
    }
}

/// Pan translation in image units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanOffset {
    pub x: f64,
    pub y: f64,
}

/// Pointer drag in progress on the image.
#[derive(Clone, Copy, Debug, Default)]
struct PanDrag {
    moved: bool,
}

/// State of an open viewer.
#[derive(Debug)]
pub struct ViewerSession {
    photos: Vec<Photo>,
    current_id: String,
    zoom: f64,
    pan: PanOffset,
    controls_visible: bool,
    drag: Option<PanDrag>,
    /// Set when a pointer-up ends a drag that moved; swallows the click that follows.
    suppress_click: bool,
    _scroll: ScrollGuard,
}

impl ViewerSession {
    fn new(photos: Vec<Photo>, current_id: String, scroll: ScrollGuard) -> Self {
        Self {
            photos,
            current_id,
            zoom: 1.0,
            pan: PanOffset::default(),
            controls_visible: true,
            drag: None,
            suppress_click: false,
            _scroll: scroll,
        }
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn current_id(&self) -> &str {
        &self.current_id
    }

    /// The photo on screen, `None` when the current id is not in the collection.
    pub fn current(&self) -> Option<&Photo> {
        self.photos.iter().find(|p| p.id == self.current_id)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.photos.iter().position(|p| p.id == self.current_id)
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> PanOffset {
        self.pan
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn is_panning(&self) -> bool {
        self.drag.is_some()
    }

    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    pub fn can_zoom_in(&self) -> bool {
        self.zoom < MAX_ZOOM
    }

    pub fn can_zoom_out(&self) -> bool {
        self.zoom > MIN_ZOOM
    }

    pub fn has_previous(&self) -> bool {
        self.current_index().is_some_and(|i| i > 0)
    }

    pub fn has_next(&self) -> bool {
        self.current_index()
            .is_some_and(|i| i + 1 < self.photos.len())
    }

    /// "3 of 10", or `None` when nothing is on screen.
    pub fn position_label(&self) -> Option<String> {
        self.current_index()
            .map(|i| format!("{} of {}", i + 1, self.photos.len()))
    }

    /// Caption of the photo on screen, falling back to "Photo N".
    pub fn title(&self) -> Option<String> {
        let index = self.current_index()?;
        let photo = &self.photos[index];
        Some(match photo.caption_text() {
            Some(caption) => caption.to_string(),
            None => format!("Photo {}", index + 1),
        })
    }

    fn set_current(&mut self, id: String) {
        self.current_id = id;
        self.reset_view();
    }

    fn reset_view(&mut self) {
        self.zoom = 1.0;
        self.pan = PanOffset::default();
        self.drag = None;
    }

    fn step(&mut self, forward: bool) -> bool {
        let Some(index) = self.current_index() else {
            return false;
        };
        let target = if forward {
            index + 1
        } else if index > 0 {
            index - 1
        } else {
            return false;
        };
        match self.photos.get(target) {
            Some(photo) => {
                let id = photo.id.clone();
                self.set_current(id);
                true
            }
            None => false,
        }
    }
}

/// Closed, or open on a collection.
#[derive(Debug, Default)]
pub enum ViewerState {
    #[default]
    Closed,
    Open(ViewerSession),
}

/// The viewer state machine plus the host's callbacks.
pub struct Viewer<C: ViewerCallbacks = NoCallbacks> {
    state: ViewerState,
    scroll: Arc<ScrollContext>,
    callbacks: C,
}

impl<C: ViewerCallbacks> Viewer<C> {
    /// Viewer that suspends the process-wide page scroll while open.
    pub fn new(callbacks: C) -> Self {
        Self::with_scroll_context(ScrollContext::global(), callbacks)
    }

    pub fn with_scroll_context(scroll: Arc<ScrollContext>, callbacks: C) -> Self {
        Self {
            state: ViewerState::Closed,
            scroll,
            callbacks,
        }
    }

    pub fn callbacks(&self) -> &C {
        &self.callbacks
    }

    pub fn callbacks_mut(&mut self) -> &mut C {
        &mut self.callbacks
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ViewerState::Open(_))
    }

    pub fn session(&self) -> Option<&ViewerSession> {
        match &self.state {
            ViewerState::Open(session) => Some(session),
            ViewerState::Closed => None,
        }
    }

    fn session_mut(&mut self) -> Option<&mut ViewerSession> {
        match &mut self.state {
            ViewerState::Open(session) => Some(session),
            ViewerState::Closed => None,
        }
    }

    /// The photo on screen; `None` when closed or the current id is unknown.
    pub fn current(&self) -> Option<&Photo> {
        self.session().and_then(ViewerSession::current)
    }

    /// Open on `photos` starting at `start_id`. Reopening replaces the session.
    pub fn open(&mut self, photos: Vec<Photo>, start_id: impl Into<String>) {
        let start_id = start_id.into();
        let guard = self.scroll.acquire();
        let session = ViewerSession::new(photos, start_id, guard);
        if session.current().is_none() {
            debug!(
                start_id = session.current_id(),
                "Viewer opened on an id outside the collection"
            );
        } else {
            debug!(
                start_id = session.current_id(),
                photos = session.photos().len(),
                "Viewer opened"
            );
        }
        self.state = ViewerState::Open(session);
    }

    /// Close the viewer and restore page scroll. Closing a closed viewer is a no-op.
    pub fn close(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.state = ViewerState::Closed;
        debug!("Viewer closed");
        self.callbacks.on_close();
        true
    }

    /// Jump to `photo_id` if it is in the collection.
    pub fn go_to(&mut self, photo_id: &str) -> bool {
        let Some(session) = self.session_mut() else {
            return false;
        };
        if !session.photos.iter().any(|p| p.id == photo_id) {
            return false;
        }
        if session.current_id != photo_id {
            session.set_current(photo_id.to_string());
        }
        true
    }

    /// Advance one photo. Does not wrap past the last photo.
    pub fn next(&mut self) -> bool {
        let moved = self.session_mut().is_some_and(|s| s.step(true));
        if moved {
            debug!(current = self.session().map(|s| s.current_id()), "Viewer next");
            self.callbacks.on_next();
        }
        moved
    }

    /// Go back one photo. Does not wrap past the first photo.
    pub fn previous(&mut self) -> bool {
        let moved = self.session_mut().is_some_and(|s| s.step(false));
        if moved {
            debug!(current = self.session().map(|s| s.current_id()), "Viewer previous");
            self.callbacks.on_previous();
        }
        moved
    }

    pub fn zoom_in(&mut self) -> bool {
        self.session_mut()
            .map(|s| s.zoom = (s.zoom * ZOOM_STEP).min(MAX_ZOOM))
            .is_some()
    }

    pub fn zoom_out(&mut self) -> bool {
        self.session_mut()
            .map(|s| s.zoom = (s.zoom / ZOOM_STEP).max(MIN_ZOOM))
            .is_some()
    }

    pub fn reset_zoom(&mut self) -> bool {
        self.session_mut().map(ViewerSession::reset_view).is_some()
    }

    pub fn toggle_controls(&mut self) -> bool {
        self.session_mut()
            .map(|s| s.controls_visible = !s.controls_visible)
            .is_some()
    }

    /// Start panning. Only possible while zoomed in past 100%.
    pub fn pointer_down(&mut self) -> bool {
        let Some(session) = self.session_mut() else {
            return false;
        };
        session.suppress_click = false;
        if session.zoom > 1.0 {
            session.drag = Some(PanDrag::default());
            true
        } else {
            false
        }
    }

    /// Pointer moved by (dx, dy) screen units. Pans by `delta / zoom` so the
    /// image follows the pointer at the same apparent speed at any zoom.
    pub fn pointer_move(&mut self, dx: f64, dy: f64) -> bool {
        let Some(session) = self.session_mut() else {
            return false;
        };
        if session.zoom <= 1.0 {
            return false;
        }
        let Some(drag) = session.drag.as_mut() else {
            return false;
        };
        if dx != 0.0 || dy != 0.0 {
            drag.moved = true;
        }
        session.pan.x += dx / session.zoom;
        session.pan.y += dy / session.zoom;
        true
    }

    pub fn pointer_up(&mut self) {
        if let Some(session) = self.session_mut() {
            if let Some(drag) = session.drag.take() {
                session.suppress_click = drag.moved;
            }
        }
    }

    pub fn pointer_leave(&mut self) {
        if let Some(session) = self.session_mut() {
            session.drag = None;
            session.suppress_click = false;
        }
    }

    /// Click on the image area. Toggles controls unless it ends a pan drag.
    pub fn click(&mut self) -> bool {
        let Some(session) = self.session_mut() else {
            return false;
        };
        if std::mem::take(&mut session.suppress_click) {
            return false;
        }
        session.controls_visible = !session.controls_visible;
        true
    }

    /// Route a key press. Keys are ignored while closed.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if !self.is_open() {
            return false;
        }
        match ViewerCommand::from_key(key) {
            Some(command) => self.dispatch(command),
            None => false,
        }
    }

    /// Run a command. Returns whether it had an effect.
    pub fn dispatch(&mut self, command: ViewerCommand) -> bool {
        match command {
            ViewerCommand::Close => self.close(),
            ViewerCommand::Next => self.next(),
            ViewerCommand::Previous => self.previous(),
            ViewerCommand::ZoomIn => self.zoom_in(),
            ViewerCommand::ZoomOut => self.zoom_out(),
            ViewerCommand::ResetZoom => self.reset_zoom(),
            ViewerCommand::ToggleControls => self.toggle_controls(),
            ViewerCommand::ToggleFavorite
            | ViewerCommand::Edit
            | ViewerCommand::Download
            | ViewerCommand::Share => self.photo_action(command),
        }
    }

    fn photo_action(&mut self, command: ViewerCommand) -> bool {
        let ViewerState::Open(session) = &self.state else {
            return false;
        };
        let Some(photo) = session.current() else {
            return false;
        };
        match command {
            ViewerCommand::ToggleFavorite => self.callbacks.on_toggle_favorite(photo),
            ViewerCommand::Edit => self.callbacks.on_edit(photo),
            ViewerCommand::Download => self.callbacks.on_download(photo),
            ViewerCommand::Share => self.callbacks.on_share(photo),
            _ => return false,
        }
        true
    }
}

impl<C: ViewerCallbacks + Default> Default for Viewer<C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}
