//! One image panel from paste to close, and the workspace holding all open panels.

mod layout;
mod workspace;

pub use layout::{PanelLayout, DEFAULT_PANEL_GAP, PANEL_BORDER, PANEL_CONTROL_ROW_HEIGHT};
pub use workspace::{PasteError, PasteOutcome, Workspace};

use std::fmt;
use std::sync::Arc;

use image::RgbaImage;
use thiserror::Error;

use crate::clipboard::{ClipboardError, ClipboardSink, MIME_IMAGE_PNG};
use crate::codec::{self, CodecError};
use crate::geometry::CanvasBounds;
use crate::input::{PointerBus, PointerEvent, SubscriptionId};
use crate::render::{Compositor, FrameScheduler, RasterSurface};
use crate::state::{DragController, DragOutcome, RegionModel};
use crate::worker::{spawn_worker, Pending};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Closed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no open session {0}")]
    NotFound(SessionId),
    #[error("session {0} is closed")]
    Closed(SessionId),
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export of {session} failed to encode: {source}")]
    Encode {
        session: SessionId,
        #[source]
        source: CodecError,
    },
    #[error("export of {session} failed to reach the clipboard: {source}")]
    Clipboard {
        session: SessionId,
        #[source]
        source: ClipboardError,
    },
    #[error("export worker for {session} stopped without a result")]
    WorkerLost { session: SessionId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportReport {
    pub session: SessionId,
    pub width: u32,
    pub height: u32,
    pub encoded_len: usize,
}

pub type ExportOutcome = Result<ExportReport, ExportError>;

/// A pasted image with its own surface, regions and render loop.
pub struct Session {
    id: SessionId,
    image: Arc<RgbaImage>,
    surface: RasterSurface,
    regions: RegionModel,
    drag: DragController,
    compositor: Compositor,
    state: SessionState,
    canvas_bounds: CanvasBounds,
    subscription: Option<SubscriptionId>,
    frames_rendered: u64,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("size", &self.image.dimensions())
            .field("committed", &self.regions.committed_boxes().len())
            .field("frames_rendered", &self.frames_rendered)
            .finish()
    }
}

impl Session {
    /// Opens the panel: surface sized to the image, fresh regions, pointer
    /// subscription and the first frame request.
    pub fn open<S: FrameScheduler + ?Sized>(
        id: SessionId,
        image: Arc<RgbaImage>,
        compositor: Compositor,
        pointer_bus: &mut PointerBus,
        scheduler: &mut S,
    ) -> Self {
        let (width, height) = image.dimensions();
        let surface = RasterSurface::for_image(&image);
        let subscription = pointer_bus.subscribe(id);
        scheduler.request_frame(id);
        tracing::info!(%id, width, height, "session opened");

        Self {
            id,
            image,
            surface,
            regions: RegionModel::new(),
            drag: DragController::new(),
            compositor,
            state: SessionState::Open,
            canvas_bounds: CanvasBounds::new(0.0, 0.0, f64::from(width), f64::from(height)),
            subscription: Some(subscription),
            frames_rendered: 0,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    pub fn regions(&self) -> &RegionModel {
        &self.regions
    }

    pub fn canvas_bounds(&self) -> CanvasBounds {
        self.canvas_bounds
    }

    /// Where the host currently shows the canvas, in viewport coordinates.
    pub fn set_canvas_bounds(&mut self, bounds: CanvasBounds) {
        self.canvas_bounds = bounds;
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn handle_pointer(&mut self, event: &PointerEvent) -> DragOutcome {
        if !self.is_open() {
            return DragOutcome::Ignored;
        }
        self.drag
            .handle(event, self.canvas_bounds, &mut self.regions)
    }

    /// Renders one frame and asks for the next. A closed session does neither.
    pub fn on_frame<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        if !self.is_open() {
            tracing::trace!(id = %self.id, "frame skipped for closed session");
            return false;
        }

        self.compositor.render_frame(
            &mut self.surface,
            &self.image,
            self.regions.active_box(),
            self.regions.committed_boxes(),
        );
        self.frames_rendered = self.frames_rendered.saturating_add(1);
        scheduler.request_frame(self.id);
        true
    }

    /// Stops the render loop and drops the pointer subscription. Irreversible.
    pub fn close(&mut self, pointer_bus: &mut PointerBus) -> SessionResult<()> {
        if !self.is_open() {
            return Err(SessionError::Closed(self.id));
        }
        self.state = SessionState::Closed;
        if let Some(subscription) = self.subscription.take() {
            pointer_bus.unsubscribe(subscription);
        }
        tracing::info!(
            id = %self.id,
            committed = self.regions.committed_boxes().len(),
            "session closed"
        );
        Ok(())
    }

    /// Encodes the current surface and writes it to `sink` on a worker.
    ///
    /// The snapshot is taken now; later pointer events do not affect it.
    pub fn export(&self, sink: Arc<dyn ClipboardSink>) -> SessionResult<Pending<ExportOutcome>> {
        if !self.is_open() {
            return Err(SessionError::Closed(self.id));
        }

        let session = self.id;
        let snapshot = self.surface.snapshot();
        tracing::debug!(%session, "export requested");
        Ok(spawn_worker(move || -> ExportOutcome {
            let (width, height) = snapshot.dimensions();
            let bytes = codec::encode_png(&snapshot)
                .map_err(|source| ExportError::Encode { session, source })?;
            sink.write(MIME_IMAGE_PNG, &bytes)
                .map_err(|source| ExportError::Clipboard { session, source })?;
            Ok(ExportReport {
                session,
                width,
                height,
                encoded_len: bytes.len(),
            })
        }))
    }
}
