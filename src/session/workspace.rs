use std::sync::Arc;

use image::RgbaImage;
use thiserror::Error;

use super::{
    ExportOutcome, PanelLayout, Session, SessionError, SessionId, SessionResult,
};
use crate::clipboard::{ClipboardItem, ClipboardSink};
use crate::codec::{self, CodecError};
use crate::input::{PointerBus, PointerEvent};
use crate::render::{Compositor, FrameQueue};
use crate::state::DragOutcome;
use crate::worker::{spawn_worker, Pending, PendingPoll};

#[derive(Debug, Error)]
pub enum PasteError {
    #[error("failed to decode pasted item {item_index} ({mime_type}): {source}")]
    Decode {
        item_index: usize,
        mime_type: String,
        #[source]
        source: CodecError,
    },
    #[error("decode worker for pasted item {item_index} stopped without a result")]
    WorkerLost { item_index: usize },
}

pub type PasteOutcome = Result<SessionId, PasteError>;

struct PendingPaste {
    item_index: usize,
    mime_type: String,
    job: Pending<Result<RgbaImage, CodecError>>,
}

/// Every open panel on the page plus the page-wide pointer, frame and clipboard plumbing.
pub struct Workspace {
    sessions: Vec<Session>,
    next_session_id: u64,
    pointer_bus: PointerBus,
    frames: FrameQueue,
    pending_pastes: Vec<PendingPaste>,
    compositor: Compositor,
    layout: PanelLayout,
    sink: Arc<dyn ClipboardSink>,
}

impl Workspace {
    pub fn new(compositor: Compositor, layout: PanelLayout, sink: Arc<dyn ClipboardSink>) -> Self {
        Self {
            sessions: Vec::new(),
            next_session_id: 1,
            pointer_bus: PointerBus::new(),
            frames: FrameQueue::new(),
            pending_pastes: Vec::new(),
            compositor,
            layout,
            sink,
        }
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn session(&self, id: SessionId) -> Option<&Session> {
        self.sessions.iter().find(|session| session.id() == id)
    }

    fn session_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|session| session.id() == id)
    }

    pub fn frames(&self) -> &FrameQueue {
        &self.frames
    }

    pub fn pending_paste_count(&self) -> usize {
        self.pending_pastes.len()
    }

    /// Starts decoding every image item. Returns how many decodes were started.
    pub fn paste(&mut self, items: Vec<ClipboardItem>) -> usize {
        let mut started = 0;
        for (item_index, item) in items.into_iter().enumerate() {
            if !item.is_image() {
                tracing::debug!(item_index, mime_type = %item.mime_type, "skipping non-image paste item");
                continue;
            }

            let ClipboardItem { mime_type, bytes } = item;
            let job = spawn_worker(move || codec::decode_image(&bytes));
            self.pending_pastes.push(PendingPaste {
                item_index,
                mime_type,
                job,
            });
            started += 1;
        }
        started
    }

    /// Opens sessions for decodes that finished since the last poll.
    pub fn poll_pastes(&mut self) -> Vec<PasteOutcome> {
        let mut outcomes = Vec::new();
        for paste in std::mem::take(&mut self.pending_pastes) {
            match paste.job.poll() {
                PendingPoll::Ready(result) => {
                    outcomes.push(self.finish_paste(paste.item_index, paste.mime_type, Some(result)));
                }
                PendingPoll::Waiting => self.pending_pastes.push(paste),
                PendingPoll::Disconnected => {
                    outcomes.push(self.finish_paste(paste.item_index, paste.mime_type, None));
                }
            }
        }
        outcomes
    }

    /// Blocks until every pending decode has finished.
    pub fn wait_for_pastes(&mut self) -> Vec<PasteOutcome> {
        std::mem::take(&mut self.pending_pastes)
            .into_iter()
            .map(|paste| {
                let result = paste.job.wait();
                self.finish_paste(paste.item_index, paste.mime_type, result)
            })
            .collect()
    }

    fn finish_paste(
        &mut self,
        item_index: usize,
        mime_type: String,
        result: Option<Result<RgbaImage, CodecError>>,
    ) -> PasteOutcome {
        match result {
            Some(Ok(image)) => Ok(self.open_session(image)),
            Some(Err(source)) => {
                tracing::warn!(item_index, %mime_type, %source, "pasted item failed to decode");
                Err(PasteError::Decode {
                    item_index,
                    mime_type,
                    source,
                })
            }
            None => {
                tracing::warn!(item_index, "decode worker stopped without a result");
                Err(PasteError::WorkerLost { item_index })
            }
        }
    }

    pub fn open_session(&mut self, image: RgbaImage) -> SessionId {
        let id = SessionId::new(self.next_session_id);
        self.next_session_id = self.next_session_id.saturating_add(1);
        let session = Session::open(
            id,
            Arc::new(image),
            self.compositor,
            &mut self.pointer_bus,
            &mut self.frames,
        );
        self.sessions.push(session);
        self.relayout();
        id
    }

    /// Routes a page-wide pointer event to every subscribed session.
    pub fn dispatch_pointer(&mut self, event: PointerEvent) -> Vec<(SessionId, DragOutcome)> {
        let mut outcomes = Vec::new();
        for id in self.pointer_bus.subscribers() {
            if let Some(session) = self.session_mut(id) {
                outcomes.push((id, session.handle_pointer(&event)));
            }
        }
        outcomes
    }

    /// Display refresh: renders every frame requested since the previous one.
    pub fn on_vsync(&mut self) -> usize {
        let Self {
            sessions, frames, ..
        } = self;
        let mut rendered = 0;
        for id in frames.take_due() {
            let Some(session) = sessions.iter_mut().find(|session| session.id() == id) else {
                continue;
            };
            if session.on_frame(frames) {
                rendered += 1;
            }
        }
        rendered
    }

    /// Closes the session and detaches its panel. Remaining panels move up.
    pub fn close(&mut self, id: SessionId) -> SessionResult<()> {
        let index = self
            .sessions
            .iter()
            .position(|session| session.id() == id)
            .ok_or(SessionError::NotFound(id))?;
        self.sessions[index].close(&mut self.pointer_bus)?;
        self.sessions.remove(index);
        self.relayout();
        Ok(())
    }

    pub fn export(&self, id: SessionId) -> SessionResult<Pending<ExportOutcome>> {
        let session = self.session(id).ok_or(SessionError::NotFound(id))?;
        session.export(Arc::clone(&self.sink))
    }

    fn relayout(&mut self) {
        let bounds = self
            .layout
            .canvas_bounds(self.sessions.iter().map(|session| session.image().dimensions()));
        for (session, bounds) in self.sessions.iter_mut().zip(bounds) {
            session.set_canvas_bounds(bounds);
        }
    }
}
