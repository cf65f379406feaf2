use super::model::{DragState, RegionModel};
use crate::geometry::{CanvasBounds, Point, Rect};
use crate::input::{map_to_canvas, PointerEvent, PointerEventKind};

/// What a single pointer event did to the region model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    Ignored,
    Started(Rect),
    Updated(Rect),
    Committed(Rect),
}

/// Three-event drag state machine feeding a [`RegionModel`].
///
/// Only pointer-down is gated on the canvas bounds, so a drag keeps tracking
/// when the pointer leaves the canvas but can never start outside it.
#[derive(Debug, Default)]
pub struct DragController {
    anchor: Option<Point>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        if self.anchor.is_some() {
            DragState::Dragging
        } else {
            DragState::Idle
        }
    }

    pub fn anchor(&self) -> Option<Point> {
        self.anchor
    }

    pub fn next_state(&self, kind: PointerEventKind, in_bounds: bool) -> Option<DragState> {
        use PointerEventKind::*;
        match (self.state(), kind) {
            (DragState::Idle, Down) if in_bounds => Some(DragState::Dragging),
            (DragState::Dragging, Move) => Some(DragState::Dragging),
            (DragState::Dragging, Up) => Some(DragState::Idle),
            _ => None,
        }
    }

    pub fn handle(
        &mut self,
        event: &PointerEvent,
        bounds: CanvasBounds,
        regions: &mut RegionModel,
    ) -> DragOutcome {
        let mapping = map_to_canvas(event.position, bounds);
        if self.next_state(event.kind, mapping.in_bounds).is_none() {
            tracing::trace!(kind = ?event.kind, state = ?self.state(), "pointer event ignored");
            return DragOutcome::Ignored;
        }

        match event.kind {
            PointerEventKind::Down => {
                let rect = Rect::at(mapping.point);
                self.anchor = Some(mapping.point);
                regions.set_active(rect);
                tracing::debug!(anchor = ?mapping.point, "drag started");
                DragOutcome::Started(rect)
            }
            PointerEventKind::Move => {
                let Some(anchor) = self.anchor else {
                    return DragOutcome::Ignored;
                };
                let rect = Rect::from_points(mapping.point, anchor);
                regions.set_active(rect);
                DragOutcome::Updated(rect)
            }
            PointerEventKind::Up => {
                self.anchor = None;
                match regions.commit_active() {
                    Some(rect) => {
                        tracing::debug!(?rect, "blur box committed");
                        DragOutcome::Committed(rect)
                    }
                    None => DragOutcome::Ignored,
                }
            }
        }
    }
}
