use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Per-session region state: the box being dragged and every committed blur box.
///
/// Committed boxes are append-only and kept in commit order. Only the drag
/// controller mutates this model.
#[derive(Debug, Clone, Default)]
pub struct RegionModel {
    active: Option<Rect>,
    committed: Vec<Rect>,
}

impl RegionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_box(&self) -> Option<Rect> {
        self.active
    }

    pub fn committed_boxes(&self) -> &[Rect] {
        &self.committed
    }

    pub fn drag_state(&self) -> DragState {
        if self.active.is_some() {
            DragState::Dragging
        } else {
            DragState::Idle
        }
    }

    pub(crate) fn set_active(&mut self, rect: Rect) {
        self.active = Some(rect);
    }

    /// Moves the active box onto the committed list.
    pub(crate) fn commit_active(&mut self) -> Option<Rect> {
        let rect = self.active.take()?;
        self.committed.push(rect);
        Some(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn new_model_is_idle_and_empty() {
        let model = RegionModel::new();
        assert_eq!(model.drag_state(), DragState::Idle);
        assert!(model.active_box().is_none());
        assert!(model.committed_boxes().is_empty());
    }

    #[test]
    fn commit_moves_active_box_to_end_of_list() {
        let mut model = RegionModel::new();
        let first = Rect::from_points(Point::new(0.0, 0.0), Point::new(4.0, 4.0));
        let second = Rect::from_points(Point::new(1.0, 1.0), Point::new(2.0, 9.0));

        model.set_active(first);
        assert_eq!(model.drag_state(), DragState::Dragging);
        assert_eq!(model.commit_active(), Some(first));
        model.set_active(second);
        model.commit_active();

        assert_eq!(model.committed_boxes(), &[first, second]);
        assert_eq!(model.drag_state(), DragState::Idle);
        assert_eq!(model.commit_active(), None);
    }
}
