use crate::geometry::Point;
use crate::session::SessionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
}

/// A pointer occurrence in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: Point,
}

impl PointerEvent {
    pub const fn new(kind: PointerEventKind, position: Point) -> Self {
        Self { kind, position }
    }

    pub const fn down(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Down, Point::new(x, y))
    }

    pub const fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Move, Point::new(x, y))
    }

    pub const fn up(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Up, Point::new(x, y))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Page-wide pointer source. Sessions subscribe on open and unsubscribe on close.
#[derive(Debug)]
pub struct PointerBus {
    next_id: u64,
    subscriptions: Vec<(SubscriptionId, SessionId)>,
}

impl Default for PointerBus {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerBus {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            subscriptions: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, session: SessionId) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.subscriptions.push((id, session));
        tracing::debug!(?id, %session, "pointer subscription registered");
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions
            .retain(|(subscription, _)| *subscription != id);
        let removed = self.subscriptions.len() != before;
        if removed {
            tracing::debug!(?id, "pointer subscription removed");
        }
        removed
    }

    /// Sessions that should receive the next event, in subscription order.
    pub fn subscribers(&self) -> Vec<SessionId> {
        self.subscriptions
            .iter()
            .map(|(_, session)| *session)
            .collect()
    }

    pub fn is_subscribed(&self, session: SessionId) -> bool {
        self.subscriptions
            .iter()
            .any(|(_, subscribed)| *subscribed == session)
    }
}
