use crate::session::SessionId;

/// "Run on the next display refresh" primitive.
pub trait FrameScheduler {
    fn request_frame(&mut self, session: SessionId);
}

/// Frame requests waiting for the next vsync. The host drains it once per refresh.
#[derive(Debug, Default)]
pub struct FrameQueue {
    pending: Vec<SessionId>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn is_pending(&self, session: SessionId) -> bool {
        self.pending.contains(&session)
    }

    /// Takes every request made since the last refresh.
    pub fn take_due(&mut self) -> Vec<SessionId> {
        std::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self, session: SessionId) {
        if !self.pending.contains(&session) {
            self.pending.push(session);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_requests_collapse_into_one_frame() {
        let mut queue = FrameQueue::new();
        queue.request_frame(SessionId::new(1));
        queue.request_frame(SessionId::new(1));
        queue.request_frame(SessionId::new(2));

        assert_eq!(queue.take_due(), vec![SessionId::new(1), SessionId::new(2)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn requests_made_after_take_wait_for_next_refresh() {
        let mut queue = FrameQueue::new();
        queue.request_frame(SessionId::new(1));
        let due = queue.take_due();
        queue.request_frame(SessionId::new(1));

        assert_eq!(due, vec![SessionId::new(1)]);
        assert!(queue.is_pending(SessionId::new(1)));
    }
}
