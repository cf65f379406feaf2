//! Pointer input: viewport-to-canvas mapping and per-session event subscriptions.

mod mapping;
mod pointer;

pub use mapping::{map_to_canvas, CanvasMapping};
pub use pointer::{PointerBus, PointerEvent, PointerEventKind, SubscriptionId};
