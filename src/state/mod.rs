pub mod machine;
pub mod model;

pub use machine::{DragController, DragOutcome};
pub use model::{DragState, RegionModel};
