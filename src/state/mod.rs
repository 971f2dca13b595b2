pub mod viewport;

pub use viewport::{DragState, ViewportAction, ViewportState};
