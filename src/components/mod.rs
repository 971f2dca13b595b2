pub mod app;
pub mod map_controls;
pub mod map_with_pins;
pub mod pin_layer;

pub use map_with_pins::{MapWithPins, MapWithPinsProps};
pub use pin_layer::PinLayer;
