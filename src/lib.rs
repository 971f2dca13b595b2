//! A pannable, zoomable image map with pin markers, as a Yew component.
//!
//! ```ignore
//! html! {
//!     <MapWithPins
//!         image_url="map.png"
//!         window_width="800px"
//!         window_height="600px"
//!         pins={vec![Pin::new(1, 50.0, 100.0, "pin.svg")]}
//!     />
//! }
//! ```

pub mod components;
pub mod config;
pub mod error;
pub mod model;
pub mod state;
pub mod style;
pub mod util;

pub use components::{MapWithPins, MapWithPinsProps};
pub use config::{MapConfig, PanLimit, ViewportSettings, ZoomPolicy};
pub use error::ConfigError;
pub use model::{Pin, PinId};
