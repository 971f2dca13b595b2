//! Inline CSS for the map surface. Kept as plain string builders so the
//! rendering contract can be checked without a DOM.

use crate::model::Pin;
use crate::state::ViewportState;

pub const MAP_BACKGROUND: &str = "#EFD6A1";
pub const PIN_Z_INDEX: u32 = 10;

pub fn cursor(dragging: bool) -> &'static str {
    if dragging { "grabbing" } else { "grab" }
}

/// Translate first, then scale: pan distance stays in screen pixels.
pub fn transform(state: &ViewportState) -> String {
    format!(
        "translate({}px, {}px) scale({})",
        state.position.x, state.position.y, state.scale
    )
}

pub fn wrapper_style(width: &str, height: &str, dragging: bool) -> String {
    format!(
        "width:{}; height:{}; overflow:hidden; position:relative; cursor:{}; background-color:{}; user-select:none;",
        width,
        height,
        cursor(dragging),
        MAP_BACKGROUND
    )
}

pub fn zoom_container_style(state: &ViewportState) -> String {
    format!(
        "width:100%; height:100%; transform-origin:{}; transform:{};",
        state.origin,
        transform(state)
    )
}

fn px_or_fill(v: Option<f64>) -> String {
    match v {
        Some(px) => format!("{}px", px),
        None => "100%".to_string(),
    }
}

pub fn content_style(map_width: Option<f64>, map_height: Option<f64>) -> String {
    format!(
        "position:relative; width:{}; height:{}; margin:0 auto;",
        px_or_fill(map_width),
        px_or_fill(map_height)
    )
}

pub fn image_style(map_width: Option<f64>, map_height: Option<f64>) -> String {
    format!(
        "display:block; width:{}; height:{};",
        px_or_fill(map_width),
        px_or_fill(map_height)
    )
}

/// Positions the pin box with its bottom-center on `(x%, y%)`.
pub fn pin_style(pin: &Pin) -> String {
    format!(
        "position:absolute; left:{}%; top:{}%; transform:translate(-50%, -100%); z-index:{}; pointer-events:auto;",
        pin.x, pin.y, PIN_Z_INDEX
    )
}

pub fn pin_icon_style(pin: &Pin) -> String {
    let size = pin.icon_size();
    format!(
        "display:block; width:{}px; height:{}px; cursor:pointer;",
        size.width, size.height
    )
}
