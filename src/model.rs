//! Core data types for the pin map.
//! Pins are caller-owned input; the geometry helpers here are pure and shared
//! by the viewport reducer and the renderer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

/// Icon edge length used when a pin does not carry its own size.
pub const DEFAULT_PIN_SIZE: f64 = 24.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either extent is zero, negative or not a number.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }
}

/// Axis-aligned box in client (CSS pixel) coordinates, shaped like `DOMRect`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Position of `p` inside the box as a percentage pair.
    /// `None` for a degenerate box, which has no meaningful fraction.
    pub fn percent_of(&self, p: Point) -> Option<Origin> {
        if self.size().is_degenerate() || !self.left.is_finite() || !self.top.is_finite() {
            return None;
        }
        Some(Origin {
            x: (p.x - self.left) / self.width * 100.0,
            y: (p.y - self.top) / self.height * 100.0,
        })
    }
}

/// Transform origin as percentages of the container box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    pub x: f64,
    pub y: f64,
}

impl Origin {
    pub const CENTER: Origin = Origin { x: 50.0, y: 50.0 };

    /// Origin as fractions in `0..=1` (for in-box origins).
    pub fn fraction(&self) -> Point {
        Point::new(self.x / 100.0, self.y / 100.0)
    }
}

impl Default for Origin {
    fn default() -> Self {
        Origin::CENTER
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}% {}%", self.x, self.y)
    }
}

/// Unique key of a pin; callers use either numbers or strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PinId {
    Number(i64),
    Text(String),
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinId::Number(n) => write!(f, "{}", n),
            PinId::Text(s) => f.write_str(s),
        }
    }
}

impl PinId {
    /// Render key, tagged by kind so `1` and `"1"` stay distinct.
    pub fn key(&self) -> String {
        match self {
            PinId::Number(n) => format!("n{}", n),
            PinId::Text(s) => format!("s{}", s),
        }
    }
}

impl From<i64> for PinId {
    fn from(n: i64) -> Self {
        PinId::Number(n)
    }
}

impl From<&str> for PinId {
    fn from(s: &str) -> Self {
        PinId::Text(s.to_string())
    }
}

impl From<String> for PinId {
    fn from(s: String) -> Self {
        PinId::Text(s)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pin {
    pub id: PinId,
    /// Horizontal position in percent of the base image width.
    pub x: f64,
    /// Vertical position in percent of the base image height.
    pub y: f64,
    #[serde(alias = "iconUrl")]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Pin {
    pub fn new(id: impl Into<PinId>, x: f64, y: f64, image_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            image_url: image_url.into(),
            width: None,
            height: None,
            label: None,
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn icon_size(&self) -> Size {
        Size::new(
            self.width.unwrap_or(DEFAULT_PIN_SIZE),
            self.height.unwrap_or(DEFAULT_PIN_SIZE),
        )
    }

    pub fn alt_text(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!("Pin {}", self.id),
        }
    }

    /// Point on the content box the pin marks, in unscaled pixels.
    pub fn anchor(&self, content: Size) -> Point {
        Point::new(self.x / 100.0 * content.width, self.y / 100.0 * content.height)
    }

    /// Pixel box of the icon inside the content box: bottom-center sits on the anchor.
    pub fn anchor_box(&self, content: Size) -> Rect {
        let a = self.anchor(content);
        let icon = self.icon_size();
        Rect::new(a.x - icon.width / 2.0, a.y - icon.height, icon.width, icon.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_center_pin_sits_on_image_bottom_midpoint() {
        let content = Size::new(400.0, 300.0);
        let pin = Pin::new(1, 50.0, 100.0, "pin.png");
        let b = pin.anchor_box(content);
        assert_eq!(b.left + b.width / 2.0, 200.0);
        assert_eq!(b.bottom(), 300.0);
        assert_eq!(b.size(), Size::new(DEFAULT_PIN_SIZE, DEFAULT_PIN_SIZE));
    }

    #[test]
    fn custom_icon_size_moves_box_not_anchor() {
        let content = Size::new(100.0, 100.0);
        let pin = Pin::new("a", 10.0, 20.0, "pin.png").with_size(40.0, 60.0);
        let b = pin.anchor_box(content);
        assert_eq!(b, Rect::new(-10.0, -40.0, 40.0, 60.0));
        assert_eq!(pin.anchor(content), Point::new(10.0, 20.0));
    }

    #[test]
    fn alt_text_prefers_label() {
        assert_eq!(Pin::new(7, 0.0, 0.0, "p").alt_text(), "Pin 7");
        assert_eq!(
            Pin::new("x", 0.0, 0.0, "p").with_label("Harbor").alt_text(),
            "Harbor"
        );
    }

    #[test]
    fn pin_ids_deserialize_from_numbers_and_strings() {
        let pins: Vec<Pin> = serde_json::from_str(
            r#"[{"id":3,"x":1,"y":2,"imageUrl":"a.png"},
                {"id":"north","x":5,"y":6,"iconUrl":"b.png","label":"North"}]"#,
        )
        .unwrap();
        assert_eq!(pins[0].id, PinId::Number(3));
        assert_eq!(pins[1].id, PinId::from("north"));
        assert_eq!(pins[1].image_url, "b.png");
        assert_eq!(pins[1].label.as_deref(), Some("North"));
    }

    #[test]
    fn number_and_text_ids_get_distinct_keys() {
        let pins = [Pin::new(1, 0.0, 0.0, "a"), Pin::new("1", 5.0, 5.0, "b")];
        let keys: Vec<String> = pins.iter().map(|p| p.id.key()).collect();
        assert_eq!(keys, ["n1", "s1"]);
        assert_eq!(pins[0].id.to_string(), pins[1].id.to_string());
    }

    #[test]
    fn percent_of_rejects_degenerate_rect() {
        let r = Rect::new(10.0, 10.0, 0.0, 50.0);
        assert_eq!(r.percent_of(Point::new(10.0, 10.0)), None);
        let r = Rect::new(10.0, 20.0, 200.0, 100.0);
        assert_eq!(
            r.percent_of(Point::new(60.0, 45.0)),
            Some(Origin { x: 25.0, y: 25.0 })
        );
    }

    #[test]
    fn origin_formats_as_css() {
        assert_eq!(Origin::CENTER.to_string(), "50% 50%");
        assert_eq!(Origin { x: 12.5, y: 0.0 }.to_string(), "12.5% 0%");
    }
}
