//! Construction parameters for the map widget and the viewport policy.
//! Everything here is plain data that can be loaded from JSON and validated
//! before the component is mounted.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::ConfigError;
use crate::model::Pin;

pub const DEFAULT_MIN_SCALE: f64 = 1.0;
pub const DEFAULT_MAX_SCALE: f64 = 5.0;
/// Scale change per wheel event under [`ZoomPolicy::FixedStep`].
pub const DEFAULT_ZOOM_STEP: f64 = 0.1;
/// Scale change per unit of `deltaY` under [`ZoomPolicy::Continuous`].
pub const DEFAULT_ZOOM_FACTOR: f64 = 0.001;
/// `deltaY` of one notch of a typical mouse wheel; used by the zoom buttons.
pub const NOMINAL_WHEEL_DELTA: f64 = 100.0;

const CSS_UNITS: &[&str] = &["px", "%", "em", "rem", "vw", "vh", "vmin", "vmax", "pt", "cm", "mm", "in"];
const CSS_FUNCTIONS: &[&str] = &["calc", "min", "max", "clamp", "var"];

fn default_zoom_step() -> f64 {
    DEFAULT_ZOOM_STEP
}

fn default_zoom_factor() -> f64 {
    DEFAULT_ZOOM_FACTOR
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum ZoomPolicy {
    /// Fixed increment per wheel event, by sign of the delta.
    FixedStep {
        #[serde(default = "default_zoom_step")]
        step: f64,
    },
    /// Increment proportional to the delta magnitude.
    Continuous {
        #[serde(default = "default_zoom_factor")]
        factor: f64,
    },
}

impl ZoomPolicy {
    /// Scale change for a wheel event. Negative `delta_y` (wheel up) zooms in.
    pub fn scale_delta(&self, delta_y: f64) -> f64 {
        if !delta_y.is_finite() {
            return 0.0;
        }
        match *self {
            ZoomPolicy::FixedStep { step } => {
                if delta_y < 0.0 {
                    step
                } else if delta_y > 0.0 {
                    -step
                } else {
                    0.0
                }
            }
            ZoomPolicy::Continuous { factor } => -delta_y * factor,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let (name, value) = match *self {
            ZoomPolicy::FixedStep { step } => ("step", step),
            ZoomPolicy::Continuous { factor } => ("factor", factor),
        };
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidZoomPolicy { name, value })
        }
    }
}

impl Default for ZoomPolicy {
    fn default() -> Self {
        ZoomPolicy::FixedStep {
            step: DEFAULT_ZOOM_STEP,
        }
    }
}

/// How far the map may be dragged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PanLimit {
    /// Unbounded panning.
    #[default]
    Free,
    /// Scaled content wider than the viewport keeps covering it; narrower
    /// content stays inside it. Enforced after drags, zooms and resizes.
    Contain,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewportSettings {
    pub min_scale: f64,
    pub max_scale: f64,
    pub zoom: ZoomPolicy,
    pub pan: PanLimit,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            zoom: ZoomPolicy::default(),
            pan: PanLimit::Free,
        }
    }
}

impl ViewportSettings {
    pub fn new(min_scale: f64, max_scale: f64, zoom: ZoomPolicy) -> Result<Self, ConfigError> {
        let settings = Self {
            min_scale,
            max_scale,
            zoom,
            pan: PanLimit::Free,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn with_pan(mut self, pan: PanLimit) -> Self {
        self.pan = pan;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = self.min_scale.is_finite()
            && self.max_scale.is_finite()
            && self.min_scale > 0.0
            && self.min_scale <= self.max_scale;
        if !ok {
            return Err(ConfigError::InvalidScaleRange {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        self.zoom.validate()
    }

    /// Clamp into `[min_scale, max_scale]`; never panics, even on unvalidated settings.
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        if !scale.is_finite() {
            return self.min_scale;
        }
        scale.max(self.min_scale).min(self.max_scale)
    }
}

/// A CSS length as accepted in the JSON config: a non-negative number with a
/// unit (`400px`, `1e2px`, `60vh`), a bare `0`, `auto`, or one of the math
/// functions `calc`/`min`/`max`/`clamp`/`var`. Function bodies are passed to the
/// browser as-is; only the name and balanced parentheses are checked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CssLength(String);

fn balanced(s: &str) -> bool {
    let mut depth = 0i32;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

impl CssLength {
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let s = raw.trim();
        let invalid = || ConfigError::InvalidLength(raw.to_string());
        if s == "auto" {
            return Ok(CssLength(s.to_string()));
        }
        if let Some(open) = s.find('(') {
            let (name, args) = s.split_at(open);
            let body = args.trim_start_matches('(').trim_end_matches(')').trim();
            let ok = CSS_FUNCTIONS.contains(&name)
                && args.ends_with(')')
                && balanced(args)
                && !body.is_empty();
            return if ok {
                Ok(CssLength(s.to_string()))
            } else {
                Err(invalid())
            };
        }
        let unit_start = s
            .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%')
            .len();
        let (num, unit) = s.split_at(unit_start);
        let value: f64 = num.parse().map_err(|_| invalid())?;
        let unit_ok = CSS_UNITS.contains(&unit) || (unit.is_empty() && value == 0.0);
        if !value.is_finite() || value < 0.0 || !unit_ok {
            return Err(invalid());
        }
        Ok(CssLength(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CssLength {
    type Error = ConfigError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        CssLength::parse(&s)
    }
}

impl From<CssLength> for String {
    fn from(l: CssLength) -> Self {
        l.0
    }
}

impl fmt::Display for CssLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything needed to build a map widget, in the shape of its JSON config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    #[serde(alias = "mapUrl")]
    pub image_url: String,
    pub window_width: CssLength,
    pub window_height: CssLength,
    #[serde(default)]
    pub map_width: Option<f64>,
    #[serde(default)]
    pub map_height: Option<f64>,
    #[serde(default)]
    pub init_scale: Option<f64>,
    #[serde(default)]
    pub pins: Vec<Pin>,
    #[serde(default)]
    pub viewport: ViewportSettings,
}

impl MapConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: MapConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.viewport.validate()?;
        for (field, value) in [("mapWidth", self.map_width), ("mapHeight", self.map_height)] {
            if let Some(v) = value {
                if !(v.is_finite() && v > 0.0) {
                    return Err(ConfigError::InvalidMapSize { field, value: v });
                }
            }
        }
        if let Some(s) = self.init_scale {
            if !(s.is_finite() && s > 0.0) {
                return Err(ConfigError::InvalidInitScale(s));
            }
        }
        validate_pins(&self.pins)
    }
}

pub fn validate_pins(pins: &[Pin]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for pin in pins {
        let invalid = |reason| ConfigError::InvalidPin {
            id: pin.id.to_string(),
            reason,
        };
        if !(pin.x.is_finite() && pin.y.is_finite()) {
            return Err(invalid("coordinates must be finite"));
        }
        let size = pin.icon_size();
        if size.is_degenerate() {
            return Err(invalid("icon size must be positive"));
        }
        if !seen.insert(&pin.id) {
            return Err(ConfigError::DuplicatePinId(pin.id.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PinId;

    #[test]
    fn parses_minimal_config_with_defaults() {
        let cfg = MapConfig::from_json(
            r#"{"mapUrl":"map.png","windowWidth":"400px","windowHeight":"300px"}"#,
        )
        .unwrap();
        assert_eq!(cfg.image_url, "map.png");
        assert_eq!(cfg.window_width.as_str(), "400px");
        assert!(cfg.pins.is_empty());
        assert_eq!(cfg.init_scale, None);
        assert_eq!(cfg.viewport, ViewportSettings::default());
    }

    #[test]
    fn parses_viewport_policy() {
        let cfg = MapConfig::from_json(
            r#"{"imageUrl":"m.png","windowWidth":"100%","windowHeight":"60vh",
                "viewport":{"maxScale":4,"zoom":{"mode":"continuous"},"pan":"contain"}}"#,
        )
        .unwrap();
        assert_eq!(cfg.viewport.max_scale, 4.0);
        assert_eq!(cfg.viewport.min_scale, DEFAULT_MIN_SCALE);
        assert_eq!(cfg.viewport.zoom, ZoomPolicy::Continuous { factor: DEFAULT_ZOOM_FACTOR });
        assert_eq!(cfg.viewport.pan, PanLimit::Contain);
    }

    #[test]
    fn rejects_bad_lengths() {
        for bad in ["", "wide", "10", "-5px", "12parsecs", "px", "10e", "calc(", "calc()", "calc(1px))", "url(x.png)"] {
            assert!(CssLength::parse(bad).is_err(), "{bad:?} should be rejected");
        }
        for good in ["0", "400px", "100%", "2.5rem", " 60vh ", "1e2px", "auto", "calc(100% - 20px)", "min(50vw, calc(400px + 2em))"] {
            assert!(CssLength::parse(good).is_ok(), "{good:?} should parse");
        }
        let err = MapConfig::from_json(
            r#"{"imageUrl":"m.png","windowWidth":"big","windowHeight":"1px"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn rejects_inverted_scale_range() {
        let err = ViewportSettings::new(3.0, 2.0, ZoomPolicy::default()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidScaleRange { .. }));
        let err = ViewportSettings::new(1.0, 2.0, ZoomPolicy::FixedStep { step: 0.0 }).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidZoomPolicy { name: "step", .. }));
    }

    #[test]
    fn rejects_duplicate_pin_ids() {
        let pins = vec![Pin::new(1, 0.0, 0.0, "a"), Pin::new(1, 5.0, 5.0, "b")];
        let err = validate_pins(&pins).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicatePinId(ref id) if id == "1"));
        // same text and number are distinct keys
        let pins = vec![Pin::new(1, 0.0, 0.0, "a"), Pin::new("1", 5.0, 5.0, "b")];
        assert!(validate_pins(&pins).is_ok());
    }

    #[test]
    fn rejects_non_finite_pin_and_bad_map_size() {
        let pins = vec![Pin::new("x", f64::NAN, 0.0, "a")];
        assert!(matches!(
            validate_pins(&pins),
            Err(ConfigError::InvalidPin { .. })
        ));
        let err = MapConfig::from_json(
            r#"{"imageUrl":"m.png","windowWidth":"1px","windowHeight":"1px","mapWidth":0}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMapSize { field: "mapWidth", .. }));
    }

    #[test]
    fn bad_init_scale_has_its_own_error() {
        let err = MapConfig::from_json(
            r#"{"imageUrl":"m.png","windowWidth":"1px","windowHeight":"1px","initScale":-2}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidInitScale(v) if v == -2.0));
        assert!(err.to_string().contains("initScale"));
    }

    #[test]
    fn zoom_policy_amounts_default_to_constants() {
        let p: ZoomPolicy = serde_json::from_str(r#"{"mode":"fixedStep"}"#).unwrap();
        assert_eq!(p, ZoomPolicy::FixedStep { step: DEFAULT_ZOOM_STEP });
        let p: ZoomPolicy = serde_json::from_str(r#"{"mode":"continuous","factor":0.002}"#).unwrap();
        assert_eq!(p, ZoomPolicy::Continuous { factor: 0.002 });
    }

    #[test]
    fn demo_config_is_valid() {
        let cfg = MapConfig::from_json(include_str!("../demo/map.json")).unwrap();
        assert!(!cfg.pins.is_empty());
        assert!(cfg.pins.iter().any(|p| p.id == PinId::Number(1)));
    }

    #[test]
    fn fixed_step_follows_delta_sign() {
        let p = ZoomPolicy::default();
        assert_eq!(p.scale_delta(-3.0), DEFAULT_ZOOM_STEP);
        assert_eq!(p.scale_delta(250.0), -DEFAULT_ZOOM_STEP);
        assert_eq!(p.scale_delta(0.0), 0.0);
        assert_eq!(p.scale_delta(f64::NAN), 0.0);
        let c = ZoomPolicy::Continuous { factor: DEFAULT_ZOOM_FACTOR };
        assert!((c.scale_delta(-100.0) - 0.1).abs() < 1e-12);
    }
}
