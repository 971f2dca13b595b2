// Viewport state driven by wheel and mouse input
use std::rc::Rc;
use yew::Reducible;

use crate::config::{NOMINAL_WHEEL_DELTA, PanLimit, ViewportSettings};
use crate::model::{Origin, Point, Rect, Size};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    /// `start` is the pointer at drag start minus the position at that time.
    Dragging { start: Point },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewportState {
    pub scale: f64,
    pub origin: Origin,
    pub position: Point,
    pub drag: DragState,
    pub settings: ViewportSettings,
    /// Last measured viewport size; only the `Contain` pan limit reads it.
    pub viewport: Option<Size>,
    /// Intrinsic map size in px per axis; `None` fills the viewport.
    pub map_width: Option<f64>,
    pub map_height: Option<f64>,
    initial_scale: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewportAction {
    /// Wheel over the map; `rect` is the zoom container's bounding box.
    Wheel { delta_y: f64, pointer: Point, rect: Rect },
    ZoomIn,
    ZoomOut,
    DragStart { pointer: Point },
    DragMove { pointer: Point },
    /// Mouse-up and mouse-leave both end a drag.
    DragEnd,
    Measure { size: Size },
    MapSize { width: Option<f64>, height: Option<f64> },
    Configure { settings: ViewportSettings },
    Reset,
}

impl Default for ViewportState {
    fn default() -> Self {
        ViewportState::new(ViewportSettings::default(), 1.0)
    }
}

fn positive(v: Option<f64>) -> Option<f64> {
    v.filter(|v| v.is_finite() && *v > 0.0)
}

/// Translation range on one axis between "content start on the viewport start"
/// and "content end on the viewport end". Content wider than the viewport
/// covers it anywhere in the range; narrower content stays inside it.
/// `o` is the origin fraction of the container, `view` the viewport length,
/// `start` and `len` the unscaled content span inside the container.
fn axis_range(o: f64, view: f64, start: f64, len: f64, scale: f64) -> (f64, f64) {
    let pivot = o * view;
    let to_start = -pivot - scale * (start - pivot);
    let to_end = view - pivot - scale * (start + len - pivot);
    (to_start.min(to_end), to_start.max(to_end))
}

impl ViewportState {
    pub fn new(settings: ViewportSettings, initial_scale: f64) -> Self {
        let scale = settings.clamp_scale(initial_scale);
        Self {
            scale,
            origin: Origin::CENTER,
            position: Point::ZERO,
            drag: DragState::Idle,
            settings,
            viewport: None,
            map_width: None,
            map_height: None,
            initial_scale: scale,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn apply(&mut self, action: ViewportAction) {
        use ViewportAction::*;
        match action {
            Wheel {
                delta_y,
                pointer,
                rect,
            } => {
                let Some(origin) = rect.percent_of(pointer) else {
                    return;
                };
                self.origin = origin;
                self.step_scale(delta_y);
            }
            ZoomIn => self.step_scale(-NOMINAL_WHEEL_DELTA),
            ZoomOut => self.step_scale(NOMINAL_WHEEL_DELTA),
            DragStart { pointer } => {
                self.drag = DragState::Dragging {
                    start: pointer - self.position,
                };
            }
            DragMove { pointer } => {
                if let DragState::Dragging { start } = self.drag {
                    self.position = self.limit_pan(pointer - start);
                }
            }
            DragEnd => self.drag = DragState::Idle,
            Measure { size } => {
                self.viewport = (!size.is_degenerate()).then_some(size);
                self.reclamp();
            }
            MapSize { width, height } => {
                self.map_width = positive(width);
                self.map_height = positive(height);
                self.reclamp();
            }
            Configure { settings } => {
                self.settings = settings;
                self.scale = settings.clamp_scale(self.scale);
                self.initial_scale = settings.clamp_scale(self.initial_scale);
                self.reclamp();
            }
            Reset => {
                self.scale = self.initial_scale;
                self.origin = Origin::CENTER;
                self.position = Point::ZERO;
                self.drag = DragState::Idle;
                self.reclamp();
            }
        }
    }

    fn step_scale(&mut self, delta_y: f64) {
        let next = self.scale + self.settings.zoom.scale_delta(delta_y);
        self.scale = self.settings.clamp_scale(next);
        self.reclamp();
    }

    /// Allowed translations under `PanLimit::Contain`, as (min, max) corners.
    /// `None` when panning is free or the viewport hasn't been measured.
    pub fn pan_bounds(&self) -> Option<(Point, Point)> {
        let (PanLimit::Contain, Some(view)) = (self.settings.pan, self.viewport) else {
            return None;
        };
        let o = self.origin.fraction();
        let content = Size::new(
            self.map_width.unwrap_or(view.width),
            self.map_height.unwrap_or(view.height),
        );
        // `margin: 0 auto` centers narrow content horizontally only
        let left = ((view.width - content.width) / 2.0).max(0.0);
        let (min_x, max_x) = axis_range(o.x, view.width, left, content.width, self.scale);
        let (min_y, max_y) = axis_range(o.y, view.height, 0.0, content.height, self.scale);
        Some((Point::new(min_x, min_y), Point::new(max_x, max_y)))
    }

    fn limit_pan(&self, p: Point) -> Point {
        match self.pan_bounds() {
            Some((lo, hi)) => Point::new(p.x.max(lo.x).min(hi.x), p.y.max(lo.y).min(hi.y)),
            None => p,
        }
    }

    /// Contain mode only: pull the current position back into bounds after the
    /// scale, origin or geometry changed. Free panning never moves here.
    fn reclamp(&mut self) {
        self.position = self.limit_pan(self.position);
    }
}

impl Reducible for ViewportState {
    type Action = ViewportAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        new.apply(action);
        // unchanged state keeps the old handle so idle mouse moves don't re-render
        if new == *self { self } else { Rc::new(new) }
    }
}
