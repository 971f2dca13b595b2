use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, HtmlElement, WheelEvent};
use yew::prelude::*;

use super::{map_controls::MapControls, pin_layer::PinLayer};
use crate::config::{MapConfig, ViewportSettings, validate_pins};
use crate::model::{Pin, PinId, Point, Rect, Size};
use crate::state::{ViewportAction, ViewportState};
use crate::style;
use crate::util::{clog, cwarn};

#[derive(Properties, PartialEq, Clone)]
pub struct MapWithPinsProps {
    pub image_url: AttrValue,
    /// CSS width of the visible window, e.g. `"800px"`.
    pub window_width: AttrValue,
    pub window_height: AttrValue,
    /// Intrinsic map size in px; fills the window when absent.
    #[prop_or_default]
    pub map_width: Option<f64>,
    #[prop_or_default]
    pub map_height: Option<f64>,
    #[prop_or_default]
    pub init_scale: Option<f64>,
    #[prop_or_default]
    pub pins: Vec<Pin>,
    #[prop_or_default]
    pub settings: ViewportSettings,
    #[prop_or_default]
    pub show_controls: bool,
    #[prop_or_default]
    pub on_pin_click: Option<Callback<PinId>>,
}

impl MapWithPinsProps {
    pub fn from_config(cfg: MapConfig) -> Self {
        Self {
            image_url: cfg.image_url.into(),
            window_width: String::from(cfg.window_width).into(),
            window_height: String::from(cfg.window_height).into(),
            map_width: cfg.map_width,
            map_height: cfg.map_height,
            init_scale: cfg.init_scale,
            pins: cfg.pins,
            settings: cfg.viewport,
            show_controls: false,
            on_pin_click: None,
        }
    }
}

fn client_point(e: &MouseEvent) -> Point {
    Point::new(e.client_x() as f64, e.client_y() as f64)
}

fn measure(el: &Element) -> Size {
    let r = el.get_bounding_client_rect();
    Size::new(r.width(), r.height())
}

/// Listeners that Yew can't express: a non-passive wheel (so the page doesn't
/// scroll) and window resize for re-measuring.
struct NativeListeners {
    wrapper: HtmlElement,
    window: Option<web_sys::Window>,
    wheel: Closure<dyn FnMut(WheelEvent)>,
    resize: Closure<dyn FnMut(web_sys::Event)>,
}

impl NativeListeners {
    fn attach(
        wrapper_ref: &NodeRef,
        zoom_ref: &NodeRef,
        dispatcher: UseReducerDispatcher<ViewportState>,
    ) -> Option<Self> {
        let wrapper = wrapper_ref.cast::<HtmlElement>()?;
        dispatcher.dispatch(ViewportAction::Measure {
            size: measure(&wrapper),
        });

        let wheel = {
            let zoom_ref = zoom_ref.clone();
            let dispatcher = dispatcher.clone();
            Closure::wrap(Box::new(move |e: WheelEvent| {
                e.prevent_default();
                // not mounted yet: nothing to zoom about
                let Some(container) = zoom_ref.cast::<Element>() else {
                    return;
                };
                let r = container.get_bounding_client_rect();
                dispatcher.dispatch(ViewportAction::Wheel {
                    delta_y: e.delta_y(),
                    pointer: Point::new(e.client_x() as f64, e.client_y() as f64),
                    rect: Rect::new(r.left(), r.top(), r.width(), r.height()),
                });
            }) as Box<dyn FnMut(_)>)
        };
        if wrapper
            .add_event_listener_with_callback("wheel", wheel.as_ref().unchecked_ref())
            .is_err()
        {
            cwarn("map-with-pins: could not attach wheel listener");
        }

        let resize = {
            let wrapper = wrapper.clone();
            Closure::wrap(Box::new(move |_e: web_sys::Event| {
                dispatcher.dispatch(ViewportAction::Measure {
                    size: measure(&wrapper),
                });
            }) as Box<dyn FnMut(_)>)
        };
        let window = web_sys::window();
        if let Some(win) = &window {
            let _ = win.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref());
        }

        Some(Self {
            wrapper,
            window,
            wheel,
            resize,
        })
    }

    fn detach(self) {
        let _ = self
            .wrapper
            .remove_event_listener_with_callback("wheel", self.wheel.as_ref().unchecked_ref());
        if let Some(win) = &self.window {
            let _ = win.remove_event_listener_with_callback("resize", self.resize.as_ref().unchecked_ref());
        }
    }
}

/// Pannable, zoomable image with pins. Wheel zooms about the cursor, dragging
/// pans, and the pins scale with the map.
#[function_component(MapWithPins)]
pub fn map_with_pins(props: &MapWithPinsProps) -> Html {
    let wrapper_ref = use_node_ref();
    let zoom_ref = use_node_ref();
    let viewport = {
        let settings = props.settings;
        let init_scale = props.init_scale.unwrap_or(1.0);
        use_reducer(move || ViewportState::new(settings, init_scale))
    };

    // Wheel + resize
    {
        let wrapper_ref = wrapper_ref.clone();
        let zoom_ref = zoom_ref.clone();
        let dispatcher = viewport.dispatcher();
        use_effect_with((), move |_| {
            let listeners = NativeListeners::attach(&wrapper_ref, &zoom_ref, dispatcher);
            if listeners.is_none() {
                cwarn("map-with-pins: wrapper not mounted, wheel zoom disabled");
            }
            move || {
                if let Some(l) = listeners {
                    l.detach();
                }
            }
        });
    }

    // Adopt new settings without remounting
    {
        let dispatcher = viewport.dispatcher();
        use_effect_with(props.settings, move |settings| {
            dispatcher.dispatch(ViewportAction::Configure { settings: *settings });
            || ()
        });
    }

    // Map size bounds the Contain pan limit
    {
        let dispatcher = viewport.dispatcher();
        use_effect_with((props.map_width, props.map_height), move |(width, height)| {
            dispatcher.dispatch(ViewportAction::MapSize {
                width: *width,
                height: *height,
            });
            || ()
        });
    }

    {
        use_effect_with(props.pins.clone(), move |pins| {
            if let Err(e) = validate_pins(pins) {
                cwarn(&format!("map-with-pins: {}", e));
            }
            || ()
        });
    }

    let onmousedown = {
        let dispatcher = viewport.dispatcher();
        Callback::from(move |e: MouseEvent| {
            clog("map-with-pins: drag start");
            dispatcher.dispatch(ViewportAction::DragStart {
                pointer: client_point(&e),
            });
        })
    };
    let onmousemove = {
        let dispatcher = viewport.dispatcher();
        Callback::from(move |e: MouseEvent| {
            dispatcher.dispatch(ViewportAction::DragMove {
                pointer: client_point(&e),
            });
        })
    };
    let end_drag = {
        let dispatcher = viewport.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(ViewportAction::DragEnd))
    };

    let controls = if props.show_controls {
        let dispatch = |action: ViewportAction| {
            let dispatcher = viewport.dispatcher();
            Callback::from(move |_: ()| dispatcher.dispatch(action.clone()))
        };
        html! { <MapControls
            scale={viewport.scale}
            on_zoom_in={dispatch(ViewportAction::ZoomIn)}
            on_zoom_out={dispatch(ViewportAction::ZoomOut)}
            on_reset={dispatch(ViewportAction::Reset)}
        /> }
    } else {
        html! {}
    };

    html! {
        <div
            ref={wrapper_ref}
            class="map-wrapper"
            style={style::wrapper_style(&props.window_width, &props.window_height, viewport.is_dragging())}
            {onmousedown}
            {onmousemove}
            onmouseup={end_drag.clone()}
            onmouseleave={end_drag}
        >
            <div ref={zoom_ref} class="zoom-container" style={style::zoom_container_style(&viewport)}>
                <div style={style::content_style(props.map_width, props.map_height)}>
                    <img
                        src={props.image_url.clone()}
                        alt="Map"
                        class="map-image"
                        draggable="false"
                        style={style::image_style(props.map_width, props.map_height)}
                    />
                    <PinLayer pins={props.pins.clone()} on_pin_click={props.on_pin_click.clone()} />
                </div>
            </div>
            { controls }
        </div>
    }
}
