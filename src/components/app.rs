use super::map_with_pins::{MapWithPins, MapWithPinsProps};
use crate::config::MapConfig;
use crate::model::PinId;
use crate::util::{clog, cwarn};
use yew::prelude::*;

const DEMO_CONFIG: &str = include_str!("../../demo/map.json");

// Demo host: mounts the widget from the bundled JSON config and shows the last clicked pin
#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| MapConfig::from_json(DEMO_CONFIG));
    let selected = use_state(|| None::<PinId>);

    let on_pin_click = {
        let selected = selected.clone();
        Callback::from(move |id: PinId| {
            clog(&format!("pin {} clicked", id));
            selected.set(Some(id));
        })
    };

    match &*config {
        Ok(cfg) => {
            let selected_label = (*selected).as_ref().map(|id| {
                cfg.pins
                    .iter()
                    .find(|p| &p.id == id)
                    .map(|p| p.alt_text())
                    .unwrap_or_else(|| id.to_string())
            });
            let props = MapWithPinsProps {
                show_controls: true,
                on_pin_click: Some(on_pin_click),
                ..MapWithPinsProps::from_config(cfg.clone())
            };
            html! {
                <div id="root" style="display:flex; flex-direction:column; align-items:center; gap:8px; padding:12px;">
                    <MapWithPins ..props />
                    <div style="font-family:sans-serif;">
                        { match selected_label {
                            Some(label) => format!("Selected: {}", label),
                            None => "Click a pin".to_string(),
                        } }
                    </div>
                </div>
            }
        }
        Err(e) => {
            cwarn(&format!("demo config rejected: {}", e));
            html! { <pre class="config-error">{ e.to_string() }</pre> }
        }
    }
}
