use yew::prelude::*;

use crate::model::{Pin, PinId};
use crate::style;

#[derive(Properties, PartialEq, Clone)]
pub struct PinLayerProps {
    pub pins: Vec<Pin>,
    #[prop_or_default]
    pub on_pin_click: Option<Callback<PinId>>,
}

/// Markers over the base image. Icons are not draggable so a press on a pin
/// still starts a map drag, but each pin keeps its own click.
#[function_component(PinLayer)]
pub fn pin_layer(props: &PinLayerProps) -> Html {
    html! {
        <>
            { for props.pins.iter().map(|pin| {
                let onclick = props.on_pin_click.clone().map(|cb| {
                    let id = pin.id.clone();
                    Callback::from(move |_: MouseEvent| cb.emit(id.clone()))
                });
                let alt = pin.alt_text();
                html! {
                    <div key={pin.id.key()} class="map-pin" style={style::pin_style(pin)} {onclick}>
                        <img
                            src={pin.image_url.clone()}
                            alt={alt.clone()}
                            title={alt}
                            draggable="false"
                            style={style::pin_icon_style(pin)}
                        />
                    </div>
                }
            }) }
        </>
    }
}
