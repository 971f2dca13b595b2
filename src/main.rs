use map_with_pins::components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
