use yew_tap::util::init_console_logger;

mod components;
use components::app::App;

fn main() {
    init_console_logger(log::Level::Debug);
    yew::Renderer::<App>::new().render();
}
