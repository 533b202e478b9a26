mod components;
mod config;
mod error;
mod model;
mod persist;
mod state;
mod util;

use components::app::App;

fn main() {
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    yew::Renderer::<App>::new().render();
}
