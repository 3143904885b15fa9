//! LionBook Frontend Entry Point

mod api;
mod app;
mod catalog;
mod components;
mod models;
mod session;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
