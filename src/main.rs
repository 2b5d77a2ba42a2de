//! Bingo Predictions Frontend Entry Point

mod api;
mod app;
mod components;
mod controller;
mod debounce;
mod export;
mod form;
mod grid;
mod models;
mod router;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
