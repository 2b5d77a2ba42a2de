//! Bingo Predictions App
//!
//! Top-level component: resolves the route once per page load and renders
//! the matching page.

use leptos::prelude::*;

use crate::components::{EditorPage, ListPage, ViewerPage};
use crate::router::{self, Route};

#[component]
pub fn App() -> impl IntoView {
    let route = router::current_route();
    web_sys::console::log_1(&format!("[APP] route: {route:?}").into());

    view! {
        <div class="app">
            <header class="app-header">
                <h1>"Bingo Predictions"</h1>
                <nav>
                    <a href="/">"Cards"</a>
                    <a href="/edit">"Create"</a>
                </nav>
            </header>
            <main class="main-content">
                {match route {
                    Route::List => view! { <ListPage /> }.into_any(),
                    Route::Edit { id } => view! { <EditorPage id=id /> }.into_any(),
                    Route::View { id } => view! { <ViewerPage id=id /> }.into_any(),
                }}
            </main>
        </div>
    }
}
