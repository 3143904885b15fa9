//! Application Shell
//!
//! Screen switch between login and catalog. The screens share nothing
//! but the navigation that swaps them; the original two-page setup
//! becomes a hash route checked at mount.

use leptos::prelude::*;
use wasm_bindgen::JsValue;

use crate::api::DefaultBooks;
use crate::catalog::{Catalog, CatalogController};
use crate::components::{BookForm, BookTable, LoginForm, MessageToast};
use crate::models::CurrentUser;

const CATALOG_HASH: &str = "#/livros";

#[derive(Clone, Copy, PartialEq)]
enum Screen {
    Login,
    Catalog,
}

fn initial_screen() -> Screen {
    let hash = window().location().hash().unwrap_or_default();
    if hash == CATALOG_HASH {
        Screen::Catalog
    } else {
        Screen::Login
    }
}

#[component]
pub fn App() -> impl IntoView {
    let (screen, set_screen) = signal(initial_screen());

    let on_login = Callback::new(move |user: CurrentUser| {
        web_sys::console::log_1(&JsValue::from_str(&format!(
            "Login realizado, redirecionando para o catálogo: {}",
            user.display_name()
        )));
        let _ = window().location().set_hash(CATALOG_HASH);
        set_screen.set(Screen::Catalog);
    });

    view! {
        {move || match screen.get() {
            Screen::Login => view! { <LoginForm on_login=on_login /> }.into_any(),
            Screen::Catalog => view! { <CatalogScreen /> }.into_any(),
        }}
    }
}

/// Catalog screen: constructs its controller, loads once, and lets the
/// components drive it through context.
#[component]
fn CatalogScreen() -> impl IntoView {
    let catalog: Catalog = CatalogController::new(DefaultBooks::default());
    provide_context(catalog);

    web_sys::console::log_1(&JsValue::from_str(
        "📚 LionBook - Books Management System initialized",
    ));
    catalog.load_books();

    // Escape backs out of the form and any armed delete.
    window_event_listener(leptos::ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            catalog.close_form();
            catalog.cancel_delete();
        }
    });

    view! {
        <div class="catalog-screen">
            <header class="header">
                <h1>"LionBook"</h1>
                <button class="new-book-btn" on:click=move |_| catalog.open_form()>
                    "Novo Livro"
                </button>
            </header>
            <MessageToast />
            <BookForm />
            <BookTable />
        </div>
    }
}
