//! Delete Confirm Button Component
//!
//! Inline two-step delete: the × button arms the controller's pending
//! delete, then ✓/✗ settle it. Declining leaves the catalog untouched.

use leptos::prelude::*;

use crate::catalog::use_catalog;
use crate::models::BookRecord;

#[component]
pub fn DeleteConfirmButton(book: BookRecord) -> impl IntoView {
    let catalog = use_catalog();
    let id = book.id;
    let book = StoredValue::new(book);
    let armed = move || {
        catalog
            .pending_delete
            .with(|pending| pending.as_ref().is_some_and(|b| b.id == id))
    };

    view! {
        <Show when=move || !armed()>
            <button
                class="delete-btn"
                on:click=move |ev| {
                    ev.stop_propagation();
                    catalog.request_delete(book.get_value());
                }
            >
                "×"
            </button>
        </Show>
        <Show when=armed>
            <span class="delete-confirm">
                <span class="delete-confirm-text">"Excluir?"</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        catalog.confirm_delete();
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        catalog.cancel_delete();
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
