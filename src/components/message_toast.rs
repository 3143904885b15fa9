//! Message Toast Component
//!
//! Transient status banner fed by the catalog controller's message slot.

use leptos::prelude::*;

use crate::catalog::use_catalog;
use crate::models::MessageKind;

#[component]
pub fn MessageToast() -> impl IntoView {
    let catalog = use_catalog();

    view! {
        <Show when=move || catalog.message.with(|slot| slot.current().is_some())>
            <div class=move || {
                catalog.message.with(|slot| match slot.current().map(|m| m.kind) {
                    Some(MessageKind::Error) => "message error",
                    _ => "message success",
                })
            }>
                {move || {
                    catalog
                        .message
                        .with(|slot| slot.current().map(|m| m.text.clone()).unwrap_or_default())
                }}
            </div>
        </Show>
    }
}
