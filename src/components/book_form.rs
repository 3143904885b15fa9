//! Book Form Component
//!
//! Create/edit form for a single book. The title is required; the author
//! falls back to a default when left blank.

use leptos::prelude::*;

use crate::catalog::use_catalog;

#[component]
pub fn BookForm() -> impl IntoView {
    let catalog = use_catalog();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        catalog.save_book();
    };

    view! {
        <Show when=move || catalog.show_form.get()>
            <div class="modal-backdrop">
                <form class="book-form" on:submit=on_submit>
                    <h2>
                        {move || {
                            if catalog.draft.with(|d| d.id.is_some()) {
                                "Editar Livro"
                            } else {
                                "Novo Livro"
                            }
                        }}
                    </h2>
                    <input
                        type="text"
                        placeholder="Título"
                        prop:value=move || catalog.draft.with(|d| d.title.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            catalog.draft.update(|d| d.title = value);
                        }
                    />
                    <input
                        type="text"
                        placeholder="Autor"
                        prop:value=move || catalog.draft.with(|d| d.author.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            catalog.draft.update(|d| d.author = value);
                        }
                    />
                    <div class="form-actions">
                        <button type="submit" disabled=move || catalog.loading.get()>
                            "Salvar"
                        </button>
                        <button
                            type="button"
                            class="cancel-btn"
                            on:click=move |_| catalog.close_form()
                        >
                            "Cancelar"
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
