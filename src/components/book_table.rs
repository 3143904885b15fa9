//! Book Table Component
//!
//! Active books with edit and delete actions, plus the running count.

use leptos::prelude::*;

use crate::catalog::use_catalog;
use crate::components::DeleteConfirmButton;

#[component]
pub fn BookTable() -> impl IntoView {
    let catalog = use_catalog();

    view! {
        <div class="table-container">
            <Show when=move || catalog.loading.get()>
                <div class="loading-indicator">"Carregando..."</div>
            </Show>
            <table class="books-table">
                <thead>
                    <tr>
                        <th>"Título"</th>
                        <th>"Autor"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || catalog.active_books()
                        key=|book| book.id
                        children=move |book| {
                            let edit_target = book.clone();
                            let delete_target = book.clone();
                            view! {
                                <tr>
                                    <td>{book.title.clone()}</td>
                                    <td>{book.author.clone()}</td>
                                    <td class="row-actions">
                                        <button
                                            class="edit-btn"
                                            on:click=move |_| catalog.edit_book(&edit_target)
                                        >
                                            "Editar"
                                        </button>
                                        <DeleteConfirmButton book=delete_target />
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <p class="book-count">{move || format!("{} livros", catalog.total_books())}</p>
        </div>
    }
}
