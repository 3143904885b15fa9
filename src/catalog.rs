//! Catalog Controller
//!
//! Owns the book list and the create/edit/delete workflow of the catalog
//! screen. One instance is constructed at screen entry and handed to the
//! components via context.
//!
//! Every operation runs `idle → loading → (success | error) → idle`; the
//! loading flag clears as soon as the request settles, while the status
//! message stays up until its own hide task fires. Hide tasks carry the
//! message epoch, so a replaced message cannot be hidden early by a
//! stale timer.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{BookService, DefaultBooks};
use crate::models::{BookRecord, DraftBook, MessageKind, MessageSlot};

/// How long catalog status messages stay on screen.
pub const MESSAGE_TIMEOUT_MS: u32 = 4_000;

/// Reactive state and operations of the catalog screen.
pub struct CatalogController<S>
where
    S: BookService + Clone + Send + Sync + 'static,
{
    service: StoredValue<S>,
    /// Full list as last loaded, soft-deleted records included.
    pub books: RwSignal<Vec<BookRecord>>,
    /// Form buffer; `draft.id` is the active edit target.
    pub draft: RwSignal<DraftBook>,
    /// Whether the create/edit form is open.
    pub show_form: RwSignal<bool>,
    /// Record armed for deletion, awaiting the user's confirmation.
    pub pending_delete: RwSignal<Option<BookRecord>>,
    /// Advisory flag; does not block re-entry.
    pub loading: RwSignal<bool>,
    pub message: RwSignal<MessageSlot>,
}

impl<S> Clone for CatalogController<S>
where
    S: BookService + Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for CatalogController<S> where S: BookService + Clone + Send + Sync + 'static {}

/// Controller type the catalog components bind against.
pub type Catalog = CatalogController<DefaultBooks>;

pub fn use_catalog() -> Catalog {
    expect_context::<Catalog>()
}

impl<S> CatalogController<S>
where
    S: BookService + Clone + Send + Sync + 'static,
{
    pub fn new(service: S) -> Self {
        Self {
            service: StoredValue::new(service),
            books: RwSignal::new(Vec::new()),
            draft: RwSignal::new(DraftBook::default()),
            show_form: RwSignal::new(false),
            pending_delete: RwSignal::new(None),
            loading: RwSignal::new(false),
            message: RwSignal::new(MessageSlot::default()),
        }
    }

    // ========================
    // Derived views
    // ========================

    /// Records not marked deleted, in list order.
    pub fn active_books(&self) -> Vec<BookRecord> {
        self.books
            .with(|books| books.iter().filter(|b| !b.is_deleted).cloned().collect())
    }

    pub fn total_books(&self) -> usize {
        self.books
            .with(|books| books.iter().filter(|b| !b.is_deleted).count())
    }

    // ========================
    // Form state
    // ========================

    pub fn open_form(&self) {
        self.show_form.set(true);
    }

    /// Close the form and drop whatever was typed into it.
    pub fn close_form(&self) {
        self.show_form.set(false);
        self.draft.set(DraftBook::default());
    }

    /// Load a record into the form for editing. No request.
    pub fn edit_book(&self, book: &BookRecord) {
        self.draft.set(DraftBook::from_record(book));
        self.show_form.set(true);
    }

    // ========================
    // Delete gate
    // ========================

    pub fn request_delete(&self, book: BookRecord) {
        self.pending_delete.set(Some(book));
    }

    /// Declining the confirmation leaves everything untouched.
    pub fn cancel_delete(&self) {
        self.pending_delete.set(None);
    }

    // ========================
    // Operations
    // ========================

    pub fn load_books(self) {
        spawn_local(async move {
            let epoch = self.run_load().await;
            self.hide_later(epoch).await;
        });
    }

    /// Validate the draft and dispatch to create or update.
    pub fn save_book(self) {
        spawn_local(async move {
            let epoch = self.run_save().await;
            self.hide_later(epoch).await;
        });
    }

    pub fn confirm_delete(self) {
        spawn_local(async move {
            if let Some(epoch) = self.run_confirm_delete().await {
                self.hide_later(epoch).await;
            }
        });
    }

    async fn hide_later(self, epoch: u64) {
        TimeoutFuture::new(MESSAGE_TIMEOUT_MS).await;
        self.message.update(|slot| slot.hide_if_current(epoch));
    }

    pub(crate) async fn run_load(self) -> u64 {
        self.loading.set(true);
        let outcome = self.service.get_value().list().await;
        let epoch = match outcome {
            Ok(books) => {
                self.books.set(books);
                self.show_message(MessageKind::Success, "Dados carregados com sucesso!")
            }
            Err(err) => {
                self.books.set(Vec::new());
                self.show_message(MessageKind::Error, err.to_string())
            }
        };
        self.loading.set(false);
        epoch
    }

    pub(crate) async fn run_save(self) -> u64 {
        let draft = self.draft.get_untracked();
        if !draft.has_title() {
            return self.show_message(MessageKind::Error, "O título do livro é obrigatório!");
        }
        let epoch = match draft.id {
            Some(id) => self.run_update(id, &draft).await,
            None => self.run_create(&draft).await,
        };
        self.close_form();
        epoch
    }

    async fn run_create(self, draft: &DraftBook) -> u64 {
        self.loading.set(true);
        let book = draft.to_new_book();
        let outcome = self.service.get_value().create(&book).await;
        let epoch = match outcome {
            Ok(()) => {
                // Read-your-writes by reloading the authoritative list.
                self.run_load().await;
                self.show_message(
                    MessageKind::Success,
                    format!("Livro \"{}\" adicionado com sucesso!", book.title),
                )
            }
            Err(err) => self.show_message(MessageKind::Error, err.to_string()),
        };
        self.loading.set(false);
        epoch
    }

    async fn run_update(self, id: u32, draft: &DraftBook) -> u64 {
        self.loading.set(true);
        let update = draft.to_update();
        let outcome = self.service.get_value().update(id, &update).await;
        let epoch = match outcome {
            Ok(()) => {
                self.run_load().await;
                self.show_message(
                    MessageKind::Success,
                    format!("Livro \"{}\" atualizado com sucesso!", update.title),
                )
            }
            Err(err) => self.show_message(MessageKind::Error, err.to_string()),
        };
        self.loading.set(false);
        epoch
    }

    pub(crate) async fn run_confirm_delete(self) -> Option<u64> {
        let book = self.pending_delete.get_untracked()?;
        self.pending_delete.set(None);
        self.loading.set(true);
        let outcome = self.service.get_value().delete(book.id).await;
        let epoch = match outcome {
            Ok(()) => {
                self.run_load().await;
                self.show_message(
                    MessageKind::Success,
                    format!("Livro \"{}\" excluído com sucesso!", book.title),
                )
            }
            Err(err) => self.show_message(MessageKind::Error, err.to_string()),
        };
        self.loading.set(false);
        Some(epoch)
    }

    fn show_message(&self, kind: MessageKind, text: impl Into<String>) -> u64 {
        let text = text.into();
        let mut epoch = 0;
        self.message.update(|slot| epoch = slot.show(kind, text));
        epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::memory::MemoryBooks;
    use crate::api::ApiError;
    use crate::models::{BookUpdate, NewBook, DEFAULT_AUTHOR};
    use futures::executor::block_on;

    /// Service that always fails, for the unavailable-backend paths.
    #[derive(Clone)]
    struct DownBooks;

    impl BookService for DownBooks {
        async fn list(&self) -> Result<Vec<BookRecord>, ApiError> {
            Err(ApiError::Unavailable)
        }
        async fn create(&self, _book: &NewBook) -> Result<(), ApiError> {
            Err(ApiError::Unavailable)
        }
        async fn update(&self, _id: u32, _update: &BookUpdate) -> Result<(), ApiError> {
            Err(ApiError::Unavailable)
        }
        async fn delete(&self, _id: u32) -> Result<(), ApiError> {
            Err(ApiError::Unavailable)
        }
    }

    fn seeded_controller() -> (CatalogController<MemoryBooks>, MemoryBooks) {
        let store = MemoryBooks::seeded();
        let controller = CatalogController::new(store.clone());
        block_on(controller.run_load());
        (controller, store)
    }

    fn make_draft(title: &str, author: &str) -> DraftBook {
        DraftBook {
            id: None,
            title: title.into(),
            author: author.into(),
        }
    }

    #[test]
    fn test_load_replaces_the_list() {
        let (controller, store) = seeded_controller();
        assert_eq!(controller.books.get_untracked(), store.snapshot());
        assert!(!controller.loading.get_untracked());
        let slot = controller.message.get_untracked();
        assert_eq!(slot.current().unwrap().kind, MessageKind::Success);
    }

    #[test]
    fn test_load_failure_clears_the_list() {
        let controller = CatalogController::new(DownBooks);
        controller.books.set(vec![BookRecord {
            id: 7,
            title: "Fantasma".into(),
            author: "?".into(),
            is_deleted: false,
        }]);
        block_on(controller.run_load());
        assert!(controller.books.get_untracked().is_empty());
        assert!(!controller.loading.get_untracked());
        let slot = controller.message.get_untracked();
        let message = slot.current().unwrap();
        assert_eq!(message.kind, MessageKind::Error);
        assert_eq!(
            message.text,
            "Servidor indisponível. Verifique se o backend está rodando."
        );
    }

    #[test]
    fn test_blank_title_is_rejected_without_a_request() {
        let (controller, store) = seeded_controller();
        let before = store.snapshot();
        controller.open_form();
        controller.draft.set(make_draft("   ", "Alguém"));
        block_on(controller.run_save());
        assert_eq!(store.snapshot(), before);
        assert!(controller.show_form.get_untracked(), "form stays open");
        let slot = controller.message.get_untracked();
        assert_eq!(slot.current().unwrap().text, "O título do livro é obrigatório!");
    }

    #[test]
    fn test_create_reloads_and_defaults_the_author() {
        let (controller, store) = seeded_controller();
        controller.open_form();
        controller.draft.set(make_draft("  Iracema  ", "   "));
        block_on(controller.run_save());
        let books = controller.books.get_untracked();
        assert_eq!(books, store.snapshot());
        let created = books.iter().find(|b| b.title == "Iracema").unwrap();
        assert_eq!(created.author, DEFAULT_AUTHOR);
        assert!(!controller.show_form.get_untracked());
        assert_eq!(controller.draft.get_untracked(), DraftBook::default());
    }

    #[test]
    fn test_edit_then_save_updates_in_place() {
        let (controller, store) = seeded_controller();
        let target = controller.active_books()[0].clone();
        controller.edit_book(&target);
        assert_eq!(controller.draft.get_untracked().id, Some(target.id));
        controller
            .draft
            .update(|d| d.title = "Dom Casmurro (revisado)".into());
        block_on(controller.run_save());
        let books = store.snapshot();
        let updated = books.iter().find(|b| b.id == target.id).unwrap();
        assert_eq!(updated.title, "Dom Casmurro (revisado)");
        assert_eq!(controller.books.get_untracked(), books);
        assert!(!controller.show_form.get_untracked());
    }

    #[test]
    fn test_cancel_delete_changes_nothing() {
        let (controller, store) = seeded_controller();
        let before = store.snapshot();
        let message_before = controller.message.get_untracked();
        let target = controller.active_books()[0].clone();
        controller.request_delete(target);
        controller.cancel_delete();
        assert_eq!(store.snapshot(), before);
        assert_eq!(controller.books.get_untracked(), before);
        assert_eq!(controller.message.get_untracked(), message_before);
        assert!(controller.pending_delete.get_untracked().is_none());
        // Confirming with nothing armed is a no-op as well.
        assert_eq!(block_on(controller.run_confirm_delete()), None);
    }

    #[test]
    fn test_confirmed_delete_soft_deletes_and_filters_the_view() {
        let (controller, _store) = seeded_controller();
        let total_before = controller.total_books();
        let target = controller.active_books()[0].clone();
        controller.request_delete(target.clone());
        block_on(controller.run_confirm_delete()).unwrap();
        let books = controller.books.get_untracked();
        let kept = books.iter().find(|b| b.id == target.id).unwrap();
        assert!(kept.is_deleted, "record stays in the underlying list");
        assert_eq!(controller.total_books(), total_before - 1);
        assert!(controller.active_books().iter().all(|b| b.id != target.id));
    }

    #[test]
    fn test_double_submit_creates_twice() {
        // The loading flag is advisory; nothing serializes two rapid
        // submits, so both requests land.
        let (controller, store) = seeded_controller();
        let draft = make_draft("Senhora", "José de Alencar");
        block_on(controller.run_create(&draft));
        block_on(controller.run_create(&draft));
        let copies = store
            .snapshot()
            .iter()
            .filter(|b| b.title == "Senhora")
            .count();
        assert_eq!(copies, 2);
    }
}
