//! In-Memory Variant
//!
//! Seeded stand-ins for the REST backend so the app (and the controller
//! tests) can run without one. Deleting marks the record instead of
//! removing it; the controllers filter marked records out of the views.

use std::sync::{Arc, Mutex, PoisonError};

use super::{ApiError, AuthError, BookService, UserDirectory};
use crate::models::{BookRecord, BookUpdate, CurrentUser, NewBook};

#[derive(Debug)]
struct Shelf {
    books: Vec<BookRecord>,
    next_id: u32,
}

/// Book store backed by a shared in-memory list.
#[derive(Debug, Clone)]
pub struct MemoryBooks {
    shelf: Arc<Mutex<Shelf>>,
}

impl MemoryBooks {
    pub fn new() -> Self {
        Self {
            shelf: Arc::new(Mutex::new(Shelf {
                books: Vec::new(),
                next_id: 1,
            })),
        }
    }

    /// Store pre-loaded with a few classics so the first screen has rows.
    pub fn seeded() -> Self {
        let store = Self::new();
        store.push("Dom Casmurro", "Machado de Assis");
        store.push("O Cortiço", "Aluísio Azevedo");
        store.push("Grande Sertão: Veredas", "João Guimarães Rosa");
        store
    }

    fn with_shelf<R>(&self, f: impl FnOnce(&mut Shelf) -> R) -> R {
        let mut shelf = self.shelf.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut shelf)
    }

    fn push(&self, title: &str, author: &str) {
        self.with_shelf(|shelf| {
            let id = shelf.next_id;
            shelf.next_id += 1;
            shelf.books.push(BookRecord {
                id,
                title: title.to_string(),
                author: author.to_string(),
                is_deleted: false,
            });
        });
    }

    /// Snapshot of the underlying list, marked records included.
    pub fn snapshot(&self) -> Vec<BookRecord> {
        self.with_shelf(|shelf| shelf.books.clone())
    }
}

impl Default for MemoryBooks {
    fn default() -> Self {
        Self::seeded()
    }
}

impl BookService for MemoryBooks {
    async fn list(&self) -> Result<Vec<BookRecord>, ApiError> {
        Ok(self.snapshot())
    }

    async fn create(&self, book: &NewBook) -> Result<(), ApiError> {
        // isbn and quantidade are wire-only fields, nothing stores them here.
        self.push(&book.title, &book.author);
        Ok(())
    }

    async fn update(&self, id: u32, update: &BookUpdate) -> Result<(), ApiError> {
        self.with_shelf(|shelf| match shelf.books.iter_mut().find(|b| b.id == id) {
            Some(book) => {
                book.title = update.title.clone();
                book.author = update.author.clone();
                Ok(())
            }
            None => Err(ApiError::Backend("Livro não encontrado".into())),
        })
    }

    async fn delete(&self, id: u32) -> Result<(), ApiError> {
        self.with_shelf(|shelf| match shelf.books.iter_mut().find(|b| b.id == id) {
            Some(book) => {
                book.is_deleted = true;
                Ok(())
            }
            None => Err(ApiError::Backend("Livro não encontrado".into())),
        })
    }
}

/// Single hardcoded credential pair for running without a user backend.
#[derive(Debug, Clone)]
pub struct FixedUsers {
    username: String,
    password: String,
}

impl FixedUsers {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for FixedUsers {
    fn default() -> Self {
        Self::new("admin", "admin")
    }
}

impl UserDirectory for FixedUsers {
    async fn authenticate(&self, login: &str, password: &str) -> Result<CurrentUser, AuthError> {
        if !login.eq_ignore_ascii_case(&self.username) {
            return Err(AuthError::UserNotFound);
        }
        if password != self.password {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(CurrentUser {
            id: 1,
            nome: Some(self.username.clone()),
            email: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    fn make_book(title: &str, author: &str) -> NewBook {
        NewBook {
            title: title.into(),
            author: author.into(),
            isbn: String::new(),
            quantidade: 1,
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let store = MemoryBooks::new();
        block_on(store.create(&make_book("Iracema", "José de Alencar"))).unwrap();
        block_on(store.create(&make_book("Senhora", "José de Alencar"))).unwrap();
        let books = store.snapshot();
        assert_eq!(books[0].id, 1);
        assert_eq!(books[1].id, 2);
    }

    #[test]
    fn test_delete_marks_but_keeps_the_record() {
        let store = MemoryBooks::new();
        block_on(store.create(&make_book("Iracema", "José de Alencar"))).unwrap();
        block_on(store.delete(1)).unwrap();
        let books = store.snapshot();
        assert_eq!(books.len(), 1);
        assert!(books[0].is_deleted);
    }

    #[test]
    fn test_update_rewrites_title_and_author() {
        let store = MemoryBooks::seeded();
        let update = BookUpdate {
            title: "Dom Casmurro (2a ed.)".into(),
            author: "Machado de Assis".into(),
        };
        block_on(store.update(1, &update)).unwrap();
        assert_eq!(store.snapshot()[0].title, "Dom Casmurro (2a ed.)");
    }

    #[test]
    fn test_update_unknown_id_fails() {
        let store = MemoryBooks::new();
        let update = BookUpdate {
            title: "x".into(),
            author: "y".into(),
        };
        assert_eq!(
            block_on(store.update(42, &update)),
            Err(ApiError::Backend("Livro não encontrado".into()))
        );
    }

    #[test]
    fn test_fixed_pair_checks_password_but_not_case() {
        let users = FixedUsers::default();
        assert!(block_on(users.authenticate("ADMIN", "admin")).is_ok());
        assert_eq!(
            block_on(users.authenticate("admin", "wrong")),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            block_on(users.authenticate("alice", "admin")),
            Err(AuthError::UserNotFound)
        );
    }
}
