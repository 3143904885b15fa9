//! Backend Bindings
//!
//! Bindings for the book and user endpoints, organized by variant:
//! `http` talks to the live REST backend, `memory` runs against seeded
//! in-memory data for working without one.

pub mod http;
#[cfg(any(test, feature = "offline"))]
pub mod memory;

use serde::Deserialize;
use thiserror::Error;

use crate::models::{BookRecord, BookUpdate, CurrentUser, NewBook};

/// Backend base URL.
pub const API_BASE_URL: &str = "http://localhost:3000";

// ========================
// Errors
// ========================

/// Failure of a catalog call, split by where it failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The backend answered and reported a failure.
    #[error("{0}")]
    Backend(String),
    /// The request never completed, or the response was not the envelope.
    #[error("Servidor indisponível. Verifique se o backend está rodando.")]
    Unavailable,
}

/// Failure of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Usuário não encontrado")]
    UserNotFound,
    #[error("Usuário ou senha inválidos")]
    InvalidCredentials,
    #[error("{0}")]
    Server(String),
    #[error("Servidor indisponível. Verifique se o backend está rodando.")]
    Unavailable,
}

// ========================
// Response envelope
// ========================

/// Wrapper every backend endpoint responds with.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub status: String,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Collapse the status/message pair into a typed result. `fallback`
    /// is used when a failing response carries no message of its own.
    pub fn into_result(self, fallback: &str) -> Result<T, ApiError> {
        if self.status != "OK" {
            return Err(ApiError::Backend(
                self.message.unwrap_or_else(|| fallback.to_string()),
            ));
        }
        self.data
            .ok_or_else(|| ApiError::Backend(fallback.to_string()))
    }

    /// Like [`into_result`](Self::into_result) for calls whose payload
    /// is not used.
    pub fn ack(self, fallback: &str) -> Result<(), ApiError> {
        if self.status == "OK" {
            Ok(())
        } else {
            Err(ApiError::Backend(
                self.message.unwrap_or_else(|| fallback.to_string()),
            ))
        }
    }
}

// ========================
// Service traits
// ========================

/// CRUD surface of the book catalog.
#[allow(async_fn_in_trait)]
pub trait BookService {
    async fn list(&self) -> Result<Vec<BookRecord>, ApiError>;
    async fn create(&self, book: &NewBook) -> Result<(), ApiError>;
    async fn update(&self, id: u32, update: &BookUpdate) -> Result<(), ApiError>;
    async fn delete(&self, id: u32) -> Result<(), ApiError>;
}

/// Login lookup against the user directory.
#[allow(async_fn_in_trait)]
pub trait UserDirectory {
    async fn authenticate(&self, login: &str, password: &str) -> Result<CurrentUser, AuthError>;
}

#[cfg(not(feature = "offline"))]
pub type DefaultBooks = http::HttpBooks;
#[cfg(not(feature = "offline"))]
pub type DefaultUsers = http::HttpUsers;

#[cfg(feature = "offline")]
pub type DefaultBooks = memory::MemoryBooks;
#[cfg(feature = "offline")]
pub type DefaultUsers = memory::FixedUsers;

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Envelope<Vec<BookRecord>> {
        serde_json::from_str(json).expect("valid envelope")
    }

    #[test]
    fn test_ok_envelope_yields_its_data() {
        let envelope = parse(
            r#"{"status":"OK","data":[{"id":1,"title":"Iracema","author":"José de Alencar"}]}"#,
        );
        let books = envelope.into_result("Erro ao carregar livros").unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Iracema");
    }

    #[test]
    fn test_failing_envelope_surfaces_its_message() {
        let envelope = parse(r#"{"status":"ERROR","message":"sem conexão com o banco"}"#);
        assert_eq!(
            envelope.into_result("Erro ao carregar livros"),
            Err(ApiError::Backend("sem conexão com o banco".into()))
        );
    }

    #[test]
    fn test_failing_envelope_without_message_uses_the_fallback() {
        let envelope = parse(r#"{"status":"ERROR"}"#);
        assert_eq!(
            envelope.into_result("Erro ao carregar livros"),
            Err(ApiError::Backend("Erro ao carregar livros".into()))
        );
    }

    #[test]
    fn test_ok_envelope_without_data_is_a_backend_error() {
        let envelope = parse(r#"{"status":"OK"}"#);
        assert!(envelope.into_result("Erro ao carregar livros").is_err());
    }

    #[test]
    fn test_ack_ignores_the_payload() {
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(r#"{"status":"OK","data":{"id":9}}"#).expect("valid envelope");
        assert_eq!(envelope.ack("Erro ao criar livro"), Ok(()));
    }
}
