//! Frontend Models
//!
//! Data structures matching the backend API, plus form and message state.

use serde::{Deserialize, Serialize};

/// Author stored when the form leaves the field blank.
pub const DEFAULT_AUTHOR: &str = "Autor não informado";

/// Book record as the backend returns it.
///
/// `is_deleted` never comes over the wire; the in-memory variant marks it
/// when a book is removed so the record can stay in the underlying list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: u32,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing)]
    pub is_deleted: bool,
}

/// `POST /livros` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub quantidade: u32,
}

/// `PUT /livros/{id}` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookUpdate {
    pub title: String,
    pub author: String,
}

/// Transient form buffer for the create/edit form.
///
/// `id` is the active edit target; `None` means the form creates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftBook {
    pub id: Option<u32>,
    pub title: String,
    pub author: String,
}

impl DraftBook {
    pub fn from_record(book: &BookRecord) -> Self {
        Self {
            id: Some(book.id),
            title: book.title.clone(),
            author: book.author.clone(),
        }
    }

    /// A draft can only be submitted with a non-blank title.
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    fn trimmed_author(&self) -> String {
        let author = self.author.trim();
        if author.is_empty() {
            DEFAULT_AUTHOR.to_string()
        } else {
            author.to_string()
        }
    }

    /// Creation payload: trimmed title, defaulted author, no ISBN yet,
    /// stock of one.
    pub fn to_new_book(&self) -> NewBook {
        NewBook {
            title: self.title.trim().to_string(),
            author: self.trimmed_author(),
            isbn: String::new(),
            quantidade: 1,
        }
    }

    pub fn to_update(&self) -> BookUpdate {
        BookUpdate {
            title: self.title.trim().to_string(),
            author: self.trimmed_author(),
        }
    }
}

/// User entry from `GET /usuarios`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiUser {
    pub id: u32,
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl ApiUser {
    /// A login matches the user's name or email, ignoring case.
    pub fn matches(&self, login: &str) -> bool {
        let login = login.to_lowercase();
        self.nome.as_deref().is_some_and(|n| n.to_lowercase() == login)
            || self.email.as_deref().is_some_and(|e| e.to_lowercase() == login)
    }

    pub fn to_current(&self) -> CurrentUser {
        CurrentUser {
            id: self.id,
            nome: self.nome.clone(),
            email: self.email.clone(),
        }
    }
}

/// Authenticated user, cached for later screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: u32,
    pub nome: Option<String>,
    pub email: Option<String>,
}

impl CurrentUser {
    pub fn display_name(&self) -> &str {
        self.nome
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("?")
    }
}

// ========================
// Status messages
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub kind: MessageKind,
    pub text: String,
}

/// One transient message with an epoch guard for its auto-hide task.
///
/// Every `show` bumps the epoch, so a hide task scheduled for an older
/// message misses instead of hiding the message that replaced it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageSlot {
    current: Option<StatusMessage>,
    epoch: u64,
}

impl MessageSlot {
    /// Replace the visible message. Returns the epoch the caller's hide
    /// task must present to clear it again.
    pub fn show(&mut self, kind: MessageKind, text: impl Into<String>) -> u64 {
        self.epoch += 1;
        self.current = Some(StatusMessage {
            kind,
            text: text.into(),
        });
        self.epoch
    }

    /// Hide only when no newer message replaced the one behind `epoch`.
    pub fn hide_if_current(&mut self, epoch: u64) {
        if self.epoch == epoch {
            self.current = None;
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.current.as_ref()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}
