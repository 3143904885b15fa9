//! Session Controller
//!
//! Login form state, validation and the authentication flow. Navigation
//! after a successful login is injected as a callback so the controller
//! stays free of window handling.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{DefaultUsers, UserDirectory};
use crate::models::{CurrentUser, MessageKind, MessageSlot};

/// Error flag lifetime; drives the input shake animation.
pub const ERROR_FLAG_MS: u32 = 500;
/// Error text lifetime.
pub const ERROR_TEXT_MS: u32 = 3_000;
/// Pause between the success state and the catalog redirect.
pub const REDIRECT_DELAY_MS: u32 = 1_500;

/// What a submit attempt settled into. The epoch identifies the error
/// message for the hide timers.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Success(CurrentUser),
    Rejected(u64),
}

pub struct SessionController<D>
where
    D: UserDirectory + Clone + Send + Sync + 'static,
{
    directory: StoredValue<D>,
    pub username: RwSignal<String>,
    pub password: RwSignal<String>,
    /// Advisory flag; does not block re-entry.
    pub loading: RwSignal<bool>,
    pub success: RwSignal<bool>,
    /// Short-lived flag for the error animation, separate from the text.
    pub error: RwSignal<bool>,
    pub error_message: RwSignal<MessageSlot>,
    on_login: Callback<CurrentUser>,
}

impl<D> Clone for SessionController<D>
where
    D: UserDirectory + Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for SessionController<D> where D: UserDirectory + Clone + Send + Sync + 'static {}

/// Controller type the login screen binds against.
pub type Session = SessionController<DefaultUsers>;

impl<D> SessionController<D>
where
    D: UserDirectory + Clone + Send + Sync + 'static,
{
    pub fn new(directory: D, on_login: Callback<CurrentUser>) -> Self {
        Self {
            directory: StoredValue::new(directory),
            username: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            loading: RwSignal::new(false),
            success: RwSignal::new(false),
            error: RwSignal::new(false),
            error_message: RwSignal::new(MessageSlot::default()),
            on_login,
        }
    }

    /// Submit button label tracking the flow state.
    pub fn button_text(&self) -> &'static str {
        if self.loading.get() {
            ""
        } else if self.success.get() {
            "SUCCESS!"
        } else {
            "LOGIN"
        }
    }

    pub fn submit(self) {
        spawn_local(async move {
            match self.run_submit().await {
                LoginOutcome::Success(user) => {
                    TimeoutFuture::new(REDIRECT_DELAY_MS).await;
                    self.on_login.run(user);
                }
                LoginOutcome::Rejected(epoch) => {
                    // Flag and text clear on their own, independent timers.
                    spawn_local(async move {
                        TimeoutFuture::new(ERROR_FLAG_MS).await;
                        if self.error_message.with_untracked(|m| m.epoch()) == epoch {
                            self.error.set(false);
                        }
                    });
                    TimeoutFuture::new(ERROR_TEXT_MS).await;
                    self.error_message.update(|m| m.hide_if_current(epoch));
                }
            }
        });
    }

    /// Blank-field validation comes first; no request is made for a
    /// submission that cannot succeed.
    pub(crate) async fn run_submit(self) -> LoginOutcome {
        let username = self.username.get_untracked();
        let password = self.password.get_untracked();
        if username.trim().is_empty() || password.trim().is_empty() {
            return LoginOutcome::Rejected(
                self.show_error("Por favor, preencha todos os campos"),
            );
        }
        self.loading.set(true);
        self.clear_error();
        let outcome = self
            .directory
            .get_value()
            .authenticate(&username, &password)
            .await;
        self.loading.set(false);
        match outcome {
            Ok(user) => {
                self.success.set(true);
                LoginOutcome::Success(user)
            }
            Err(err) => LoginOutcome::Rejected(self.show_error(err.to_string())),
        }
    }

    fn show_error(&self, text: impl Into<String>) -> u64 {
        self.error.set(true);
        let text = text.into();
        let mut epoch = 0;
        self.error_message
            .update(|slot| epoch = slot.show(MessageKind::Error, text));
        epoch
    }

    pub fn clear_error(&self) {
        self.error.set(false);
        self.error_message.update(MessageSlot::clear);
    }
}
