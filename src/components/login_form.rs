//! Login Form Component
//!
//! Username/password form wired to a session controller constructed at
//! screen entry.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::DefaultUsers;
use crate::models::{CurrentUser, MessageKind, MessageSlot};
use crate::session::{Session, SessionController};

#[component]
pub fn LoginForm(on_login: Callback<CurrentUser>) -> impl IntoView {
    let session: Session = SessionController::new(DefaultUsers::default(), on_login);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        session.submit();
    };

    // Stub: shows a note instead of a reset flow.
    let notice = RwSignal::new(MessageSlot::default());
    let forgot_password = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        let mut epoch = 0;
        notice.update(|slot| {
            epoch = slot.show(
                MessageKind::Success,
                "A recuperação de senha ainda não está disponível",
            );
        });
        spawn_local(async move {
            TimeoutFuture::new(3_000).await;
            notice.update(|slot| slot.hide_if_current(epoch));
        });
    };

    view! {
        <div class="login-card" class:error=move || session.error.get()>
            <h1>"LionBook"</h1>
            <form class="login-form" on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Usuário ou e-mail"
                    prop:value=move || session.username.get()
                    on:input=move |ev| session.username.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Senha"
                    prop:value=move || session.password.get()
                    on:input=move |ev| session.password.set(event_target_value(&ev))
                />
                <button
                    type="submit"
                    class:success=move || session.success.get()
                    class:loading=move || session.loading.get()
                    disabled=move || session.loading.get()
                >
                    {move || session.button_text()}
                </button>
            </form>
            <p class="login-error">
                {move || {
                    session
                        .error_message
                        .with(|slot| slot.current().map(|m| m.text.clone()).unwrap_or_default())
                }}
            </p>
            <a href="#" class="forgot-password" on:click=forgot_password>
                "Esqueci minha senha"
            </a>
            {move || {
                notice
                    .get()
                    .current()
                    .map(|m| view! { <div class="notice">{m.text.clone()}</div> })
            }}
        </div>
    }
}
