//! View Components
//!
//! Catalog and login screen building blocks.

mod book_form;
mod book_table;
mod delete_confirm_button;
mod login_form;
mod message_toast;

pub use book_form::BookForm;
pub use book_table::BookTable;
pub use delete_confirm_button::DeleteConfirmButton;
pub use login_form::LoginForm;
pub use message_toast::MessageToast;
