//! Client-side views: login, dashboard, and the contact form.
//!
//! Views hold their own form state and talk to the [`SessionGate`] and the
//! contact endpoint. They produce a [`View`] instead of markup; the terminal
//! front end prints it.
//!
//! [`SessionGate`]: crate::session::SessionGate

pub mod contact;
pub mod dashboard;
pub mod login;

/// What a view asks the front end to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// The session check has not finished; show nothing protected yet.
    Placeholder,
    Redirect { to: &'static str },
    Page(String),
}
