//! # SiteCrafter
//!
//! Backend and terminal front end for the SiteCrafter brochure site.
//!
//! ## Contact Pipeline
//!
//! `POST /api/contact` checks that `name`, `email` and `message` are present
//! and hands a composed notification to a [`contact::NotificationSink`]. Missing
//! fields are reported to the caller as `400`. Delivery failures are not: under
//! the default [`contact::RelayPolicy`] they are logged, counted on `/health`,
//! and the caller still gets `200`.
//!
//! ## Session Gate
//!
//! The dashboard views are gated by [`session::SessionGate`], which keeps an
//! authenticated flag and email in a local key-value store. The demo login is a
//! literal comparison against one hard-coded credential pair. Nothing on the
//! server checks this flag; it decides what the views render, nothing more.
//!
//! ## Content
//!
//! Every view reads the same [`content::SiteData`] document, also served at
//! `GET /api/site`.

pub mod api;
pub mod cli;
pub mod contact;
pub mod content;
pub mod session;
pub mod views;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
