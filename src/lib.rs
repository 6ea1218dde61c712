//! waymark: keeps a "current section" indicator in step with what the reader is looking at, and
//! scrolls smoothly to any section by name.
//!
//! The pieces, leaves first:
//!
//! - [`resolver`] turns a logical id or URL fragment into a node, nav-id attribute first.
//! - [`registry`] maps each logical id to the node currently mounted for it.
//! - [`tracker`] derives the active id from intersection batches reported by an
//!   [`observe::ObservationService`].
//! - [`navigator`] resolves an id and asks a [`navigator::ScrollHost`] to scroll to it.
//! - [`scope`] ties one document, registry and tracker together for a page.
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod config;
pub mod document;
pub mod error;
pub mod formats;
pub mod input;
pub mod navigator;
pub mod observe;
pub mod registry;
pub mod resolver;
pub mod scope;
pub mod section;
pub mod snapshot;
pub mod tracker;
pub mod ui;
pub mod viewport;
pub mod watch;
