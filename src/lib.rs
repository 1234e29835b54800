//! Chanview - derived view-state core for chat clients.
//!
//! This crate computes the view state a chat client derives from its store:
//! thread context for a message, the visible window of a channel's message
//! list, context-menu state, and renderable list rows. Every computation is
//! a pure function over an immutable [`domain::snapshot::StateSnapshot`]
//! owned by the host application.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing view-model services and use cases.
pub mod application;
/// Domain layer containing entities, the state snapshot, and resolvers.
pub mod domain;
/// Infrastructure layer containing configuration parsing.
pub mod infrastructure;

/// Current version of the library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = "chanview";
