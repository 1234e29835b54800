//! Application layer with view-model services and use cases.

/// View-model services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use services::{ListRow, MemoizedWindowSelector, MenuContext, MenuLocation, MenuService, RowBuilder};
pub use use_cases::ChannelViewUseCase;
