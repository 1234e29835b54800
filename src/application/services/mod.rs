pub mod memo;
pub mod menu;
pub mod rows;

pub use memo::MemoizedWindowSelector;
pub use menu::{MenuContext, MenuLocation, MenuService};
pub use rows::{ListRow, RowBuilder};
