//! Pure derived-state computations over a snapshot.

mod mention;
mod thread_context;
mod window;

pub use mention::MentionMatcher;
pub use thread_context::{ThreadContext, ThreadContextResolver};
pub use window::{VisibleWindowSelector, WindowQuery, WindowSelection};
