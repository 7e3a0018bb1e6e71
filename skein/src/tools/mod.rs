//! Tool trait, catalog, and per-call context for plan-invoked tools.

mod catalog;
mod context;
mod error;
/// `search`/`get_temp`/`send_mail`: real `Tool` impls used across both the
/// scenario tests (§8) and the CLI's demo catalog when no other tools are
/// registered — the spec earmarks this small set for "tests and demos".
pub mod mock;
mod spec;
#[allow(clippy::module_inception)]
mod r#trait;

pub use catalog::ToolCatalog;
pub use context::ToolCallContext;
pub use error::ToolError;
pub use r#trait::Tool;
pub use spec::ToolSpec;
