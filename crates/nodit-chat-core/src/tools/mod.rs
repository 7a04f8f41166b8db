//! Tool management module
//!
//! The registry owns the connection to the MCP server and the cached tool
//! list. Its connection state gates whether tool schemas are offered to the
//! model.
//!
//! ```text
//! Disconnected ──connect()──▶ Connecting ──▶ Discovering ──▶ Ready
//!                                  │              │            │
//!                                  └──────────────┴──▶ Failed ◀┘ (refresh)
//!
//! Failed / Ready ──retry() / connect()──▶ Connecting
//! any state ──disconnect()──▶ Disconnected
//! ```

mod state;
mod catalog;
mod registry;
mod mock;

pub use state::{ConnectionState, InvalidTransition};
pub use catalog::{category_for, capabilities_of, ToolCategory, ToolFilter, ToolInfo};
pub use registry::{RegistryError, RegistryResult, ToolRegistry};
pub use mock::{MockToolBackend, StaticConnector};
