pub mod factory;
pub mod file_read;
pub mod http_get;
pub mod registry;
pub mod traits;

pub use factory::{default_registry, default_tools};
pub use file_read::FileReadTool;
pub use http_get::HttpGetTool;
pub use registry::ToolRegistry;
pub use traits::{BoundArgs, FnTool, Tool, ToolFuture, ToolSpec};
