//! CLI command handlers, one file per command.

mod components;
mod config;
mod decode;
mod encode;
mod get;
mod list;
mod put;
mod remove;

pub use components::run_components;
pub use config::run_config;
pub use decode::run_decode;
pub use encode::run_encode;
pub use get::run_get;
pub use list::run_list;
pub use put::run_put;
pub use remove::run_remove;
