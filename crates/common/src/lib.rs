//! Types shared by every crate of the workspace.

pub mod types;

pub use types::EntityId;
