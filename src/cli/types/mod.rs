//! Type-safe wrappers used by the CLI and the library API.

pub mod ids;

pub use ids::Username;
