//! CLI command implementations.

pub mod lookup;
pub mod serve;

pub use lookup::LookupCommand;
pub use serve::ServeCommand;
