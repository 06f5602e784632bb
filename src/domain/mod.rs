//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod csv;
pub mod entities;
pub mod error;
pub mod flatten;
pub mod validate;

pub use csv::{escape_cell, render_csv, unescape_cell, BOM};
pub use entities::*;
pub use error::DomainError;
pub use flatten::{count_rows, flatten, flatten_table, truncated_nodes};
pub use validate::{node_from_value, ValidationMode};

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
///
/// Unresolvable input is returned unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
