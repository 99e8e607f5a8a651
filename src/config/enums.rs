//! Configuration enum types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What happens when the drawing surface reports itself closed.
///
/// # Examples
/// ```toml
/// [lifecycle]
/// on_close = "error"
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ClosePolicy {
    /// Release the backend and terminate the process with status 0
    #[default]
    Exit,
    /// Release the backend and return an error from the drawing call
    Error,
}
