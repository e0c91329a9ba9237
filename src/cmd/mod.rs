//! CLI command implementations.
//!
//! | Module    | Commands handled |
//! |-----------|------------------|
//! | `start`   | `Start`          |
//! | `outline` | `Outline`        |
//! | `config`  | `Config`         |

pub mod config;
pub mod outline;
pub mod start;

pub use config::cmd_config;
pub use outline::cmd_outline;
pub use start::cmd_start;
