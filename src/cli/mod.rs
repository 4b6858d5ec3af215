//! Command-line interface.

pub mod commands;
pub mod output;
pub mod table;
pub mod types;

pub use types::{BannerCommands, CacheCommands, Cli, Commands, RoleArg};

use crate::domain::errors::{BannerError, ErrorKind};

/// Process exit code for a failed command.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<BannerError>().map(BannerError::kind) {
        Some(ErrorKind::NotFound) => 2,
        Some(ErrorKind::Conflict) => 3,
        Some(ErrorKind::Internal) | None => 1,
    }
}

/// Report `err` on stderr and exit with its code.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let kind = err
            .downcast_ref::<BannerError>()
            .map(|e| e.kind().to_string());
        let body = serde_json::json!({
            "success": false,
            "error": format!("{err:#}"),
            "kind": kind,
        });
        eprintln!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(exit_code(&err));
}
