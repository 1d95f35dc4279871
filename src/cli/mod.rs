//! # Command-Line Interface
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `tui` | Interactive board with mouse drag-and-drop |
//! | `replay` | Run a JSON drag script and print the final board |
//! | `config` | Print the effective configuration |
//!
//! ## Output Formats
//!
//! `replay` and `config` support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Logging
//!
//! `-v` enables debug logging, `-vv` trace. `RUST_LOG` overrides both:
//! ```bash
//! RUST_LOG=dragboard=debug dragboard replay script.json
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod replay;
mod tui;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
