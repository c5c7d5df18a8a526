//! Wire format of the fnordlicht serial bus.
//!
//! The bus has no delimiters: devices count bytes. Every frame is a fixed
//! number of bytes per dialect and the only way back to a known state is the
//! sync preamble.

mod command;
pub mod layout;
mod sync;

pub use command::{Command, Dialect, StartupMode};
pub use layout::BROADCAST;
pub use sync::build_sync_preamble;
