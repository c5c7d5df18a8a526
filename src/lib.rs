//! Host-side driver for fnordlicht RGB lighting controllers.
//!
//! Commands are encoded into fixed-length frames and written to any
//! [`std::io::Write`] sink, usually the serial port returned by
//! [`serial::open_port`]. Nothing is ever read back from the bus.
//!
//! ```no_run
//! use fnordlicht::{Config, Remote};
//!
//! let port = fnordlicht::serial::open_port(&Config::default())?;
//! let mut remote = Remote::new(port);
//! remote.sync(0)?;
//! remote.fade_rgb(0, 255, 0, 0, 10, 1)?;
//! # Ok::<(), fnordlicht::Error>(())
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod protocol;
pub mod remote;
pub mod serial;

pub use color::{Delta, Hsv, Rgb};
pub use config::Config;
pub use error::{Error, Result};
pub use protocol::{Command, Dialect, StartupMode, BROADCAST};
pub use remote::{Remote, Sleep, ThreadSleep};
