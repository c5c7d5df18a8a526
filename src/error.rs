/// Errors raised while encoding or transmitting fnordlicht commands.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The byte sink rejected a write or flush. The frame may be partially on
    /// the wire; send a sync before the next command.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// A parameter list does not fit the fixed frame layout.
    #[error("invalid argument: {what} has {len} entries, max {max}")]
    InvalidArgument {
        what: &'static str,
        len: usize,
        max: usize,
    },

    /// The serial device could not be opened or configured.
    #[error("failed to open serial port {port}: {source}")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },

    /// Configuration file could not be read or parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
