use std::thread;
use std::time::Duration;

use serialport::SerialPort;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};

/// Open the bus serial port: 8N1, no flow control, DTR asserted.
pub fn open_port(config: &Config) -> Result<Box<dyn SerialPort>> {
    let open_err = |source| Error::Open {
        port: config.port.clone(),
        source,
    };

    let mut port = serialport::new(&config.port, config.baud_rate)
        .data_bits(serialport::DataBits::Eight)
        .parity(serialport::Parity::None)
        .stop_bits(serialport::StopBits::One)
        .flow_control(serialport::FlowControl::None)
        .timeout(Duration::from_millis(config.timeout_ms))
        .open()
        .map_err(open_err)?;

    if let Err(e) = port.write_data_terminal_ready(true) {
        warn!("failed to set DTR on {}: {}", config.port, e);
    }

    // let the first device's uart come up before the sync burst
    thread::sleep(Duration::from_millis(config.settle_ms));

    debug!(port = %config.port, baud = config.baud_rate, "serial port open");
    Ok(port)
}
