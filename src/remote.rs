use std::io::Write;
use std::thread;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::color::{Delta, Hsv, Rgb};
use crate::error::{Error, Result};
use crate::protocol::{build_sync_preamble, Command, StartupMode};

/// Blocking pause between the phases of a composite fade.
pub trait Sleep {
    fn sleep(&mut self, duration: Duration);
}

/// Sleeps the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleep;

impl Sleep for ThreadSleep {
    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Encodes fnordlicht commands and writes them to a byte sink.
///
/// Each call encodes the whole frame before touching the sink, writes it in
/// one piece and flushes. A failed write may leave part of a frame on the
/// bus; call [`Remote::sync`] before sending anything else.
pub struct Remote<W, S = ThreadSleep> {
    sink: W,
    sleep: S,
}

impl<W: Write> Remote<W> {
    pub fn new(sink: W) -> Self {
        Self::with_sleep(sink, ThreadSleep)
    }
}

impl<W: Write, S: Sleep> Remote<W, S> {
    pub fn with_sleep(sink: W, sleep: S) -> Self {
        Remote { sink, sleep }
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Send the sync preamble, numbering the chain from `address`.
    pub fn sync(&mut self, address: u8) -> Result<()> {
        debug!(address, "sending sync sequence");
        let preamble = build_sync_preamble(address);
        self.transmit(&preamble)
    }

    /// Encode `command` for `address` and send it.
    pub fn send(&mut self, address: u8, command: &Command) -> Result<()> {
        let frame = command.encode(address)?;
        debug!(address, command = command.name(), len = frame.len(), "sending frame");
        self.transmit(&frame)
    }

    pub fn stop(&mut self, address: u8) -> Result<()> {
        self.send(address, &Command::Stop)
    }

    pub fn fade_rgb(&mut self, address: u8, r: u8, g: u8, b: u8, step: u8, delay: u8) -> Result<()> {
        self.send(
            address,
            &Command::FadeRgb {
                step,
                delay,
                color: Rgb::new(r, g, b),
            },
        )
    }

    pub fn fade_hsv(&mut self, address: u8, h: u16, s: u8, v: u8, step: u8, delay: u8) -> Result<()> {
        self.send(
            address,
            &Command::FadeHsv {
                step,
                delay,
                color: Hsv::new(h, s, v),
            },
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn modify_current(
        &mut self,
        address: u8,
        step: u8,
        delay: u8,
        dr: i8,
        dg: i8,
        db: i8,
        dh: i16,
        ds: i8,
        dv: i8,
    ) -> Result<()> {
        let delta = Delta {
            red: dr,
            green: dg,
            blue: db,
            hue: dh,
            saturation: ds,
            value: dv,
        };
        self.send(address, &Command::ModifyCurrent { step, delay, delta })
    }

    pub fn config_offsets(&mut self, address: u8, step: i8, delay: i8, h: i16, s: u8, v: u8) -> Result<()> {
        self.send(
            address,
            &Command::ConfigOffsets {
                step,
                delay,
                hue: h,
                saturation: s,
                value: v,
            },
        )
    }

    /// Legacy dialect only. The flag byte is sent unchanged.
    pub fn config(&mut self, address: u8, scripting: u8) -> Result<()> {
        self.send(address, &Command::LegacyConfig { scripting })
    }

    /// Legacy dialect only.
    pub fn fade(&mut self, address: u8, speed_low: u8, speed_high: u8, r: u8, g: u8, b: u8) -> Result<()> {
        self.send(
            address,
            &Command::LegacyFade {
                speed_low,
                speed_high,
                color: Rgb::new(r, g, b),
            },
        )
    }

    /// Fails with [`Error::InvalidArgument`] before writing if `params` has
    /// more than 12 entries.
    pub fn start_program(&mut self, address: u8, program: u8, params: &[u8]) -> Result<()> {
        self.send(
            address,
            &Command::StartProgram {
                program,
                params: params.to_vec(),
            },
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn save_rgb(
        &mut self,
        address: u8,
        slot: u8,
        step: u8,
        delay: u8,
        pause: u16,
        r: u8,
        g: u8,
        b: u8,
    ) -> Result<()> {
        self.send(
            address,
            &Command::SaveRgb {
                slot,
                step,
                delay,
                pause,
                color: Rgb::new(r, g, b),
            },
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn save_hsv(
        &mut self,
        address: u8,
        slot: u8,
        step: u8,
        delay: u8,
        pause: u16,
        h: u16,
        s: u8,
        v: u8,
    ) -> Result<()> {
        self.send(
            address,
            &Command::SaveHsv {
                slot,
                step,
                delay,
                pause,
                color: Hsv::new(h, s, v),
            },
        )
    }

    pub fn save_current(&mut self, address: u8, slot: u8, step: u8, delay: u8, pause: u16) -> Result<()> {
        self.send(
            address,
            &Command::SaveCurrent {
                slot,
                step,
                delay,
                pause,
            },
        )
    }

    pub fn pull_int(&mut self, address: u8, delay: u8) -> Result<()> {
        self.send(address, &Command::PullInt { delay })
    }

    pub fn config_startup(&mut self, address: u8, mode: StartupMode, params: &[u8]) -> Result<()> {
        self.send(
            address,
            &Command::ConfigStartup {
                mode,
                params: params.to_vec(),
            },
        )
    }

    /// Stop the running effect and switch the LEDs off immediately.
    pub fn powerdown(&mut self, address: u8) -> Result<()> {
        self.stop(address)?;
        self.fade_rgb(address, 0, 0, 0, 255, 0)
    }

    /// Fade up to a color, hold, fade down to black, hold.
    #[allow(clippy::too_many_arguments)]
    pub fn fade_updown_rgb(
        &mut self,
        address: u8,
        r: u8,
        g: u8,
        b: u8,
        step: u8,
        delay: u8,
        hold: Duration,
    ) -> Result<()> {
        self.fade_rgb(address, r, g, b, step, delay)?;
        self.sleep.sleep(hold);
        self.fade_rgb(address, 0, 0, 0, step, delay)?;
        self.sleep.sleep(hold);
        Ok(())
    }

    /// Fade up to a color, hold, fade its brightness to zero, hold.
    #[allow(clippy::too_many_arguments)]
    pub fn fade_updown_hsv(
        &mut self,
        address: u8,
        h: u16,
        s: u8,
        v: u8,
        step: u8,
        delay: u8,
        hold: Duration,
    ) -> Result<()> {
        self.fade_hsv(address, h, s, v, step, delay)?;
        self.sleep.sleep(hold);
        self.fade_hsv(address, h, s, 0, step, delay)?;
        self.sleep.sleep(hold);
        Ok(())
    }

    fn transmit(&mut self, bytes: &[u8]) -> Result<()> {
        if tracing::enabled!(tracing::Level::TRACE) {
            let hex: String = bytes
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect::<Vec<_>>()
                .join(" ");
            trace!("wire: {}", hex);
        }

        let result = self.sink.write_all(bytes).and_then(|_| self.sink.flush());
        if let Err(e) = result {
            warn!("write failed, bus may be out of sync until the next sync: {}", e);
            return Err(Error::Transport(e));
        }
        Ok(())
    }
}
