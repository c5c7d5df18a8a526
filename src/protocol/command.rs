use crate::color::{Delta, Hsv, Rgb};
use crate::error::{Error, Result};

use super::layout::*;

/// Frame layout family understood by a firmware build.
///
/// The legacy dialect reuses opcodes 0x02 and 0x03 with 10-byte frames. A bus
/// must stick to one dialect: a device expecting 15-byte frames will read the
/// next command's bytes as padding of a legacy frame and lose alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Current,
    Legacy,
}

impl Dialect {
    pub fn frame_len(self) -> usize {
        match self {
            Dialect::Current => MSG_LEN,
            Dialect::Legacy => LEGACY_MSG_LEN,
        }
    }
}

/// What a device does after power-on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum StartupMode {
    #[default]
    Nothing = 0,
    Program = 1,
}

/// One command for one device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Halt the running effect.
    Stop,
    /// Fade to an absolute RGB color.
    FadeRgb { step: u8, delay: u8, color: Rgb },
    /// Fade to an absolute HSV color.
    FadeHsv { step: u8, delay: u8, color: Hsv },
    /// Shift the live color by signed deltas.
    ModifyCurrent { step: u8, delay: u8, delta: Delta },
    /// Set the global offsets the firmware adds to every fade.
    ConfigOffsets {
        step: i8,
        delay: i8,
        hue: i16,
        saturation: u8,
        value: u8,
    },
    /// Run a built-in program with up to 12 parameter bytes.
    StartProgram { program: u8, params: Vec<u8> },
    /// Store an RGB fade in an EEPROM slot.
    SaveRgb {
        slot: u8,
        step: u8,
        delay: u8,
        pause: u16,
        color: Rgb,
    },
    /// Store an HSV fade in an EEPROM slot.
    SaveHsv {
        slot: u8,
        step: u8,
        delay: u8,
        pause: u16,
        color: Hsv,
    },
    /// Store the live color in an EEPROM slot.
    SaveCurrent {
        slot: u8,
        step: u8,
        delay: u8,
        pause: u16,
    },
    /// Pull the shared interrupt line low for `delay` ticks.
    PullInt { delay: u8 },
    /// Configure power-on behaviour with up to 11 parameter bytes.
    ConfigStartup { mode: StartupMode, params: Vec<u8> },
    /// Legacy: scripting engine flag, sent as the raw byte given.
    LegacyConfig { scripting: u8 },
    /// Legacy: fade to RGB with a 16-bit speed split into two bytes.
    LegacyFade {
        speed_low: u8,
        speed_high: u8,
        color: Rgb,
    },
}

impl Command {
    pub fn opcode(&self) -> u8 {
        match self {
            Command::Stop => CMD_STOP,
            Command::FadeRgb { .. } => CMD_FADE_RGB,
            Command::FadeHsv { .. } => CMD_FADE_HSV,
            Command::ModifyCurrent { .. } => CMD_MODIFY_CURRENT,
            Command::ConfigOffsets { .. } => CMD_CONFIG_OFFSETS,
            Command::StartProgram { .. } => CMD_START_PROGRAM,
            Command::SaveRgb { .. } => CMD_SAVE_RGB,
            Command::SaveHsv { .. } => CMD_SAVE_HSV,
            Command::SaveCurrent { .. } => CMD_SAVE_CURRENT,
            Command::PullInt { .. } => CMD_PULL_INT,
            Command::ConfigStartup { .. } => CMD_CONFIG_STARTUP,
            Command::LegacyConfig { .. } => CMD_LEGACY_CONFIG,
            Command::LegacyFade { .. } => CMD_LEGACY_FADE,
        }
    }

    pub fn dialect(&self) -> Dialect {
        match self {
            Command::LegacyConfig { .. } | Command::LegacyFade { .. } => Dialect::Legacy,
            _ => Dialect::Current,
        }
    }

    /// Short name used in log output
    pub fn name(&self) -> &'static str {
        match self {
            Command::Stop => "stop",
            Command::FadeRgb { .. } => "fade_rgb",
            Command::FadeHsv { .. } => "fade_hsv",
            Command::ModifyCurrent { .. } => "modify_current",
            Command::ConfigOffsets { .. } => "config_offsets",
            Command::StartProgram { .. } => "start_program",
            Command::SaveRgb { .. } => "save_rgb",
            Command::SaveHsv { .. } => "save_hsv",
            Command::SaveCurrent { .. } => "save_current",
            Command::PullInt { .. } => "pull_int",
            Command::ConfigStartup { .. } => "config_startup",
            Command::LegacyConfig { .. } => "config",
            Command::LegacyFade { .. } => "fade",
        }
    }

    /// Check parameter counts against the fixed frame capacity.
    pub fn validate(&self) -> Result<()> {
        match self {
            Command::StartProgram { params, .. } if params.len() > MAX_PROGRAM_PARAMS => {
                Err(Error::InvalidArgument {
                    what: "start_program params",
                    len: params.len(),
                    max: MAX_PROGRAM_PARAMS,
                })
            }
            Command::ConfigStartup { params, .. } if params.len() > MAX_STARTUP_PARAMS => {
                Err(Error::InvalidArgument {
                    what: "config_startup params",
                    len: params.len(),
                    max: MAX_STARTUP_PARAMS,
                })
            }
            _ => Ok(()),
        }
    }

    /// Build the complete frame for `address`.
    ///
    /// The result is always `self.dialect().frame_len()` bytes long; unused
    /// bytes are zero.
    pub fn encode(&self, address: u8) -> Result<Vec<u8>> {
        self.validate()?;

        let len = self.dialect().frame_len();
        let mut frame = Vec::with_capacity(len);
        frame.push(address);
        frame.push(self.opcode());

        match self {
            Command::Stop => {}
            Command::FadeRgb { step, delay, color } => {
                frame.extend_from_slice(&[*step, *delay]);
                frame.extend_from_slice(&color.to_bytes());
            }
            Command::FadeHsv { step, delay, color } => {
                frame.extend_from_slice(&[*step, *delay]);
                frame.extend_from_slice(&color.to_bytes());
            }
            Command::ModifyCurrent { step, delay, delta } => {
                frame.extend_from_slice(&[*step, *delay]);
                frame.extend_from_slice(&delta.to_bytes());
            }
            Command::ConfigOffsets {
                step,
                delay,
                hue,
                saturation,
                value,
            } => {
                frame.extend_from_slice(&[*step as u8, *delay as u8]);
                frame.extend_from_slice(&hue.to_le_bytes());
                frame.extend_from_slice(&[*saturation, *value]);
            }
            Command::StartProgram { program, params } => {
                frame.push(*program);
                frame.extend_from_slice(params);
            }
            Command::SaveRgb {
                slot,
                step,
                delay,
                pause,
                color,
            } => {
                frame.extend_from_slice(&[*slot, *step, *delay]);
                frame.extend_from_slice(&pause.to_le_bytes());
                frame.extend_from_slice(&color.to_bytes());
            }
            Command::SaveHsv {
                slot,
                step,
                delay,
                pause,
                color,
            } => {
                frame.extend_from_slice(&[*slot, *step, *delay]);
                frame.extend_from_slice(&pause.to_le_bytes());
                frame.extend_from_slice(&color.to_bytes());
            }
            Command::SaveCurrent {
                slot,
                step,
                delay,
                pause,
            } => {
                frame.extend_from_slice(&[*slot, *step, *delay]);
                frame.extend_from_slice(&pause.to_le_bytes());
            }
            Command::PullInt { delay } => frame.push(*delay),
            Command::ConfigStartup { mode, params } => {
                frame.push(*mode as u8);
                frame.extend_from_slice(params);
            }
            Command::LegacyConfig { scripting } => frame.push(*scripting),
            Command::LegacyFade {
                speed_low,
                speed_high,
                color,
            } => {
                frame.extend_from_slice(&[*speed_low, *speed_high]);
                frame.extend_from_slice(&color.to_bytes());
            }
        }

        debug_assert!(frame.len() <= len, "{} payload overflows frame", self.name());
        frame.resize(len, 0);
        Ok(frame)
    }
}
