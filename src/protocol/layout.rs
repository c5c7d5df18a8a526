/// Total length of a current-dialect frame, address and opcode included.
pub const MSG_LEN: usize = 15;
/// Total length of a legacy-dialect frame, address and opcode included.
pub const LEGACY_MSG_LEN: usize = 10;

/// Number of escape bytes in the sync preamble.
pub const SYNC_LEN: usize = 15;
pub const RESYNC: u8 = 0x1B;

/// Every device on the bus accepts frames sent to this address.
pub const BROADCAST: u8 = 0xFF;

pub const MAX_PROGRAM_PARAMS: usize = 12;
pub const MAX_STARTUP_PARAMS: usize = 11;

pub const CMD_FADE_RGB: u8 = 0x02;
pub const CMD_FADE_HSV: u8 = 0x03;
pub const CMD_SAVE_RGB: u8 = 0x04;
pub const CMD_SAVE_HSV: u8 = 0x05;
pub const CMD_SAVE_CURRENT: u8 = 0x06;
pub const CMD_CONFIG_OFFSETS: u8 = 0x07;
pub const CMD_START_PROGRAM: u8 = 0x09;
pub const CMD_STOP: u8 = 0x0A;
pub const CMD_MODIFY_CURRENT: u8 = 0x0B;
pub const CMD_PULL_INT: u8 = 0x0C;
pub const CMD_CONFIG_STARTUP: u8 = 0x0D;

// legacy firmware reuses the fade opcodes with shorter frames
pub const CMD_LEGACY_FADE: u8 = 0x02;
pub const CMD_LEGACY_CONFIG: u8 = 0x03;
