use super::layout::{RESYNC, SYNC_LEN};

/// Build the sync preamble: fifteen escape bytes followed by the address.
///
/// Any device in the middle of a frame drops it and waits for an address.
/// The first device takes `address` and forwards `address + 1`, so a chain
/// is numbered consecutively from `address`.
pub fn build_sync_preamble(address: u8) -> Vec<u8> {
    let mut preamble = Vec::with_capacity(SYNC_LEN + 1);
    preamble.resize(SYNC_LEN, RESYNC);
    preamble.push(address);
    preamble
}
