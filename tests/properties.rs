use std::cell::RefCell;
use std::io::{self, Cursor, Write};
use std::rc::Rc;
use std::time::Duration;

use fnordlicht::{Command, Error, Remote, Rgb, Sleep};
use proptest::prelude::*;

#[derive(Clone, Default)]
struct SharedSink(Rc<RefCell<Vec<u8>>>);

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Notes how many bytes were on the wire when each pause began.
struct FakeClock {
    wire: SharedSink,
    pauses: Vec<(usize, Duration)>,
}

impl Sleep for &mut FakeClock {
    fn sleep(&mut self, duration: Duration) {
        let sent = self.wire.0.borrow().len();
        self.pauses.push((sent, duration));
    }
}

fn wire<F>(send: F) -> Vec<u8>
where
    F: FnOnce(&mut Remote<Cursor<Vec<u8>>>) -> fnordlicht::Result<()>,
{
    let mut remote = Remote::new(Cursor::new(Vec::new()));
    send(&mut remote).unwrap();
    remote.into_inner().into_inner()
}

#[test]
fn fade_rgb_reference_frame() {
    let bytes = wire(|r| r.fade_rgb(5, 255, 0, 128, 10, 3));
    assert_eq!(
        bytes,
        [0x05, 0x02, 0x0A, 0x03, 0xFF, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
    );
}

#[test]
fn updown_hsv_pauses_between_frames() {
    let wire = SharedSink::default();
    let mut clock = FakeClock {
        wire: wire.clone(),
        pauses: Vec::new(),
    };
    let mut remote = Remote::with_sleep(wire.clone(), &mut clock);
    remote
        .fade_updown_hsv(1, 500, 100, 200, 2, 3, Duration::from_millis(750))
        .unwrap();
    drop(remote);

    // one pause after each frame, never both frames back to back
    let hold = Duration::from_millis(750);
    assert_eq!(clock.pauses, vec![(15, hold), (30, hold)]);

    let bytes = wire.0.borrow();
    assert_eq!(bytes.len(), 30);
    assert_eq!(bytes[7], 200);
    assert_eq!(bytes[15 + 7], 0);
    assert_eq!(bytes[..7], bytes[15..22]);
}

proptest! {
    #[test]
    fn fade_rgb_layout(addr: u8, r: u8, g: u8, b: u8, step: u8, delay: u8) {
        let bytes = wire(|remote| remote.fade_rgb(addr, r, g, b, step, delay));
        prop_assert_eq!(bytes.len(), 15);
        prop_assert_eq!(&bytes[..7], &[addr, 0x02, step, delay, r, g, b]);
        prop_assert!(bytes[7..].iter().all(|&x| x == 0));
    }

    #[test]
    fn fade_hsv_hue_little_endian(addr: u8, hue: u16, s: u8, v: u8) {
        let bytes = wire(|remote| remote.fade_hsv(addr, hue, s, v, 1, 1));
        prop_assert_eq!(bytes.len(), 15);
        prop_assert_eq!(bytes[4], (hue & 0xFF) as u8);
        prop_assert_eq!(bytes[5], (hue >> 8) as u8);
        prop_assert_eq!(bytes[6], s);
        prop_assert_eq!(bytes[7], v);
    }

    #[test]
    fn sync_is_sixteen_bytes(addr: u8) {
        let bytes = wire(|remote| remote.sync(addr));
        prop_assert_eq!(bytes.len(), 16);
        prop_assert!(bytes[..15].iter().all(|&x| x == 0x1B));
        prop_assert_eq!(bytes[15], addr);
    }

    #[test]
    fn start_program_pads_to_twelve(program in any::<u8>(), params in prop::collection::vec(any::<u8>(), 0..=12)) {
        let bytes = wire(|remote| remote.start_program(3, program, &params));
        prop_assert_eq!(bytes.len(), 15);
        prop_assert_eq!(bytes[2], program);
        prop_assert_eq!(&bytes[3..3 + params.len()], &params[..]);
        prop_assert!(bytes[3 + params.len()..].iter().all(|&x| x == 0));
    }

    #[test]
    fn start_program_overflow_writes_nothing(params in prop::collection::vec(any::<u8>(), 13..40)) {
        let mut remote = Remote::new(Cursor::new(Vec::new()));
        let err = remote.start_program(3, 0, &params).unwrap_err();
        let is_invalid = matches!(err, Error::InvalidArgument { .. });
        prop_assert!(is_invalid);
        prop_assert!(remote.into_inner().into_inner().is_empty());
    }

    #[test]
    fn stop_is_pure(addr: u8) {
        prop_assert_eq!(wire(|r| r.stop(addr)), wire(|r| r.stop(addr)));
    }

    #[test]
    fn frame_length_depends_only_on_variant(addr: u8, r: u8, g: u8, b: u8, lo: u8, hi: u8) {
        let current = Command::FadeRgb { step: lo, delay: hi, color: Rgb::new(r, g, b) };
        let legacy = Command::LegacyFade { speed_low: lo, speed_high: hi, color: Rgb::new(r, g, b) };
        prop_assert_eq!(current.encode(addr).unwrap().len(), 15);
        prop_assert_eq!(legacy.encode(addr).unwrap().len(), 10);
    }

    #[test]
    fn modify_current_keeps_signed_bits(dr: i8, dh: i16, dv: i8) {
        let bytes = wire(|remote| remote.modify_current(0, 1, 1, dr, 0, 0, dh, 0, dv));
        prop_assert_eq!(bytes[4], dr as u8);
        prop_assert_eq!(&bytes[7..9], &dh.to_le_bytes()[..]);
        prop_assert_eq!(bytes[10], dv as u8);
    }
}
