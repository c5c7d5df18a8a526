/// Absolute RGB target, one byte per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Rgb { red, green, blue }
    }

    pub(crate) fn to_bytes(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

/// Absolute HSV target.
///
/// Hue is 16 bits wide on the wire; the firmware decides how the range maps
/// onto the color wheel, so the host does not clamp it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hsv {
    pub hue: u16,
    pub saturation: u8,
    pub value: u8,
}

impl Hsv {
    pub const fn new(hue: u16, saturation: u8, value: u8) -> Self {
        Hsv {
            hue,
            saturation,
            value,
        }
    }

    /// Same hue and saturation, different brightness
    pub const fn with_value(self, value: u8) -> Self {
        Hsv { value, ..self }
    }

    pub(crate) fn to_bytes(self) -> [u8; 4] {
        let [lo, hi] = self.hue.to_le_bytes();
        [lo, hi, self.saturation, self.value]
    }
}

/// Signed adjustment applied to a device's live color.
/// Zero leaves a channel untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Delta {
    pub red: i8,
    pub green: i8,
    pub blue: i8,
    pub hue: i16,
    pub saturation: i8,
    pub value: i8,
}

impl Delta {
    pub(crate) fn to_bytes(self) -> [u8; 7] {
        let [hue_lo, hue_hi] = self.hue.to_le_bytes();
        [
            self.red as u8,
            self.green as u8,
            self.blue as u8,
            hue_lo,
            hue_hi,
            self.saturation as u8,
            self.value as u8,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_bytes() {
        assert_eq!(Rgb::new(1, 2, 3).to_bytes(), [1, 2, 3]);
        assert_eq!(Rgb::BLACK.to_bytes(), [0, 0, 0]);
    }

    #[test]
    fn test_hsv_hue_little_endian() {
        let hsv = Hsv::new(0x1234, 200, 100);
        assert_eq!(hsv.to_bytes(), [0x34, 0x12, 200, 100]);
    }

    #[test]
    fn test_hsv_with_value_keeps_hue_and_saturation() {
        let hsv = Hsv::new(300, 255, 255).with_value(0);
        assert_eq!(hsv, Hsv::new(300, 255, 0));
    }

    #[test]
    fn test_delta_keeps_twos_complement() {
        let delta = Delta {
            red: -1,
            green: 1,
            blue: -128,
            hue: -2,
            saturation: 127,
            value: 0,
        };
        assert_eq!(delta.to_bytes(), [0xFF, 0x01, 0x80, 0xFE, 0xFF, 0x7F, 0x00]);
    }
}
