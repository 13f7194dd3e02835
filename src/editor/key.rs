/// One decoded keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Printable ASCII, 0x20 through 0x7E.
    Char(u8),
    Tab,
    Enter,
    Backspace,
    /// Anything else: control bytes, escape sequences, non-ASCII.
    Other,
}

impl Key {
    pub fn decode(byte: u8) -> Self {
        match byte {
            b'\t' => Key::Tab,
            b'\n' | b'\r' => Key::Enter,
            0x7f | 0x08 => Key::Backspace,
            0x20..=0x7e => Key::Char(byte),
            _ => Key::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_keys() {
        assert_eq!(Key::decode(b'\t'), Key::Tab);
        assert_eq!(Key::decode(b'\n'), Key::Enter);
        assert_eq!(Key::decode(b'\r'), Key::Enter);
        assert_eq!(Key::decode(0x7f), Key::Backspace);
        assert_eq!(Key::decode(0x08), Key::Backspace);
    }

    #[test]
    fn printable_range() {
        assert_eq!(Key::decode(b' '), Key::Char(b' '));
        assert_eq!(Key::decode(b'a'), Key::Char(b'a'));
        assert_eq!(Key::decode(b'~'), Key::Char(b'~'));
    }

    #[test]
    fn ignored_bytes() {
        for byte in [0x00, 0x03, 0x1b, 0x80, 0xc3, 0xff] {
            assert_eq!(Key::decode(byte), Key::Other, "byte {byte:#04x}");
        }
    }
}
