//! Single-key decoding from a raw byte stream.
//!
//! Only the two arrow sequences the picker needs (`ESC [ A`, `ESC [ B`) are
//! recognized; every other escape sequence decodes to [`Key::Unknown`].

use std::io::{self, Read};

const ESC: u8 = 0x1b;
const CTRL_C: u8 = 0x03;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(u8),
    Up,
    Down,
    Enter,
    /// Ctrl+C, delivered as a byte because raw mode leaves signal
    /// generation to the application.
    Interrupt,
    Unknown,
}

/// Read one key, blocking until at least one byte is available.
///
/// End of input is reported as [`io::ErrorKind::UnexpectedEof`].
pub fn read_key<R: Read + ?Sized>(input: &mut R) -> io::Result<Key> {
    let key = match read_byte(input)? {
        b'\r' | b'\n' => Key::Enter,
        CTRL_C => Key::Interrupt,
        ESC => {
            let mut seq = [0u8; 2];
            input.read_exact(&mut seq)?;
            match seq {
                [b'[', b'A'] => Key::Up,
                [b'[', b'B'] => Key::Down,
                _ => Key::Unknown,
            }
        }
        b => Key::Char(b),
    };
    Ok(key)
}

fn read_byte<R: Read + ?Sized>(input: &mut R) -> io::Result<u8> {
    let mut buf = [0u8; 1];
    input.read_exact(&mut buf)?;
    Ok(buf[0])
}
