//! A growable byte buffer used throughout the parser and renderer.
//!
//! Unlike a plain `Vec<u8>`, a `Buffer` remembers the unit size it was
//! created with (mirroring the pool's allocation granularity) and exposes a
//! `truncate` operation the inline scanner relies on to rewind output that
//! has already been emitted (autolinks, images, hard breaks).

use std::fmt;
use std::io::{self, Read, Write};
use std::ops::{Deref, DerefMut};
use std::str;

#[derive(Clone, Default)]
pub struct Buffer {
    data: Vec<u8>,
    unit: usize,
}

impl Buffer {
    /// Creates an empty buffer. `unit` is the capacity increment used when
    /// the buffer needs to grow; it only affects pre-allocation, not
    /// observable behavior.
    pub fn new(unit: usize) -> Buffer {
        Buffer {
            data: Vec::with_capacity(unit),
            unit,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Truncates to `new_len`, used to rewind output already written to a
    /// buffer (e.g. reclaiming a scheme prefix before emitting an autolink).
    pub fn truncate(&mut self, new_len: usize) {
        self.data.truncate(new_len);
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Appends the contents of another buffer.
    pub fn pipe(&mut self, other: &Buffer) {
        self.data.extend_from_slice(&other.data);
    }

    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    pub fn push_byte(&mut self, byte: u8) {
        self.data.push(byte);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_str(&self) -> Result<&str, str::Utf8Error> {
        str::from_utf8(&self.data)
    }

    pub fn to_str(&self) -> Result<&str, str::Utf8Error> {
        self.as_str()
    }

    pub fn unit(&self) -> usize {
        self.unit
    }

    /// Reads an entire document out of `reader` into a new buffer.
    pub fn read_from<R: Read>(mut reader: R) -> io::Result<Buffer> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        let unit = data.len().max(64);
        Ok(Buffer { data, unit })
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.as_str() {
            Ok(s) => write!(f, "Buffer({:?})", s),
            Err(_) => write!(f, "Buffer({:?})", self.data),
        }
    }
}

impl Read for Buffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut slice: &[u8] = &self.data;
        let n = slice.read(buf)?;
        self.data.drain(..n);
        Ok(n)
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Deref for Buffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl DerefMut for Buffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl AsMut<[u8]> for Buffer {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl<'a> From<&'a [u8]> for Buffer {
    fn from(bytes: &'a [u8]) -> Buffer {
        Buffer {
            data: bytes.to_vec(),
            unit: bytes.len(),
        }
    }
}

impl<'a> From<&'a str> for Buffer {
    fn from(s: &'a str) -> Buffer {
        Buffer::from(s.as_bytes())
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(data: Vec<u8>) -> Buffer {
        let unit = data.len();
        Buffer { data, unit }
    }
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Buffer) -> bool {
        self.data == other.data
    }
}

impl PartialEq<[u8]> for Buffer {
    fn eq(&self, other: &[u8]) -> bool {
        self.data == other
    }
}

impl PartialEq<str> for Buffer {
    fn eq(&self, other: &str) -> bool {
        self.data == other.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grows_past_initial_unit() {
        let mut buf = Buffer::new(4);
        for _ in 0..100 {
            buf.push_byte(b'x');
        }
        assert_eq!(buf.len(), 100);
    }

    #[test]
    fn truncate_rewinds_content() {
        let mut buf = Buffer::from("hello world");
        buf.truncate(5);
        assert_eq!(buf.as_str().unwrap(), "hello");
    }

    #[test]
    fn pipe_appends() {
        let mut a = Buffer::from("foo");
        let b = Buffer::from("bar");
        a.pipe(&b);
        assert_eq!(a.as_str().unwrap(), "foobar");
    }

    #[test]
    fn read_drains_consumed_bytes() {
        let mut buf = Buffer::from("abcdef");
        let mut out = [0u8; 3];
        let n = buf.read(&mut out).unwrap();
        assert_eq!(n, 3);
        assert_eq!(&out, b"abc");
        assert_eq!(buf.as_str().unwrap(), "def");
    }
}
