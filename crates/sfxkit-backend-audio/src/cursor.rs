//! Sequential reader over a rendered PCM buffer.

use std::io;
use std::sync::Arc;

/// Playback position over an immutable, shared PCM buffer.
///
/// Each cursor keeps its own position; any number of cursors can read the
/// same sound. Reaching the end of the buffer is the end of the sound.
#[derive(Debug, Clone)]
pub struct PcmCursor {
    buffer: Arc<[u8]>,
    position: usize,
}

impl PcmCursor {
    /// Creates a cursor at the start of `buffer`.
    pub fn new(buffer: Arc<[u8]>) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Copies up to `out.len()` bytes and advances. Returns 0 once exhausted.
    pub fn read_into(&mut self, out: &mut [u8]) -> usize {
        let available = &self.buffer[self.position..];
        let count = available.len().min(out.len());
        out[..count].copy_from_slice(&available[..count]);
        self.position += count;
        count
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// Total buffer length in bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Whether every byte has been read.
    pub fn is_finished(&self) -> bool {
        self.position >= self.buffer.len()
    }

    /// Stops playback and rewinds to the start.
    pub fn stop(&mut self) {
        self.position = 0;
    }
}

impl io::Read for PcmCursor {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_into(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn cursor(len: usize) -> PcmCursor {
        let data: Vec<u8> = (0..len).map(|i| i as u8).collect();
        PcmCursor::new(Arc::from(data))
    }

    #[test]
    fn test_reads_in_chunks() {
        let mut c = cursor(10);
        let mut buf = [0u8; 4];
        assert_eq!(c.read_into(&mut buf), 4);
        assert_eq!(buf, [0, 1, 2, 3]);
        assert_eq!(c.read_into(&mut buf), 4);
        assert_eq!(c.read_into(&mut buf), 2);
        assert_eq!(&buf[..2], &[8, 9]);
        assert!(c.is_finished());
        assert_eq!(c.read_into(&mut buf), 0);
    }

    #[test]
    fn test_position_and_remaining() {
        let mut c = cursor(6);
        let mut buf = [0u8; 4];
        c.read_into(&mut buf);
        assert_eq!(c.position(), 4);
        assert_eq!(c.remaining(), 2);
        assert_eq!(c.len(), 6);
    }

    #[test]
    fn test_stop_rewinds() {
        let mut c = cursor(4);
        let mut out = Vec::new();
        c.read_to_end(&mut out).unwrap();
        assert!(c.is_finished());
        c.stop();
        assert_eq!(c.position(), 0);
        let mut again = Vec::new();
        c.read_to_end(&mut again).unwrap();
        assert_eq!(out, again);
    }

    #[test]
    fn test_cursors_are_independent() {
        let a = cursor(8);
        let mut b = a.clone();
        let mut buf = [0u8; 8];
        b.read_into(&mut buf);
        assert_eq!(a.position(), 0);
        assert!(b.is_finished());
    }

    #[test]
    fn test_empty_buffer() {
        let mut c = cursor(0);
        assert!(c.is_empty());
        assert!(c.is_finished());
        assert_eq!(c.read_into(&mut [0u8; 2]), 0);
    }

    #[test]
    fn test_cursor_is_send() {
        fn assert_send<T: Send + Sync>() {}
        assert_send::<PcmCursor>();
    }
}
