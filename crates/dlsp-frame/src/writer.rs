use std::io::{ErrorKind, Write};

use crate::error::{FrameError, Result};
use crate::framer::Framer;

/// Writes encoded frames to any `Write` byte stream.
pub struct FrameWriter<T, const N: usize> {
    inner: T,
    framer: Framer<N>,
}

impl<T: Write, const N: usize> FrameWriter<T, N> {
    /// Create a new frame writer.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            framer: Framer::new(),
        }
    }

    /// Encode a payload and write the whole frame (blocking).
    ///
    /// A payload longer than `N` is rejected before anything is written.
    pub fn send(&mut self, payload: &[u8]) -> Result<()> {
        let frame = self.framer.encode(payload)?;

        let mut offset = 0usize;
        while offset < frame.len() {
            match self.inner.write(&frame[offset..]) {
                Ok(0) => return Err(FrameError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::special::{ESC, FTR, HDR, XOR_MASK};

    #[test]
    fn write_single_frame() {
        let cursor = Cursor::new(Vec::<u8>::new());
        let mut writer = FrameWriter::<_, 8>::new(cursor);

        writer.send(b"hello").unwrap();

        let wire = writer.into_inner().into_inner();
        let mut framer = Framer::<8>::new();
        assert_eq!(framer.decode(&wire).unwrap(), b"hello");
    }

    #[test]
    fn write_escapes_reserved_bytes() {
        let cursor = Cursor::new(Vec::<u8>::new());
        let mut writer = FrameWriter::<_, 5>::new(cursor);

        writer.send(&[HDR, ESC]).unwrap();

        let wire = writer.into_inner().into_inner();
        assert_eq!(
            wire,
            vec![HDR, ESC, HDR ^ XOR_MASK, ESC, ESC ^ XOR_MASK, FTR]
        );
    }

    #[test]
    fn write_multiple_frames() {
        let cursor = Cursor::new(Vec::<u8>::new());
        let mut writer = FrameWriter::<_, 8>::new(cursor);

        writer.send(b"one").unwrap();
        writer.send(b"two").unwrap();
        writer.send(b"three").unwrap();

        let wire = writer.into_inner().into_inner();

        let mut framer = Framer::<8>::new();
        let mut payloads = Vec::new();
        for byte in wire {
            framer.decode_byte(byte).unwrap();
            if framer.is_completed() {
                payloads.push(framer.as_slice().to_vec());
                framer.reset();
            }
        }

        assert_eq!(
            payloads,
            vec![b"one".to_vec(), b"two".to_vec(), b"three".to_vec()]
        );
    }

    #[test]
    fn payload_too_large_rejected() {
        let cursor = Cursor::new(Vec::<u8>::new());
        let mut writer = FrameWriter::<_, 4>::new(cursor);

        let err = writer.send(b"oversized").unwrap_err();
        assert!(matches!(err, FrameError::PayloadTooLarge { size: 9, max: 4 }));
        assert!(writer.get_ref().get_ref().is_empty());
    }

    #[test]
    fn flush_propagates() {
        let sink = FlushTrackingWriter::default();
        let flag = Arc::clone(&sink.flushed);
        let mut writer = FrameWriter::<_, 4>::new(sink);

        writer.send(b"x").unwrap();

        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn accessors_and_into_inner() {
        let cursor = Cursor::new(Vec::<u8>::new());
        let mut writer = FrameWriter::<_, 4>::new(cursor);

        let _ = writer.get_ref();
        let _ = writer.get_mut();
        let _inner = writer.into_inner();
    }

    #[test]
    fn retries_interrupted_and_would_block() {
        for kind in [ErrorKind::Interrupted, ErrorKind::WouldBlock] {
            let mut writer = FrameWriter::<_, 8>::new(FailOnceWriter::new(kind));
            writer.send(b"retry").unwrap();

            let inner = writer.into_inner();
            assert_eq!(inner.data, vec![HDR, b'r', b'e', b't', b'r', b'y', FTR]);
            assert!(inner.write_error.is_none());
            assert!(inner.flush_error.is_none());
        }
    }

    #[test]
    fn write_error_propagates() {
        let mut writer = FrameWriter::<_, 8>::new(FailOnceWriter::new(ErrorKind::BrokenPipe));
        let err = writer.send(b"x").unwrap_err();
        assert!(matches!(err, FrameError::Io(e) if e.kind() == ErrorKind::BrokenPipe));
    }

    #[test]
    fn short_writes_are_resumed() {
        let mut writer = FrameWriter::<_, 8>::new(OneByteWriter::default());
        writer.send(&[FTR, 1, 2]).unwrap();

        let inner = writer.into_inner();
        assert_eq!(inner.data, vec![HDR, ESC, FTR ^ XOR_MASK, 1, 2, FTR]);
    }

    #[test]
    fn connection_closed_when_write_returns_zero() {
        let mut writer = FrameWriter::<_, 4>::new(ZeroWriter);
        let err = writer.send(b"x").unwrap_err();
        assert!(matches!(err, FrameError::ConnectionClosed));
    }

    #[derive(Default)]
    struct FlushTrackingWriter {
        flushed: Arc<AtomicBool>,
        data: Vec<u8>,
    }

    impl Write for FlushTrackingWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.flushed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Fails the first write and the first flush with `kind`.
    struct FailOnceWriter {
        write_error: Option<ErrorKind>,
        flush_error: Option<ErrorKind>,
        data: Vec<u8>,
    }

    impl FailOnceWriter {
        fn new(kind: ErrorKind) -> Self {
            Self {
                write_error: Some(kind),
                flush_error: Some(kind),
                data: Vec::new(),
            }
        }
    }

    impl Write for FailOnceWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if let Some(kind) = self.write_error.take() {
                return Err(std::io::Error::from(kind));
            }
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            match self.flush_error.take() {
                Some(kind) => Err(std::io::Error::from(kind)),
                None => Ok(()),
            }
        }
    }

    #[derive(Default)]
    struct OneByteWriter {
        data: Vec<u8>,
    }

    impl Write for OneByteWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            match buf.first() {
                Some(byte) => {
                    self.data.push(*byte);
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct ZeroWriter;

    impl Write for ZeroWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn written_bytes_decode() {
        let cursor = Cursor::new(Vec::<u8>::new());
        let mut writer = FrameWriter::<_, 4>::new(cursor);

        writer.send(b"z").unwrap();

        let wire = writer.into_inner().into_inner();
        let mut framed = crate::reader::FrameReader::<_, 4>::new(Cursor::new(wire));
        let payload = framed.read_frame().unwrap();
        assert_eq!(payload.as_ref(), b"z");
    }
}
