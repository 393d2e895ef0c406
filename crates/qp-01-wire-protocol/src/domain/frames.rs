//! # Frame Iteration
//!
//! Walks a receive buffer holding zero or more concatenated frames.
//! Iteration is bounded by declared sizes; a frame that would read past
//! the buffer yields an error and ends the walk.

use super::errors::{ProtocolError, Result};
use super::header::{RequestResponseHeader, HEADER_SIZE};

/// A borrowed frame within a receive buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    pub header: RequestResponseHeader,
    pub payload: &'a [u8],
}

/// Iterator over the frames in a buffer.
#[derive(Debug)]
pub struct FrameIter<'a> {
    buf: &'a [u8],
    offset: usize,
    done: bool,
}

impl<'a> FrameIter<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            offset: 0,
            done: false,
        }
    }

    /// Offset of the next unread frame.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn next_frame(&mut self) -> Result<Frame<'a>> {
        let rest = &self.buf[self.offset..];
        let header = RequestResponseHeader::decode(rest)?;
        let size = header.size();
        if size < HEADER_SIZE {
            return Err(ProtocolError::InvalidDeclaredSize {
                offset: self.offset,
                size: size as u32,
            });
        }
        if size > rest.len() {
            return Err(ProtocolError::FrameOverrun {
                offset: self.offset,
                declared: size as u32,
                available: rest.len(),
            });
        }
        let payload = &rest[HEADER_SIZE..size];
        self.offset += size;
        Ok(Frame { header, payload })
    }
}

impl<'a> Iterator for FrameIter<'a> {
    type Item = Result<Frame<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.offset >= self.buf.len() {
            return None;
        }
        let item = self.next_frame();
        if item.is_err() {
            self.done = true;
        }
        Some(item)
    }
}
