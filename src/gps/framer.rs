// src/gps/framer.rs
//! Reassembles newline-terminated sentences from arbitrary byte chunks

use super::data::Sentence;
use std::collections::VecDeque;

/// Frame capacity including the terminator slot
pub const FRAME_CAPACITY: usize = 256;

/// Longest sentence kept before a frame is cut
pub const MAX_SENTENCE_LEN: usize = FRAME_CAPACITY - 1;

/// Returned when a byte would push a frame past its capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Full;

/// Bounded buffer holding the sentence currently being assembled.
///
/// `N` is the number of bytes it can hold.
#[derive(Debug, Clone, Default)]
pub struct FrameBuffer<const N: usize = MAX_SENTENCE_LEN> {
    bytes: heapless::Vec<u8, N>,
}

impl<const N: usize> FrameBuffer<N> {
    pub const fn new() -> Self {
        Self {
            bytes: heapless::Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.bytes.is_full()
    }

    pub fn push(&mut self, byte: u8) -> Result<(), Full> {
        self.bytes.push(byte).map_err(|_| Full)
    }

    /// Finalize the buffered bytes as a sentence and clear the buffer
    pub fn take(&mut self) -> Sentence {
        let sentence = Sentence::new(String::from_utf8_lossy(&self.bytes).into_owned());
        self.bytes.clear();
        sentence
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}

/// Incremental sentence framer.
///
/// Partial sentences persist between calls to [`SentenceFramer::feed`], so a
/// sentence split across several reads comes out whole. `\r` is dropped,
/// `\n` ends a sentence, and a frame that fills up without a terminator is
/// cut at `N` bytes (the byte that hit the limit is consumed).
#[derive(Debug, Clone, Default)]
pub struct SentenceFramer<const N: usize = MAX_SENTENCE_LEN> {
    buffer: FrameBuffer<N>,
    // completed while an abandoned `Frames` was drained
    queued: VecDeque<Sentence>,
}

impl<const N: usize> SentenceFramer<N> {
    pub fn new() -> Self {
        Self {
            buffer: FrameBuffer::new(),
            queued: VecDeque::new(),
        }
    }

    /// Frame `bytes`, yielding each sentence as it completes.
    ///
    /// Sentences left over from an earlier, partially consumed feed come
    /// first. Dropping the iterator early still frames the rest of `bytes`;
    /// sentences completed that way are handed out by the next feed.
    pub fn feed<'a>(&'a mut self, bytes: &'a [u8]) -> Frames<'a, N> {
        Frames {
            framer: self,
            bytes: bytes.iter(),
        }
    }

    /// Length of the partial sentence carried over to the next feed
    pub fn pending_len(&self) -> usize {
        self.buffer.len()
    }

    /// Completed sentences waiting for the next feed
    pub fn queued_len(&self) -> usize {
        self.queued.len()
    }

    pub fn max_sentence_len(&self) -> usize {
        N
    }

    /// Drop any partial or queued sentence
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.queued.clear();
    }

    fn accept(&mut self, byte: u8) -> Option<Sentence> {
        match byte {
            b'\r' => None,
            b'\n' => Some(self.buffer.take()),
            _ => match self.buffer.push(byte) {
                Ok(()) => None,
                Err(Full) => Some(self.buffer.take()),
            },
        }
    }
}

/// Sentences completed by one [`SentenceFramer::feed`] call
pub struct Frames<'a, const N: usize = MAX_SENTENCE_LEN> {
    framer: &'a mut SentenceFramer<N>,
    bytes: std::slice::Iter<'a, u8>,
}

impl<const N: usize> Iterator for Frames<'_, N> {
    type Item = Sentence;

    fn next(&mut self) -> Option<Sentence> {
        if let Some(sentence) = self.framer.queued.pop_front() {
            return Some(sentence);
        }
        for &byte in self.bytes.by_ref() {
            if let Some(sentence) = self.framer.accept(byte) {
                return Some(sentence);
            }
        }
        None
    }
}

impl<const N: usize> Drop for Frames<'_, N> {
    fn drop(&mut self) {
        for &byte in self.bytes.by_ref() {
            if let Some(sentence) = self.framer.accept(byte) {
                self.framer.queued.push_back(sentence);
            }
        }
    }
}
