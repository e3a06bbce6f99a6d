//! Input cursor with buffered on-demand reads, line counting and bounded
//! backtracking.
//!
//! String input borrows the caller's bytes; file input owns a growing buffer
//! that always keeps at least [`AHEAD`] bytes loaded past the current
//! position (until the file ends). Bytes behind the current position are
//! never discarded, so backtracking within the loaded window is always
//! possible.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::Path;

/// Read-ahead window kept loaded past the current position for file input.
pub const AHEAD: usize = 64 * 1024;

/// Cursor lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorStatus {
    /// Freshly constructed, nothing consumed.
    Init,
    /// Moving through the input.
    Processing,
    /// The underlying input is exhausted; the loaded window is final.
    InputEnded,
    /// A move ran past the end of the loaded data.
    Ended,
}

impl CursorStatus {
    /// One-character code used in diagnostics.
    pub fn as_char(self) -> char {
        match self {
            CursorStatus::Init => '-',
            CursorStatus::Processing => '~',
            CursorStatus::InputEnded => '.',
            CursorStatus::Ended => 'E',
        }
    }
}

/// Cursor over string or file input.
pub struct Cursor<'i> {
    buffer: Cow<'i, [u8]>,
    /// Current position, as a byte index into `buffer`.
    offset: usize,
    /// Line separators counted while scanning forward.
    lines: usize,
    status: CursorStatus,
    separator: u8,
    input: Option<File>,
    /// Sticky: the file produced its last byte (or failed mid-read).
    input_done: bool,
}

impl<'i> Cursor<'i> {
    /// Cursor over borrowed text.
    pub fn from_string(text: &'i str) -> Cursor<'i> {
        Cursor::from_bytes(text.as_bytes())
    }

    /// Cursor over borrowed bytes.
    pub fn from_bytes(bytes: &'i [u8]) -> Cursor<'i> {
        Cursor {
            buffer: Cow::Borrowed(bytes),
            offset: 0,
            lines: 0,
            status: CursorStatus::Init,
            separator: b'\n',
            input: None,
            input_done: true,
        }
    }

    /// Open a file and preload the first window.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Cursor<'static>> {
        let file = File::open(path)?;
        let mut cursor = Cursor {
            buffer: Cow::Owned(Vec::new()),
            offset: 0,
            lines: 0,
            status: CursorStatus::Init,
            separator: b'\n',
            input: Some(file),
            input_done: false,
        };
        cursor.preload();
        Ok(cursor)
    }

    pub fn status(&self) -> CursorStatus {
        self.status
    }

    /// Current position in bytes from the start of the input.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Line separators seen up to the current position.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Bytes loaded so far (the full input, for string cursors).
    pub fn available(&self) -> usize {
        self.buffer.len()
    }

    /// Bytes between the current position and the end of the loaded data.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.offset
    }

    /// True iff unconsumed input remains, loading more from file if needed.
    pub fn has_more(&mut self) -> bool {
        if self.remaining() == 0 {
            self.preload();
        }
        self.remaining() > 0
    }

    /// The line separator counted by forward moves (`\n` by default).
    pub fn separator(&self) -> u8 {
        self.separator
    }

    pub fn set_separator(&mut self, separator: u8) {
        self.separator = separator;
    }

    /// Peek at an absolute offset within the loaded window.
    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        self.buffer.get(offset).copied()
    }

    /// All loaded bytes, from the start of the input.
    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// The unconsumed part of the loaded window.
    pub fn window(&self) -> &[u8] {
        &self.buffer[self.offset..]
    }

    /// Advance or rewind by `delta` bytes.
    ///
    /// Forward moves count line separators over the consumed bytes and
    /// preload from file so the window stays [`AHEAD`] bytes deep. A move
    /// past the end of the available data stops at the end, sets
    /// [`CursorStatus::Ended`] and returns `false`; the cursor stays valid.
    /// Rewinds are clamped at the start of the buffer and do not adjust the
    /// line count (see [`Cursor::backtrack`]).
    pub fn move_by(&mut self, delta: isize) -> bool {
        if delta == 0 {
            return true;
        }
        if delta > 0 {
            let mut wanted = delta as usize;
            while wanted > 0 {
                self.preload();
                let step = wanted.min(self.remaining());
                if step == 0 {
                    self.status = CursorStatus::Ended;
                    return false;
                }
                let consumed = &self.buffer[self.offset..self.offset + step];
                self.lines += count_bytes(consumed, self.separator);
                self.offset += step;
                wanted -= step;
            }
            self.status = CursorStatus::Processing;
            self.preload();
            true
        } else {
            let back = delta.unsigned_abs().min(self.offset);
            self.offset -= back;
            if back > 0 {
                self.status = CursorStatus::Processing;
            }
            true
        }
    }

    /// Absolute positioning, forward or reverse.
    pub fn move_to(&mut self, offset: usize) -> bool {
        self.move_by(offset as isize - self.offset as isize)
    }

    /// Restore a previously captured `(offset, lines)` pair.
    ///
    /// Only rewinds: composites record the pair before a speculative branch
    /// and call this on failure.
    pub fn backtrack(&mut self, offset: usize, lines: usize) -> bool {
        debug_assert!(offset <= self.offset);
        debug_assert!(lines <= self.lines);
        self.lines = lines;
        self.move_to(offset)
    }

    /// Keep the window at least [`AHEAD`] bytes deep past the current
    /// position. A short or failed read marks the input as ended; a parse
    /// then completes on the buffered bytes.
    fn preload(&mut self) {
        if self.input_done {
            return;
        }
        let Some(file) = self.input.as_mut() else {
            return;
        };
        let buffer = self.buffer.to_mut();
        while buffer.len() - self.offset < AHEAD {
            let start = buffer.len();
            buffer.resize(start + AHEAD, 0);
            match file.read(&mut buffer[start..]) {
                Ok(0) => {
                    buffer.truncate(start);
                    self.input_done = true;
                    self.status = CursorStatus::InputEnded;
                    break;
                }
                Ok(read) => {
                    buffer.truncate(start + read);
                }
                Err(error) if error.kind() == ErrorKind::Interrupted => {
                    buffer.truncate(start);
                }
                Err(_) => {
                    buffer.truncate(start);
                    self.input_done = true;
                    self.status = CursorStatus::InputEnded;
                    break;
                }
            }
        }
    }
}

fn count_bytes(haystack: &[u8], needle: u8) -> usize {
    haystack.iter().filter(|&&b| b == needle).count()
}
