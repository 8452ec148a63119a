//! Bounded, append-only text store backing the log pane.
//!
//! The buffer holds at most `capacity` characters. When an append would
//! exceed that bound, the oldest characters are evicted from the front so
//! the retained length is exactly `capacity`. All offsets are counted in
//! Unicode scalar values (`char`s), never bytes.

pub use logpane_config::DEFAULT_BUFFER_CAPACITY;

/// Notification describing how the buffer changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferChange {
    /// Text was appended; `evicted` characters were dropped from the front.
    Appended { evicted: usize },
    /// The buffer was emptied.
    Cleared,
}

/// Bounded append-only log text.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    text: String,
    /// Length of `text` in chars (cached; `text.len()` is bytes).
    len: usize,
    capacity: usize,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_CAPACITY)
    }
}

impl LogBuffer {
    /// Create an empty buffer retaining at most `capacity` characters.
    pub fn new(capacity: usize) -> Self {
        Self {
            text: String::new(),
            len: 0,
            capacity,
        }
    }

    /// Maximum number of characters retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current length in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read-only view of the current text.
    ///
    /// The borrow keeps the buffer immutable for as long as a match pass
    /// holds the snapshot.
    pub fn snapshot(&self) -> &str {
        &self.text
    }

    /// Append `text`, evicting from the front as needed.
    ///
    /// Evicts exactly `new_len - capacity` characters (never negative). When
    /// `text` alone is longer than the capacity, only its last `capacity`
    /// characters survive and all prior content is discarded.
    pub fn append(&mut self, text: &str) -> BufferChange {
        let incoming = text.chars().count();
        let new_len = self.len + incoming;
        let evicted = new_len.saturating_sub(self.capacity);

        if evicted >= self.len {
            // Every previously retained char goes, plus a prefix of `text`.
            let skip = byte_offset_of_char(text, evicted - self.len);
            self.text.clear();
            self.text.push_str(&text[skip..]);
        } else {
            let cut = byte_offset_of_char(&self.text, evicted);
            self.text.drain(..cut);
            self.text.push_str(text);
        }
        self.len = new_len - evicted;

        if evicted > 0 {
            log::trace!(
                "Log buffer evicted {} chars, retaining {}/{}",
                evicted,
                self.len,
                self.capacity
            );
        }

        BufferChange::Appended { evicted }
    }

    /// Reset to empty.
    pub fn clear(&mut self) -> BufferChange {
        self.text.clear();
        self.len = 0;
        BufferChange::Cleared
    }
}

/// Byte offset of the `n`th char of `s`, or `s.len()` when `n` is past the end.
fn byte_offset_of_char(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_within_capacity() {
        let mut buffer = LogBuffer::new(16);
        assert_eq!(buffer.append("hello "), BufferChange::Appended { evicted: 0 });
        assert_eq!(buffer.append("world"), BufferChange::Appended { evicted: 0 });
        assert_eq!(buffer.snapshot(), "hello world");
        assert_eq!(buffer.len(), 11);
    }

    #[test]
    fn test_append_evicts_exact_prefix() {
        let mut buffer = LogBuffer::new(8);
        buffer.append("abcdef");
        assert_eq!(buffer.append("ghij"), BufferChange::Appended { evicted: 2 });
        assert_eq!(buffer.snapshot(), "cdefghij");
        assert_eq!(buffer.len(), buffer.capacity());
    }

    #[test]
    fn test_oversized_append_keeps_tail_of_text() {
        let mut buffer = LogBuffer::new(4);
        buffer.append("xy");
        // 2 retained + 10 incoming - 4 capacity
        assert_eq!(
            buffer.append("0123456789"),
            BufferChange::Appended { evicted: 8 }
        );
        assert_eq!(buffer.snapshot(), "6789");
    }

    #[test]
    fn test_append_exactly_capacity_replaces_everything() {
        let mut buffer = LogBuffer::new(3);
        buffer.append("ab");
        buffer.append("xyz");
        assert_eq!(buffer.snapshot(), "xyz");
    }

    #[test]
    fn test_eviction_counts_chars_not_bytes() {
        let mut buffer = LogBuffer::new(4);
        buffer.append("🎉é");
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.append("abc"), BufferChange::Appended { evicted: 1 });
        assert_eq!(buffer.snapshot(), "éabc");
    }

    #[test]
    fn test_empty_append_is_noop() {
        let mut buffer = LogBuffer::new(4);
        buffer.append("abcd");
        assert_eq!(buffer.append(""), BufferChange::Appended { evicted: 0 });
        assert_eq!(buffer.snapshot(), "abcd");
    }

    #[test]
    fn test_clear_resets_length() {
        let mut buffer = LogBuffer::new(4);
        buffer.append("abcd");
        assert_eq!(buffer.clear(), BufferChange::Cleared);
        assert!(buffer.is_empty());
        assert_eq!(buffer.snapshot(), "");
    }

    #[test]
    fn test_content_is_suffix_of_concatenation() {
        let mut buffer = LogBuffer::new(10);
        let mut all = String::new();
        for i in 0..50 {
            let chunk = format!("line {i}\n");
            all.push_str(&chunk);
            buffer.append(&chunk);
            assert!(buffer.len() <= buffer.capacity());
            let total = all.chars().count();
            let expected: String = all.chars().skip(total.saturating_sub(10)).collect();
            assert_eq!(buffer.snapshot(), expected);
        }
    }
}
