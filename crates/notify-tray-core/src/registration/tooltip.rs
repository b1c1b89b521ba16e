/// Size of the shell's tooltip buffer in UTF-16 code units, terminator included.
pub const TOOLTIP_CAPACITY: usize = 128;

/// Null-terminated UTF-16 tooltip sized to the shell's fixed buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Tooltip {
    buffer: [u16; TOOLTIP_CAPACITY],
    len: usize,
}

impl Tooltip {
    /// Encode `text`, truncating it to `TOOLTIP_CAPACITY - 1` code units.
    ///
    /// A high surrogate left unpaired at the cut point is dropped.
    pub fn new(text: &str) -> Self {
        let mut buffer = [0u16; TOOLTIP_CAPACITY];
        let mut len = 0;

        for unit in text.encode_utf16().take(TOOLTIP_CAPACITY - 1) {
            buffer[len] = unit;
            len += 1;
        }

        if len == TOOLTIP_CAPACITY - 1 && (0xD800..0xDC00).contains(&buffer[len - 1]) {
            len -= 1;
            buffer[len] = 0;
        }

        Self { buffer, len }
    }

    /// Full buffer including the terminator and zero padding.
    pub fn as_buffer(&self) -> &[u16; TOOLTIP_CAPACITY] {
        &self.buffer
    }

    /// Encoded text without the terminator.
    pub fn as_units(&self) -> &[u16] {
        &self.buffer[..self.len]
    }

    /// Number of code units before the terminator.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the tooltip holds no text.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl std::fmt::Display for Tooltip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&String::from_utf16_lossy(self.as_units()))
    }
}

impl std::fmt::Debug for Tooltip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tooltip({:?})", self.to_string())
    }
}
