use core::fmt;

/// A fixed capacity text buffer that is always NUL terminated. At most `N - 1` bytes of content
/// are kept; longer input is truncated on a UTF-8 character boundary.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoundedText<const N: usize>([u8; N]);

impl<const N: usize> BoundedText<N> {
    /// Largest number of content bytes, one byte is reserved for the terminator.
    pub const MAX_LEN: usize = {
        assert!(N > 0);
        N - 1
    };

    pub const fn new() -> Self {
        Self([0u8; N])
    }

    /// Copies `src` into a new buffer, truncating to [`Self::MAX_LEN`] bytes.
    ///
    /// Content stops at the first NUL byte, exactly like a C string would.
    pub fn from_bytes(src: &[u8]) -> Self {
        let src = match src.iter().position(|&b| b == 0) {
            Some(end) => &src[..end],
            None => src,
        };

        let mut len = src.len().min(Self::MAX_LEN);
        // don't leave half a code point behind when cutting off valid text
        if len < src.len() {
            if let Err(e) = core::str::from_utf8(&src[..len]) {
                if e.error_len().is_none() {
                    len = e.valid_up_to();
                }
            }
        }

        let mut dst = [0u8; N];
        dst[..len].copy_from_slice(&src[..len]);
        Self(dst)
    }

    pub fn from_text(s: &str) -> Self {
        Self::from_bytes(s.as_bytes())
    }

    /// Replaces the content. Returns `false` if the value had to be truncated.
    pub fn set(&mut self, s: &str) -> bool {
        *self = Self::from_text(s);
        self.len() == s.len()
    }

    pub fn clear(&mut self) {
        self.0 = [0u8; N];
    }

    pub fn len(&self) -> usize {
        self.0.iter().position(|&b| b == 0).unwrap_or(Self::MAX_LEN)
    }

    pub fn is_empty(&self) -> bool {
        self.0[0] == 0
    }

    /// Content bytes without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..self.len()]
    }

    /// Content as `&str`. Invalid UTF-8 read from storage is cut off at the first bad byte.
    pub fn as_str(&self) -> &str {
        let bytes = self.as_bytes();
        match core::str::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
        }
    }

    /// The full backing buffer including terminator and padding.
    pub const fn as_raw(&self) -> &[u8; N] {
        &self.0
    }
}

impl<const N: usize> Default for BoundedText<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoundedText<{N}>(b\"")?;
        for &byte in self.as_bytes() {
            write!(f, "{}", core::ascii::escape_default(byte))?;
        }
        write!(f, "\")")
    }
}

impl<const N: usize> AsRef<[u8]> for BoundedText<N> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
