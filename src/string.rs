//! Length-bounded, heap-owned strings.
//!
//! [`OwnedString`] mirrors a classic NUL-terminated buffer: its reported
//! length always counts one terminator slot, and no instance may grow past
//! [`MAX_STRING_LENGTH_WITH_TERMINATOR`]. A released (or default) instance
//! holds no buffer and reports a length of zero.

use std::fmt;

use crate::error::{Error, Result};

/// Maximum length of an [`OwnedString`], terminator slot included.
pub const MAX_STRING_LENGTH_WITH_TERMINATOR: usize = 1024;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OwnedString {
    inner: Option<String>,
}

impl OwnedString {
    /// Allocates a zero-filled string whose length, terminator included, is
    /// exactly `length`.
    pub fn with_length(length: usize) -> Result<Self> {
        if length == 0 {
            return Err(Error::InvalidArgument("string length must be non-zero"));
        }
        check_length(length)?;

        Ok(Self {
            inner: Some("\0".repeat(length - 1)),
        })
    }

    /// Copies `source` into a new string.
    pub fn from_source(source: &str) -> Result<Self> {
        check_length(source.len() + 1)?;

        Ok(Self {
            inner: Some(source.to_owned()),
        })
    }

    /// Appends `other`, sharing a single terminator.
    ///
    /// Fails without touching either operand when one of them is released or
    /// the result would exceed the limit.
    pub fn append(&mut self, other: &OwnedString) -> Result<()> {
        let other = other
            .as_str()
            .ok_or(Error::InvalidArgument("cannot append a released string"))?;
        self.append_str(other)
    }

    pub fn append_str(&mut self, other: &str) -> Result<()> {
        let current = self
            .inner
            .as_mut()
            .ok_or(Error::InvalidArgument("cannot append to a released string"))?;
        check_length(current.len() + other.len() + 1)?;

        current.push_str(other);
        Ok(())
    }

    /// Appends the string to itself.
    pub fn append_self(&mut self) -> Result<()> {
        let current = self
            .inner
            .as_mut()
            .ok_or(Error::InvalidArgument("cannot append to a released string"))?;
        check_length(2 * current.len() + 1)?;

        current.extend_from_within(..);
        Ok(())
    }

    /// Frees the buffer. Releasing twice is a no-op.
    pub fn release(&mut self) {
        self.inner = None;
    }

    pub fn as_str(&self) -> Option<&str> {
        self.inner.as_deref()
    }

    /// Length including the terminator slot, or zero once released.
    pub fn len_with_terminator(&self) -> usize {
        self.inner.as_ref().map_or(0, |s| s.len() + 1)
    }

    pub fn is_released(&self) -> bool {
        self.inner.is_none()
    }

    /// Last content byte, ignoring the terminator.
    pub fn last_byte(&self) -> Option<u8> {
        self.inner.as_ref().and_then(|s| s.as_bytes().last().copied())
    }
}

impl fmt::Display for OwnedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or_default())
    }
}

fn check_length(length: usize) -> Result<()> {
    if length > MAX_STRING_LENGTH_WITH_TERMINATOR {
        return Err(Error::StringTooLong {
            length,
            max: MAX_STRING_LENGTH_WITH_TERMINATOR,
        });
    }
    Ok(())
}
