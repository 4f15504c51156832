//! Store Entry Module
//!
//! Defines the value kinds an in-memory key can hold.

use crate::error::{CacheError, Result};

const WRONGTYPE: &str = "WRONGTYPE Operation against a key holding the wrong kind of value";

// == Store Entry ==
/// A single key's contents: either a string value or a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEntry {
    /// Plain byte string, as written by SET or INCR
    Bytes(Vec<u8>),
    /// List of byte strings, as written by RPUSH
    List(Vec<Vec<u8>>),
}

impl StoreEntry {
    // == As Bytes ==
    /// Returns the string value, or a type error if this is a list.
    pub fn as_bytes(&self) -> Result<&[u8]> {
        match self {
            StoreEntry::Bytes(value) => Ok(value.as_slice()),
            StoreEntry::List(_) => Err(CacheError::Backend(WRONGTYPE.to_string())),
        }
    }

    // == As List ==
    /// Returns the list elements, or a type error if this is a string.
    pub fn as_list(&self) -> Result<&[Vec<u8>]> {
        match self {
            StoreEntry::List(items) => Ok(items.as_slice()),
            StoreEntry::Bytes(_) => Err(CacheError::Backend(WRONGTYPE.to_string())),
        }
    }

    // == Push ==
    /// Appends to a list entry and returns the new length.
    pub fn push(&mut self, value: Vec<u8>) -> Result<usize> {
        match self {
            StoreEntry::List(items) => {
                items.push(value);
                Ok(items.len())
            }
            StoreEntry::Bytes(_) => Err(CacheError::Backend(WRONGTYPE.to_string())),
        }
    }

    // == Increment ==
    /// Adds one to a string entry holding a decimal integer.
    ///
    /// Fails on lists, on values that are not integers and on overflow,
    /// leaving the entry untouched.
    pub fn increment(&mut self) -> Result<i64> {
        let current = parse_integer(self.as_bytes()?)?;
        let next = current.checked_add(1).ok_or_else(|| {
            CacheError::Backend("ERR increment or decrement would overflow".to_string())
        })?;
        *self = StoreEntry::Bytes(next.to_string().into_bytes());
        Ok(next)
    }
}

fn parse_integer(raw: &[u8]) -> Result<i64> {
    std::str::from_utf8(raw)
        .ok()
        .and_then(|text| text.parse::<i64>().ok())
        .ok_or_else(|| {
            CacheError::Backend("ERR value is not an integer or out of range".to_string())
        })
}

// == Range Resolution ==
/// Resolves an inclusive `[start, stop]` range with negative indices into a
/// slice range over a list of `len` elements. Returns `None` when empty.
pub fn resolve_range(len: usize, start: isize, stop: isize) -> Option<std::ops::Range<usize>> {
    let len = len as isize;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

    if start > stop || start >= len || stop < 0 {
        None
    } else {
        Some(start as usize..(stop + 1) as usize)
    }
}
