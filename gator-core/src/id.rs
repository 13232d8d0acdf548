//! Commit identifiers.
//!
//! An identifier is a fixed-width base-5 counter. Each of the [`ID_LEN`]
//! digits is stored as its value `0..5` (most significant first) and rendered
//! through [`ALPHABET`], so `c` is the zero digit and `6` is the largest. The
//! first commit is all `c`; every later commit is its parent plus one.
//!
//! The head pointer additionally has a sentinel form, forty `0` characters,
//! meaning "no commits yet". It is modelled as [`Head::Empty`] rather than as
//! a `CommitId` since `0` is not a digit of the alphabet.

use crate::error::{Error, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Width of a rendered identifier.
pub const ID_LEN: usize = 40;

/// Digit symbols in ascending order.
pub const ALPHABET: [u8; 5] = *b"cs256";

const BASE: u8 = ALPHABET.len() as u8;

/// Head value of a repository without commits.
pub const EMPTY_HEAD: &str = "0000000000000000000000000000000000000000";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CommitId {
    digits: [u8; ID_LEN],
}

impl CommitId {
    /// Identifier assigned to the first commit of every repository.
    pub const FIRST: CommitId = CommitId {
        digits: [0; ID_LEN],
    };

    /// The next identifier in the lineage, or `None` once every digit is at
    /// its maximum.
    pub fn successor(&self) -> Option<CommitId> {
        let mut digits = self.digits;
        for digit in digits.iter_mut().rev() {
            if *digit + 1 < BASE {
                *digit += 1;
                return Some(CommitId { digits });
            }
            *digit = 0;
        }
        None
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &d in &self.digits {
            write!(f, "{}", ALPHABET[d as usize] as char)?;
        }
        Ok(())
    }
}

impl FromStr for CommitId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != ID_LEN {
            return Err(Error::corrupt(format!(
                "commit id {:?} has length {}, expected {}",
                s,
                s.len(),
                ID_LEN
            )));
        }

        let mut digits = [0u8; ID_LEN];
        for (slot, byte) in digits.iter_mut().zip(s.bytes()) {
            *slot = ALPHABET
                .iter()
                .position(|&sym| sym == byte)
                .ok_or_else(|| {
                    Error::corrupt(format!(
                        "commit id {:?} contains illegal character {:?}",
                        s, byte as char
                    ))
                })? as u8;
        }

        Ok(CommitId { digits })
    }
}

impl Serialize for CommitId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Value of the previous-commit pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Head {
    Empty,
    Commit(CommitId),
}

impl Head {
    pub fn commit(&self) -> Option<CommitId> {
        match self {
            Head::Empty => None,
            Head::Commit(id) => Some(*id),
        }
    }
}

impl fmt::Display for Head {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Head::Empty => f.write_str(EMPTY_HEAD),
            Head::Commit(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for Head {
    type Err = Error;

    /// Parses the contents of a pointer artifact. Surrounding whitespace is
    /// ignored.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == EMPTY_HEAD {
            Ok(Head::Empty)
        } else {
            s.parse().map(Head::Commit)
        }
    }
}

impl Serialize for Head {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Identifier for the commit that follows `previous`.
pub fn next_id(previous: &Head) -> Result<CommitId> {
    match previous {
        Head::Empty => Ok(CommitId::FIRST),
        Head::Commit(id) => id
            .successor()
            .ok_or_else(|| Error::corrupt(format!("commit id space exhausted after {}", id))),
    }
}
