//! Fixed-width proposal labels.

use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A proposal label: up to 32 bytes of text, NUL padded to exactly 32 bytes.
///
/// Labels are not unique; proposals are identified by position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProposalLabel([u8; 32]);

impl ProposalLabel {
    pub const MAX_LEN: usize = 32;

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Build a label from text, padding with NULs.
    pub fn from_text(text: &str) -> Result<Self, TypesError> {
        let raw = text.as_bytes();
        if raw.len() > Self::MAX_LEN {
            return Err(TypesError::LabelTooLong {
                len: raw.len(),
                max: Self::MAX_LEN,
            });
        }
        let mut bytes = [0u8; 32];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The label text with trailing NUL padding removed.
    pub fn text(&self) -> String {
        let end = self
            .0
            .iter()
            .rposition(|b| *b != 0)
            .map_or(0, |last| last + 1);
        String::from_utf8_lossy(&self.0[..end]).into_owned()
    }
}

impl TryFrom<&str> for ProposalLabel {
    type Error = TypesError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        Self::from_text(text)
    }
}

impl fmt::Debug for ProposalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProposalLabel({:?})", self.text())
    }
}

impl fmt::Display for ProposalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
