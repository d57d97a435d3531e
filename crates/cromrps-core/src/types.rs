//! Common types used throughout CromRPS

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a link run within one rendered page.
///
/// Ids are handed out by the presenter starting at 0 for every render pass, so
/// an id is only meaningful against the page that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkId(pub usize);

impl LinkId {
    pub fn raw(&self) -> usize {
        self.0
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for LinkId {
    fn from(raw: usize) -> Self {
        Self(raw)
    }
}
