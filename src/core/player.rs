//! Competitor identification and match rosters.
//!
//! ## CompetitorId
//!
//! Type-safe competitor identifier. Ids are 1-based (`1..=4`) so that `0`
//! never collides with "unclaimed" in host encodings.
//!
//! ## Roster
//!
//! The fixed, ordered list of competitors taking part in a match. Turn order
//! follows roster order.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{EngineError, Result};

/// Maximum number of competitors in one match.
pub const MAX_COMPETITORS: usize = 4;

/// Competitor identifier.
///
/// Competitor ids are 1-based: the first competitor is `CompetitorId(1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompetitorId(pub u8);

impl CompetitorId {
    /// Create a new competitor ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Iterate over the ids of an `count`-competitor match: `1..=count`.
    ///
    /// ```
    /// use chain_reaction::core::CompetitorId;
    ///
    /// let ids: Vec<_> = CompetitorId::all(3).collect();
    /// assert_eq!(ids, vec![CompetitorId::new(1), CompetitorId::new(2), CompetitorId::new(3)]);
    /// ```
    pub fn all(count: usize) -> impl Iterator<Item = CompetitorId> {
        (1..=count.min(MAX_COMPETITORS) as u8).map(CompetitorId)
    }
}

impl std::fmt::Display for CompetitorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Competitor {}", self.0)
    }
}

/// Ordered list of participating competitors, fixed at match start.
///
/// Invariants (checked by [`Roster::new`]): 1 to 4 entries, no duplicates,
/// no zero id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Roster {
    ids: SmallVec<[CompetitorId; MAX_COMPETITORS]>,
}

impl Roster {
    /// Create a roster from an ordered list of ids.
    pub fn new(ids: impl IntoIterator<Item = CompetitorId>) -> Result<Self> {
        let ids: SmallVec<[CompetitorId; MAX_COMPETITORS]> = ids.into_iter().collect();
        let roster = Self { ids };
        roster.validate()?;
        Ok(roster)
    }

    /// Roster `[1, 2, ..., count]`.
    pub fn sequential(count: usize) -> Result<Self> {
        if count == 0 || count > MAX_COMPETITORS {
            return Err(EngineError::InvalidConfig(format!(
                "roster must hold 1-{MAX_COMPETITORS} competitors, got {count}"
            )));
        }
        Self::new(CompetitorId::all(count))
    }

    /// Check roster invariants.
    pub fn validate(&self) -> Result<()> {
        if self.ids.is_empty() || self.ids.len() > MAX_COMPETITORS {
            return Err(EngineError::InvalidConfig(format!(
                "roster must hold 1-{MAX_COMPETITORS} competitors, got {}",
                self.ids.len()
            )));
        }
        for (i, id) in self.ids.iter().enumerate() {
            if id.0 == 0 {
                return Err(EngineError::InvalidConfig(
                    "competitor id 0 is reserved for unclaimed cells".to_string(),
                ));
            }
            if self.ids[..i].contains(id) {
                return Err(EngineError::InvalidConfig(format!("duplicate {id} in roster")));
            }
        }
        Ok(())
    }

    /// Number of participants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always false for a validated roster.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// First roster entry (the opening actor).
    #[must_use]
    pub fn first(&self) -> Option<CompetitorId> {
        self.ids.first().copied()
    }

    /// Position of a competitor in turn order.
    #[must_use]
    pub fn position(&self, id: CompetitorId) -> Option<usize> {
        self.ids.iter().position(|&c| c == id)
    }

    /// Check if a competitor takes part in this match.
    #[must_use]
    pub fn contains(&self, id: CompetitorId) -> bool {
        self.ids.contains(&id)
    }

    /// Iterate over competitors in turn order.
    pub fn iter(&self) -> impl Iterator<Item = CompetitorId> + '_ {
        self.ids.iter().copied()
    }

    /// Roster as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[CompetitorId] {
        &self.ids
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            ids: SmallVec::from_slice(&[CompetitorId(1), CompetitorId(2)]),
        }
    }
}
