//! Location access-level classification.
//!
//! Users vote thumbs-up or thumbs-down on individual accessibility
//! features of a location. The database layer aggregates those votes into
//! one [`FeatureTally`] per trackable feature; [`classify`] turns the tally
//! set into an [`AccessLevel`]. Which catalog features are trackable is
//! decided by [`ExcludedFeatures`], which the caller passes down to the
//! aggregate query.

use serde::Serialize;

use crate::status::AccessLevel;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Feature ids that are not votable unless configured otherwise.
pub const DEFAULT_EXCLUDED_FEATURE_IDS: &[DbId] = &[8, 9];

/// A location is `Hard` once more than this many features lean negative.
pub const HARD_FEATURE_LIMIT: usize = 4;

// ---------------------------------------------------------------------------
// Excluded features
// ---------------------------------------------------------------------------

/// Set of feature ids left out of aggregation and voting.
///
/// Kept sorted and deduplicated so it can be bound directly as a
/// `BIGINT[]` query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludedFeatures {
    ids: Vec<DbId>,
}

impl ExcludedFeatures {
    pub fn new(ids: impl IntoIterator<Item = DbId>) -> Self {
        let mut ids: Vec<DbId> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self { ids }
    }

    /// An empty exclusion set; every catalog feature is trackable.
    pub fn none() -> Self {
        Self { ids: Vec::new() }
    }

    /// Parse a comma-separated id list such as `"8, 9"`.
    ///
    /// Blank entries are ignored, so an empty string yields an empty set.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let ids = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<DbId>()
                    .map_err(|_| format!("Invalid feature id '{s}' in excluded feature list"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(ids))
    }

    pub fn contains(&self, feature_id: DbId) -> bool {
        self.ids.binary_search(&feature_id).is_ok()
    }

    pub fn as_slice(&self) -> &[DbId] {
        &self.ids
    }
}

impl Default for ExcludedFeatures {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_FEATURE_IDS.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// Tallies
// ---------------------------------------------------------------------------

/// Aggregated votes for one trackable feature of one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureTally {
    pub feature_id: DbId,
    pub thumbs_up_count: i64,
    pub thumbs_down_count: i64,
}

impl FeatureTally {
    pub fn new(feature_id: DbId, thumbs_up_count: i64, thumbs_down_count: i64) -> Self {
        Self {
            feature_id,
            thumbs_up_count,
            thumbs_down_count,
        }
    }

    /// More up-votes than down-votes.
    pub fn is_positive(&self) -> bool {
        self.thumbs_up_count > self.thumbs_down_count
    }

    /// More down-votes than up-votes.
    pub fn is_negative(&self) -> bool {
        self.thumbs_down_count > self.thumbs_up_count
    }

    /// Nobody has voted either way on this feature.
    pub fn is_unvoted(&self) -> bool {
        self.thumbs_up_count == 0 && self.thumbs_down_count == 0
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify a location from its per-feature tallies.
///
/// Rules are checked in order:
///
/// 1. Every feature positive -> [`AccessLevel::Easy`].
/// 2. Every feature unvoted -> [`AccessLevel::Unknown`].
/// 3. More than [`HARD_FEATURE_LIMIT`] negative features -> [`AccessLevel::Hard`].
/// 4. Anything else -> [`AccessLevel::Medium`].
///
/// A tie counts as neither positive nor negative. An empty tally set
/// carries no votes and is `Unknown`.
pub fn classify(tallies: &[FeatureTally]) -> AccessLevel {
    if tallies.is_empty() {
        return AccessLevel::Unknown;
    }

    if tallies.iter().all(FeatureTally::is_positive) {
        return AccessLevel::Easy;
    }

    if tallies.iter().all(FeatureTally::is_unvoted) {
        return AccessLevel::Unknown;
    }

    let negative = tallies.iter().filter(|t| t.is_negative()).count();
    if negative > HARD_FEATURE_LIMIT {
        AccessLevel::Hard
    } else {
        AccessLevel::Medium
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
