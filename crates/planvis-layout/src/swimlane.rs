//! Swimlane Allocator
//!
//! Converts per-activity placements (swimlane name, relative track, track span) into
//! absolute, contiguous track ranges.
//!
//! # Algorithm
//!
//! 1. Collect every swimlane used by the plan, in first-seen order, with the highest
//!    relative track any of its activities reaches (`track_number + track_span - 1`).
//! 2. Rank the used swimlanes: declared names first in declared order, undeclared
//!    names after them in first-seen order. The caller's list is never modified.
//! 3. Walk the swimlanes in rank order stacking them:
//!    `start = previous_end + 1`, `end = start + highest_track - 1`.
//!
//! Step 3 makes the ranges disjoint and gap-free by construction.

use serde::Serialize;
use std::collections::HashMap;

use planvis_core::{Activity, LayoutError, LayoutNotice, LayoutObserver};

/// Immutable ordering of swimlane names
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SwimlaneRanking {
    names: Vec<String>,
}

impl SwimlaneRanking {
    /// Merge the declared order with the names actually used.
    ///
    /// Duplicate declarations keep their first position. Used names missing from the
    /// declaration are appended in the order given and reported to the observer.
    pub fn merge<'a>(
        declared: &[String],
        used: impl IntoIterator<Item = &'a str>,
        observer: &mut dyn LayoutObserver,
    ) -> Self {
        let mut names: Vec<String> = Vec::with_capacity(declared.len());
        for name in declared {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        for name in used {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
                observer.notice(LayoutNotice::SwimlaneAppended {
                    name: name.to_string(),
                    rank: names.len(),
                });
            }
        }
        Self { names }
    }

    /// 1-based rank of a swimlane
    pub fn rank(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name).map(|i| i + 1)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Absolute track range of one swimlane (1-based, inclusive)
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SwimlaneExtent {
    pub name: String,
    /// 1-based position of the swimlane on the plot
    pub row: usize,
    pub start_track: u32,
    pub end_track: u32,
}

impl SwimlaneExtent {
    pub fn num_tracks(&self) -> u32 {
        (self.end_track - self.start_track).saturating_add(1)
    }
}

/// Swimlane name to absolute track range, in plot order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SwimlaneTable {
    extents: Vec<SwimlaneExtent>,
}

impl SwimlaneTable {
    /// Allocate tracks for every swimlane the activities use
    pub fn allocate(
        declared: &[String],
        activities: &[Activity],
        observer: &mut dyn LayoutObserver,
    ) -> Self {
        // Phase 1: swimlanes in use, first-seen order, with their deepest track
        let mut used: Vec<(&str, u32)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for activity in activities {
            let name = activity.swimlane.as_str();
            let highest = activity.highest_track();
            match index.get(name).copied() {
                Some(i) => used[i].1 = used[i].1.max(highest),
                None => {
                    index.insert(name, used.len());
                    used.push((name, highest));
                }
            }
        }

        // Phase 2: rank against the declared order
        let ranking = SwimlaneRanking::merge(declared, used.iter().map(|(name, _)| *name), observer);
        used.sort_by_key(|(name, _)| ranking.rank(name).unwrap_or(usize::MAX));

        // Phase 3: stack
        let mut extents = Vec::with_capacity(used.len());
        let mut end_track: u32 = 0;
        for (row, (name, highest)) in used.into_iter().enumerate() {
            let start_track = end_track.saturating_add(1);
            end_track = start_track.saturating_add(highest.saturating_sub(1));
            extents.push(SwimlaneExtent {
                name: name.to_string(),
                row: row + 1,
                start_track,
                end_track,
            });
        }

        Self { extents }
    }

    pub fn get(&self, name: &str) -> Option<&SwimlaneExtent> {
        self.extents.iter().find(|e| e.name == name)
    }

    /// First absolute track of a swimlane
    pub fn start_track(&self, name: &str) -> Result<u32, LayoutError> {
        self.get(name)
            .map(|e| e.start_track)
            .ok_or_else(|| LayoutError::SwimlaneNotAllocated(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SwimlaneExtent> {
        self.extents.iter()
    }

    pub fn len(&self) -> usize {
        self.extents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    /// Number of tracks across all swimlanes
    pub fn total_tracks(&self) -> u32 {
        self.extents.last().map_or(0, |e| e.end_track)
    }
}
