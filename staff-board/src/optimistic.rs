//! Optimistic move protocol
//!
//! A move runs in three phases:
//! 1. **snapshot** the assignment exactly as the board holds it, with its
//!    source zone and position;
//! 2. **apply** the move locally (remove from source, append a retargeted
//!    copy to the target);
//! 3. **commit** when the remote accepts, or **revert** when it fails.
//!
//! Revert depends only on the snapshot and the current board, and matches by
//! (staff id, assignment id), so other moves applied meanwhile are left alone.

use shared::models::StaffZoneAssignment;
use thiserror::Error;

use crate::board::ZoneBoard;

/// Why a move could not be applied locally
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("Assignment {0} is not on the board")]
    AssignmentNotFound(String),

    #[error("Zone {0} is not on the board")]
    UnknownZone(String),

    #[error("Assignment is already in zone {0}")]
    SameZone(String),
}

/// An applied, not yet settled, move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimisticMove {
    /// Pre-move value, restored as-is on revert
    snapshot: StaffZoneAssignment,
    /// Retargeted copy placed in the target zone
    moved: StaffZoneAssignment,
    source_zone_id: String,
    source_index: usize,
    target_zone_id: String,
}

impl OptimisticMove {
    /// Snapshot and apply. The board is untouched when this fails.
    pub fn begin(
        board: &mut ZoneBoard,
        staff_id: &str,
        assignment_id: &str,
        target_zone_id: &str,
    ) -> Result<Self, ApplyError> {
        let target_zone = board
            .zone_info(target_zone_id)
            .cloned()
            .ok_or_else(|| ApplyError::UnknownZone(target_zone_id.to_string()))?;

        let (zi, _) = board
            .locate(staff_id, assignment_id)
            .ok_or_else(|| ApplyError::AssignmentNotFound(assignment_id.to_string()))?;
        if board.zones()[zi].zone.id == target_zone_id {
            return Err(ApplyError::SameZone(target_zone_id.to_string()));
        }

        let removed = board
            .remove(staff_id, assignment_id)
            .ok_or_else(|| ApplyError::AssignmentNotFound(assignment_id.to_string()))?;
        let moved = removed.assignment.retargeted(&target_zone);
        board.push(target_zone_id, moved.clone());

        Ok(Self {
            snapshot: removed.assignment,
            moved,
            source_zone_id: removed.zone_id,
            source_index: removed.index,
            target_zone_id: target_zone_id.to_string(),
        })
    }

    pub fn assignment_id(&self) -> &str {
        &self.snapshot.id
    }

    pub fn staff_id(&self) -> &str {
        &self.snapshot.staff_id
    }

    pub fn source_zone_id(&self) -> &str {
        &self.source_zone_id
    }

    pub fn target_zone_id(&self) -> &str {
        &self.target_zone_id
    }

    pub fn snapshot(&self) -> &StaffZoneAssignment {
        &self.snapshot
    }

    /// Remote accepted; the applied state is final.
    pub fn commit(self) -> StaffZoneAssignment {
        self.moved
    }

    /// Remote failed; undo this move only.
    ///
    /// Returns false when the source zone is no longer on the board, in which
    /// case the moved copy is still removed from the target.
    pub fn revert(self, board: &mut ZoneBoard) -> bool {
        let staff_id = self.snapshot.staff_id.clone();
        let assignment_id = self.snapshot.id.clone();

        if board
            .remove_from(&self.target_zone_id, &staff_id, &assignment_id)
            .is_none()
        {
            tracing::warn!(
                assignment_id = %assignment_id,
                zone_id = %self.target_zone_id,
                "Moved copy missing from target zone during revert"
            );
        }

        if board.locate(&staff_id, &assignment_id).is_some() {
            tracing::warn!(assignment_id = %assignment_id, "Assignment already present, skip re-insert");
            return true;
        }

        board.insert(&self.source_zone_id, self.source_index, self.snapshot)
    }
}
