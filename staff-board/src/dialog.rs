//! Dialog state: delete confirmation and add-assignment form

use serde::Serialize;
use shared::models::StaffZoneAssignment;

use crate::board::ZoneBoard;

/// Delete confirmation dialog. Open while an assignment awaits confirmation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pending: Option<StaffZoneAssignment>,
}

impl DeleteConfirmation {
    pub fn open(&mut self, assignment: StaffZoneAssignment) {
        self.pending = Some(assignment);
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&StaffZoneAssignment> {
        self.pending.as_ref()
    }

    /// Close and hand over the assignment to delete
    pub fn take(&mut self) -> Option<StaffZoneAssignment> {
        self.pending.take()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Add-assignment dialog form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddAssignmentDialog {
    pub open: bool,
    pub staff_id: Option<String>,
    pub zone_id: Option<String>,
    /// Inline error shown under the form
    pub error: Option<String>,
    pub submitting: bool,
}

impl AddAssignmentDialog {
    /// Open, optionally preselecting a zone
    pub fn open(&mut self, zone_id: Option<String>) {
        *self = Self {
            open: true,
            zone_id,
            ..Self::default()
        };
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn select_staff(&mut self, staff_id: impl Into<String>) {
        self.staff_id = Some(staff_id.into());
        self.error = None;
    }

    pub fn select_zone(&mut self, zone_id: impl Into<String>) {
        self.zone_id = Some(zone_id.into());
        self.error = None;
    }

    /// Client-side checks before submitting. Returns (staff id, zone id).
    pub fn validate(&self, board: &ZoneBoard) -> Result<(String, String), String> {
        let staff_id = self
            .staff_id
            .clone()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "Please select a staff member".to_string())?;
        let zone_id = self
            .zone_id
            .clone()
            .filter(|z| !z.is_empty())
            .ok_or_else(|| "Please select a zone".to_string())?;

        let zone = board
            .zone(&zone_id)
            .ok_or_else(|| "Selected zone no longer exists".to_string())?;
        if zone.contains_staff(&staff_id) {
            return Err(format!("Staff member is already assigned to {}", zone.zone.name));
        }
        Ok((staff_id, zone_id))
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.submitting = false;
    }
}
