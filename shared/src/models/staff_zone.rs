//! Staff-Zone assignment model

use serde::{Deserialize, Serialize};

use super::{Staff, Zone};

/// A staff member's current assignment to a zone.
///
/// The assignment has its own id, distinct from both the staff id and the
/// zone id. `zone_id` and the embedded `zone` always describe the same zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffZoneAssignment {
    pub id: String,
    pub staff_id: String,
    pub staff: Staff,
    pub zone_id: String,
    pub zone: Zone,
}

impl StaffZoneAssignment {
    pub fn new(id: impl Into<String>, staff: Staff, zone: Zone) -> Self {
        Self {
            id: id.into(),
            staff_id: staff.id.clone(),
            staff,
            zone_id: zone.id.clone(),
            zone,
        }
    }

    /// Copy of this assignment pointing at `zone`.
    pub fn retargeted(&self, zone: &Zone) -> Self {
        Self {
            zone_id: zone.id.clone(),
            zone: zone.clone(),
            ..self.clone()
        }
    }

    /// Whether this is the record identified by the (staff, assignment) pair.
    pub fn is(&self, staff_id: &str, assignment_id: &str) -> bool {
        self.staff_id == staff_id && self.id == assignment_id
    }
}

/// Create assignment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffZoneCreate {
    pub staff_id: String,
    pub zone_id: String,
}

/// Move assignment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffZoneMove {
    pub staff_id: String,
    pub zone_id: String,
}

/// Zone together with its current assignments (客户端投影)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneWithStaff {
    pub zone: Zone,
    pub staff_zones: Vec<StaffZoneAssignment>,
}

impl ZoneWithStaff {
    pub fn new(zone: Zone, staff_zones: Vec<StaffZoneAssignment>) -> Self {
        Self { zone, staff_zones }
    }

    pub fn empty(zone: Zone) -> Self {
        Self::new(zone, Vec::new())
    }

    pub fn contains_staff(&self, staff_id: &str) -> bool {
        self.staff_zones.iter().any(|a| a.staff_id == staff_id)
    }
}
