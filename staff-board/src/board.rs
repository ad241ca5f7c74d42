//! Zone → staff map
//!
//! [`ZoneBoard`] is the client-side projection the screen renders: zones in
//! load order, each with its ordered assignments. Mutation primitives here
//! are plain and synchronous; the controller is the only writer.

use serde::Serialize;
use shared::models::{StaffZoneAssignment, Zone, ZoneWithStaff};

/// Assignment removed from the board, with where it was
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed {
    pub zone_id: String,
    pub index: usize,
    pub assignment: StaffZoneAssignment,
}

/// Ordered zone → assignments map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ZoneBoard {
    zones: Vec<ZoneWithStaff>,
}

impl ZoneBoard {
    pub fn new(zones: Vec<ZoneWithStaff>) -> Self {
        Self { zones }
    }

    pub fn zones(&self) -> &[ZoneWithStaff] {
        &self.zones
    }

    pub fn into_zones(self) -> Vec<ZoneWithStaff> {
        self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn zone(&self, zone_id: &str) -> Option<&ZoneWithStaff> {
        self.zones.iter().find(|z| z.zone.id == zone_id)
    }

    fn zone_mut(&mut self, zone_id: &str) -> Option<&mut ZoneWithStaff> {
        self.zones.iter_mut().find(|z| z.zone.id == zone_id)
    }

    /// Zone entity by id
    pub fn zone_info(&self, zone_id: &str) -> Option<&Zone> {
        self.zone(zone_id).map(|z| &z.zone)
    }

    pub fn contains_zone(&self, zone_id: &str) -> bool {
        self.zone(zone_id).is_some()
    }

    /// Staff of a zone; empty for unknown zones
    pub fn staff_of(&self, zone_id: &str) -> &[StaffZoneAssignment] {
        self.zone(zone_id)
            .map(|z| z.staff_zones.as_slice())
            .unwrap_or(&[])
    }

    /// (zone index, position) of the assignment matching the pair
    pub fn locate(&self, staff_id: &str, assignment_id: &str) -> Option<(usize, usize)> {
        self.zones.iter().enumerate().find_map(|(zi, z)| {
            z.staff_zones
                .iter()
                .position(|a| a.is(staff_id, assignment_id))
                .map(|pos| (zi, pos))
        })
    }

    pub fn find_assignment(&self, assignment_id: &str) -> Option<&StaffZoneAssignment> {
        self.assignments().find(|a| a.id == assignment_id)
    }

    /// All assignments in zone order
    pub fn assignments(&self) -> impl Iterator<Item = &StaffZoneAssignment> {
        self.zones.iter().flat_map(|z| z.staff_zones.iter())
    }

    pub fn assignment_count(&self) -> usize {
        self.zones.iter().map(|z| z.staff_zones.len()).sum()
    }

    /// How many collections hold this assignment id (1 when consistent)
    pub fn occurrences(&self, assignment_id: &str) -> usize {
        self.assignments().filter(|a| a.id == assignment_id).count()
    }

    /// Remove the assignment matching the pair from whichever zone holds it
    pub fn remove(&mut self, staff_id: &str, assignment_id: &str) -> Option<Removed> {
        let (zi, pos) = self.locate(staff_id, assignment_id)?;
        let zone = &mut self.zones[zi];
        let assignment = zone.staff_zones.remove(pos);
        Some(Removed {
            zone_id: zone.zone.id.clone(),
            index: pos,
            assignment,
        })
    }

    /// Remove the assignment matching the pair from one specific zone
    pub fn remove_from(
        &mut self,
        zone_id: &str,
        staff_id: &str,
        assignment_id: &str,
    ) -> Option<StaffZoneAssignment> {
        let zone = self.zone_mut(zone_id)?;
        let pos = zone
            .staff_zones
            .iter()
            .position(|a| a.is(staff_id, assignment_id))?;
        Some(zone.staff_zones.remove(pos))
    }

    /// Append to a zone. Returns false if the zone is unknown.
    pub fn push(&mut self, zone_id: &str, assignment: StaffZoneAssignment) -> bool {
        match self.zone_mut(zone_id) {
            Some(zone) => {
                zone.staff_zones.push(assignment);
                true
            }
            None => false,
        }
    }

    /// Insert at `index`, clamped to the zone's length.
    pub fn insert(&mut self, zone_id: &str, index: usize, assignment: StaffZoneAssignment) -> bool {
        match self.zone_mut(zone_id) {
            Some(zone) => {
                let index = index.min(zone.staff_zones.len());
                zone.staff_zones.insert(index, assignment);
                true
            }
            None => false,
        }
    }
}

impl From<Vec<ZoneWithStaff>> for ZoneBoard {
    fn from(zones: Vec<ZoneWithStaff>) -> Self {
        Self::new(zones)
    }
}
