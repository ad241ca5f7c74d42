//! Search/filter panel and derived statistics

use std::collections::BTreeMap;

use serde::Serialize;
use shared::models::{StaffType, ZoneType, ZoneWithStaff};

use crate::board::ZoneBoard;

/// Search term plus optional zone-type filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneFilter {
    pub term: String,
    pub zone_type: Option<ZoneType>,
}

impl ZoneFilter {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            zone_type: None,
        }
    }

    pub fn with_zone_type(mut self, zone_type: ZoneType) -> Self {
        self.zone_type = Some(zone_type);
        self
    }

    /// Name, description or any assigned staff name contains the term
    /// (case-insensitive), and the zone type matches when one is set.
    pub fn matches(&self, zone: &ZoneWithStaff) -> bool {
        if let Some(zone_type) = self.zone_type
            && zone.zone.zone_type != zone_type
        {
            return false;
        }

        let term = self.term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        let contains = |text: &str| text.to_lowercase().contains(&term);
        contains(&zone.zone.name)
            || zone.zone.description.as_deref().is_some_and(contains)
            || zone.staff_zones.iter().any(|a| contains(&a.staff.full_name))
    }

    pub fn apply<'a>(&self, board: &'a ZoneBoard) -> Vec<&'a ZoneWithStaff> {
        board.zones().iter().filter(|z| self.matches(z)).collect()
    }
}

/// Counts shown in the stats panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardStats {
    pub total_zones: usize,
    pub dining_zones: usize,
    pub kitchen_zones: usize,
    pub empty_zones: usize,
    pub total_assignments: usize,
    pub by_staff_type: BTreeMap<StaffType, usize>,
}

impl BoardStats {
    pub fn from_board(board: &ZoneBoard) -> Self {
        let mut stats = Self {
            total_zones: board.len(),
            ..Self::default()
        };
        for zone in board.zones() {
            match zone.zone.zone_type {
                ZoneType::DiningArea => stats.dining_zones += 1,
                ZoneType::KitchenArea => stats.kitchen_zones += 1,
            }
            if zone.staff_zones.is_empty() {
                stats.empty_zones += 1;
            }
            for assignment in &zone.staff_zones {
                stats.total_assignments += 1;
                *stats
                    .by_staff_type
                    .entry(assignment.staff.staff_type)
                    .or_default() += 1;
            }
        }
        stats
    }
}
