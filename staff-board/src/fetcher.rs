//! Zone/staff loading

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::try_join_all;
use office_client::StaffZoneService;
use serde::Serialize;
use shared::models::ZoneWithStaff;

use crate::board::ZoneBoard;
use crate::error::{BoardError, BoardResult};

/// Page-level load state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum PageState {
    Loading,
    Ready,
    Failed(String),
}

/// Loads zones and, per zone, their assignments
pub struct ZoneFetcher<S> {
    service: Arc<S>,
}

impl<S> Clone for ZoneFetcher<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<S: StaffZoneService> ZoneFetcher<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }

    /// Fetch a complete board. Any failure fails the whole load.
    pub async fn fetch(&self) -> BoardResult<ZoneBoard> {
        let zones = self
            .service
            .get_all_zones()
            .await
            .map_err(BoardError::FetchZones)?;

        // 各区域相互独立，并发获取
        let staff_lists = try_join_all(zones.iter().map(|zone| {
            let service = self.service.clone();
            let zone_id = zone.id.clone();
            async move {
                service
                    .get_staff_by_zone_id(&zone_id)
                    .await
                    .map_err(|source| BoardError::FetchStaff { zone_id, source })
            }
        }))
        .await?;

        let mut seen = HashSet::new();
        let zones: Vec<ZoneWithStaff> = zones
            .into_iter()
            .zip(staff_lists)
            .map(|(zone, staff)| {
                let staff_zones = staff
                    .into_iter()
                    .filter(|a| {
                        let first = seen.insert(a.id.clone());
                        if !first {
                            tracing::warn!(assignment_id = %a.id, zone_id = %zone.id, "Duplicate assignment dropped");
                        }
                        first
                    })
                    .map(|a| {
                        if a.zone_id == zone.id && a.zone == zone {
                            a
                        } else {
                            tracing::debug!(assignment_id = %a.id, zone_id = %zone.id, "Normalizing embedded zone");
                            a.retargeted(&zone)
                        }
                    })
                    .collect();
                ZoneWithStaff::new(zone, staff_zones)
            })
            .collect();

        let board = ZoneBoard::new(zones);
        tracing::info!(
            zones = board.len(),
            assignments = board.assignment_count(),
            "Staff board loaded"
        );
        Ok(board)
    }
}
