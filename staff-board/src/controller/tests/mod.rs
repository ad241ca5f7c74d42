use super::*;
use async_trait::async_trait;
use shared::models::{Zone, ZoneType};
use shared::{ServiceError, ServiceResult};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex as StdMutex;
use tokio::sync::oneshot;

mod test_move;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    GetZones,
    GetStaff(String),
    Move {
        assignment_id: String,
        staff_id: String,
        zone_id: String,
    },
    Delete {
        assignment_id: String,
        cascade: bool,
    },
    Create {
        staff_id: String,
        zone_id: String,
    },
    GetAllStaff,
}

/// In-memory service with scripted answers
#[derive(Default)]
struct ScriptedService {
    zones: StdMutex<Vec<Zone>>,
    staff: StdMutex<HashMap<String, Vec<StaffZoneAssignment>>>,
    all_staff: StdMutex<Vec<Staff>>,
    zones_error: StdMutex<Option<ServiceError>>,
    staff_errors: StdMutex<HashMap<String, ServiceError>>,
    move_results: StdMutex<VecDeque<ServiceResult<()>>>,
    move_gates: StdMutex<HashMap<String, oneshot::Receiver<ServiceResult<()>>>>,
    delete_result: StdMutex<Option<ServiceResult<()>>>,
    delete_gate: StdMutex<Option<oneshot::Receiver<ServiceResult<()>>>>,
    create_result: StdMutex<Option<ServiceResult<()>>>,
    calls: StdMutex<Vec<Call>>,
}

impl ScriptedService {
    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn move_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Move { .. }))
            .count()
    }

    fn delete_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Delete { .. }))
            .count()
    }

    fn set_zone(&self, zone: Zone, staff: Vec<StaffZoneAssignment>) {
        self.staff.lock().unwrap().insert(zone.id.clone(), staff);
        self.zones.lock().unwrap().push(zone);
    }

    fn push_move_result(&self, result: ServiceResult<()>) {
        self.move_results.lock().unwrap().push_back(result);
    }

    /// Hold the next move of `assignment_id` until the sender answers
    fn gate_move(&self, assignment_id: &str) -> oneshot::Sender<ServiceResult<()>> {
        let (tx, rx) = oneshot::channel();
        self.move_gates
            .lock()
            .unwrap()
            .insert(assignment_id.to_string(), rx);
        tx
    }

    /// Hold the next delete until the sender answers
    fn gate_delete(&self) -> oneshot::Sender<ServiceResult<()>> {
        let (tx, rx) = oneshot::channel();
        *self.delete_gate.lock().unwrap() = Some(rx);
        tx
    }
}

#[async_trait]
impl StaffZoneService for ScriptedService {
    async fn get_all_zones(&self) -> ServiceResult<Vec<Zone>> {
        self.record(Call::GetZones);
        if let Some(e) = self.zones_error.lock().unwrap().clone() {
            return Err(e);
        }
        Ok(self.zones.lock().unwrap().clone())
    }

    async fn get_staff_by_zone_id(&self, zone_id: &str) -> ServiceResult<Vec<StaffZoneAssignment>> {
        self.record(Call::GetStaff(zone_id.to_string()));
        if let Some(e) = self.staff_errors.lock().unwrap().get(zone_id).cloned() {
            return Err(e);
        }
        Ok(self
            .staff
            .lock()
            .unwrap()
            .get(zone_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn move_staff_to_zone(
        &self,
        assignment_id: &str,
        staff_id: &str,
        target_zone_id: &str,
    ) -> ServiceResult<()> {
        self.record(Call::Move {
            assignment_id: assignment_id.to_string(),
            staff_id: staff_id.to_string(),
            zone_id: target_zone_id.to_string(),
        });
        let gate = self.move_gates.lock().unwrap().remove(assignment_id);
        if let Some(gate) = gate {
            return gate
                .await
                .unwrap_or_else(|_| Err(ServiceError::Transport("gate dropped".into())));
        }
        self.move_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }

    async fn delete_staff_zone(&self, assignment_id: &str, cascade: bool) -> ServiceResult<()> {
        self.record(Call::Delete {
            assignment_id: assignment_id.to_string(),
            cascade,
        });
        let gate = self.delete_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            return gate
                .await
                .unwrap_or_else(|_| Err(ServiceError::Transport("gate dropped".into())));
        }
        self.delete_result.lock().unwrap().clone().unwrap_or(Ok(()))
    }

    async fn create_staff_zone(&self, staff_id: &str, zone_id: &str) -> ServiceResult<()> {
        self.record(Call::Create {
            staff_id: staff_id.to_string(),
            zone_id: zone_id.to_string(),
        });
        let result = self.create_result.lock().unwrap().clone().unwrap_or(Ok(()));
        if result.is_ok() {
            // 模拟服务端分配 id
            let zone = self
                .zones
                .lock()
                .unwrap()
                .iter()
                .find(|z| z.id == zone_id)
                .cloned();
            let staff = self
                .all_staff
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.id == staff_id)
                .cloned();
            if let (Some(zone), Some(staff)) = (zone, staff) {
                let id = format!("new-{}-{}", staff_id, zone_id);
                self.staff
                    .lock()
                    .unwrap()
                    .entry(zone_id.to_string())
                    .or_default()
                    .push(StaffZoneAssignment::new(id, staff, zone));
            }
        }
        result
    }

    async fn get_all_staff(&self) -> ServiceResult<Vec<Staff>> {
        self.record(Call::GetAllStaff);
        Ok(self.all_staff.lock().unwrap().clone())
    }
}

// ========================================================================
// Fixtures
// ========================================================================

fn kitchen() -> Zone {
    Zone::new("z1", "Kitchen", ZoneType::KitchenArea)
}

fn hall() -> Zone {
    Zone::new("z2", "Hall", ZoneType::DiningArea)
}

fn alice() -> Staff {
    Staff::new("s1", "Alice")
}

fn alice_assignment() -> StaffZoneAssignment {
    StaffZoneAssignment::new("a1", alice(), kitchen())
}

/// z1 "Kitchen" with Alice, z2 "Hall" empty
fn scenario_service() -> Arc<ScriptedService> {
    let service = ScriptedService::default();
    service.set_zone(kitchen(), vec![alice_assignment()]);
    service.set_zone(hall(), vec![]);
    *service.all_staff.lock().unwrap() = vec![alice(), Staff::new("s2", "Bob")];
    Arc::new(service)
}

/// z1 "Kitchen" with Alice, Bob and Carol, z2 "Hall" empty
fn crowded_service() -> Arc<ScriptedService> {
    let service = ScriptedService::default();
    service.set_zone(
        kitchen(),
        vec![
            alice_assignment(),
            StaffZoneAssignment::new("a2", Staff::new("s2", "Bob"), kitchen()),
            StaffZoneAssignment::new("a3", Staff::new("s3", "Carol"), kitchen()),
        ],
    );
    service.set_zone(hall(), vec![]);
    Arc::new(service)
}

async fn mounted(service: &Arc<ScriptedService>) -> StaffZoneController<ScriptedService> {
    let controller = StaffZoneController::new(service.clone(), BoardConfig::default());
    controller.mount().await.unwrap();
    controller
}

fn staff_ids(board: &ZoneBoard, zone_id: &str) -> Vec<String> {
    board
        .staff_of(zone_id)
        .iter()
        .map(|a| a.staff_id.clone())
        .collect()
}

fn drained(rx: &mut broadcast::Receiver<Notification>) -> Vec<Notification> {
    let mut out = Vec::new();
    while let Ok(n) = rx.try_recv() {
        out.push(n);
    }
    out
}

/// Yield until `cond` holds
async fn wait_until(mut cond: impl FnMut() -> bool) {
    for _ in 0..1000 {
        if cond() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}
