//! Reassignment controller
//!
//! Owns the [`ZoneBoard`] and every piece of interaction state on the
//! staff-zone screen. Drag events come in through [`StaffZoneController::handle`];
//! drops onto another zone are applied optimistically and settled when the
//! remote call returns, drops onto the delete target open a confirmation.
//!
//! Locks are held only around synchronous mutation, never across a service
//! call, so independent moves can be in flight at the same time. Lock order
//! is always `interaction` before `board`.

use std::collections::HashSet;
use std::sync::Arc;

use office_client::StaffZoneService;
use serde::Serialize;
use shared::models::{Staff, StaffZoneAssignment, ZoneWithStaff};
use tokio::sync::{Mutex, RwLock, broadcast, mpsc};

use crate::board::ZoneBoard;
use crate::config::BoardConfig;
use crate::dialog::{AddAssignmentDialog, DeleteConfirmation};
use crate::dnd::{DragEvent, DropTargetId};
use crate::error::{BoardError, BoardResult};
use crate::fetcher::{PageState, ZoneFetcher};
use crate::filter::{BoardStats, ZoneFilter};
use crate::notify::{Notification, Notifier};
use crate::optimistic::{ApplyError, OptimisticMove};

const MOVE_FAILED: &str = "Failed to move staff";
const DELETE_FAILED: &str = "Failed to remove staff from zone";
const ADD_FAILED: &str = "Failed to add staff to zone";

/// Result of handling one drag event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Card picked up, overlay shows it
    Started,
    /// Card has a move in flight and cannot be dragged
    Busy,
    /// Pointer moved
    Hovering { over_delete: bool },
    /// Drag aborted
    Cancelled,
    /// Card dropped
    Dropped(DropOutcome),
}

/// What a drop (or direct move request) led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Dropped on empty space
    NoTarget,
    /// Dropped back on its own zone
    SameZone,
    /// Dropped on a zone the board does not know
    UnknownZone,
    /// Dropped on the delete target; confirmation dialog open
    DeletePending,
    /// Assignment vanished from the board before the drop
    NotFound,
    /// A move for this assignment is already in flight
    Busy,
    /// Remote accepted the move
    Committed,
    /// Remote refused or failed; local state reverted
    RolledBack { message: String },
}

/// Result of a confirmed deletion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Failed { message: String },
    /// Another operation on the assignment is in flight; nothing sent
    Busy,
}

/// Result of submitting the add dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// Dialog stays open with this inline error
    Invalid { message: String },
    /// Added remotely, but the reload afterwards failed
    AddedReloadFailed { message: String },
}

/// Interaction state read by the view layer
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionView {
    /// Card shown in the drag overlay
    pub active: Option<StaffZoneAssignment>,
    /// Delete target highlight
    pub over_delete: bool,
    /// Assignments with a move or delete in flight
    pub moving: Vec<String>,
    pub pending_deletion: Option<StaffZoneAssignment>,
    pub add_dialog: AddAssignmentDialog,
}

#[derive(Debug, Default)]
struct Interaction {
    active: Option<StaffZoneAssignment>,
    over_delete: bool,
    /// Assignment ids with a remote move or delete outstanding
    in_flight: HashSet<String>,
    delete_confirmation: DeleteConfirmation,
    add_dialog: AddAssignmentDialog,
}

/// Staff-zone screen controller
pub struct StaffZoneController<S> {
    service: Arc<S>,
    config: BoardConfig,
    fetcher: ZoneFetcher<S>,
    board: RwLock<ZoneBoard>,
    page: RwLock<PageState>,
    interaction: Mutex<Interaction>,
    notifier: Notifier,
}

impl<S: StaffZoneService> StaffZoneController<S> {
    pub fn new(service: Arc<S>, config: BoardConfig) -> Self {
        let notifier = Notifier::new(config.notification_capacity);
        Self {
            fetcher: ZoneFetcher::new(service.clone()),
            service,
            config,
            board: RwLock::new(ZoneBoard::default()),
            page: RwLock::new(PageState::Loading),
            interaction: Mutex::new(Interaction::default()),
            notifier,
        }
    }

    // ========== Loading ==========

    /// Initial load. Same as [`refresh`](Self::refresh).
    pub async fn mount(&self) -> BoardResult<()> {
        self.refresh().await
    }

    /// Re-fetch everything and replace the board wholesale.
    ///
    /// On failure the board is cleared and the page shows the error.
    pub async fn refresh(&self) -> BoardResult<()> {
        *self.page.write().await = PageState::Loading;

        match self.fetcher.fetch().await {
            Ok(board) => {
                *self.board.write().await = board;
                *self.page.write().await = PageState::Ready;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Staff board load failed");
                *self.board.write().await = ZoneBoard::default();
                *self.page.write().await = PageState::Failed(e.user_message());
                Err(e)
            }
        }
    }

    // ========== Readers ==========

    pub async fn board(&self) -> ZoneBoard {
        self.board.read().await.clone()
    }

    pub async fn page_state(&self) -> PageState {
        self.page.read().await.clone()
    }

    pub async fn filtered(&self, filter: &ZoneFilter) -> Vec<ZoneWithStaff> {
        let board = self.board.read().await;
        filter.apply(&board).into_iter().cloned().collect()
    }

    pub async fn stats(&self) -> BoardStats {
        BoardStats::from_board(&*self.board.read().await)
    }

    pub async fn interaction(&self) -> InteractionView {
        let ui = self.interaction.lock().await;
        let mut moving: Vec<String> = ui.in_flight.iter().cloned().collect();
        moving.sort();
        InteractionView {
            active: ui.active.clone(),
            over_delete: ui.over_delete,
            moving,
            pending_deletion: ui.delete_confirmation.pending().cloned(),
            add_dialog: ui.add_dialog.clone(),
        }
    }

    /// Whether the card may be picked up
    pub async fn can_drag(&self, assignment_id: &str) -> bool {
        !self.interaction.lock().await.in_flight.contains(assignment_id)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notifier.subscribe()
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    // ========== Drag events ==========

    pub async fn handle(&self, event: DragEvent) -> DragOutcome {
        match event {
            DragEvent::Start { payload } => self.drag_start(payload).await,
            DragEvent::Over { over } => {
                let over_delete = over.as_ref().is_some_and(DropTargetId::is_delete);
                self.interaction.lock().await.over_delete = over_delete;
                DragOutcome::Hovering { over_delete }
            }
            DragEvent::End { payload, over } => {
                self.finish_drag().await;
                DragOutcome::Dropped(self.settle_drop(payload, over).await)
            }
            DragEvent::Cancel => {
                let mut ui = self.interaction.lock().await;
                ui.active = None;
                ui.over_delete = false;
                DragOutcome::Cancelled
            }
        }
    }

    async fn drag_start(&self, payload: StaffZoneAssignment) -> DragOutcome {
        let mut ui = self.interaction.lock().await;
        if ui.in_flight.contains(&payload.id) {
            tracing::debug!(assignment_id = %payload.id, "Drag refused, move in flight");
            return DragOutcome::Busy;
        }
        tracing::debug!(assignment_id = %payload.id, staff = %payload.staff.full_name, "Drag start");
        ui.active = Some(payload);
        ui.over_delete = false;
        DragOutcome::Started
    }

    /// Clear the overlay and delete highlight of the drag that just ended
    async fn finish_drag(&self) {
        let mut ui = self.interaction.lock().await;
        ui.active = None;
        ui.over_delete = false;
    }

    /// Act on a drop. Leaves drag overlay state alone.
    async fn settle_drop(&self, payload: StaffZoneAssignment, over: Option<DropTargetId>) -> DropOutcome {
        if over.is_some() && self.interaction.lock().await.in_flight.contains(&payload.id) {
            tracing::debug!(assignment_id = %payload.id, "Drop refused, assignment busy");
            return DropOutcome::Busy;
        }

        match over {
            None => DropOutcome::NoTarget,
            Some(DropTargetId::Delete) => {
                if self.request_delete(payload).await {
                    DropOutcome::DeletePending
                } else {
                    DropOutcome::Busy
                }
            }
            Some(DropTargetId::Zone(target)) => {
                self.move_assignment(&payload.staff_id, &payload.id, &target)
                    .await
            }
        }
    }

    // ========== Move ==========

    /// Move an assignment to another zone: apply locally, call the service,
    /// then keep or revert.
    pub async fn move_assignment(
        &self,
        staff_id: &str,
        assignment_id: &str,
        target_zone_id: &str,
    ) -> DropOutcome {
        // snapshot + apply
        let pending = {
            let mut ui = self.interaction.lock().await;
            if ui.in_flight.contains(assignment_id) {
                return DropOutcome::Busy;
            }
            let mut board = self.board.write().await;
            match OptimisticMove::begin(&mut board, staff_id, assignment_id, target_zone_id) {
                Ok(pending) => {
                    ui.in_flight.insert(assignment_id.to_string());
                    pending
                }
                Err(ApplyError::SameZone(_)) => return DropOutcome::SameZone,
                Err(ApplyError::UnknownZone(zone_id)) => {
                    tracing::warn!(zone_id = %zone_id, "Drop on unknown zone ignored");
                    return DropOutcome::UnknownZone;
                }
                Err(ApplyError::AssignmentNotFound(_)) => {
                    tracing::warn!(assignment_id, "Dropped assignment not on board");
                    return DropOutcome::NotFound;
                }
            }
        };

        tracing::debug!(
            assignment_id,
            from = %pending.source_zone_id(),
            to = %pending.target_zone_id(),
            "Move applied locally"
        );

        let result = self
            .service
            .move_staff_to_zone(assignment_id, staff_id, target_zone_id)
            .await;

        // commit or revert
        let mut ui = self.interaction.lock().await;
        ui.in_flight.remove(assignment_id);

        match result {
            Ok(()) => {
                let moved = pending.commit();
                drop(ui);
                tracing::info!(assignment_id, zone_id = %moved.zone_id, "Staff moved");
                self.notifier
                    .success(format!("{} moved to {}", moved.staff.full_name, moved.zone.name));
                DropOutcome::Committed
            }
            Err(e) => {
                let mut board = self.board.write().await;
                if !pending.revert(&mut board) {
                    tracing::warn!(assignment_id, "Source zone gone, assignment not restored");
                }
                drop(board);
                drop(ui);
                let message = e.user_message(MOVE_FAILED);
                tracing::warn!(assignment_id, error = %e, "Move failed, rolled back");
                self.notifier.error(message.clone());
                DropOutcome::RolledBack { message }
            }
        }
    }

    // ========== Delete ==========

    /// Open the delete confirmation for an assignment. Nothing is sent yet.
    ///
    /// Returns `false` without opening anything while the assignment has an
    /// operation in flight.
    pub async fn request_delete(&self, assignment: StaffZoneAssignment) -> bool {
        let mut ui = self.interaction.lock().await;
        if ui.in_flight.contains(&assignment.id) {
            tracing::debug!(assignment_id = %assignment.id, "Delete refused, assignment busy");
            return false;
        }
        tracing::debug!(assignment_id = %assignment.id, "Delete requested, awaiting confirmation");
        ui.delete_confirmation.open(assignment);
        true
    }

    pub async fn cancel_delete(&self) {
        self.interaction.lock().await.delete_confirmation.cancel();
    }

    /// Confirm the pending deletion and call the service.
    ///
    /// The board only changes after the service accepts. The assignment sits
    /// in the in-flight set for the duration of the call.
    pub async fn confirm_delete(&self) -> BoardResult<DeleteOutcome> {
        let assignment = {
            let mut ui = self.interaction.lock().await;
            let assignment = ui
                .delete_confirmation
                .take()
                .ok_or(BoardError::NoPendingDeletion)?;
            if !ui.in_flight.insert(assignment.id.clone()) {
                tracing::warn!(assignment_id = %assignment.id, "Delete refused, assignment busy");
                return Ok(DeleteOutcome::Busy);
            }
            assignment
        };

        let result = self
            .service
            .delete_staff_zone(&assignment.id, self.config.cascade_delete)
            .await;

        // 先移出 in-flight，再落地结果
        let mut ui = self.interaction.lock().await;
        ui.in_flight.remove(&assignment.id);

        match result {
            Ok(()) => {
                let removed = self
                    .board
                    .write()
                    .await
                    .remove(&assignment.staff_id, &assignment.id);
                drop(ui);
                if removed.is_none() {
                    tracing::warn!(assignment_id = %assignment.id, "Deleted assignment was not on board");
                }
                tracing::info!(assignment_id = %assignment.id, "Staff removed from zone");
                self.notifier.success(format!(
                    "{} removed from {}",
                    assignment.staff.full_name, assignment.zone.name
                ));
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => {
                drop(ui);
                let message = e.user_message(DELETE_FAILED);
                tracing::warn!(assignment_id = %assignment.id, error = %e, "Delete failed");
                self.notifier.error(message.clone());
                Ok(DeleteOutcome::Failed { message })
            }
        }
    }

    // ========== Add ==========

    pub async fn open_add_dialog(&self, zone_id: Option<String>) {
        self.interaction.lock().await.add_dialog.open(zone_id);
    }

    pub async fn close_add_dialog(&self) {
        self.interaction.lock().await.add_dialog.close();
    }

    pub async fn select_add_staff(&self, staff_id: &str) -> BoardResult<()> {
        let mut ui = self.interaction.lock().await;
        if !ui.add_dialog.open {
            return Err(BoardError::AddDialogClosed);
        }
        ui.add_dialog.select_staff(staff_id);
        Ok(())
    }

    pub async fn select_add_zone(&self, zone_id: &str) -> BoardResult<()> {
        let mut ui = self.interaction.lock().await;
        if !ui.add_dialog.open {
            return Err(BoardError::AddDialogClosed);
        }
        ui.add_dialog.select_zone(zone_id);
        Ok(())
    }

    /// Staff that can still be added to `zone_id`
    pub async fn add_candidates(&self, zone_id: &str) -> BoardResult<Vec<Staff>> {
        let staff = self
            .service
            .get_all_staff()
            .await
            .map_err(BoardError::FetchCandidates)?;
        let board = self.board.read().await;
        let assigned: HashSet<&str> = board
            .staff_of(zone_id)
            .iter()
            .map(|a| a.staff_id.as_str())
            .collect();
        Ok(staff
            .into_iter()
            .filter(|s| !assigned.contains(s.id.as_str()))
            .collect())
    }

    /// Submit the add dialog. Failures keep the dialog open with the message.
    pub async fn submit_add(&self) -> BoardResult<AddOutcome> {
        let (staff_id, zone_id) = {
            let mut ui = self.interaction.lock().await;
            if !ui.add_dialog.open {
                return Err(BoardError::AddDialogClosed);
            }
            let board = self.board.read().await;
            match ui.add_dialog.validate(&board) {
                Ok(selection) => {
                    ui.add_dialog.submitting = true;
                    ui.add_dialog.error = None;
                    selection
                }
                Err(message) => {
                    ui.add_dialog.fail(message.clone());
                    return Ok(AddOutcome::Invalid { message });
                }
            }
        };

        if let Err(e) = self.service.create_staff_zone(&staff_id, &zone_id).await {
            let message = e.user_message(ADD_FAILED);
            tracing::warn!(staff_id = %staff_id, zone_id = %zone_id, error = %e, "Add assignment failed");
            self.interaction.lock().await.add_dialog.fail(message.clone());
            return Ok(AddOutcome::Invalid { message });
        }

        self.interaction.lock().await.add_dialog.close();
        tracing::info!(staff_id = %staff_id, zone_id = %zone_id, "Staff added to zone");
        self.notifier.success("Staff added to zone");

        // 新记录的 id 由服务端分配，只能重新加载
        match self.refresh().await {
            Ok(()) => Ok(AddOutcome::Added),
            Err(e) => Ok(AddOutcome::AddedReloadFailed {
                message: e.user_message(),
            }),
        }
    }
}

impl<S: StaffZoneService + 'static> StaffZoneController<S> {
    /// Consume drag events until the channel closes.
    ///
    /// Interaction state is updated inline in event order. Only the settling
    /// of a drop runs on its own task, so a pending remote call never blocks
    /// other cards.
    pub async fn drive(self: Arc<Self>, mut events: mpsc::UnboundedReceiver<DragEvent>) {
        while let Some(event) = events.recv().await {
            match event {
                DragEvent::End { payload, over } => {
                    self.finish_drag().await;
                    let controller = self.clone();
                    tokio::spawn(async move {
                        let outcome = controller.settle_drop(payload, over).await;
                        tracing::debug!(?outcome, "Drop settled");
                    });
                }
                event => {
                    self.handle(event).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
