//! Drag-and-drop capability interface
//!
//! The controller never talks to a pointer library. A front end registers
//! staff cards as draggables (id = assignment id, payload = the full
//! assignment) and zones plus the delete icon as drop targets, then forwards
//! the resulting [`DragEvent`]s.
//!
//! [`PointerSurface`] is an in-memory implementation that turns
//! `pick_up / hover / release` calls into events.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;
use shared::models::StaffZoneAssignment;

use crate::board::ZoneBoard;

/// Drop target id of the delete icon
pub const DELETE_TARGET_ID: &str = "delete-target";

/// Drop target identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum DropTargetId {
    Zone(String),
    Delete,
}

impl DropTargetId {
    /// Map a raw target id; only the literal delete id is special.
    pub fn parse(raw: &str) -> Self {
        if raw == DELETE_TARGET_ID {
            Self::Delete
        } else {
            Self::Zone(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Zone(id) => id,
            Self::Delete => DELETE_TARGET_ID,
        }
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete)
    }
}

impl fmt::Display for DropTargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pointer events forwarded to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Start { payload: StaffZoneAssignment },
    Over { over: Option<DropTargetId> },
    End {
        payload: StaffZoneAssignment,
        over: Option<DropTargetId>,
    },
    Cancel,
}

/// Callback receiving drag events
pub type DragHandler = Box<dyn FnMut(&DragEvent) + Send>;

/// Minimal drag-and-drop capability
pub trait DragSurface {
    fn register_draggable(&mut self, id: &str, payload: StaffZoneAssignment);

    fn register_drop_target(&mut self, id: DropTargetId);

    fn on_drag_event(&mut self, handler: DragHandler);

    /// Forget every draggable and drop target (handlers stay)
    fn clear_registrations(&mut self);

    /// Re-register cards and targets after the board changed
    fn sync_from_board(&mut self, board: &ZoneBoard) {
        self.clear_registrations();
        self.register_drop_target(DropTargetId::Delete);
        for zone in board.zones() {
            self.register_drop_target(DropTargetId::Zone(zone.zone.id.clone()));
            for assignment in &zone.staff_zones {
                self.register_draggable(&assignment.id, assignment.clone());
            }
        }
    }
}

/// In-memory [`DragSurface`]
#[derive(Default)]
pub struct PointerSurface {
    draggables: HashMap<String, StaffZoneAssignment>,
    drop_targets: HashSet<DropTargetId>,
    handlers: Vec<DragHandler>,
    active: Option<String>,
    over: Option<DropTargetId>,
}

impl PointerSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn emit(&mut self, event: DragEvent) {
        for handler in self.handlers.iter_mut() {
            handler(&event);
        }
    }

    pub fn is_draggable(&self, id: &str) -> bool {
        self.draggables.contains_key(id)
    }

    pub fn is_drop_target(&self, id: &DropTargetId) -> bool {
        self.drop_targets.contains(id)
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Begin dragging a registered card. Returns false for unknown ids or
    /// when another drag is in progress.
    pub fn pick_up(&mut self, id: &str) -> bool {
        if self.active.is_some() {
            return false;
        }
        let Some(payload) = self.draggables.get(id).cloned() else {
            return false;
        };
        self.active = Some(id.to_string());
        self.over = None;
        self.emit(DragEvent::Start { payload });
        true
    }

    /// Move the pointer over a raw target id (`None` = empty space).
    /// Unregistered ids count as empty space.
    pub fn hover(&mut self, target: Option<&str>) {
        if self.active.is_none() {
            return;
        }
        let over = target
            .map(DropTargetId::parse)
            .filter(|t| self.drop_targets.contains(t));
        self.over = over.clone();
        self.emit(DragEvent::Over { over });
    }

    /// Drop the active card where the pointer is
    pub fn release(&mut self) {
        let Some(id) = self.active.take() else {
            return;
        };
        let over = self.over.take();
        match self.draggables.get(&id).cloned() {
            Some(payload) => self.emit(DragEvent::End { payload, over }),
            // Card unregistered mid-drag
            None => self.emit(DragEvent::Cancel),
        }
    }

    /// Abort the active drag (e.g. Escape)
    pub fn cancel(&mut self) {
        if self.active.take().is_some() {
            self.over = None;
            self.emit(DragEvent::Cancel);
        }
    }
}

impl DragSurface for PointerSurface {
    fn register_draggable(&mut self, id: &str, payload: StaffZoneAssignment) {
        self.draggables.insert(id.to_string(), payload);
    }

    fn register_drop_target(&mut self, id: DropTargetId) {
        self.drop_targets.insert(id);
    }

    fn on_drag_event(&mut self, handler: DragHandler) {
        self.handlers.push(handler);
    }

    fn clear_registrations(&mut self) {
        self.draggables.clear();
        self.drop_targets.clear();
    }
}
