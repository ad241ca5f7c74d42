//! Staff Board - staff-to-zone assignment screen state
//!
//! Holds the zone → staff map for the back-office staff-zone screen and
//! drives drag-and-drop reassignment against a [`StaffZoneService`]:
//! optimistic moves with rollback, confirmed deletions, and adding new
//! assignments.
//!
//! [`StaffZoneService`]: office_client::StaffZoneService

pub mod board;
pub mod config;
pub mod controller;
pub mod dialog;
pub mod dnd;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod logger;
pub mod notify;
pub mod optimistic;

pub use board::ZoneBoard;
pub use config::BoardConfig;
pub use controller::{AddOutcome, DeleteOutcome, DragOutcome, DropOutcome, InteractionView, StaffZoneController};
pub use dnd::{DELETE_TARGET_ID, DragEvent, DragSurface, DropTargetId, PointerSurface};
pub use error::{BoardError, BoardResult};
pub use fetcher::{PageState, ZoneFetcher};
pub use filter::{BoardStats, ZoneFilter};
pub use notify::{Notification, NotificationLevel, Notifier};
