pub mod court;
pub mod events;
pub mod lineup;
pub mod team;

pub use court::CourtPoint;
pub use events::{ActionQuality, ActionResult, ActionType, LogEntry};
pub use lineup::{Lineup, Position};
pub use team::{TeamConfig, TeamSide};
