//! Primi core: pure state machine for the draw-and-notify client.
mod effect;
mod menu;
mod msg;
mod registry;
mod state;
mod update;

pub use effect::Effect;
pub use menu::MenuAction;
pub use msg::Msg;
pub use registry::{NotificationId, NotificationRegistry};
pub use state::{ClientState, StreamPhase};
pub use update::update;
