pub mod keys;
pub mod queue;

pub use keys::{Action, ControlFrame, KeyBindings, KeyState};
pub use queue::{InputEvent, InputQueue};
