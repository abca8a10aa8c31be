pub mod behavior;
pub mod collision;
pub mod scene;
pub mod time;
