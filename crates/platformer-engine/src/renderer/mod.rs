pub mod instance;

pub use instance::{ObjectInstance, SnapshotBuffer};
