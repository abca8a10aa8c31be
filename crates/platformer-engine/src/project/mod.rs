pub mod document;

pub use document::{ProjectScene, Resolution, SceneSettings};
