pub mod dictionary;
pub mod render;
pub mod scoring;
pub mod session;

// Re-export main components
pub use dictionary::*;
pub use render::{RenderMode, render};
pub use scoring::*;
pub use session::*;
