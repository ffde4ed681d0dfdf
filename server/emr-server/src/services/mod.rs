//! Server-side services composed over the domain crates

pub mod navigation;

pub use navigation::{NavigationCount, NavigationService};
