pub mod branches;
pub mod tags;
pub mod workflow;

pub use branches::*;
pub use tags::*;
pub use workflow::{AreaReport, Stage};
