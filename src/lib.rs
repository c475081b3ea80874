pub mod args;
pub mod config;
pub mod driver;
pub mod error;
pub mod inspect;
pub mod logging;
pub mod report;
pub mod session;
pub mod wait;

pub use config::Config;
pub use driver::PageDriver;
pub use error::{DriverError, InspectError};
pub use inspect::{InspectionResult, PlayerType};
pub use report::Report;
pub use session::Outcome;
