pub mod aggregate;
pub mod boarding;
pub mod bookings;
pub mod config;
pub mod daycare;
pub mod error;
pub mod io;
pub mod model;
pub mod report;
pub mod table;
pub mod vaccination;
pub mod window;

pub use error::{ReportError, Result};
