//! Core library for the pci-analysis command line application.
//!
//! The library turns the spreadsheet exports of a pet boarding and daycare
//! business into occupancy, vaccination and booking-gap reports. Spreadsheet
//! and CSV adapters live under [`pci::analysis::io`], the row types inside
//! [`pci::analysis::model`], the per-export parsers in
//! [`pci::analysis::boarding`], [`pci::analysis::daycare`] and
//! [`pci::analysis::vaccination`], and the report orchestration under
//! [`pci::analysis::report`].

pub mod pci;

pub use pci::analysis::{
    ReportError, Result, aggregate, boarding, bookings, config, daycare, error, io, model, report,
    table, vaccination, window,
};
