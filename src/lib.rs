//! ICH risk score for patients with acute myocardial infarction complicated
//! by cardiogenic shock (AMI-CS).
//!
//! The [`scoring`] module is the pure core: a point table of risk factors and
//! a classifier mapping the total to one of four published risk bands.
//! Everything else is presentation and configuration.

pub mod config;
pub mod logging;
pub mod output;
pub mod scoring;
pub mod stderr_buffer;
pub mod tui;
