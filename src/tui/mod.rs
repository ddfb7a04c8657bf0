//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides a medical-themed interface for:
//! - Dashboard with artifact status
//! - Symptom narrative entry (free text or preset cases)
//! - Diagnosis report with explanation trail

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::MedicalTheme;
