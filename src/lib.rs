//! Procedural renderer and exporter for the Scribe app icon.

pub mod design;
pub mod error;
pub mod export;
pub mod icon;
pub mod logger;
pub mod manifest;
pub mod surface;

pub use design::IconDesign;
pub use error::{IconError, Result};
pub use export::{run, run_with, ExportReport, IconUtil, IconsetPacker, StepOutcome};
pub use icon::{render, render_with};
