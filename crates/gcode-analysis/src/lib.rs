#![warn(missing_docs)]

//! Print time and filament estimates from slicer G-code comments.
//!
//! Slicers such as Slic3r and PrusaSlicer write their estimates into the
//! G-code as comment lines. This crate scans a file for those comments,
//! normalizes the values and returns a single [`AnalysisResult`].
//!
//! Recognized comments:
//!
//! ```text
//! ; filament used = 1234.5mm (12.3cm3)
//! ; filament used [mm] = 100.0, 200.0
//! ; filament used [cm3] = 0.8, 1.6
//! ; estimated printing time (normal mode) = 1h 2m 3s
//! ```
//!
//! # Example
//!
//! ```no_run
//! use gcode_analysis::analyze_gcode;
//!
//! match analyze_gcode("benchy.gcode")? {
//!     Some(analysis) => println!("{}", analysis.to_json()),
//!     None => println!("no slicer estimates"),
//! }
//! # Ok::<(), gcode_analysis::AnalysisError>(())
//! ```

pub mod analysis;
pub mod duration;
pub mod error;
pub mod rules;
pub mod scanner;
pub mod settings;

pub use analysis::{Accumulator, AnalysisResult, ToolFilament};
pub use duration::{parse_duration, TimeUnit};
pub use error::{AnalysisError, Result};
pub use rules::{Rule, RULES};
pub use scanner::{
    analyze_gcode, analyze_gcode_from_reader, analyze_gcode_from_str, analyze_gcode_with,
};
pub use settings::AnalyzerSettings;
