//! Analysis result types and their assembly.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Filament usage for a single tool (extruder).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ToolFilament {
    /// Filament length (mm).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    /// Filament volume (cm³).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

/// Normalized estimates extracted from a G-code file.
///
/// Serializes to the shape hosts expect:
///
/// ```json
/// {
///   "estimatedPrintTime": 5400.0,
///   "filament": { "tool0": { "length": 1234.5, "volume": 12.3 } }
/// }
/// ```
///
/// Absent fields are omitted rather than written as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Estimated print time (seconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_print_time: Option<f64>,
    /// Per-tool filament usage, indexed by tool number.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        serialize_with = "serialize_tools"
    )]
    pub filament: Vec<ToolFilament>,
}

impl AnalysisResult {
    /// Filament usage for a tool, if known.
    pub fn tool(&self, index: usize) -> Option<&ToolFilament> {
        self.filament.get(index)
    }

    /// Convert to a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        // Keys are always strings, so conversion cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Tool index `i` is written under the key `tool<i>`, in index order.
fn serialize_tools<S>(tools: &[ToolFilament], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(tools.len()))?;
    for (index, tool) in tools.iter().enumerate() {
        map.serialize_entry(&format!("tool{index}"), tool)?;
    }
    map.end()
}

/// Latest values seen for each field during a scan.
///
/// Every setter overwrites: the last matching line in the file wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accumulator {
    filament_length: Option<Vec<f64>>,
    filament_volume: Option<Vec<f64>>,
    print_time: Option<f64>,
}

impl Accumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the per-tool filament lengths (mm). Empty sequences are ignored.
    pub fn set_filament_length(&mut self, lengths: Vec<f64>) {
        if !lengths.is_empty() {
            self.filament_length = Some(lengths);
        }
    }

    /// Replace the per-tool filament volumes (cm³). Empty sequences are ignored.
    pub fn set_filament_volume(&mut self, volumes: Vec<f64>) {
        if !volumes.is_empty() {
            self.filament_volume = Some(volumes);
        }
    }

    /// Replace the estimated print time (seconds).
    pub fn set_print_time(&mut self, seconds: f64) {
        self.print_time = Some(seconds);
    }

    /// True if no field has been set.
    pub fn is_empty(&self) -> bool {
        self.filament_length.is_none()
            && self.filament_volume.is_none()
            && self.print_time.is_none()
    }

    /// Assemble the result, or `None` if nothing was ever recognized.
    ///
    /// Length and volume sequences are independent; a tool entry exists when
    /// either of them has a value at its index.
    pub fn finish(self) -> Option<AnalysisResult> {
        if self.is_empty() {
            return None;
        }

        let lengths = self.filament_length.unwrap_or_default();
        let volumes = self.filament_volume.unwrap_or_default();
        let tool_count = lengths.len().max(volumes.len());

        let filament = (0..tool_count)
            .map(|i| ToolFilament {
                length: lengths.get(i).copied(),
                volume: volumes.get(i).copied(),
            })
            .collect();

        Some(AnalysisResult {
            estimated_print_time: self.print_time,
            filament,
        })
    }
}
