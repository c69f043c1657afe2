//! Line scanner: reads G-code and collects slicer estimates.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::analysis::{Accumulator, AnalysisResult};
use crate::error::Result;
use crate::rules::RULES;
use crate::settings::AnalyzerSettings;

/// Analyze a G-code file with default settings.
///
/// # Returns
///
/// `Ok(None)` if the file contains no recognized slicer comment.
pub fn analyze_gcode(path: impl AsRef<Path>) -> Result<Option<AnalysisResult>> {
    analyze_gcode_with(path, &AnalyzerSettings::default())
}

/// Analyze a G-code file.
///
/// # Arguments
///
/// * `path` - Path to the G-code file
/// * `settings` - Scanner options
///
/// # Returns
///
/// `Ok(None)` if the file contains no recognized slicer comment.
pub fn analyze_gcode_with(
    path: impl AsRef<Path>,
    settings: &AnalyzerSettings,
) -> Result<Option<AnalysisResult>> {
    settings.validate()?;
    let path = path.as_ref();
    debug!(path = %path.display(), "analyzing G-code");
    let file = File::open(path)?;
    analyze_gcode_from_reader(BufReader::new(file), settings)
}

/// Analyze G-code held in memory, with default settings.
pub fn analyze_gcode_from_str(text: &str) -> Result<Option<AnalysisResult>> {
    analyze_gcode_from_reader(text.as_bytes(), &AnalyzerSettings::default())
}

/// Analyze G-code from any buffered reader.
///
/// Lines are read as raw bytes. Only lines the settings treat as comments are
/// decoded and matched against [`RULES`]; everything else is skipped. Reaching
/// end of input at any point yields the result for what was read so far.
pub fn analyze_gcode_from_reader<R: BufRead>(
    mut reader: R,
    settings: &AnalyzerSettings,
) -> Result<Option<AnalysisResult>> {
    settings.validate()?;

    let mut acc = Accumulator::new();
    let mut buf = Vec::new();
    let mut line_no = 0;
    let mut comment_lines = 0;
    let mut matches = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        let line = trim_line_ending(&buf);
        if !settings.is_comment_line(line) {
            continue;
        }
        comment_lines += 1;

        let line = String::from_utf8_lossy(line);
        for rule in &RULES {
            if rule.apply(&line, line_no, &mut acc)? {
                matches += 1;
            }
        }
    }

    debug!(lines = line_no, comment_lines, matches, "finished G-code scan");
    Ok(acc.finish())
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
