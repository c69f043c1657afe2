//! Recognizer rules for slicer metadata comments.
//!
//! Each [`Rule`] pairs a pattern with a handler that stores what it captured
//! in the [`Accumulator`]. The scanner tries every rule, in [`RULES`] order,
//! on every comment line.

use lazy_regex::{lazy_regex, Lazy, Regex};
use regex::Captures;
use tracing::debug;

use crate::analysis::Accumulator;
use crate::duration::parse_duration;
use crate::error::{AnalysisError, Result};

/// Slic3r and PrusaSlicer < 2.0: `; filament used = 1234.5mm (12.3cm3)`.
static RE_FILAMENT_LEGACY: Lazy<Regex> = lazy_regex!(
    r"^\s*;\s*filament used\s*=\s*([0-9.]+)\s*mm\s*\(\s*([0-9.]+)\s*cm3\s*\)"
);
/// PrusaSlicer >= 2.0: `; filament used [mm] = 100.0, 200.0`.
static RE_FILAMENT_LENGTH: Lazy<Regex> =
    lazy_regex!(r"^\s*;\s*filament used\s*\[mm\]\s*=\s*([0-9., \t]+)");
/// PrusaSlicer >= 2.0: `; filament used [cm3] = 0.2, 0.5`.
static RE_FILAMENT_VOLUME: Lazy<Regex> =
    lazy_regex!(r"^\s*;\s*filament used\s*\[cm3\]\s*=\s*([0-9., \t]+)");
/// `; estimated printing time = 1h 2m 3s`, optionally `(normal mode)`.
static RE_PRINT_TIME: Lazy<Regex> =
    lazy_regex!(r"^\s*;\s*estimated printing time\s*(?:\(normal mode\)\s*)?=\s*(.*)$");

type Handler = fn(&Captures<'_>, usize, &mut Accumulator) -> Result<()>;

/// A comment pattern and what to do when it matches.
pub struct Rule {
    /// Rule name, used in logs.
    pub name: &'static str,
    pattern: &'static Lazy<Regex>,
    handler: Handler,
}

impl Rule {
    /// Try the rule on one line, updating `acc` on a match.
    ///
    /// Returns whether the line matched.
    pub fn apply(&self, line: &str, line_no: usize, acc: &mut Accumulator) -> Result<bool> {
        let Some(caps) = self.pattern.captures(line) else {
            return Ok(false);
        };
        (self.handler)(&caps, line_no, acc)?;
        debug!(rule = self.name, line = line_no, "matched slicer comment");
        Ok(true)
    }
}

/// All recognizers, in the order they are tried.
pub static RULES: [Rule; 4] = [
    Rule {
        name: "filament_legacy",
        pattern: &RE_FILAMENT_LEGACY,
        handler: apply_filament_legacy,
    },
    Rule {
        name: "filament_length",
        pattern: &RE_FILAMENT_LENGTH,
        handler: apply_filament_length,
    },
    Rule {
        name: "filament_volume",
        pattern: &RE_FILAMENT_VOLUME,
        handler: apply_filament_volume,
    },
    Rule {
        name: "print_time",
        pattern: &RE_PRINT_TIME,
        handler: apply_print_time,
    },
];

fn apply_filament_legacy(
    caps: &Captures<'_>,
    line_no: usize,
    acc: &mut Accumulator,
) -> Result<()> {
    let length = parse_number(&caps[1], line_no)?;
    let volume = parse_number(&caps[2], line_no)?;
    acc.set_filament_length(vec![length]);
    acc.set_filament_volume(vec![volume]);
    Ok(())
}

fn apply_filament_length(
    caps: &Captures<'_>,
    line_no: usize,
    acc: &mut Accumulator,
) -> Result<()> {
    acc.set_filament_length(parse_number_list(&caps[1], line_no)?);
    Ok(())
}

fn apply_filament_volume(
    caps: &Captures<'_>,
    line_no: usize,
    acc: &mut Accumulator,
) -> Result<()> {
    acc.set_filament_volume(parse_number_list(&caps[1], line_no)?);
    Ok(())
}

fn apply_print_time(caps: &Captures<'_>, _line_no: usize, acc: &mut Accumulator) -> Result<()> {
    acc.set_print_time(parse_duration(&caps[1]));
    Ok(())
}

fn parse_number(text: &str, line_no: usize) -> Result<f64> {
    let text = text.trim();
    text.parse()
        .map_err(|_| AnalysisError::invalid_number(line_no, text))
}

/// Parse a comma-separated list, one value per tool. Empty items are skipped.
fn parse_number_list(text: &str, line_no: usize) -> Result<Vec<f64>> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| parse_number(item, line_no))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(line: &str) -> (Vec<&'static str>, Accumulator) {
        let mut acc = Accumulator::new();
        let matched = RULES
            .iter()
            .filter_map(|rule| match rule.apply(line, 1, &mut acc) {
                Ok(true) => Some(rule.name),
                Ok(false) => None,
                Err(e) => panic!("unexpected error: {e}"),
            })
            .collect();
        (matched, acc)
    }

    #[test]
    fn test_legacy_filament() {
        let (matched, acc) = run("; filament used = 1234.5mm (12.3cm3)");
        assert_eq!(matched, vec!["filament_legacy"]);

        let result = acc.finish().unwrap();
        assert_eq!(result.tool(0).unwrap().length, Some(1234.5));
        assert_eq!(result.tool(0).unwrap().volume, Some(12.3));
    }

    #[test]
    fn test_legacy_filament_whitespace() {
        let (matched, _) = run(";filament used=1.0 mm ( 2.0 cm3 )");
        assert_eq!(matched, vec!["filament_legacy"]);
    }

    #[test]
    fn test_multi_tool_length() {
        let (matched, acc) = run("; filament used [mm] = 100.0, 200.5, 0.0");
        assert_eq!(matched, vec!["filament_length"]);

        let result = acc.finish().unwrap();
        assert_eq!(result.filament.len(), 3);
        assert_eq!(result.tool(1).unwrap().length, Some(200.5));
        assert_eq!(result.tool(1).unwrap().volume, None);
    }

    #[test]
    fn test_multi_tool_volume() {
        let (matched, acc) = run("; filament used [cm3] = 1.5,2.5");
        assert_eq!(matched, vec!["filament_volume"]);

        let result = acc.finish().unwrap();
        assert_eq!(result.tool(0).unwrap().volume, Some(1.5));
        assert_eq!(result.tool(1).unwrap().volume, Some(2.5));
    }

    #[test]
    fn test_trailing_comma_is_ignored() {
        let (_, acc) = run("; filament used [mm] = 10.0, 20.0, ");
        assert_eq!(acc.finish().unwrap().filament.len(), 2);
    }

    #[test]
    fn test_print_time_with_and_without_mode() {
        let (matched, acc) = run("; estimated printing time (normal mode) = 1h 30m");
        assert_eq!(matched, vec!["print_time"]);
        assert_eq!(acc.finish().unwrap().estimated_print_time, Some(5400.0));

        let (matched, acc) = run("; estimated printing time = 2m 5s");
        assert_eq!(matched, vec!["print_time"]);
        assert_eq!(acc.finish().unwrap().estimated_print_time, Some(125.0));
    }

    #[test]
    fn test_silent_mode_is_not_recognized() {
        let (matched, _) = run("; estimated printing time (silent mode) = 1h 40m");
        assert!(matched.is_empty());
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert!(run("; Filament used = 1mm (1cm3)").0.is_empty());
        assert!(run("; filament used [MM] = 1.0").0.is_empty());
        assert!(run("; Estimated printing time = 1h").0.is_empty());
    }

    #[test]
    fn test_unrelated_comments() {
        assert!(run("; layer_height = 0.2").0.is_empty());
        assert!(run("; filament_type = PLA").0.is_empty());
        assert!(run(";LAYER_CHANGE").0.is_empty());
    }

    #[test]
    fn test_malformed_number_is_an_error() {
        let mut acc = Accumulator::new();
        let err = RULES[1]
            .apply("; filament used [mm] = 1.2.3, 4.0", 7, &mut acc)
            .unwrap_err();
        match err {
            AnalysisError::InvalidNumber { line, value } => {
                assert_eq!(line, 7);
                assert_eq!(value, "1.2.3");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
