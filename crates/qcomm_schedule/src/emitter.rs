//! Slice emission and read-back
//!
//! Renders a finished schedule for downstream tools. Emitters never reorder,
//! merge or split slices. The text form is one line per slice with
//! operations written as `NAME(q0 q1 ...)`.

use crate::schedule::Schedule;
use crate::slice::Slice;
use qcomm_core::stream::parse_line;
use qcomm_core::{QcommError, QcommResult};
use std::io::Write;

/// Renders a schedule to an external representation
pub trait SliceEmitter {
    /// Write the schedule to `out`
    fn emit(&self, schedule: &Schedule, out: &mut dyn Write) -> QcommResult<()>;

    /// Render the schedule into a string
    fn render(&self, schedule: &Schedule) -> QcommResult<String> {
        let mut buf = Vec::new();
        self.emit(schedule, &mut buf)?;
        String::from_utf8(buf).map_err(|err| QcommError::InternalError(err.to_string()))
    }
}

// ============================================================================
// Text
// ============================================================================

/// Reference line-per-slice text rendering
#[derive(Debug, Clone, Copy, Default)]
pub struct TextEmitter;

impl SliceEmitter for TextEmitter {
    fn emit(&self, schedule: &Schedule, out: &mut dyn Write) -> QcommResult<()> {
        for slice in schedule.slices() {
            writeln!(out, "{}", slice)?;
        }
        Ok(())
    }
}

/// Shorthand for the reference text rendering
pub fn render_text(schedule: &Schedule) -> String {
    schedule
        .slices()
        .iter()
        .map(|slice| format!("{}\n", slice))
        .collect()
}

/// Read slices back from the text rendering
///
/// Every non-blank line is one slice. Slice contents are taken as written;
/// call `Schedule::verify` to check exclusivity.
pub fn parse_slices(text: &str) -> QcommResult<Schedule> {
    let mut slices = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let ops = parse_line(line).map_err(|err| match err {
            QcommError::UpstreamIngestion(msg) => {
                QcommError::UpstreamIngestion(format!("line {}: {}", line_no + 1, msg))
            }
            other => other,
        })?;

        if !ops.is_empty() {
            slices.push(Slice::from_ops(ops));
        }
    }

    log::debug!("read {} slices", slices.len());
    Ok(Schedule::from_slices(slices))
}

// ============================================================================
// JSON
// ============================================================================

/// JSON rendering: array of slices, each an array of `{name, qubits}`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEmitter {
    /// Pretty-print with indentation
    pub pretty: bool,
}

impl JsonEmitter {
    /// Compact JSON emitter
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Indented JSON emitter
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl SliceEmitter for JsonEmitter {
    fn emit(&self, schedule: &Schedule, out: &mut dyn Write) -> QcommResult<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *out, schedule.slices())?;
        } else {
            serde_json::to_writer(&mut *out, schedule.slices())?;
        }
        writeln!(out)?;
        Ok(())
    }
}

/// Read slices back from the JSON rendering
pub fn parse_json_slices(json: &str) -> QcommResult<Schedule> {
    let slices: Vec<Slice> = serde_json::from_str(json)
        .map_err(|err| QcommError::UpstreamIngestion(format!("invalid JSON slices: {}", err)))?;
    Ok(Schedule::from_slices(slices))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::form_slices;
    use qcomm_core::{GateOp, StreamBuilder};

    fn two_layer_schedule() -> Schedule {
        let ops = StreamBuilder::new().x(0).x(1).cx(0, 1).build().into_ops();
        form_slices(&ops).unwrap()
    }

    #[test]
    fn test_text_rendering() {
        let schedule = two_layer_schedule();
        assert_eq!(render_text(&schedule), "X(0) X(1)\nCX(0 1)\n");
        assert_eq!(TextEmitter.render(&schedule).unwrap(), render_text(&schedule));
    }

    #[test]
    fn test_empty_schedule_renders_nothing() {
        let schedule = Schedule::empty();
        assert_eq!(render_text(&schedule), "");
        assert_eq!(TextEmitter.render(&schedule).unwrap(), "");
    }

    #[test]
    fn test_parse_slices() {
        let schedule = parse_slices("X(0) X(1)\n\nCX(0 1)\n").unwrap();
        assert_eq!(schedule, two_layer_schedule());
    }

    #[test]
    fn test_parse_slices_original_spacing() {
        // the original simulator output has a trailing space per gate
        let schedule = parse_slices("G2(0 3) G1(1) \nG1(3) \n").unwrap();
        assert_eq!(schedule.makespan(), 2);
        assert_eq!(schedule.slices()[0].ops()[0], GateOp::pair("G2", 0, 3));
    }

    #[test]
    fn test_parse_slices_malformed() {
        let err = parse_slices("X(0)\nCX 0 1\n").unwrap_err();
        match err {
            QcommError::UpstreamIngestion(msg) => assert!(msg.starts_with("line 2")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_json_rendering() {
        let schedule = two_layer_schedule();
        let json = JsonEmitter::compact().render(&schedule).unwrap();
        assert_eq!(
            json.trim_end(),
            r#"[[{"name":"X","qubits":[0]},{"name":"X","qubits":[1]}],[{"name":"CX","qubits":[0,1]}]]"#
        );
        assert_eq!(parse_json_slices(&json).unwrap(), schedule);
    }

    #[test]
    fn test_json_pretty_reads_back() {
        let schedule = two_layer_schedule();
        let json = JsonEmitter::pretty().render(&schedule).unwrap();
        assert!(json.contains('\n'));
        assert_eq!(parse_json_slices(&json).unwrap(), schedule);
    }
}
