//! Line-oriented command scripts driving the studio headlessly.
//!
//! ```text
//! # comment
//! set hpr.heading 400
//! set position.coord [1, 2]
//! drag position.lat 0.75
//! frame
//! print
//! ```

use std::fmt;

use serde_json::Value;

// ── ScriptError ───────────────────────────────────────────────────────────

/// A parse error in a studio script.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptError {
    pub message: String,
    /// 1-based source line number.
    pub line: usize,
    /// 1-based column (in characters) within the line.
    pub col: usize,
}

impl ScriptError {
    fn new(msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self { message: msg.into(), line, col }
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "script error at {}:{}: {}", self.line, self.col, self.message)
    }
}

impl std::error::Error for ScriptError {}

// ── Target ────────────────────────────────────────────────────────────────

/// Property addressed by `set` and `drag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    HprAngles,
    HprHeading,
    HprPitch,
    HprRoll,
    PositionCoord,
    PositionLat,
    PositionLng,
    PositionAlt,
}

impl Target {
    pub const ALL: [Target; 8] = [
        Target::HprAngles,
        Target::HprHeading,
        Target::HprPitch,
        Target::HprRoll,
        Target::PositionCoord,
        Target::PositionLat,
        Target::PositionLng,
        Target::PositionAlt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Target::HprAngles => "hpr.angles",
            Target::HprHeading => "hpr.heading",
            Target::HprPitch => "hpr.pitch",
            Target::HprRoll => "hpr.roll",
            Target::PositionCoord => "position.coord",
            Target::PositionLat => "position.lat",
            Target::PositionLng => "position.lng",
            Target::PositionAlt => "position.alt",
        }
    }

    /// Whole-triple targets have no slider.
    pub fn is_field(self) -> bool {
        !matches!(self, Target::HprAngles | Target::PositionCoord)
    }

    fn parse(s: &str) -> Option<Target> {
        Target::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Command ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Write a raw JSON value through a control setter.
    Set { target: Target, value: Value },
    /// Drag a slider to `fraction` of its track.
    Drag { target: Target, fraction: f32 },
    /// Render one frame.
    Frame,
    /// Print the scene readout.
    Print,
}

/// A command with the line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub line: usize,
    pub command: Command,
}

// ── parsing ───────────────────────────────────────────────────────────────

/// Parse a whole script. Stops at the first error.
pub fn parse(src: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (i, text) in src.lines().enumerate() {
        let mut line = LineCursor::new(text, i + 1);
        if let Some(command) = line.command()? {
            steps.push(Step { line: i + 1, command });
        }
    }
    Ok(steps)
}

/// Word scanner over one line. Tracks the byte offset so errors can report
/// a character column.
struct LineCursor<'s> {
    text: &'s str,
    line: usize,
    pos: usize,
}

impl<'s> LineCursor<'s> {
    fn new(text: &'s str, line: usize) -> Self {
        Self { text, line, pos: 0 }
    }

    fn col_at(&self, byte: usize) -> usize {
        self.text[..byte].chars().count() + 1
    }

    fn err_at(&self, byte: usize, msg: impl Into<String>) -> ScriptError {
        ScriptError::new(msg, self.line, self.col_at(byte))
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.text[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn at_end(&mut self) -> bool {
        self.skip_whitespace();
        let rest = &self.text[self.pos..];
        rest.is_empty() || rest.starts_with('#')
    }

    /// Next whitespace-delimited word and its byte offset.
    fn word(&mut self) -> Option<(usize, &'s str)> {
        if self.at_end() {
            return None;
        }
        let text = self.text;
        let start = self.pos;
        let rest = &text[start..];
        let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        self.pos += len;
        Some((start, &rest[..len]))
    }

    fn expect_end(&mut self) -> Result<(), ScriptError> {
        if self.at_end() {
            Ok(())
        } else {
            Err(self.err_at(self.pos, "unexpected trailing input"))
        }
    }

    fn target(&mut self, verb: &str) -> Result<(usize, Target), ScriptError> {
        let (at, name) = self
            .word()
            .ok_or_else(|| self.err_at(self.text.len(), format!("`{verb}` needs a target")))?;
        let target = Target::parse(name).ok_or_else(|| self.err_at(at, format!("unknown target `{name}`")))?;
        Ok((at, target))
    }

    fn command(&mut self) -> Result<Option<Command>, ScriptError> {
        let Some((at, verb)) = self.word() else {
            return Ok(None);
        };
        let command = match verb {
            "set" => {
                let (_, target) = self.target(verb)?;
                Command::Set { target, value: self.json()? }
            }
            "drag" => {
                let (target_at, target) = self.target(verb)?;
                if !target.is_field() {
                    return Err(self.err_at(target_at, format!("`{target}` has no slider")));
                }
                let (num_at, num) = self
                    .word()
                    .ok_or_else(|| self.err_at(self.text.len(), "`drag` needs a fraction"))?;
                let fraction: f32 = num
                    .parse()
                    .map_err(|_| self.err_at(num_at, format!("invalid fraction `{num}`")))?;
                if !(0.0..=1.0).contains(&fraction) {
                    return Err(self.err_at(num_at, format!("fraction {num} outside [0, 1]")));
                }
                self.expect_end()?;
                Command::Drag { target, fraction }
            }
            "frame" => {
                self.expect_end()?;
                Command::Frame
            }
            "print" => {
                self.expect_end()?;
                Command::Print
            }
            other => return Err(self.err_at(at, format!("unknown command `{other}`"))),
        };
        Ok(Some(command))
    }

    /// The rest of the line as one JSON value.
    fn json(&mut self) -> Result<Value, ScriptError> {
        self.skip_whitespace();
        let text = self.text;
        let start = self.pos;
        let src = text[start..].trim_end();
        if src.is_empty() {
            return Err(self.err_at(start, "`set` needs a value"));
        }
        self.pos = self.text.len();
        serde_json::from_str(src).map_err(|e| {
            let col = self.col_at(start) + e.column().saturating_sub(1);
            ScriptError::new(format!("invalid value: {e}"), self.line, col)
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_every_command_kind() {
        let src = "\
# demo
set hpr.heading 400

set position.lat \"91\"   
set position.coord [1, 2]
drag hpr.roll 0.25  # grab
frame
print
";
        let steps = parse(src).unwrap();
        let commands: Vec<_> = steps.iter().map(|s| (s.line, s.command.clone())).collect();
        assert_eq!(
            commands,
            vec![
                (2, Command::Set { target: Target::HprHeading, value: json!(400) }),
                (4, Command::Set { target: Target::PositionLat, value: json!("91") }),
                (5, Command::Set { target: Target::PositionCoord, value: json!([1, 2]) }),
                (6, Command::Drag { target: Target::HprRoll, fraction: 0.25 }),
                (7, Command::Frame),
                (8, Command::Print),
            ]
        );
    }

    #[test]
    fn set_takes_the_rest_of_the_line_verbatim() {
        let steps = parse("set hpr.angles {\"a\": \"# not a comment\"}").unwrap();
        assert_eq!(steps[0].command, Command::Set { target: Target::HprAngles, value: json!({"a": "# not a comment"}) });
    }

    #[test]
    fn unknown_command_reports_column() {
        let err = parse("frame\n   jump hpr.heading 1").unwrap_err();
        assert_eq!((err.line, err.col), (2, 4));
        assert!(err.message.contains("jump"));
    }

    #[test]
    fn unknown_target_reports_column() {
        let err = parse("set hpr.yaw 1").unwrap_err();
        assert_eq!((err.line, err.col), (1, 5));
    }

    #[test]
    fn bad_json_points_into_the_value() {
        let err = parse("set hpr.heading [1, 2,,]").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.col > 17, "col {}", err.col);
        assert!(err.message.starts_with("invalid value"));
    }

    #[test]
    fn missing_value_is_an_error() {
        let err = parse("set hpr.pitch   ").unwrap_err();
        assert_eq!((err.line, err.col), (1, 17));
    }

    #[test]
    fn drag_rejects_whole_triples_and_bad_fractions() {
        assert_eq!(parse("drag hpr.angles 0.5").unwrap_err().col, 6);
        assert_eq!(parse("drag position.alt 1.5").unwrap_err().col, 19);
        assert_eq!(parse("drag position.alt half").unwrap_err().col, 19);
        assert!(parse("drag position.alt").is_err());
    }

    #[test]
    fn trailing_input_is_rejected() {
        let err = parse("print now").unwrap_err();
        assert_eq!((err.line, err.col), (1, 7));
    }

    #[test]
    fn display_includes_position() {
        let err = ScriptError::new("boom", 3, 9);
        assert_eq!(err.to_string(), "script error at 3:9: boom");
    }
}
