use crate::core::{ComponentKind, Tool};
use crate::utils::error::{CircuitError, Result};
use std::str::FromStr;

/// 指令腳本中的一行
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SelectTool(Tool),
    Click { x: usize, y: usize },
    SetProperty {
        kind: ComponentKind,
        x: usize,
        y: usize,
        value: f64,
    },
    Analyze,
    Resize(usize),
    Clear,
    Show,
}

fn parse_error(line: &str, reason: impl Into<String>) -> CircuitError {
    CircuitError::CommandParseError {
        line: line.to_string(),
        reason: reason.into(),
    }
}

fn parse_arg<T: FromStr>(line: &str, name: &str, raw: Option<&str>) -> Result<T> {
    let raw = raw.ok_or_else(|| parse_error(line, format!("missing {}", name)))?;
    raw.parse()
        .map_err(|_| parse_error(line, format!("invalid {} '{}'", name, raw)))
}

impl Command {
    /// 空白行與 `#` 註解回傳 `None`
    pub fn parse_line(line: &str) -> Result<Option<Self>> {
        let content = line.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            return Ok(None);
        }
        content.parse().map(Some)
    }
}

impl FromStr for Command {
    type Err = CircuitError;

    fn from_str(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let verb = parts
            .next()
            .ok_or_else(|| parse_error(line, "empty command"))?
            .to_ascii_lowercase();

        let command = match verb.as_str() {
            "tool" => Command::SelectTool(parse_arg(line, "tool", parts.next())?),
            "click" => Command::Click {
                x: parse_arg(line, "x", parts.next())?,
                y: parse_arg(line, "y", parts.next())?,
            },
            "set" => {
                let kind = match parts.next() {
                    Some("resistance") => ComponentKind::Resistor,
                    Some("voltage") => ComponentKind::Battery,
                    Some(other) => {
                        return Err(parse_error(line, format!("unknown property '{}'", other)))
                    }
                    None => return Err(parse_error(line, "missing property")),
                };
                Command::SetProperty {
                    kind,
                    x: parse_arg(line, "x", parts.next())?,
                    y: parse_arg(line, "y", parts.next())?,
                    value: parse_arg(line, "value", parts.next())?,
                }
            }
            "analyze" => Command::Analyze,
            "resize" => Command::Resize(parse_arg(line, "size", parts.next())?),
            "clear" => Command::Clear,
            "show" => Command::Show,
            other => return Err(parse_error(line, format!("unknown command '{}'", other))),
        };

        if let Some(extra) = parts.next() {
            return Err(parse_error(line, format!("unexpected argument '{}'", extra)));
        }
        Ok(command)
    }
}
