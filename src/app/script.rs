use crate::core::command::Command;
use crate::core::report;
use crate::core::session::EditingSession;
use crate::core::{AnalysisOutcome, ComponentValue, EditOutcome};
use crate::utils::error::{ErrorSeverity, Result};
use std::io::{BufRead, Write};

/// 腳本執行摘要
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptSummary {
    pub executed: usize,
    pub failed: usize,
    pub last_outcome: Option<AnalysisOutcome>,
}

/// 對單一編輯 session 重播指令腳本
///
/// 可恢復的錯誤會標上行號寫到輸出後繼續執行，只有系統錯誤會中止
pub struct ScriptRunner {
    session: EditingSession,
    json: bool,
    last_outcome: Option<AnalysisOutcome>,
}

impl ScriptRunner {
    pub fn new(session: EditingSession, json: bool) -> Self {
        Self {
            session,
            json,
            last_outcome: None,
        }
    }

    pub fn session(&self) -> &EditingSession {
        &self.session
    }

    pub fn execute(&mut self, command: Command) -> Result<String> {
        let text = match command {
            Command::SelectTool(tool) => {
                self.session.select_tool(tool);
                format!("Tool: {}", tool)
            }
            Command::Click { x, y } => match self.session.apply_at(x, y)? {
                EditOutcome::WireToggled { present: true } => format!("Wire added at ({}, {})", x, y),
                EditOutcome::WireToggled { present: false } => {
                    format!("Wire removed at ({}, {})", x, y)
                }
                EditOutcome::Placed(component) => {
                    let (name, value) = match component.value {
                        ComponentValue::Resistor { resistance } => ("resistance", resistance),
                        ComponentValue::Battery { voltage } => ("voltage", voltage),
                    };
                    format!(
                        "Placed {} at {} ({} {:.2})",
                        component.kind(),
                        component.at,
                        name,
                        value
                    )
                }
                EditOutcome::Deleted(removed) if removed.is_empty() => {
                    format!("Nothing to delete at ({}, {})", x, y)
                }
                EditOutcome::Deleted(_) => format!("Cleared ({}, {})", x, y),
            },
            Command::SetProperty { kind, x, y, value } => {
                self.session.set_property(kind, x, y, value)?;
                format!("{} at ({}, {}) set to {:.2}", kind.property_name(), x, y, value)
            }
            Command::Analyze => {
                let outcome = self.session.analyze()?;
                self.last_outcome = Some(outcome);
                if self.json {
                    report::outcome_to_json(&outcome)?
                } else {
                    report::format_outcome(&outcome)
                }
            }
            Command::Resize(size) => {
                self.session.resize(size)?;
                format!("Grid resized to {}x{}", size, size)
            }
            Command::Clear => {
                self.session.clear()?;
                "Grid cleared".to_string()
            }
            Command::Show => report::snapshot_to_json(&self.session.snapshot())?,
        };
        Ok(text)
    }

    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        out: &mut W,
    ) -> Result<ScriptSummary> {
        let mut summary = ScriptSummary::default();
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;

            // 非 UTF-8 的位元組換成替代字元，交給解析器當成錯誤的一行
            let raw = String::from_utf8_lossy(&buf);
            let line = raw.trim_end_matches(&['\r', '\n'][..]);

            let result = Command::parse_line(line).and_then(|command| match command {
                Some(command) => self.execute(command).map(Some),
                None => Ok(None),
            });

            match result {
                Ok(None) => continue,
                Ok(Some(text)) => {
                    summary.executed += 1;
                    writeln!(out, "{}", text)?;
                }
                Err(e) if e.severity() < ErrorSeverity::Critical => {
                    summary.failed += 1;
                    tracing::warn!("Line {} failed: {}", line_no, e);
                    writeln!(out, "❌ line {}: {}", line_no, e.user_friendly_message())?;
                }
                Err(e) => return Err(e),
            }
        }

        summary.last_outcome = self.last_outcome;
        tracing::info!(
            "Script finished: {} commands, {} failed",
            summary.executed,
            summary.failed
        );
        Ok(summary)
    }
}
