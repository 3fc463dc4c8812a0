//! Migration file parser.
//!
//! Turns the lines of one migration file into a [`MigrationDocument`].
//! Parsing is a single pass of an explicit state machine over the lines;
//! every malformation is reported with the version and, where a specific
//! line is at fault, that exact line. A partial document is never returned.

use crate::document::{MigrationDocument, Section, StatementUnit};
use crate::error::{CoreError, CoreResult};
use crate::grammar::{Grammar, Marker};
use crate::version::Version;

/// Parser state between two lines
#[derive(Debug)]
enum State {
    /// Outside any section
    ScanningSection,
    /// Inside a section, between transactions
    InSection {
        section: Section,
        transactions: usize,
    },
    /// Inside a transaction, between statements
    InStatement {
        section: Section,
        transactions: usize,
    },
    /// Accumulating a statement that spans several lines
    InBlock {
        section: Section,
        transactions: usize,
        lines: Vec<String>,
    },
}

/// Parse the lines of one migration file.
pub fn parse<S: AsRef<str>>(
    version: Version,
    lines: &[S],
    grammar: &Grammar,
) -> CoreResult<MigrationDocument> {
    Parser::new(grammar).parse(version, lines)
}

/// Migration file parser bound to one dialect grammar
pub struct Parser<'g> {
    grammar: &'g Grammar,
}

/// Sections collected so far
#[derive(Default)]
struct Sections {
    forward: Option<Vec<StatementUnit>>,
    reverse: Option<Vec<StatementUnit>>,
}

impl Sections {
    fn slot(&mut self, section: Section) -> &mut Option<Vec<StatementUnit>> {
        match section {
            Section::Migration => &mut self.forward,
            Section::Rollback => &mut self.reverse,
        }
    }

    fn push(&mut self, section: Section, unit: StatementUnit) {
        self.slot(section).get_or_insert_with(Vec::new).push(unit);
    }
}

impl<'g> Parser<'g> {
    /// Create a parser for the given grammar
    pub fn new(grammar: &'g Grammar) -> Self {
        Self { grammar }
    }

    /// Parse the lines of the migration file for `version`.
    pub fn parse<S: AsRef<str>>(
        &self,
        version: Version,
        lines: &[S],
    ) -> CoreResult<MigrationDocument> {
        // Everything before the first marker line is free-form header text.
        let start = lines
            .iter()
            .position(|l| self.grammar.marker(l.as_ref().trim()).is_some())
            .ok_or(CoreError::MissingSection {
                version,
                section: Section::Migration,
            })?;

        let mut sections = Sections::default();
        let mut state = State::ScanningSection;
        for raw in &lines[start..] {
            let raw = raw.as_ref();
            if raw.trim().is_empty() {
                continue;
            }
            state = self.step(version, state, raw, &mut sections)?;
        }

        match state {
            State::ScanningSection => {}
            State::InSection { section, .. } => {
                return Err(CoreError::OpenSection { version, section })
            }
            State::InStatement { section, .. } | State::InBlock { section, .. } => {
                return Err(CoreError::OpenTransaction { version, section })
            }
        }

        let forward = sections.forward.ok_or(CoreError::MissingSection {
            version,
            section: Section::Migration,
        })?;
        let reverse = sections.reverse.ok_or(CoreError::MissingSection {
            version,
            section: Section::Rollback,
        })?;
        Ok(MigrationDocument::new(version, forward, reverse))
    }

    /// Consume one non-blank line
    fn step(
        &self,
        version: Version,
        state: State,
        raw: &str,
        sections: &mut Sections,
    ) -> CoreResult<State> {
        let g = self.grammar;
        let line = raw.trim();
        let marker = g.marker(line);
        let invalid = |reason: String| CoreError::InvalidFormat {
            version,
            line: line.to_string(),
            reason,
        };

        match state {
            State::ScanningSection => match marker {
                Some(Marker::Start(section)) => {
                    if sections.slot(section).is_some() {
                        return Err(invalid(format!("duplicate {} section", section)));
                    }
                    *sections.slot(section) = Some(Vec::new());
                    Ok(State::InSection {
                        section,
                        transactions: 0,
                    })
                }
                Some(Marker::End(section)) => Err(invalid(format!(
                    "{} section closed before it was opened",
                    section
                ))),
                None if g.is_comment(line) => Ok(State::ScanningSection),
                None => Err(invalid("text outside of a section".to_string())),
            },

            State::InSection {
                section,
                transactions,
            } => match marker {
                Some(Marker::End(closing)) if closing == section => {
                    if transactions == 0 {
                        Err(invalid(format!(
                            "expected '{}' to open a transaction",
                            g.start_transaction()
                        )))
                    } else {
                        Ok(State::ScanningSection)
                    }
                }
                Some(_) => Err(CoreError::OpenSection { version, section }),
                None if g.is_comment(line) => Ok(State::InSection {
                    section,
                    transactions,
                }),
                None => {
                    if let Some((begin, commit)) = g.split_empty_transaction(line) {
                        sections.push(section, StatementUnit::Begin(begin.to_string()));
                        sections.push(section, StatementUnit::Commit(commit.to_string()));
                        Ok(State::InSection {
                            section,
                            transactions: transactions + 1,
                        })
                    } else if g.is_start_transaction(line) {
                        sections.push(section, StatementUnit::Begin(line.to_string()));
                        Ok(State::InStatement {
                            section,
                            transactions,
                        })
                    } else if transactions == 0 {
                        Err(invalid(format!(
                            "expected '{}' to open a transaction",
                            g.start_transaction()
                        )))
                    } else {
                        Err(invalid("statement outside of a transaction".to_string()))
                    }
                }
            },

            State::InStatement {
                section,
                transactions,
            } => {
                if marker.is_some() {
                    return Err(CoreError::OpenTransaction { version, section });
                }
                if g.is_comment(line) {
                    return Ok(State::InStatement {
                        section,
                        transactions,
                    });
                }
                if g.is_start_transaction(line) || g.split_empty_transaction(line).is_some() {
                    return Err(invalid("nested transactions are not allowed".to_string()));
                }
                if g.is_end_transaction(line) {
                    sections.push(section, StatementUnit::Commit(line.to_string()));
                    return Ok(State::InSection {
                        section,
                        transactions: transactions + 1,
                    });
                }
                if !g.is_terminated(line) {
                    return Ok(State::InBlock {
                        section,
                        transactions,
                        lines: vec![raw.trim_end().to_string()],
                    });
                }
                sections.push(section, StatementUnit::Statement(line.to_string()));
                Ok(State::InStatement {
                    section,
                    transactions,
                })
            }

            State::InBlock {
                section,
                transactions,
                mut lines,
            } => {
                if marker.is_some() {
                    return Err(CoreError::OpenTransaction { version, section });
                }
                // Block lines are kept verbatim, comment-looking ones included.
                lines.push(raw.trim_end().to_string());
                if g.is_terminated(line) {
                    sections.push(section, StatementUnit::Statement(lines.join("\n")));
                    Ok(State::InStatement {
                        section,
                        transactions,
                    })
                } else {
                    Ok(State::InBlock {
                        section,
                        transactions,
                        lines,
                    })
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
