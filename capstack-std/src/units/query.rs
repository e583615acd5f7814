//! Query units.
//!
//! A [`QueryUnit`] runs a fixed script of command texts against an injected
//! [`QueryExecutor`]. Blank commands are skipped; the first failing command
//! stops the script and is named in the failure message.
//!
//! With a sink attached, every executed part is reported as it completes,
//! followed by a completion line once the whole script has run.

use crate::sink::SharedSink;
use capstack_core::{BoxError, Capability, Outcome, Payload, Value};
use std::{collections::BTreeMap, sync::Arc};
use thiserror::Error;

/// One result row, column name to value.
pub type Row = BTreeMap<String, Value>;

/// An injected relational-query collaborator.
pub trait QueryExecutor: Send + Sync + 'static {
    /// Run `command` with `params` and return the produced rows in order.
    fn run(&self, command: &str, params: &Payload) -> Result<Vec<Row>, BoxError>;
}

impl<Q: QueryExecutor + ?Sized> QueryExecutor for Arc<Q> {
    fn run(&self, command: &str, params: &Payload) -> Result<Vec<Row>, BoxError> {
        (**self).run(command, params)
    }
}

/// Errors raised while running a script.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The executor rejected one part of the script.
    #[error("part {index} `{headline}` failed: {source}")]
    Part {
        /// One-based position among the non-blank parts.
        index: usize,
        /// First line of the failing command.
        headline: String,
        /// The executor's error.
        source: BoxError,
    },

    /// A progress line could not be written.
    #[error("progress report failed: {0}")]
    Report(#[source] BoxError),
}

/// Runs a script of commands; the payload is passed as parameters.
pub struct QueryUnit<Q> {
    name: String,
    executor: Q,
    commands: Vec<String>,
    sink: Option<SharedSink>,
}

impl<Q: QueryExecutor> QueryUnit<Q> {
    /// Create a unit with an empty script.
    pub fn new(name: impl Into<String>, executor: Q) -> Self {
        Self {
            name: name.into(),
            executor,
            commands: Vec::new(),
            sink: None,
        }
    }

    /// Append a command to the script.
    pub fn command(mut self, text: impl Into<String>) -> Self {
        self.commands.push(text.into());
        self
    }

    /// Report progress to `sink`.
    pub fn with_sink(mut self, sink: SharedSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Number of commands that will actually run.
    pub fn len(&self) -> usize {
        self.parts().count()
    }

    /// Whether the script has nothing to run.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn parts(&self) -> impl Iterator<Item = &str> {
        self.commands
            .iter()
            .map(String::as_str)
            .filter(|text| !text.trim().is_empty())
    }

    fn report(&self, line: &str) -> Result<(), QueryError> {
        match &self.sink {
            Some(sink) => sink.write(line).map_err(QueryError::Report),
            None => Ok(()),
        }
    }

    fn run_script(&self, payload: &Payload) -> Result<String, QueryError> {
        let mut last = Vec::new();
        for (index, command) in self.parts().enumerate() {
            let headline = headline(command);
            last = self
                .executor
                .run(command, payload)
                .map_err(|source| QueryError::Part {
                    index: index + 1,
                    headline: headline.to_string(),
                    source,
                })?;
            self.report(&format!("Part of {} executed: '{headline}'...", self.name))?;
        }
        self.report(&format!("{} completed all parts successfully.", self.name))?;
        Ok(summarize(&last))
    }
}

fn headline(command: &str) -> &str {
    command.trim().lines().next().unwrap_or_default().trim()
}

// A single row with a single column is a scalar result.
fn summarize(rows: &[Row]) -> String {
    match rows {
        [] => "no rows returned".to_string(),
        [row] if row.len() == 1 => match row.iter().next() {
            Some((column, value)) => format!("{column}: {value}"),
            None => "1 row returned".to_string(),
        },
        [_] => "1 row returned".to_string(),
        rows => format!("{} rows returned", rows.len()),
    }
}

impl<Q: QueryExecutor> Capability for QueryUnit<Q> {
    fn name(&self) -> &str {
        &self.name
    }

    fn invoke(&self, payload: &Payload) -> Outcome {
        Outcome::from_result(&self.name, self.run_script(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sink::MemorySink, testing::StubExecutor};
    use capstack_core::FailureKind;

    fn count_row(total: i64) -> Row {
        Row::from([("TotalEmployees".to_string(), Value::Int(total))])
    }

    #[test]
    fn blank_commands_are_skipped() {
        let executor = StubExecutor::new();
        let unit = QueryUnit::new("create-procedure", executor.clone())
            .command("   ")
            .command("DROP PROCEDURE IF EXISTS sp_Count")
            .command("\n\t")
            .command("CREATE PROCEDURE sp_Count AS SELECT 1");

        assert_eq!(unit.len(), 2);
        let outcome = unit.invoke(&Payload::new());

        assert_eq!(outcome, Outcome::success("create-procedure", "no rows returned"));
        assert_eq!(executor.calls().len(), 2);
    }

    #[test]
    fn scalar_result_is_reported_with_its_column() {
        let executor = StubExecutor::new().with_rows(vec![count_row(4)]);
        let unit = QueryUnit::new("count", executor.clone()).command("sp_CountEmployeesInDepartment");

        let outcome = unit.invoke(&Payload::new().with("DepartmentID", 1));

        assert_eq!(outcome.message(), "TotalEmployees: 4");
        assert_eq!(executor.calls(), vec!["sp_CountEmployeesInDepartment"]);
    }

    #[test]
    fn wider_results_are_counted() {
        let mut wide = count_row(4);
        wide.insert("DepartmentName".to_string(), Value::from("HR"));
        let one = QueryUnit::new("one", StubExecutor::new().with_rows(vec![wide]))
            .command("SELECT * FROM Departments WHERE DepartmentID = 1");
        let many = QueryUnit::new("many", StubExecutor::new().with_rows(vec![count_row(1), count_row(2)]))
            .command("SELECT * FROM Departments");

        assert_eq!(one.invoke(&Payload::new()).message(), "1 row returned");
        assert_eq!(many.invoke(&Payload::new()).message(), "2 rows returned");
    }

    #[test]
    fn progress_lines_follow_each_part() {
        let sink = MemorySink::new();
        let unit = QueryUnit::new("Create sp_CountEmployeesInDepartment", StubExecutor::new())
            .with_sink(sink.shared())
            .command("\n  IF OBJECT_ID('sp_Count', 'P') IS NOT NULL\n    DROP PROCEDURE sp_Count;\n")
            .command("")
            .command("CREATE PROCEDURE sp_Count\n  @DepartmentID INT\nAS SELECT 1;");

        assert!(unit.invoke(&Payload::new()).is_success());
        assert_eq!(
            sink.lines(),
            vec![
                "Part of Create sp_CountEmployeesInDepartment executed: 'IF OBJECT_ID('sp_Count', 'P') IS NOT NULL'...",
                "Part of Create sp_CountEmployeesInDepartment executed: 'CREATE PROCEDURE sp_Count'...",
                "Create sp_CountEmployeesInDepartment completed all parts successfully.",
            ]
        );
    }

    #[test]
    fn stops_at_first_failing_part() {
        let sink = MemorySink::new();
        let executor = StubExecutor::new().failing_on("CREATE");
        let unit = QueryUnit::new("ddl", executor.clone())
            .with_sink(sink.shared())
            .command("DROP TABLE Products")
            .command("CREATE TABLE Products (\n  ProductID INT\n)")
            .command("INSERT INTO Products VALUES (1)");

        let outcome = unit.invoke(&Payload::new());

        assert_eq!(outcome.failure_kind(), Some(FailureKind::InnerFailed));
        assert!(outcome.message().starts_with("part 2 `CREATE TABLE Products (` failed"));
        assert_eq!(executor.calls().len(), 2);
        assert_eq!(sink.lines(), vec!["Part of ddl executed: 'DROP TABLE Products'..."]);
    }
}
