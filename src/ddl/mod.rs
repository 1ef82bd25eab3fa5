// DDL Processing Module
//
// Raw CREATE TABLE text -> tokens -> AST -> table model. Any failure discards
// the work done for that statement.

pub mod parser;

use std::num::NonZeroUsize;
use std::panic;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use log::{debug, warn};
use thiserror::Error;

use crate::catalog::{build_table, Table, TypeMap, UnknownTypeError};
use self::parser::{tokenize, ParseError, Parser, TokenizeError};

/// Failure at any stage of the DDL pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DdlError {
    #[error("Tokenize error: {0}")]
    Tokenize(#[from] TokenizeError),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error(transparent)]
    UnknownType(#[from] UnknownTypeError),
}

/// Parse one CREATE TABLE statement into a table model
pub fn parse_table_sql(sql: &str, types: &TypeMap) -> Result<Table, DdlError> {
    let tokens = tokenize(sql)?;
    debug!("Tokenized statement into {} tokens", tokens.len());

    let statement = Parser::from_tokens(tokens).parse_statement()?;
    let table = build_table(statement, types)?;

    Ok(table)
}

/// Number of parser threads for `jobs` statements: one per available core,
/// never more than there are statements
pub fn worker_count(jobs: usize) -> usize {
    let cores = thread::available_parallelism().map(NonZeroUsize::get).unwrap_or(1);
    cores.min(jobs).max(1)
}

/// Parse statements until the shared cursor runs past the end
fn drain<S>(statements: &[S], types: &TypeMap, next: &AtomicUsize) -> Vec<(usize, Result<Table, DdlError>)>
where
    S: AsRef<str>,
{
    let mut parsed = Vec::new();
    loop {
        let index = next.fetch_add(1, Ordering::Relaxed);
        let Some(sql) = statements.get(index) else {
            break;
        };
        parsed.push((index, parse_table_sql(sql.as_ref(), types)));
    }
    parsed
}

/// Parse independent statements on a bounded set of threads. Results keep
/// input order.
pub fn parse_tables<S>(statements: &[S], types: &TypeMap) -> Vec<Result<Table, DdlError>>
where
    S: AsRef<str> + Sync,
{
    let workers = worker_count(statements.len());
    if workers <= 1 {
        return statements
            .iter()
            .map(|sql| parse_table_sql(sql.as_ref(), types))
            .collect();
    }

    debug!("Parsing {} statements on {} threads", statements.len(), workers);

    let next = AtomicUsize::new(0);
    let mut parsed = crossbeam::scope(|scope| {
        let mut handles = Vec::with_capacity(workers - 1);
        for _ in 1..workers {
            match scope.builder().spawn(|_| drain(statements, types, &next)) {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    warn!("Could not start parser thread: {}", e);
                    break;
                }
            }
        }

        // The calling thread takes its share too
        let mut parsed = drain(statements, types, &next);
        for handle in handles {
            parsed.extend(handle.join().unwrap_or_else(|e| panic::resume_unwind(e)));
        }
        parsed
    })
    .unwrap_or_else(|e| panic::resume_unwind(e));

    parsed.sort_unstable_by_key(|(index, _)| *index);
    parsed.into_iter().map(|(_, result)| result).collect()
}
