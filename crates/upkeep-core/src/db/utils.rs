//! Row conversion helpers shared by the query modules.

use std::{fmt::Display, str::FromStr};

use rusqlite::{Row, types::Type};

/// Reads a text column and parses it with `FromStr`.
pub(crate) fn parse_column<T>(row: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("Invalid value '{raw}': {e}").into(),
        )
    })
}

/// Reads a nullable text column and parses it with `FromStr`.
pub(crate) fn parse_optional_column<T>(row: &Row, idx: usize) -> rusqlite::Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = row.get(idx)?;
    raw.map(|raw| {
        raw.parse::<T>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                Type::Text,
                format!("Invalid value '{raw}': {e}").into(),
            )
        })
    })
    .transpose()
}

/// Reads an INTEGER primary or foreign key column.
pub(crate) fn id_column(row: &Row, idx: usize) -> rusqlite::Result<u64> {
    Ok(row.get::<_, i64>(idx)? as u64)
}

/// Collects a statement's single-column id results.
pub(crate) fn collect_ids(
    stmt: &mut rusqlite::Statement<'_>,
    params: impl rusqlite::Params,
) -> rusqlite::Result<Vec<u64>> {
    stmt.query_map(params, |row| id_column(row, 0))?
        .collect::<rusqlite::Result<Vec<_>>>()
}
