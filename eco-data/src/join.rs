//! Left-outer join of two tables on shared key columns.

use eco_core::columns::{LEFT_SUFFIX, RIGHT_SUFFIX};
use eco_core::{Result, Table};
use std::collections::HashMap;

/// Canonical form of a key cell: numbers compare by value (`2020` matches
/// `2020.0`), anything else by its trimmed text.
fn normalize_key(cell: &str) -> String {
    let cell = cell.trim();
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => format!("{v}"),
        _ => cell.to_string(),
    }
}

fn row_key(row: &[String], indices: &[usize]) -> Vec<String> {
    indices.iter().map(|&i| normalize_key(&row[i])).collect()
}

/// Name `column` of the right-hand table takes in the result of
/// `left_join(left, right, on)`: suffixed with `_y` when `left` already has a
/// non-key column of that name.
pub fn joined_column_name(left: &Table, column: &str, on: &[&str]) -> String {
    if !on.contains(&column) && left.has_column(column) {
        format!("{column}{RIGHT_SUFFIX}")
    } else {
        column.to_string()
    }
}

/// Left-outer join of `right` onto `left` by the `on` columns.
///
/// Every left row is kept, in order. A left row matching several right rows
/// is repeated once per match, in right-table order; a row with no match
/// gets empty cells for the right columns. Non-key columns present on both
/// sides are renamed with `_x` (left) and `_y` (right) suffixes; the join
/// fails with [`eco_core::EcoError::DuplicateColumn`] when a suffixed name
/// is already taken.
pub fn left_join(left: &Table, right: &Table, on: &[&str]) -> Result<Table> {
    let left_keys = on
        .iter()
        .map(|c| left.column_index(c))
        .collect::<Result<Vec<_>>>()?;
    let right_keys = on
        .iter()
        .map(|c| right.column_index(c))
        .collect::<Result<Vec<_>>>()?;

    let right_values = right
        .headers()
        .iter()
        .enumerate()
        .filter(|(_, h)| !on.contains(&h.as_str()))
        .map(|(i, _)| i)
        .collect::<Vec<_>>();

    let mut headers = left
        .headers()
        .iter()
        .map(|h| {
            let clashes = !on.contains(&h.as_str())
                && right_values.iter().any(|&i| &right.headers()[i] == h);
            if clashes {
                format!("{h}{LEFT_SUFFIX}")
            } else {
                h.clone()
            }
        })
        .collect::<Vec<_>>();
    headers.extend(
        right_values
            .iter()
            .map(|&i| joined_column_name(left, &right.headers()[i], on)),
    );

    let mut matches: HashMap<Vec<String>, Vec<usize>> = HashMap::new();
    for (index, row) in right.rows().iter().enumerate() {
        matches.entry(row_key(row, &right_keys)).or_default().push(index);
    }

    let mut rows = Vec::with_capacity(left.len());
    let mut unmatched = 0usize;
    for row in left.rows() {
        match matches.get(&row_key(row, &left_keys)) {
            Some(found) => {
                for &r in found {
                    let mut joined = row.clone();
                    joined.extend(right_values.iter().map(|&i| right.rows()[r][i].clone()));
                    rows.push(joined);
                }
            }
            None => {
                unmatched += 1;
                let mut joined = row.clone();
                joined.extend(right_values.iter().map(|_| String::new()));
                rows.push(joined);
            }
        }
    }
    if unmatched > 0 {
        log::debug!(
            "{}: {} of {} rows found no match in {}",
            left.name(),
            unmatched,
            left.len(),
            right.name()
        );
    }
    Table::new(left.name(), headers, rows)
}
