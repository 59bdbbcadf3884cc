// src/circuits/text.rs

//! Text and table forms of a circuit.
//!
//! The text form has one row per wire and one token per moment:
//!
//! ```text
//! NOT-AND.a#0-I
//! I---AND.a#1-NOT
//! ```
//!
//! Tokens are separated by runs of `-`, `+`, `=` or whitespace and read
//! `SYMBOL[.label][#index]`. `I` leaves the cell empty. Tokens of one moment
//! that share a label form a single gate over all their rows, with inputs
//! ordered by `#index`.

use super::{Circuit, CircuitConfig};
use crate::core::{CircuitError, WireIndex, IDENTITY_SYMBOL};
use crate::gates::Gate;
use std::collections::HashSet;

/// One cell of [`Circuit::to_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableCell {
    pub symbol: &'static str,
    pub name: &'static str,
    pub css_name: &'static str,
    /// Input slot of the gate this wire feeds, `None` for an empty cell.
    pub gate_input_index: Option<usize>,
}

impl TableCell {
    fn new(gate: Gate, gate_input_index: Option<usize>) -> Self {
        Self {
            symbol: gate.symbol(),
            name: gate.name(),
            css_name: gate.css_name(),
            gate_input_index,
        }
    }
}

impl Default for TableCell {
    fn default() -> Self {
        Self::new(Gate::Identity, None)
    }
}

/// A wire's cells with where they came from.
struct Row {
    line: usize,
    // (1-based column, raw token)
    cells: Vec<(usize, String)>,
}

#[derive(Debug, Clone)]
struct Token {
    line: usize,
    column: usize,
    raw: String,
    gate: Gate,
    label: Option<String>,
    index: Option<usize>,
}

impl Token {
    fn malformed(&self, reason: &str) -> CircuitError {
        malformed(self.line, self.column, &self.raw, reason)
    }
}

/// Tokens of one moment merged into gates.
struct Group {
    gate: Gate,
    label: Option<String>,
    // (input index, register)
    members: Vec<(Option<usize>, u32)>,
}

fn malformed(line: usize, column: usize, token: &str, reason: &str) -> CircuitError {
    CircuitError::MalformedToken {
        line,
        column,
        token: token.to_owned(),
        reason: reason.to_owned(),
    }
}

fn is_separator(c: char) -> bool {
    matches!(c, '-' | '+' | '=') || c.is_whitespace()
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// Splits a row into tokens with their 1-based columns.
fn split_row(line: &str) -> Vec<(usize, String)> {
    let mut cells = Vec::new();
    let mut current: Option<(usize, String)> = None;
    for (i, c) in line.chars().enumerate() {
        if is_separator(c) {
            cells.extend(current.take());
        } else {
            current.get_or_insert_with(|| (i + 1, String::new())).1.push(c);
        }
    }
    cells.extend(current);
    cells
}

/// Reads one token; `None` for an empty cell.
fn parse_token(line: usize, column: usize, raw: &str) -> Result<Option<Token>, CircuitError> {
    let fail = |reason: &str| malformed(line, column, raw, reason);

    let (head, index) = match raw.split_once('#') {
        Some((head, index)) => {
            if index.is_empty() || !index.chars().all(|c| c.is_ascii_digit()) {
                return Err(fail("index is not a number"));
            }
            let index = index.parse::<usize>().map_err(|_| fail("index is too large"))?;
            (head, Some(index))
        }
        None => (raw, None),
    };
    let (symbol, label) = match head.split_once('.') {
        Some((symbol, label)) => (symbol, Some(label)),
        None => (head, None),
    };

    if symbol.is_empty() {
        return Err(fail("missing gate symbol"));
    }
    if !is_word(symbol) {
        return Err(fail("gate symbol may only hold letters, digits and '_'"));
    }
    if let Some(label) = label {
        if !is_word(label) {
            return Err(fail("label may only hold letters, digits and '_'"));
        }
    }
    let gate = Gate::find_by_symbol(symbol).ok_or_else(|| fail("no gate with this symbol"))?;
    if gate == Gate::Identity {
        return Ok(None);
    }
    Ok(Some(Token {
        line,
        column,
        raw: raw.to_owned(),
        gate,
        label: label.map(str::to_owned),
        index,
    }))
}

/// Merges the tokens of one moment into gates. `tokens` are in row order.
fn group_tokens(tokens: Vec<(u32, Token)>) -> Result<Vec<Group>, CircuitError> {
    let mut groups: Vec<Group> = Vec::new();
    for (register, token) in tokens {
        let existing = token
            .label
            .as_ref()
            .and_then(|label| groups.iter_mut().find(|g| g.label.as_ref() == Some(label)));
        match existing {
            Some(group) => {
                if group.gate != token.gate {
                    return Err(token.malformed("label is already used by another gate"));
                }
                if token.index.is_some() && group.members.iter().any(|(i, _)| *i == token.index) {
                    return Err(token.malformed("duplicate index"));
                }
                group.members.push((token.index, register));
            }
            None => groups.push(Group {
                gate: token.gate,
                label: token.label,
                members: vec![(token.index, register)],
            }),
        }
    }
    for group in &mut groups {
        // indexed inputs first, by index; the rest keep row order
        group.members.sort_by_key(|(index, _)| (index.is_none(), *index));
    }
    Ok(groups)
}

impl Circuit {
    /// Reads a circuit from its text form, one row per wire.
    ///
    /// Blank lines are ignored. The bandwidth is the number of rows, the
    /// timewidth the length of the longest row.
    ///
    /// # Errors
    /// * `EmptyText` if there is no row.
    /// * `MalformedToken` with the 1-based line and column of the first bad
    ///   token (bad syntax, unknown symbol, clashing label or index).
    ///
    /// # Examples
    /// ```
    /// # use logiq::{Bit, Circuit, CircuitError};
    /// # fn main() -> Result<(), CircuitError> {
    /// let mut circuit = Circuit::from_text("NOT-AND.c#0\nI---AND.c#1")?;
    /// assert_eq!((circuit.bandwidth(), circuit.timewidth()), (2, 2));
    /// assert_eq!(circuit.evaluate(), vec![Bit::ONE, Bit::ZERO]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_text(text: &str) -> Result<Circuit, CircuitError> {
        let rows = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| Row {
                line: i + 1,
                cells: split_row(line),
            })
            .collect();
        Self::from_rows(rows)
    }

    /// Reads a circuit from a table holding one row per wire and one cell
    /// per moment. Blank cells are empty; rows without cells are skipped.
    /// Errors report the row as the line and the cell as the column.
    pub fn from_table_transposed<R, S>(rows: &[R]) -> Result<Circuit, CircuitError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let rows = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.as_ref().is_empty())
            .map(|(i, row)| Row {
                line: i + 1,
                cells: row
                    .as_ref()
                    .iter()
                    .enumerate()
                    .map(|(j, cell)| {
                        let cell = cell.as_ref().trim();
                        let cell = if cell.is_empty() { IDENTITY_SYMBOL } else { cell };
                        (j + 1, cell.to_owned())
                    })
                    .collect(),
            })
            .collect();
        Self::from_rows(rows)
    }

    fn from_rows(rows: Vec<Row>) -> Result<Circuit, CircuitError> {
        if rows.is_empty() {
            return Err(CircuitError::EmptyText);
        }
        let bandwidth = rows.len() as u32;
        let timewidth = rows.iter().map(|row| row.cells.len()).max().unwrap_or(0).max(1);

        let mut moments: Vec<Vec<(u32, Token)>> = vec![Vec::new(); timewidth];
        for (r, row) in rows.iter().enumerate() {
            for (t, (column, raw)) in row.cells.iter().enumerate() {
                if let Some(token) = parse_token(row.line, *column, raw)? {
                    moments[t].push((r as u32 + 1, token));
                }
            }
        }

        let mut circuit = Circuit::from_config(CircuitConfig {
            bandwidth,
            timewidth: timewidth as u32,
            name: None,
        })?;
        for (t, tokens) in moments.into_iter().enumerate() {
            for group in group_tokens(tokens)? {
                let registers = group
                    .members
                    .iter()
                    .map(|(_, register)| WireIndex::primary(*register))
                    .collect();
                circuit.place(group.gate, t as u32 + 1, registers, group.label)?;
            }
        }
        tracing::debug!(
            circuit = %circuit.id(),
            bandwidth,
            timewidth,
            operations = circuit.len(),
            "circuit read from text"
        );
        Ok(circuit)
    }

    /// Writes the text form read by [`Circuit::from_text`].
    ///
    /// Gates over several wires become labelled tokens (`AND.m1w1#0`). Half
    /// positions have no row in the text form; registers placed there are
    /// left out with a warning.
    pub fn to_text(&self) -> String {
        let rows = self.bandwidth as usize;
        // columns[moment][row]
        let mut columns = vec![vec![IDENTITY_SYMBOL.to_owned(); rows]; self.timewidth as usize];
        // (moment, label) pairs already spoken for
        let mut taken: HashSet<(u32, String)> = self
            .operations
            .iter()
            .filter_map(|op| op.label().map(|label| (op.moment(), label.to_owned())))
            .collect();

        for op in &self.operations {
            if op.registers().iter().any(|r| !r.is_primary()) {
                tracing::warn!(operation = %op, "half-position registers left out of the text form");
            }
            let symbol = op.gate().symbol();
            let label = op.label().map(str::to_owned);
            let multi = op.registers().len() > 1;
            let label = match label {
                Some(label) => Some(label),
                None if multi => {
                    let base = format!("m{}w{}", op.moment(), op.anchor().to_string().replace('.', "_"));
                    let mut label = base.clone();
                    let mut n = 2;
                    while taken.contains(&(op.moment(), label.clone())) {
                        label = format!("{}_{}", base, n);
                        n += 1;
                    }
                    taken.insert((op.moment(), label.clone()));
                    Some(label)
                }
                None => None,
            };

            let column = &mut columns[op.moment() as usize - 1];
            for (i, register) in op.registers().iter().enumerate() {
                let Some(r) = register.register() else { continue };
                let cell = &mut column[r as usize - 1];
                if *cell != IDENTITY_SYMBOL {
                    tracing::warn!(operation = %op, wire = r, "cell already written, gate left out");
                    continue;
                }
                *cell = match (&label, multi) {
                    (Some(label), true) => format!("{}.{}#{}", symbol, label, i),
                    (Some(label), false) => format!("{}.{}", symbol, label),
                    (None, _) => symbol.to_owned(),
                };
            }
        }

        let widths: Vec<usize> = columns
            .iter()
            .map(|column| column.iter().map(|t| t.chars().count()).max().unwrap_or(1))
            .collect();
        (0..rows)
            .map(|r| {
                columns
                    .iter()
                    .zip(&widths)
                    .map(|(column, width)| {
                        let token = &column[r];
                        format!("{}{}", token, "-".repeat(width - token.chars().count()))
                    })
                    .collect::<Vec<_>>()
                    .join("-")
                    .trim_end_matches('-')
                    .to_owned()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `table[moment - 1][wire - 1]`: the gate on each primary wire at each
    /// moment, with the input slot that wire feeds.
    pub fn to_table(&self) -> Vec<Vec<TableCell>> {
        let mut table = vec![vec![TableCell::default(); self.bandwidth as usize]; self.timewidth as usize];
        for op in &self.operations {
            let column = &mut table[op.moment() as usize - 1];
            for (i, register) in op.registers().iter().enumerate() {
                if let Some(r) = register.register() {
                    let cell = &mut column[r as usize - 1];
                    if cell.gate_input_index.is_none() {
                        *cell = TableCell::new(op.gate(), Some(i));
                    }
                }
            }
        }
        table
    }
}
