//! The textual input format: header, obstacles, nets (§6).
//!
//! ```text
//! R, C, bend_penalty, via_penalty
//! OBS (layer, row, column)
//! netA (l1, r1, c1) (l2, r2, c2) ...
//! ```
//!
//! Malformed obstacle or net lines are skipped with a [`Diagnostic`]
//! rather than aborting the session; only an empty file or a malformed
//! header line is fatal.

use maze_common::{Cell, Diagnostic, Error, Result};
use maze_core::Net;

/// Everything a session needs to start routing, plus whatever went
/// wrong along the way.
#[derive(Debug, Clone)]
pub struct ParsedInput {
    pub rows: u32,
    pub cols: u32,
    pub bend_penalty: u32,
    pub via_penalty: u32,
    pub obstacles: Vec<(u8, u32, u32)>,
    pub nets: Vec<Net>,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn parse(text: &str) -> Result<ParsedInput> {
    let mut lines = text.lines().map(str::trim);

    let header = lines
        .find(|line| !line.is_empty())
        .ok_or(Error::EmptyInput)?;
    let (rows, cols, bend_penalty, via_penalty) = parse_header(header)
        .ok_or_else(|| Error::InvalidHeader(header.to_string()))?;

    let mut obstacles = Vec::new();
    let mut nets = Vec::new();
    let mut diagnostics = Vec::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix("OBS") {
            match parse_obstacle(rest) {
                Ok(obstacle) => obstacles.push(obstacle),
                Err(message) => diagnostics.push(Diagnostic::warn(None, message)),
            }
            continue;
        }
        if line.starts_with("net") {
            match parse_net_line(line) {
                Ok((name, pins)) => match Net::new(name.clone(), pins) {
                    Some(net) => nets.push(net),
                    None => diagnostics.push(Diagnostic::warn(
                        Some(&name),
                        "net has fewer than two pins after parsing",
                    )),
                },
                Err(message) => diagnostics.push(Diagnostic::warn(None, message)),
            }
            continue;
        }
        diagnostics.push(Diagnostic::warn(None, format!("unrecognized line: {line}")));
    }

    Ok(ParsedInput {
        rows,
        cols,
        bend_penalty,
        via_penalty,
        obstacles,
        nets,
        diagnostics,
    })
}

fn parse_header(line: &str) -> Option<(u32, u32, u32, u32)> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return None;
    }
    let rows = parts[0].parse().ok()?;
    let cols = parts[1].parse().ok()?;
    let bend_penalty = parts[2].parse().ok()?;
    let via_penalty = parts[3].parse().ok()?;
    Some((rows, cols, bend_penalty, via_penalty))
}

fn parse_obstacle(rest: &str) -> std::result::Result<(u8, u32, u32), String> {
    let numbers = extract_integers(rest);
    match numbers.as_slice() {
        [layer, row, col] => {
            let layer = u8::try_from(*layer).map_err(|_| format!("obstacle layer out of range: {rest}"))?;
            let row = u32::try_from(*row).map_err(|_| format!("obstacle row out of range: {rest}"))?;
            let col = u32::try_from(*col).map_err(|_| format!("obstacle column out of range: {rest}"))?;
            Ok((layer, row, col))
        }
        _ => Err(format!("malformed obstacle line: OBS{rest}")),
    }
}

fn parse_net_line(line: &str) -> std::result::Result<(String, Vec<Cell>), String> {
    let mut tokens = line.split_whitespace();
    let name = tokens
        .next()
        .ok_or_else(|| format!("empty net line: {line}"))?
        .to_string();

    let rest: String = tokens.collect::<Vec<_>>().join(" ");
    let numbers = extract_integers(&rest);
    if numbers.is_empty() || numbers.len() % 3 != 0 {
        return Err(format!("pin coordinates not a multiple of three: {line}"));
    }

    let mut pins = Vec::with_capacity(numbers.len() / 3);
    for chunk in numbers.chunks_exact(3) {
        let layer = u8::try_from(chunk[0]).map_err(|_| format!("pin layer out of range: {line}"))?;
        let row = u32::try_from(chunk[1]).map_err(|_| format!("pin row out of range: {line}"))?;
        let col = u32::try_from(chunk[2]).map_err(|_| format!("pin column out of range: {line}"))?;
        pins.push(Cell::new(layer, row, col));
    }

    if pins.len() < 2 {
        return Err(format!("net has fewer than two pins: {line}"));
    }

    Ok((name, pins))
}

/// Pull every integer token out of a string, treating `(`, `)`, and `,`
/// as separators alongside whitespace. Tolerates `(0, 1, 2)` and
/// `(0,1,2)` alike.
fn extract_integers(text: &str) -> Vec<i64> {
    text.chars()
        .map(|c| if c == '(' || c == ')' || c == ',' { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .filter_map(|token| token.parse::<i64>().ok())
        .collect()
}
