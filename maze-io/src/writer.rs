//! The textual output format: one line per routed net (§6).

use std::fmt::Write as _;

use maze_core::RoutedNet;

/// Render routed nets as `<name> (l, r, c) (l, r, c) ... \n`, one line
/// per net, in scheduling order. Unroutable nets are simply absent from
/// `routed`, so nothing else needs to filter them out here.
pub fn render(routed: &[RoutedNet]) -> String {
    let mut out = String::new();
    for net in routed {
        let _ = write!(out, "{} ", net.name);
        for cell in &net.path {
            let _ = write!(out, "({}, {}, {}) ", cell.layer, cell.row, cell.col);
        }
        out.push('\n');
    }
    out
}
