//! Optional two-panel PNG visualization (§6): one panel per layer,
//! obstacles as filled black cells, each net's path in its own color
//! cycling through a fixed palette, with light markers at the source
//! and final target.
//!
//! This is a correctness-path bystander — nothing here feeds back into
//! routing, and callers are free to skip it entirely.

use std::path::Path;

use image::{Rgb, RgbImage};

use maze_common::Cell;
use maze_core::RoutedNet;

const CELL_PX: u32 = 24;
const GRID_LINE: Rgb<u8> = Rgb([200, 200, 200]);
const OBSTACLE: Rgb<u8> = Rgb([16, 16, 16]);
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const START_MARKER: Rgb<u8> = Rgb([0, 140, 0]);
const END_MARKER: Rgb<u8> = Rgb([200, 0, 0]);
const VIA_MARKER: Rgb<u8> = Rgb([0, 0, 0]);

/// Lighter tints, one per net, cycling once more nets are routed than
/// colors exist.
const PALETTE: [Rgb<u8>; 10] = [
    Rgb([255, 204, 204]),
    Rgb([204, 255, 255]),
    Rgb([204, 255, 204]),
    Rgb([255, 204, 153]),
    Rgb([217, 179, 255]),
    Rgb([242, 179, 179]),
    Rgb([255, 204, 229]),
    Rgb([217, 217, 255]),
    Rgb([179, 255, 204]),
    Rgb([201, 201, 255]),
];

/// Render the two layers side by side into one image, `rows` × `cols`
/// cells each, `CELL_PX` pixels per cell with a one-cell gap between
/// panels.
pub fn render_png(rows: u32, cols: u32, obstacles: &[(u8, u32, u32)], routed: &[RoutedNet]) -> RgbImage {
    let panel_w = cols * CELL_PX;
    let panel_h = rows * CELL_PX;
    let gap = CELL_PX;
    let width = panel_w * 2 + gap;
    let mut img = RgbImage::from_pixel(width, panel_h, BACKGROUND);

    draw_grid_lines(&mut img, 0, rows, cols);
    draw_grid_lines(&mut img, panel_w + gap, rows, cols);

    for &(layer, row, col) in obstacles {
        let x_offset = panel_offset(layer, panel_w, gap);
        fill_cell(&mut img, x_offset, row, col, OBSTACLE);
    }

    for (index, net) in routed.iter().enumerate() {
        let color = PALETTE[index % PALETTE.len()];
        for cell in &net.path {
            let x_offset = panel_offset(cell.layer, panel_w, gap);
            fill_cell(&mut img, x_offset, cell.row, cell.col, color);
        }
        mark_via_transitions(&mut img, panel_w, gap, &net.path);
        if let (Some(first), Some(last)) = (net.path.first(), net.path.last()) {
            mark_corner(&mut img, panel_offset(first.layer, panel_w, gap), *first, START_MARKER);
            mark_corner(&mut img, panel_offset(last.layer, panel_w, gap), *last, END_MARKER);
        }
    }

    img
}

pub fn save_png(
    path: &Path,
    rows: u32,
    cols: u32,
    obstacles: &[(u8, u32, u32)],
    routed: &[RoutedNet],
) -> std::io::Result<()> {
    let img = render_png(rows, cols, obstacles, routed);
    img.save(path)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))
}

fn panel_offset(layer: u8, panel_w: u32, gap: u32) -> u32 {
    if layer == 0 {
        0
    } else {
        panel_w + gap
    }
}

fn fill_cell(img: &mut RgbImage, x_offset: u32, row: u32, col: u32, color: Rgb<u8>) {
    let x0 = x_offset + col * CELL_PX;
    let y0 = row * CELL_PX;
    for dy in 1..CELL_PX - 1 {
        for dx in 1..CELL_PX - 1 {
            img.put_pixel(x0 + dx, y0 + dy, color);
        }
    }
}

/// A small filled square in the corner of a cell, distinguishing the
/// source (green) and final target (red) without relying on text
/// rendering.
fn mark_corner(img: &mut RgbImage, x_offset: u32, cell: Cell, color: Rgb<u8>) {
    let x0 = x_offset + cell.col * CELL_PX;
    let y0 = cell.row * CELL_PX;
    let marker = CELL_PX / 4;
    for dy in 0..marker {
        for dx in 0..marker {
            img.put_pixel(x0 + dx, y0 + dy, color);
        }
    }
}

fn mark_via_transitions(img: &mut RgbImage, panel_w: u32, gap: u32, path: &[Cell]) {
    for window in path.windows(2) {
        let (prev, cur) = (window[0], window[1]);
        if prev.layer != cur.layer {
            let x_offset = panel_offset(cur.layer, panel_w, gap);
            let cx = x_offset + cur.col * CELL_PX + CELL_PX / 2;
            let cy = cur.row * CELL_PX + CELL_PX / 2;
            let radius = CELL_PX / 6;
            for dy in 0..radius * 2 {
                for dx in 0..radius * 2 {
                    img.put_pixel(cx - radius + dx, cy - radius + dy, VIA_MARKER);
                }
            }
        }
    }
}

fn draw_grid_lines(img: &mut RgbImage, x_offset: u32, rows: u32, cols: u32) {
    let panel_w = cols * CELL_PX;
    let panel_h = rows * CELL_PX;
    for row in 0..=rows {
        let y = (row * CELL_PX).min(panel_h - 1);
        for dx in 0..panel_w {
            img.put_pixel(x_offset + dx, y, GRID_LINE);
        }
    }
    for col in 0..=cols {
        let x = (col * CELL_PX).min(panel_w - 1);
        for dy in 0..panel_h {
            img.put_pixel(x_offset + x, dy, GRID_LINE);
        }
    }
}
