// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph layout: single-line drawing and word wrapping.
//!
//! Wrapping is greedy and breaks only at whitespace shapes: a line
//! accepts characters until it would exceed the maximum line width (in
//! characters), then breaks at the last space seen. Words longer than
//! the maximum occupy a line of their own. Every layout produces at
//! least one line.

use core::ops::Range;

use glam::Vec2;
use smallvec::SmallVec;

use crate::font::ShapedLine;
use crate::geometry::{Aabb, Rect};
use crate::label::Align;
use crate::quad::ScratchBuffer;

/// Draws a shaped line unwrapped with its baseline origin at `origin`,
/// emitting one quad per visible glyph and growing `aabb` to cover them.
pub(crate) fn draw_line(
    line: &ShapedLine,
    origin: Vec2,
    scratch: &mut ScratchBuffer,
    aabb: &mut Aabb,
) {
    draw_run(line, 0..line.shapes().len(), origin, scratch, aabb);
}

/// Word-wraps a shaped line and draws the resulting lines stacked by the
/// line height, aligned within the widest line's box. Returns the
/// accumulated quad bounding box.
pub(crate) fn draw_wrapped(
    line: &ShapedLine,
    max_chars: u32,
    align: Align,
    scratch: &mut ScratchBuffer,
) -> Aabb {
    let runs = break_runs(line, max_chars);

    let widths: SmallVec<[f32; 4]> = runs.iter().map(|run| run_width(line, run)).collect();
    let box_width = widths.iter().fold(0.0_f32, |acc, w| acc.max(*w));

    let mut aabb = Aabb::EMPTY;
    for (i, run) in runs.iter().enumerate() {
        let x = match align {
            Align::Left => 0.0,
            Align::Center => (box_width - widths[i]) / 2.0,
            Align::Right => box_width - widths[i],
        };
        let y = i as f32 * line.height();
        draw_run(line, run.clone(), Vec2::new(x, y), scratch, &mut aabb);
    }
    aabb
}

/// Splits the shape sequence into per-line index ranges.
fn break_runs(line: &ShapedLine, max_chars: u32) -> SmallVec<[Range<usize>; 4]> {
    let shapes = line.shapes();
    let max_chars = max_chars.max(1) as usize;

    let mut runs: SmallVec<[Range<usize>; 4]> = SmallVec::new();
    let mut start = 0_usize;
    let mut last_space = None;

    for i in 0..shapes.len() {
        if i - start + 1 > max_chars {
            if let Some(space) = last_space {
                runs.push(start..space);
                start = space + 1;
                last_space = None;
            }
        }
        if shapes[i].is_space {
            last_space = Some(i);
        }
    }
    runs.push(start..shapes.len());
    runs
}

/// Advance width of a run, ignoring leading and trailing whitespace.
fn run_width(line: &ShapedLine, run: &Range<usize>) -> f32 {
    let shapes = &line.shapes()[run.clone()];
    let from = shapes.iter().position(|s| !s.is_space);
    let to = shapes.iter().rposition(|s| !s.is_space);
    match (from, to) {
        (Some(from), Some(to)) => shapes[from..=to]
            .iter()
            .map(|s| s.advance * line.scale())
            .sum(),
        _ => 0.0,
    }
}

fn draw_run(
    line: &ShapedLine,
    run: Range<usize>,
    origin: Vec2,
    scratch: &mut ScratchBuffer,
    aabb: &mut Aabb,
) {
    let scale = line.scale();
    let mut pen = origin;

    // Leading whitespace does not indent an aligned line.
    let shapes = &line.shapes()[run];
    let skip = shapes.iter().take_while(|s| s.is_space).count();

    for shape in &shapes[skip..] {
        if let Some(glyph) = &shape.glyph {
            let rect = Rect {
                x1: pen.x + shape.offset.x * scale,
                y1: pen.y + shape.offset.y * scale,
                x2: pen.x + (shape.offset.x + shape.size.x) * scale,
                y2: pen.y + (shape.offset.y + shape.size.y) * scale,
            };
            scratch.draw_glyph(rect, glyph);
            aabb.add_rect(rect);
        }
        pen.x += shape.advance * scale;
    }
}
