// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pixel canvas: a dense RGB buffer with Bresenham line drawing
//! and binary PPM serialization.
//!
//! Every rendering mode draws through this one type.  The modes differ
//! in two policies that are fixed at construction time: the background
//! color the buffer starts from (and returns to on `clear`), and the
//! vertical orientation.  The mathematical conventions of the map put
//! the value axis pointing up, while raster images put row zero at the
//! top; a canvas built with `YAxis::Up` performs that flip on every
//! write so callers can stay in domain orientation throughout.

use color::Color;
use planes::Pixel;
use std::io::{self, Write};

/// Vertical orientation of the pixel buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum YAxis {
    /// Image convention.  Row zero is the top; y grows downward.
    Down,
    /// Domain convention.  y grows upward; writes are flipped so that
    /// y = 0 lands on the bottom buffer row.
    Up,
}

/// A width x height raster of colors, stored row-major, top row first.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    background: Color,
    y_axis: YAxis,
    pixels: Vec<Color>,
}

impl Canvas {
    /// A canvas filled with `background`.  The orientation applies to
    /// every subsequent write.
    pub fn new(width: usize, height: usize, background: Color, y_axis: YAxis) -> Canvas {
        Canvas {
            width,
            height,
            background,
            y_axis,
            pixels: vec![background; width * height],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Reset every pixel to the construction-time background.
    pub fn clear(&mut self) {
        for p in self.pixels.iter_mut() {
            *p = self.background;
        }
    }

    /// Write one pixel.  Coordinates outside the canvas are silently
    /// dropped; this is the clipping mechanism for off-viewport orbit
    /// points, so it must never be an error.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        let y = match self.y_axis {
            YAxis::Down => y,
            YAxis::Up => self.height as i32 - 1 - y,
        };
        if x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height {
            self.pixels[(y as usize) * self.width + (x as usize)] = color;
        }
    }

    /// Write one pixel at a grid point that already passed a bounds
    /// check in the mapper.
    pub fn plot(&mut self, p: Pixel, color: Color) {
        self.set_pixel(p.0 as i32, p.1 as i32, color);
    }

    /// Rasterize a line segment with the integer Bresenham algorithm.
    /// Handles every slope octant; a zero-length segment plots a single
    /// pixel.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let (mut x0, mut y0) = (x0, y0);
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.set_pixel(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Serialize as a binary PPM (P6) image.  The header is the exact
    /// ASCII sequence `P6\n{width} {height}\n255\n`, followed by raw
    /// RGB triples, top row first.  Downstream frame-to-video assembly
    /// depends on these bytes, so the format is pinned by test.
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        let mut raw = Vec::with_capacity(self.pixels.len() * 3);
        for p in &self.pixels {
            raw.push(p.r);
            raw.push(p.g);
            raw.push(p.b);
        }
        out.write_all(&raw)
    }

    /// The full PPM byte stream as a vector.
    pub fn to_ppm(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.pixels.len() * 3 + 20);
        self.write_ppm(&mut buf).expect("in-memory write");
        buf
    }
}
