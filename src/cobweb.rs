//! Cobweb-diagram movies.
//!
//! A cobweb diagram traces an orbit against the graph of the map and
//! the identity diagonal: rise to the curve, across to the diagonal,
//! rise to the curve again.  Two animations come out of the same
//! geometry.  One holds the parameter fixed and sweeps the starting
//! point across the unit interval; the other pins the orbit to the
//! critical point and sweeps the parameter itself, so the parabola
//! grows frame by frame and the orbit follows the period-doubling
//! cascade.

use animate::{progress, Sweep};
use canvas::{Canvas, YAxis};
use color::{Color, BLACK, BLUE, GRAY, LIGHT_GRAY, RED, WHITE};
use failure::{err_msg, Error};
use itertools::Itertools;
use orbits::logistic;
use planes::{PixelGrid, PlaneMapper, Viewport};

/// Fixed configuration for a cobweb movie, constructed once before the
/// run and never mutated during it.
#[derive(Copy, Clone, Debug)]
pub struct CobwebConfig {
    /// Canvas width in pixels.
    pub width: usize,
    /// Canvas height in pixels.
    pub height: usize,
    /// Cobweb steps traced per orbit.
    pub iterations: usize,
    /// Total frames in the animation.
    pub frames: usize,
    /// Color of the identity diagonal.
    pub diagonal: Color,
}

/// Which quantity the animation sweeps across frames.
#[derive(Copy, Clone, Debug)]
pub enum CobwebSweep {
    /// The parameter is fixed and the seed runs 0 to 1 with progress.
    /// Draws the critical-point orbit in blue behind the sweeping
    /// orbit in red.
    Seed {
        /// The fixed map parameter.
        lambda: f64,
    },
    /// The seed is pinned to the critical point 0.5 and the parameter
    /// sweeps.
    Lambda(Sweep),
}

/// The cobweb animation driver.
#[derive(Copy, Clone, Debug)]
pub struct CobwebMovie {
    /// The run configuration.
    pub config: CobwebConfig,
    /// The swept quantity.
    pub sweep: CobwebSweep,
}

impl CobwebMovie {
    /// The seed-sweep movie: 300 frames of a fixed-parameter diagram
    /// with the starting point walking across the interval.
    pub fn seed_sweep(lambda: f64) -> CobwebMovie {
        CobwebMovie {
            config: CobwebConfig {
                width: 800,
                height: 800,
                iterations: 60,
                frames: 300,
                diagonal: GRAY,
            },
            sweep: CobwebSweep::Seed { lambda },
        }
    }

    /// The parameter-sweep movie: the critical orbit as the parameter
    /// climbs from 2 to 4 over 600 frames.
    pub fn lambda_sweep() -> CobwebMovie {
        CobwebMovie {
            config: CobwebConfig {
                width: 800,
                height: 800,
                iterations: 100,
                frames: 600,
                diagonal: LIGHT_GRAY,
            },
            sweep: CobwebSweep::Lambda(Sweep {
                start: 2.0,
                end: 4.0,
            }),
        }
    }

    /// Total frames in the animation.
    pub fn frames(&self) -> usize {
        self.config.frames
    }

    /// Render one frame onto a fresh canvas.
    pub fn render_frame(&self, frame: usize) -> Result<Canvas, Error> {
        let c = self.config;
        let plane = PlaneMapper::new(PixelGrid(c.width, c.height), Viewport::UNIT)
            .map_err(err_msg)?;
        let mut canvas = Canvas::new(c.width, c.height, WHITE, YAxis::Up);
        let t = progress(frame, c.frames);

        let lambda = match self.sweep {
            CobwebSweep::Seed { lambda } => lambda,
            CobwebSweep::Lambda(sweep) => sweep.at(t),
        };

        canvas.draw_line(
            plane.map_x(0.0),
            plane.map_y(0.0),
            plane.map_x(1.0),
            plane.map_y(1.0),
            c.diagonal,
        );
        draw_parabola(&mut canvas, &plane, lambda);

        match self.sweep {
            CobwebSweep::Seed { .. } => {
                draw_cobweb(&mut canvas, &plane, 0.5, lambda, c.iterations, BLUE);
                draw_cobweb(&mut canvas, &plane, t, lambda, c.iterations, RED);
            }
            CobwebSweep::Lambda(_) => {
                draw_cobweb(&mut canvas, &plane, 0.5, lambda, c.iterations, BLUE);
            }
        }

        Ok(canvas)
    }

    /// Render every frame in order, handing each to the sink.  A sink
    /// failure aborts the run.
    pub fn render<S>(&self, sink: &mut S) -> Result<(), Error>
    where
        S: FnMut(usize, &Canvas) -> Result<(), Error>,
    {
        for frame in 0..self.config.frames {
            let canvas = self.render_frame(frame)?;
            sink(frame, &canvas)?;
            if frame % 50 == 0 {
                info!("rendered frame {}/{}", frame, self.config.frames);
            }
        }
        Ok(())
    }
}

/// Trace the graph of the map as a polyline, one segment per adjacent
/// pair of pixel columns.
fn draw_parabola(canvas: &mut Canvas, plane: &PlaneMapper, lambda: f64) {
    for (a, b) in (0..plane.grid.0).map(|col| plane.unmap_x(col)).tuple_windows() {
        canvas.draw_line(
            plane.map_x(a),
            plane.map_y(logistic(a, lambda)),
            plane.map_x(b),
            plane.map_y(logistic(b, lambda)),
            BLACK,
        );
    }
}

/// Trace a cobweb orbit: a first rise from the axis to the curve, then
/// per step a horizontal segment to the diagonal and a vertical
/// segment back to the curve.
pub fn draw_cobweb(
    canvas: &mut Canvas,
    plane: &PlaneMapper,
    x0: f64,
    lambda: f64,
    iterations: usize,
    color: Color,
) {
    let mut x = x0;
    let mut sx = plane.map_x(x);
    let mut sy = plane.map_y(0.0);

    let first = plane.map_y(logistic(x, lambda));
    canvas.draw_line(sx, sy, sx, first, color);
    sy = first;

    for _ in 0..iterations {
        let next = logistic(x, lambda);

        // Across to the diagonal, where y = x.
        let dx = plane.map_x(next);
        let dy = plane.map_y(next);
        canvas.draw_line(sx, sy, dx, dy, color);

        // Back up (or down) to the curve.
        let ny = plane.map_y(logistic(next, lambda));
        canvas.draw_line(dx, dy, dx, ny, color);

        x = next;
        sx = dx;
        sy = ny;
    }
}
