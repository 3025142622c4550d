//! The adaptive zoom into the bifurcation diagram.
//!
//! The window narrows geometrically onto the period-3 accumulation
//! point while the iteration budget grows with the zoom factor: a
//! window a thousand times narrower needs on the order of a thousand
//! times more iterates to reach the same density of plotted points.
//! Columns are independent of one another, so each frame farms them
//! out to a pool of scoped worker threads pulling from a shared queue.

extern crate crossbeam;
extern crate num_cpus;

use self::crossbeam::thread::ScopedJoinHandle;
use animate::{progress, Zoom};
use canvas::{Canvas, YAxis};
use color::{Color, Gradient, WHITE};
use failure::{err_msg, Error};
use orbits::logistic;
use planes::{Pixel, PixelGrid, PlaneMapper, Viewport};
use std::ops::Range;
use std::sync::{Arc, Mutex};

type ColumnQueue = Arc<Mutex<Range<usize>>>;

/// Fixed configuration for the zoom, constructed once and never
/// mutated during the run.
#[derive(Copy, Clone, Debug)]
pub struct ZoomConfig {
    /// Canvas width in pixels.
    pub width: usize,
    /// Canvas height in pixels.
    pub height: usize,
    /// Total frames in the animation.
    pub frames: usize,
    /// Iteration budget at zoom factor 1.
    pub base_iterations: usize,
    /// Extra iterations per unit of zoom factor.
    pub iteration_scale: f64,
    /// Parameter-axis center of the zoom.
    pub center_lambda: f64,
    /// Value-axis center of the zoom.
    pub center_x: f64,
    /// Parameter-axis window extent at zoom factor 1.
    pub lambda_width: f64,
    /// Value-axis window extent at zoom factor 1.
    pub x_height: f64,
    /// The zoom law.
    pub zoom: Zoom,
    /// Exponent applied to the zoom factor on the value axis, which
    /// narrows more slowly than the parameter axis.
    pub x_zoom_exponent: f64,
    /// Iteration-age coloring.
    pub gradient: Gradient,
    /// Worker threads per frame.
    pub threads: usize,
}

impl Default for ZoomConfig {
    fn default() -> ZoomConfig {
        ZoomConfig {
            width: 1280,
            height: 720,
            frames: 500,
            base_iterations: 10_000,
            iteration_scale: 20.0,
            // The period-3 accumulation point.
            center_lambda: 3.854_077_963_5,
            center_x: 0.5,
            lambda_width: 3.0,
            x_height: 1.2,
            zoom: Zoom { total: 50_000.0 },
            x_zoom_exponent: 0.85,
            gradient: Gradient::heat().with_gamma(0.5),
            threads: num_cpus::get(),
        }
    }
}

/// The zoom animation driver.
#[derive(Copy, Clone, Debug)]
pub struct ZoomMovie {
    /// The run configuration.
    pub config: ZoomConfig,
}

impl ZoomMovie {
    /// A zoom with the canonical configuration.
    pub fn new() -> ZoomMovie {
        ZoomMovie {
            config: ZoomConfig::default(),
        }
    }

    /// Total frames in the animation.
    pub fn frames(&self) -> usize {
        self.config.frames
    }

    /// The window at progress `t`.  The center never moves; both
    /// extents shrink with the zoom factor, the value axis on its own
    /// slower exponent.
    pub fn viewport_at(&self, t: f64) -> Viewport {
        let c = self.config;
        let zoom = c.zoom.factor_at(t);
        Viewport::centered(
            c.center_lambda,
            c.center_x,
            c.lambda_width / zoom,
            c.x_height / zoom.powf(c.x_zoom_exponent),
        )
    }

    /// The iteration budget at progress `t`, scaled with the zoom
    /// factor so density keeps up with the narrowing window.
    pub fn budget_at(&self, t: f64) -> usize {
        let c = self.config;
        c.base_iterations + (c.zoom.factor_at(t) * c.iteration_scale) as usize
    }

    /// Render one frame, farming the columns out across the worker
    /// pool.
    pub fn render_frame(&self, frame: usize) -> Result<Canvas, Error> {
        let c = self.config;
        let t = progress(frame, c.frames);
        let budget = self.budget_at(t);
        let plane = PlaneMapper::new(PixelGrid(c.width, c.height), self.viewport_at(t))
            .map_err(err_msg)?;
        let mut canvas = Canvas::new(c.width, c.height, WHITE, YAxis::Up);

        let mut rendered: Vec<(usize, Vec<Option<Color>>)> = vec![];
        {
            let plane = &plane;
            let columns: ColumnQueue = Arc::new(Mutex::new(0..c.width));
            crossbeam::scope(|spawner| {
                let handles: Vec<ScopedJoinHandle<Vec<(usize, Vec<Option<Color>>)>>> = (0..c
                    .threads)
                    .map(|_| {
                        let columns = columns.clone();
                        spawner.spawn(move |_| {
                            let mut done = vec![];
                            loop {
                                let col = { columns.lock().unwrap().next() };
                                match col {
                                    Some(col) => {
                                        done.push((col, render_column(plane, col, budget, c.gradient)));
                                    }
                                    None => {
                                        break;
                                    }
                                }
                            }
                            done
                        })
                    })
                    .collect();

                rendered = handles
                    .into_iter()
                    .map(|handle| handle.join().unwrap())
                    .flatten()
                    .collect();
            })
            .unwrap();
        }

        for (col, column) in rendered {
            for (row, color) in column.into_iter().enumerate() {
                if let Some(color) = color {
                    canvas.plot(Pixel(col, row), color);
                }
            }
        }
        Ok(canvas)
    }

    /// Render every frame in order, handing each to the sink.
    pub fn render<S>(&self, sink: &mut S) -> Result<(), Error>
    where
        S: FnMut(usize, &Canvas) -> Result<(), Error>,
    {
        let c = self.config;
        for frame in 0..c.frames {
            let canvas = self.render_frame(frame)?;
            sink(frame, &canvas)?;
            if frame % 10 == 0 {
                let t = progress(frame, c.frames);
                info!(
                    "frame {}/{} (zoom x{:.0}, budget {})",
                    frame,
                    c.frames,
                    c.zoom.factor_at(t),
                    self.budget_at(t)
                );
            }
        }
        Ok(())
    }
}

/// One column of one frame: the forward orbit of the critical point
/// under this column's parameter, folded into a private column buffer.
/// Later iterates overwrite earlier ones at the same row, which is the
/// age ordering the sequential renderer had.
fn render_column(
    plane: &PlaneMapper,
    col: usize,
    budget: usize,
    gradient: Gradient,
) -> Vec<Option<Color>> {
    let mut column = vec![None; plane.grid.1];
    let lambda = plane.unmap_x(col);
    let mut x = 0.5;
    for i in 0..budget {
        x = logistic(x, lambda);
        if let Some(Pixel(_, row)) = plane.map_point(lambda, x) {
            column[row] = Some(gradient.at(i, budget));
        }
    }
    column
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> ZoomMovie {
        let mut movie = ZoomMovie::new();
        movie.config.width = 64;
        movie.config.height = 48;
        movie.config.frames = 3;
        movie.config.base_iterations = 200;
        movie.config.iteration_scale = 1.0;
        movie.config.zoom = Zoom { total: 100.0 };
        movie.config.threads = 2;
        movie
    }

    #[test]
    fn budget_grows_with_zoom() {
        let movie = small();
        assert!(movie.budget_at(1.0) > movie.budget_at(0.0));
        // Zoom factor 1 at t=0, 100 at t=1, scaled by 1.0 on a base of 200.
        assert_eq!(movie.budget_at(0.0), 201);
        assert_eq!(movie.budget_at(1.0), 300);
    }

    #[test]
    fn viewport_narrows_around_a_fixed_center() {
        let movie = small();
        let wide = movie.viewport_at(0.0);
        let tight = movie.viewport_at(1.0);
        assert!(tight.width() < wide.width());
        assert!(tight.height() < wide.height());
        let center = movie.config.center_lambda;
        assert!((wide.x_min + wide.width() / 2.0 - center).abs() < 1e-9);
        assert!((tight.x_min + tight.width() / 2.0 - center).abs() < 1e-9);
    }

    #[test]
    fn parallel_render_matches_itself() {
        // Columns composite deterministically whatever order the
        // workers finish in.
        let movie = small();
        let a = movie.render_frame(1).unwrap();
        let b = movie.render_frame(1).unwrap();
        assert_eq!(a.to_ppm(), b.to_ppm());
    }

    #[test]
    fn frames_have_the_configured_dimensions() {
        let movie = small();
        let canvas = movie.render_frame(0).unwrap();
        assert_eq!(canvas.width(), 64);
        assert_eq!(canvas.height(), 48);
    }
}
