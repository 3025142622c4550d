//! The accumulating bifurcation scan.
//!
//! One persistent canvas, scanned left to right.  Each pixel column
//! gets the forward orbit of the critical point under the parameter
//! value that column represents, colored by iteration age, and the
//! canvas is emitted as a frame every few columns.  Nothing is ever
//! cleared, so the movie is the bifurcation diagram painting itself
//! in.

use animate::Sweep;
use canvas::{Canvas, YAxis};
use color::{Gradient, WHITE};
use failure::{err_msg, Error};
use orbits::Orbit;
use planes::{PixelGrid, PlaneMapper, Viewport};

/// Fixed configuration for the scan.
#[derive(Copy, Clone, Debug)]
pub struct RainbowConfig {
    /// Canvas width in pixels; also the number of scan steps.
    pub width: usize,
    /// Canvas height in pixels.
    pub height: usize,
    /// Orbit values plotted per column, seed included.  No transients
    /// are skipped.
    pub iterations: usize,
    /// Parameter range scanned across the columns.
    pub lambda: Sweep,
    /// Emit a frame every this many columns.
    pub save_every: usize,
    /// Iteration-age coloring.
    pub gradient: Gradient,
}

impl Default for RainbowConfig {
    fn default() -> RainbowConfig {
        RainbowConfig {
            width: 800,
            height: 800,
            iterations: 60,
            lambda: Sweep {
                start: 1.0,
                end: 4.0,
            },
            save_every: 2,
            gradient: Gradient::heat(),
        }
    }
}

/// The scan driver.
#[derive(Copy, Clone, Debug)]
pub struct RainbowMovie {
    /// The run configuration.
    pub config: RainbowConfig,
}

impl RainbowMovie {
    /// A scan with the canonical configuration.
    pub fn new() -> RainbowMovie {
        RainbowMovie {
            config: RainbowConfig::default(),
        }
    }

    /// Number of frames the scan will emit.
    pub fn frames(&self) -> usize {
        (self.config.width + self.config.save_every - 1) / self.config.save_every
    }

    /// Run the scan, emitting the accumulated canvas to the sink every
    /// `save_every` columns.
    pub fn render<S>(&self, sink: &mut S) -> Result<(), Error>
    where
        S: FnMut(usize, &Canvas) -> Result<(), Error>,
    {
        let c = self.config;
        let viewport = Viewport::new(c.lambda.start, c.lambda.end, 0.0, 1.0);
        let plane = PlaneMapper::new(PixelGrid(c.width, c.height), viewport).map_err(err_msg)?;
        let mut canvas = Canvas::new(c.width, c.height, WHITE, YAxis::Up);

        for col in 0..c.width {
            let lambda = plane.unmap_x(col);

            for (i, x) in Orbit::new(0.5, lambda, c.iterations).enumerate() {
                if let Some(p) = plane.map_point(lambda, x) {
                    canvas.plot(p, c.gradient.at(i, c.iterations));
                }
            }

            if col % c.save_every == 0 {
                sink(col / c.save_every, &canvas)?;
            }
            if col % 100 == 0 {
                info!("column {}/{} (lambda = {:.3})", col, c.width, lambda);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_one_frame_per_save_interval() {
        let mut movie = RainbowMovie::new();
        movie.config.width = 40;
        movie.config.height = 30;
        movie.config.save_every = 2;
        let mut frames: Vec<usize> = vec![];
        movie
            .render(&mut |frame, _canvas: &Canvas| {
                frames.push(frame);
                Ok(())
            })
            .unwrap();
        assert_eq!(frames.len(), movie.frames());
        assert_eq!(frames.first(), Some(&0));
        assert_eq!(frames.last(), Some(&19));
    }

    #[test]
    fn canvas_accumulates_across_columns() {
        // A later frame must contain at least as many non-background
        // pixels as an earlier one; nothing is ever cleared.
        let mut movie = RainbowMovie::new();
        movie.config.width = 40;
        movie.config.height = 30;
        movie.config.save_every = 10;
        let mut painted: Vec<usize> = vec![];
        movie
            .render(&mut |_frame, canvas: &Canvas| {
                let ppm = canvas.to_ppm();
                let body = &ppm[ppm.len() - 40 * 30 * 3..];
                painted.push(body.chunks(3).filter(|p| *p != [255, 255, 255]).count());
                Ok(())
            })
            .unwrap();
        for pair in painted.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert!(*painted.last().unwrap() > 0);
    }
}
