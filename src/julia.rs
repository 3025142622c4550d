//! The inverse-iteration Julia movie.
//!
//! Forward iteration falls away from the Julia set; backward iteration
//! falls onto it.  Each frame drops a walker near the set, lets it
//! warm up for a few discarded steps, then plots a long random walk
//! over the two inverse branches while the parameter sweeps from the
//! orderly circle regime into chaos.  The complex viewport never
//! changes; only the parameter does.

use animate::{progress, Sweep};
use canvas::{Canvas, YAxis};
use color::{Color, BLACK, CYAN};
use failure::{err_msg, Error};
use num::Complex;
use orbits::InverseWalker;
use planes::{PixelGrid, PlaneMapper, Viewport};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed configuration for the Julia movie.
#[derive(Copy, Clone, Debug)]
pub struct JuliaConfig {
    /// Canvas width in pixels.
    pub width: usize,
    /// Canvas height in pixels.
    pub height: usize,
    /// Total frames in the animation.
    pub frames: usize,
    /// Walker steps plotted per frame.  More points, brighter set.
    pub points_per_frame: usize,
    /// Discarded steps before plotting begins each frame.
    pub warm_up: usize,
    /// Parameter sweep across the animation.
    pub lambda: Sweep,
    /// The fixed window on the complex plane.
    pub viewport: Viewport,
    /// Color of the plotted points.
    pub color: Color,
    /// Background color.
    pub background: Color,
    /// Seed for the one process-wide branch-choice stream.
    pub seed: u64,
}

impl Default for JuliaConfig {
    fn default() -> JuliaConfig {
        JuliaConfig {
            width: 1280,
            height: 720,
            frames: 600,
            points_per_frame: 200_000,
            warm_up: 50,
            lambda: Sweep {
                start: 2.5,
                end: 4.1,
            },
            viewport: Viewport::new(-0.5, 1.5, -0.6, 0.6),
            color: CYAN,
            background: BLACK,
            seed: 42,
        }
    }
}

/// The Julia animation driver.
#[derive(Copy, Clone, Debug)]
pub struct JuliaMovie {
    /// The run configuration.
    pub config: JuliaConfig,
}

impl JuliaMovie {
    /// A movie with the canonical configuration.
    pub fn new() -> JuliaMovie {
        JuliaMovie {
            config: JuliaConfig::default(),
        }
    }

    /// Total frames in the animation.
    pub fn frames(&self) -> usize {
        self.config.frames
    }

    /// Render one frame into a reused canvas, drawing branch choices
    /// from the caller's generator.  The generator is deliberately
    /// shared across all frames of a run; reseeding per frame would
    /// change every frame after the first.
    pub fn render_frame<R: Rng>(
        &self,
        frame: usize,
        canvas: &mut Canvas,
        rng: &mut R,
    ) -> Result<(), Error> {
        let c = self.config;
        let plane =
            PlaneMapper::new(PixelGrid(c.width, c.height), c.viewport).map_err(err_msg)?;
        let lambda = c.lambda.at(progress(frame, c.frames));

        canvas.clear();

        let mut walker = InverseWalker::new(Complex::new(0.5, 0.0), lambda);
        walker.warm_up(rng, c.warm_up);

        for _ in 0..c.points_per_frame {
            let z = walker.step(rng);
            if let Some(p) = plane.map_point(z.re, z.im) {
                canvas.plot(p, c.color);
            }
        }
        Ok(())
    }

    /// Render every frame in order, handing each to the sink.  The
    /// branch-choice stream is seeded once, before frame 0.
    pub fn render<S>(&self, sink: &mut S) -> Result<(), Error>
    where
        S: FnMut(usize, &Canvas) -> Result<(), Error>,
    {
        let c = self.config;
        let mut rng = StdRng::seed_from_u64(c.seed);
        let mut canvas = Canvas::new(c.width, c.height, c.background, YAxis::Up);

        for frame in 0..c.frames {
            self.render_frame(frame, &mut canvas, &mut rng)?;
            sink(frame, &canvas)?;
            if frame % 10 == 0 {
                info!(
                    "frame {}/{} (lambda = {:.3})",
                    frame,
                    c.frames,
                    c.lambda.at(progress(frame, c.frames))
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> JuliaMovie {
        let mut movie = JuliaMovie::new();
        movie.config.width = 64;
        movie.config.height = 36;
        movie.config.frames = 3;
        movie.config.points_per_frame = 2_000;
        movie.config.warm_up = 10;
        movie
    }

    #[test]
    fn a_fixed_seed_reproduces_the_whole_run() {
        let movie = small();
        let run = || -> Vec<Vec<u8>> {
            let mut frames = vec![];
            movie
                .render(&mut |_frame, canvas: &Canvas| {
                    frames.push(canvas.to_ppm());
                    Ok(())
                })
                .unwrap();
            frames
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = small();
        let mut b = small();
        a.config.seed = 1;
        b.config.seed = 2;
        let first_frame = |movie: &JuliaMovie| -> Vec<u8> {
            let mut out = vec![];
            movie
                .render(&mut |frame, canvas: &Canvas| {
                    if frame == 0 {
                        out.push(canvas.to_ppm());
                    }
                    Ok(())
                })
                .unwrap();
            out.remove(0)
        };
        assert_ne!(first_frame(&a), first_frame(&b));
    }

    #[test]
    fn the_canvas_is_cleared_between_frames() {
        // With zero points plotted, every emitted frame is pure
        // background even though the buffer is reused.
        let mut movie = small();
        movie.config.points_per_frame = 0;
        movie.config.warm_up = 0;
        movie
            .render(&mut |_frame, canvas: &Canvas| {
                let ppm = canvas.to_ppm();
                let body = &ppm[ppm.len() - 64 * 36 * 3..];
                assert!(body.iter().all(|b| *b == 0));
                Ok(())
            })
            .unwrap();
    }
}
