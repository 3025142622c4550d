// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Orbit generation for the logistic map.
//!
//! Two directions.  Forward iteration of `x' = lambda x (1 - x)`
//! produces the sequences behind the cobweb and bifurcation pictures.
//! Backward iteration inverts the map on the complex plane; the
//! inverse is 2-to-1, and a random walk over the two branches lands
//! statistically on the Julia set of the map, which is the repeller of
//! the forward dynamics.

use num::Complex;
use rand::Rng;

/// One application of the logistic map.
#[inline]
pub fn logistic(x: f64, lambda: f64) -> f64 {
    lambda * x * (1.0 - x)
}

/// A lazy, finite forward orbit.  Yields the seed first, then each
/// successive iterate, `limit` values in all.  No transients are
/// skipped; the density plots draw every iterate from the seed onward
/// so the filling-in of the attractor stays visible.
#[derive(Copy, Clone, Debug)]
pub struct Orbit {
    x0: f64,
    lambda: f64,
    limit: usize,
    x: f64,
    taken: usize,
}

impl Orbit {
    /// An orbit of `limit` values starting from `x0` under parameter
    /// `lambda`.
    pub fn new(x0: f64, lambda: f64, limit: usize) -> Orbit {
        Orbit {
            x0,
            lambda,
            limit,
            x: x0,
            taken: 0,
        }
    }

    /// Rewind to the seed.  The same values come out again.
    pub fn restart(&mut self) {
        self.x = self.x0;
        self.taken = 0;
    }
}

impl Iterator for Orbit {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.taken == self.limit {
            return None;
        }
        let out = self.x;
        self.x = logistic(self.x, self.lambda);
        self.taken += 1;
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.limit - self.taken;
        (left, Some(left))
    }
}

/// A random-branch walker over the complex inverse of the map,
/// `z' = (1 +/- sqrt(1 - 4z/lambda)) / 2`.
///
/// The arithmetic is genuinely complex even for real parameters: the
/// radicand goes negative whenever the walk visits `z > lambda/4`, and
/// the imaginary parts it picks up there are what trace out the
/// off-axis filaments of the set.  The branch sign is a fair coin
/// drawn from the caller's generator, one draw per step, so a run is
/// reproducible exactly when the seed and the draw order are fixed.
#[derive(Copy, Clone, Debug)]
pub struct InverseWalker {
    z: Complex<f64>,
    lambda: Complex<f64>,
}

impl InverseWalker {
    /// A walker starting from the guess `z0` under parameter `lambda`.
    pub fn new(z0: Complex<f64>, lambda: f64) -> InverseWalker {
        InverseWalker {
            z: z0,
            lambda: Complex::new(lambda, 0.0),
        }
    }

    /// The walker's current position.
    pub fn position(&self) -> Complex<f64> {
        self.z
    }

    /// Take one backward step on a randomly chosen branch and return
    /// the new position.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> Complex<f64> {
        let one = Complex::new(1.0, 0.0);
        let root = (one - self.z * 4.0 / self.lambda).sqrt();
        self.z = if rng.gen::<bool>() {
            (one + root) * 0.5
        } else {
            (one - root) * 0.5
        };
        self.z
    }

    /// Run `steps` discarded steps so the iterate settles onto the
    /// invariant set before anything is plotted.  Uses the same branch
    /// rule, and the same draws, as the drawn steps.
    pub fn warm_up<R: Rng>(&mut self, rng: &mut R, steps: usize) {
        for _ in 0..steps {
            self.step(rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn forward_orbit_stays_in_the_unit_interval() {
        for x in Orbit::new(0.5, 4.0, 10_000) {
            assert!(x >= 0.0 && x <= 1.0, "orbit left [0,1] at {}", x);
        }
    }

    #[test]
    fn orbit_yields_the_seed_first() {
        let mut orbit = Orbit::new(0.2, 3.5, 10);
        assert_eq!(orbit.next(), Some(0.2));
        assert_eq!(orbit.next(), Some(logistic(0.2, 3.5)));
    }

    #[test]
    fn orbit_is_finite_and_sized() {
        let orbit = Orbit::new(0.3, 3.9, 60);
        assert_eq!(orbit.size_hint(), (60, Some(60)));
        assert_eq!(orbit.count(), 60);
    }

    #[test]
    fn restart_replays_the_same_values() {
        let mut orbit = Orbit::new(0.3, 3.7, 20);
        let first: Vec<f64> = orbit.by_ref().collect();
        orbit.restart();
        let second: Vec<f64> = orbit.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn warmed_up_walker_remains_bounded() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut walker = InverseWalker::new(Complex::new(0.5, 0.0), 3.0);
        walker.warm_up(&mut rng, 50);
        for _ in 0..1_000 {
            let z = walker.step(&mut rng);
            assert!(z.norm() <= 2.0, "walker diverged to {}", z);
        }
    }

    #[test]
    fn walker_goes_complex_past_the_fold() {
        // Anything right of lambda/4 has a negative radicand, so the
        // step must produce a genuinely non-real position.
        let mut rng = StdRng::seed_from_u64(1);
        let mut walker = InverseWalker::new(Complex::new(0.9, 0.0), 3.0);
        let z = walker.step(&mut rng);
        assert!(z.im != 0.0);
    }

    #[test]
    fn fixed_seed_fixes_the_walk() {
        let walk = |seed: u64| -> Vec<Complex<f64>> {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut walker = InverseWalker::new(Complex::new(0.5, 0.0), 3.4);
            (0..100).map(|_| walker.step(&mut rng)).collect()
        };
        assert_eq!(walk(42), walk(42));
    }
}
