#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Logistic map movie renderer
//!
//! The logistic map `x' = lambda x (1 - x)` is the simplest equation
//! anyone has found that runs the whole gamut from dead-stable to
//! fully chaotic as one knob turns.  This crate renders that story as
//! animations: cobweb diagrams of single orbits, bifurcation diagrams
//! painting themselves in column by column, deep adaptive zooms onto
//! the period-3 accumulation point, and the Julia sets of the map's
//! complex inverse, walked backwards one random branch at a time.
//!
//! Every mode is the same machine underneath.  A sweep law turns a
//! frame index into a parameter value or a viewport, an orbit
//! generator turns that into a sequence of visited values, a plane
//! mapper turns values into pixel coordinates, and a canvas collects
//! the pixels and serializes them as a binary PPM frame for whatever
//! assembles the movie downstream.

extern crate crossbeam;
extern crate failure;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;
extern crate rand;

pub mod animate;
pub mod canvas;
pub mod cobweb;
pub mod color;
pub mod julia;
pub mod orbits;
pub mod planes;
pub mod rainbow;
pub mod zoom;

pub use canvas::{Canvas, YAxis};
pub use color::{Color, Gradient};
pub use planes::{PlaneMapper, Viewport};
