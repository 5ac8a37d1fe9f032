//! One generator per shape family. Each is a pure function of its parameter
//! map plus an RNG; only the keys listed in the file are read.

pub mod cube_cloud;
pub mod double_helix;
pub mod flower;
pub mod heart;
pub mod saturn;
pub mod sphere;
pub mod star;
pub mod text;
pub mod torus_knot;
pub mod wave;

use crate::geometry::Geometry;
use crate::params::ParameterMap;
use crate::rng::Rng;

pub type Generator = fn(&ParameterMap, &mut Rng) -> Geometry;

/// Every default parameter set must fit the fixed camera framing.
pub const FRAME_RADIUS: f32 = 15.0;
