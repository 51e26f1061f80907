use glam::Vec2;

use crate::{
    agent::Agent,
    options::{Distance, RunOptions, WorldSize},
};

pub fn distance_dyn_agent(a1: &Agent, a2: &Agent, run_options: &RunOptions) -> f32 {
    distance_dyn(a1.position, a2.position, run_options)
}

pub fn distance_dyn(p1: Vec2, p2: Vec2, run_options: &RunOptions) -> f32 {
    match run_options.distance {
        Distance::EucEnclosed => simple_distance(p1.x, p2.x, p1.y, p2.y),
        Distance::EucToroidal => toroidal_distance(p1.x, p2.x, p1.y, p2.y, &run_options.world),
    }
}

/// Vector pointing from `from` towards `to`, along the shortest path under the
/// configured distance
pub fn offset_dyn(from: Vec2, to: Vec2, run_options: &RunOptions) -> Vec2 {
    match run_options.distance {
        Distance::EucEnclosed => to - from,
        Distance::EucToroidal => tor_vec(from, to, &run_options.world),
    }
}

pub fn simple_distance(x1: f32, x2: f32, y1: f32, y2: f32) -> f32 {
    simple_distance_sq(x1, x2, y1, y2).sqrt()
}

pub fn simple_distance_sq(x1: f32, x2: f32, y1: f32, y2: f32) -> f32 {
    (x1 - x2).powi(2) + (y1 - y2).powi(2)
}

pub fn toroidal_distance(x1: f32, x2: f32, y1: f32, y2: f32, world: &WorldSize) -> f32 {
    toroidal_distance_sq(x1, x2, y1, y2, world).sqrt()
}

pub fn toroidal_distance_sq(x1: f32, x2: f32, y1: f32, y2: f32, world: &WorldSize) -> f32 {
    let (dx, dy) = tor_vec_p(x1, x2, y1, y2, world);

    dx.powi(2) + dy.powi(2)
}

pub fn tor_vec(v1: Vec2, v2: Vec2, world: &WorldSize) -> Vec2 {
    Vec2::from(tor_vec_p(v1.x, v2.x, v1.y, v2.y, world))
}

/// Producess a vector along the shortest path from p1(x1,y1) to p2 (x2, t2) in a toroidal space.
/// Originally inspired by toroidal distance as per [source](https://blog.demofox.org/2017/10/01/calculating-the-distance-between-points-in-wrap-around-toroidal-space/),
/// with a modification to preserve directionality (sign)
#[inline]
pub fn tor_vec_p(x1: f32, x2: f32, y1: f32, y2: f32, world: &WorldSize) -> (f32, f32) {
    let dx_p2 = tor_vec_pc(x1, x2, world.width);
    let dy_p2 = tor_vec_pc(y1, y2, world.height);

    (dx_p2, dy_p2)
}

/// pc - point's component
#[inline]
pub fn tor_vec_pc(x1: f32, x2: f32, size: f32) -> f32 {
    // component pointing towards x2
    let d_p2 = x2 - x1;
    // if we are crossing more than half the space, the other way it shall be
    if d_p2.abs() > size / 2. {
        d_p2 + if d_p2 < 0. { size } else { -size }
    } else {
        d_p2
    }
}

/// Wraps a coordinate into [0, size)
#[inline]
pub fn wrap(value: f32, size: f32) -> f32 {
    let wrapped = value.rem_euclid(size);
    // rem_euclid rounds tiny negative values up to `size`
    if wrapped >= size {
        0.
    } else {
        wrapped
    }
}

pub fn wrap_position(position: Vec2, world: &WorldSize) -> Vec2 {
    Vec2::new(wrap(position.x, world.width), wrap(position.y, world.height))
}
