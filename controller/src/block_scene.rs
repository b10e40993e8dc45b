//! Analytic scene of axis-aligned solid blocks.
//!
//! Every query scans all blocks and keeps the earliest hit; fine for the small
//! hand-built levels and tests this is meant for. Larger static worlds should
//! go through [`crate::rapier_world::RapierQueryWorld`].

use nalgebra::{Point2, Unit, Vector2};

use crate::{
    scene::{LayerMask, RayHit, SceneQuery},
    types::Bounds,
};

/// A solid axis-aligned block on one or more layers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Block {
    pub bounds: Bounds,
    pub layers: LayerMask,
}

impl Block {
    #[inline]
    pub fn new(min: Point2<f32>, max: Point2<f32>) -> Self {
        Self {
            bounds: Bounds::new(min, max),
            layers: LayerMask::ALL,
        }
    }

    #[inline]
    pub fn on_layers(mut self, layers: LayerMask) -> Self {
        self.layers = layers;
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct BlockScene {
    blocks: Vec<Block>,
}

impl BlockScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl SceneQuery for BlockScene {
    fn cast_ray(
        &self,
        origin: Point2<f32>,
        direction: Unit<Vector2<f32>>,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        let mut best: Option<f32> = None;
        for block in &self.blocks {
            if !block.layers.intersects(mask) {
                continue;
            }
            if let Some(t) = ray_vs_bounds(origin, direction.into_inner(), &block.bounds) {
                if t <= max_distance && best.is_none_or(|b| t < b) {
                    best = Some(t);
                }
            }
        }
        best.map(|distance| RayHit { distance })
    }
}

/// Slab test. Returns the entry distance along `dir`, or 0 when `origin` is inside.
fn ray_vs_bounds(origin: Point2<f32>, dir: Vector2<f32>, bounds: &Bounds) -> Option<f32> {
    let mut t_enter = 0.0f32;
    let mut t_exit = f32::INFINITY;

    for axis in 0..2 {
        let o = origin[axis];
        let d = dir[axis];
        let (lo, hi) = (bounds.min[axis], bounds.max[axis]);

        if d == 0.0 {
            // Parallel to this slab: must already be between its planes.
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let (t0, t1) = {
            let a = (lo - o) * inv;
            let b = (hi - o) * inv;
            if a <= b { (a, b) } else { (b, a) }
        };
        t_enter = t_enter.max(t0);
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }

    Some(t_enter)
}
