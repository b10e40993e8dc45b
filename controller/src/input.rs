//! Horizontal input intent consumed by the driver once per tick.

/// Source of a horizontal axis value, nominally in `[-1, 1]`.
///
/// The driver clamps whatever comes out of here, so raw device values are fine.
pub trait HorizontalInput {
    fn axis(&mut self) -> f32;
}

/// A fixed deflection every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConstantInput(pub f32);

impl HorizontalInput for ConstantInput {
    #[inline]
    fn axis(&mut self) -> f32 {
        self.0
    }
}

impl<F: FnMut() -> f32> HorizontalInput for F {
    #[inline]
    fn axis(&mut self) -> f32 {
        self()
    }
}

/// Replays a recorded sequence of axis values, one per tick, then holds the last one.
///
/// An empty script reads as no input.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Ticks consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.cursor
    }
}

impl HorizontalInput for ScriptedInput {
    fn axis(&mut self) -> f32 {
        let Some(last) = self.values.last().copied() else {
            return 0.0;
        };
        let value = self.values.get(self.cursor).copied().unwrap_or(last);
        self.cursor += 1;
        value
    }
}
