//! Purpose: The pure numeric computation behind `pysimple.square`.
//! Exports: `square`.
//! Invariants: Arithmetic stays in f32; overflow yields infinity, NaN propagates.

pub fn square(x: f32) -> f32 {
    x * x
}
