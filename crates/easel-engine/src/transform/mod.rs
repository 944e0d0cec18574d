//! Matrix stacks, one per transform channel.
//!
//! Convention: column vectors, post-multiplication. `mult(m)` sets
//! `top = top * m`, so `m` acts on vertices before everything already on the
//! stack.

mod handedness;
mod stack;
mod stacks;

pub use handedness::Handedness;
pub use stack::MatrixStack;
pub use stacks::MatrixStacks;

/// Transform channel. Each owns an independent [`MatrixStack`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum MatrixMode {
    #[default]
    ModelView,
    Projection,
    Texture,
}

impl MatrixMode {
    pub const ALL: [MatrixMode; 3] = [MatrixMode::ModelView, MatrixMode::Projection, MatrixMode::Texture];
}
