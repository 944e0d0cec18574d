use glam::Mat4;

use crate::error::{RenderError, Result, StackKind};

use super::MatrixMode;

/// LIFO of 4×4 transforms for a single channel.
///
/// Invariant: never empty; the base entry starts as identity and cannot be
/// popped. The top entry is the current transform.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    mode: MatrixMode,
    stack: Vec<Mat4>,
}

impl MatrixStack {
    pub fn new(mode: MatrixMode) -> Self {
        Self {
            mode,
            stack: vec![Mat4::IDENTITY],
        }
    }

    #[inline]
    pub fn mode(&self) -> MatrixMode {
        self.mode
    }

    #[inline]
    pub fn current(&self) -> Mat4 {
        self.stack[self.stack.len() - 1]
    }

    #[inline]
    fn top_mut(&mut self) -> &mut Mat4 {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// Number of entries, including the base.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Duplicates the top entry.
    #[inline]
    pub fn push(&mut self) {
        let top = self.current();
        self.stack.push(top);
    }

    pub fn pop(&mut self) -> Result<()> {
        if self.stack.len() <= 1 {
            return Err(RenderError::StackUnderflow {
                stack: StackKind::Matrix(self.mode),
            });
        }
        self.stack.pop();
        Ok(())
    }

    /// Replaces the top in place.
    #[inline]
    pub fn load(&mut self, m: Mat4) {
        *self.top_mut() = m;
    }

    #[inline]
    pub fn load_identity(&mut self) {
        self.load(Mat4::IDENTITY);
    }

    /// `top = top * m`.
    #[inline]
    pub fn mult(&mut self, m: Mat4) {
        let top = self.top_mut();
        *top = *top * m;
    }
}
