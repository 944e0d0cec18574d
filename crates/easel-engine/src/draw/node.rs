use glam::{Mat4, Quat, Vec3};

/// A transform in a scene graph.
///
/// The parent is stored as its resolved global transform, so a node never
/// borrows another.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Node {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub parent: Option<Mat4>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            parent: None,
        }
    }
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn set_parent(&mut self, parent: &Node) {
        self.parent = Some(parent.global_transform());
    }

    pub fn clear_parent(&mut self) {
        self.parent = None;
    }

    pub fn local_transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    pub fn global_transform(&self) -> Mat4 {
        match self.parent {
            Some(p) => p * self.local_transform(),
            None => self.local_transform(),
        }
    }
}
