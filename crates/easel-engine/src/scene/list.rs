use crate::binding::{BindingKind, ResourceId};
use crate::coords::Rect;
use crate::error::{RenderError, Result};
use crate::paint::{Color, Pixels};
use crate::render::{Backend, Capabilities, GpuBackend};

use super::DrawCmd;

/// A single recorded command with its submission order.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub order: u32,
    pub cmd: DrawCmd<'static>,
    /// Native viewport in effect when the command was submitted.
    pub viewport: Option<Rect>,
}

/// A bind or unbind the renderer forwarded to the backend.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BindingEvent {
    Bind { kind: BindingKind, resource: ResourceId },
    Unbind { kind: BindingKind, resource: ResourceId },
}

/// Recording backend.
///
/// Keeps every submitted command and binding transition in order, so a
/// frame can be inspected or replayed. Built with a reduced capability set
/// it refuses the matching bindings, which is how callers observe
/// `UnsupportedOperation` without a GPU.
///
/// `read_pixels` reports the last clear color for every pixel.
#[derive(Debug)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,
    events: Vec<BindingEvent>,
    capabilities: Capabilities,
    viewport: Option<Rect>,
    clear_color: Color,
    frames: u32,
}

impl Default for DrawList {
    fn default() -> Self {
        Self::with_capabilities(Capabilities::all())
    }
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        Self {
            items: Vec::new(),
            next_order: 0,
            events: Vec::new(),
            capabilities,
            viewport: None,
            clear_color: Color::TRANSPARENT,
            frames: 0,
        }
    }

    /// Clears recorded items and events. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.events.clear();
        self.next_order = 0;
    }

    /// Returns items in submission order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn events(&self) -> &[BindingEvent] {
        &self.events
    }

    #[inline]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Last native viewport the renderer reported.
    #[inline]
    pub fn viewport(&self) -> Option<Rect> {
        self.viewport
    }

    /// Frames completed through `finish_render`.
    #[inline]
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Iterates only the geometry commands.
    pub fn geometry(&self) -> impl Iterator<Item = &super::GeometryCmd<'static>> {
        self.items.iter().filter_map(|item| item.cmd.as_geometry())
    }

    fn require(&self, needed: Capabilities, operation: &'static str) -> Result<()> {
        if self.capabilities.contains(needed) {
            Ok(())
        } else {
            Err(RenderError::UnsupportedOperation {
                operation,
                backend: self.name().to_owned(),
            })
        }
    }
}

impl Backend for DrawList {
    fn name(&self) -> &str {
        "recording"
    }

    fn start_render(&mut self) {
        self.clear();
    }

    fn finish_render(&mut self) {
        self.frames = self.frames.wrapping_add(1);
    }

    fn set_viewport(&mut self, native: Rect) {
        self.viewport = Some(native);
    }

    fn submit(&mut self, cmd: DrawCmd<'_>) {
        if let DrawCmd::Clear(color) = &cmd {
            self.clear_color = *color;
        }
        log::trace!("record #{}: {:?}", self.next_order, std::mem::discriminant(&cmd));

        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem {
            order,
            cmd: cmd.into_owned(),
            viewport: self.viewport,
        });
    }

    fn read_pixels(&mut self, region: Rect, pixels: &mut Pixels<u8>) -> Result<()> {
        self.require(Capabilities::READ_PIXELS, "read_pixels")?;
        log::debug!("read_pixels {region:?}");
        pixels.fill(self.clear_color);
        Ok(())
    }
}

impl GpuBackend for DrawList {
    fn bind(&mut self, kind: BindingKind, resource: ResourceId) -> Result<()> {
        if let Some(needed) = Capabilities::for_binding(kind) {
            self.require(needed, binding_operation(kind))?;
        }
        self.events.push(BindingEvent::Bind { kind, resource });
        Ok(())
    }

    fn unbind(&mut self, kind: BindingKind, resource: ResourceId) {
        self.events.push(BindingEvent::Unbind { kind, resource });
    }
}

fn binding_operation(kind: BindingKind) -> &'static str {
    match kind {
        BindingKind::Camera => "bind_camera",
        BindingKind::Material => "bind_material",
        BindingKind::Shader => "bind_shader",
        BindingKind::Texture { .. } => "bind_texture",
        BindingKind::Fbo => "bind_render_target",
        BindingKind::Video => "bind_video",
    }
}
