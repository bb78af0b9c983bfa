//! Per-frame draw-list composition.
//!
//! Each frame the scene graph is flattened into a [`RenderBatch`]: solid
//! model draws (with their shadow-caster flag, so the shadow pass can skip
//! non-casters) and debug outline draws. The passes in `app` consume the
//! batch in pipeline order instead of walking the tree themselves.

use crate::data_structures::model::Model;

/// One instanced model draw: the model, its instance buffer, and how many
/// instances the buffer holds.
pub struct Instanced<'a> {
    pub instance: &'a wgpu::Buffer,
    pub model: &'a Model,
    pub amount: usize,
    pub casts_shadow: bool,
}

/// One debug-outline draw: a line-list wireframe around a loaded model.
pub struct OutlineDraw<'a> {
    pub vertex: &'a wgpu::Buffer,
    pub index: &'a wgpu::Buffer,
    pub amount: u32,
}

/// Everything one frame draws, sorted into pipeline batches.
pub struct RenderBatch<'a> {
    pub solids: Vec<Instanced<'a>>,
    pub outlines: Vec<OutlineDraw<'a>>,
}

impl<'a> RenderBatch<'a> {
    pub fn new() -> Self {
        Self {
            solids: Vec::new(),
            outlines: Vec::new(),
        }
    }

    /// The subset of solids the shadow pass renders.
    pub fn shadow_casters(&self) -> impl Iterator<Item = &Instanced<'a>> {
        self.solids.iter().filter(|instanced| instanced.casts_shadow)
    }
}

impl<'a> Default for RenderBatch<'a> {
    fn default() -> Self {
        Self::new()
    }
}
