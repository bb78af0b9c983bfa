//! Scene graph and hierarchical scene organization.
//!
//! The scene is a flat list of root objects, each a tree of boxed
//! [`SceneNode`]s. The graph is insert-only: objects are appended as their
//! asset loads finish and are never removed, reparented or edited
//! afterwards. World transforms are therefore propagated once, at
//! insertion, not per frame.

use log::warn;
use wgpu::util::DeviceExt;

use crate::{
    data_structures::{
        bounds::{Aabb, OUTLINE_INDICES},
        instance::Instance,
        model::{self, LineVertex},
    },
    render::{Instanced, OutlineDraw, RenderBatch},
    scene::ShadowFlags,
};

// Load tasks build nodes off the event-loop thread and hand them over
// through the event queue, hence the Send bound.
pub trait SceneNode: Send {
    fn add_child(&mut self, child: Box<dyn SceneNode>);

    fn children(&self) -> &Vec<Box<dyn SceneNode>>;

    fn local_transform(&self) -> Instance;

    fn set_local_transform(&mut self, instance: Instance);

    /// The composed transform from the last propagation pass.
    fn world_transform(&self) -> Instance;

    /// Apply shadow participation to this node and its whole subtree.
    fn set_shadow_flags(&mut self, flags: ShadowFlags);

    /// Recompute `world = parent * local` down the subtree.
    fn update_world_transforms(&mut self, parent: &Instance);

    /// Push the current world transforms into the GPU instance buffers.
    fn write_to_buffers(&mut self, queue: &wgpu::Queue);

    /// World-space bounds of the subtree, if it contains any geometry.
    /// Valid after [`update_world_transforms`](Self::update_world_transforms).
    fn world_bounds(&self) -> Option<Aabb>;

    /// Flatten the subtree into the frame's draw lists.
    fn collect<'a>(&'a self, batch: &mut RenderBatch<'a>);
}

/// A node with geometry: one model, one placement, one instance buffer.
pub struct ModelNode {
    children: Vec<Box<dyn SceneNode>>,
    model: model::Model,
    local: Instance,
    world: Instance,
    flags: ShadowFlags,
    local_bounds: Option<Aabb>,
    instance_buffer: wgpu::Buffer,
}

impl ModelNode {
    pub fn from_model(
        device: &wgpu::Device,
        model: model::Model,
        local_bounds: Option<Aabb>,
    ) -> Self {
        let world = Instance::default();
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Instance Buffer"),
            contents: bytemuck::cast_slice(&[world.to_raw(false)]),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            children: vec![],
            model,
            local: Instance::default(),
            world,
            flags: ShadowFlags::NONE,
            local_bounds,
            instance_buffer,
        }
    }
}

impl SceneNode for ModelNode {
    fn add_child(&mut self, child: Box<dyn SceneNode>) {
        self.children.push(child);
    }

    fn children(&self) -> &Vec<Box<dyn SceneNode>> {
        &self.children
    }

    fn local_transform(&self) -> Instance {
        self.local.clone()
    }

    fn set_local_transform(&mut self, instance: Instance) {
        self.local = instance;
    }

    fn world_transform(&self) -> Instance {
        self.world.clone()
    }

    fn set_shadow_flags(&mut self, flags: ShadowFlags) {
        self.flags = flags;
        for child in &mut self.children {
            child.set_shadow_flags(flags);
        }
    }

    fn update_world_transforms(&mut self, parent: &Instance) {
        self.world = parent * &self.local;
        for child in &mut self.children {
            child.update_world_transforms(&self.world);
        }
    }

    fn write_to_buffers(&mut self, queue: &wgpu::Queue) {
        queue.write_buffer(
            &self.instance_buffer,
            0,
            bytemuck::cast_slice(&[self.world.to_raw(self.flags.receive)]),
        );
        for child in &mut self.children {
            child.write_to_buffers(queue);
        }
    }

    fn world_bounds(&self) -> Option<Aabb> {
        let own = self
            .local_bounds
            .map(|aabb| aabb.transformed(&self.world.to_matrix()));
        self.children
            .iter()
            .filter_map(|child| child.world_bounds())
            .fold(own, |acc, aabb| match acc {
                Some(acc) => Some(acc.union(&aabb)),
                None => Some(aabb),
            })
    }

    fn collect<'a>(&'a self, batch: &mut RenderBatch<'a>) {
        batch.solids.push(Instanced {
            instance: &self.instance_buffer,
            model: &self.model,
            amount: 1,
            casts_shadow: self.flags.cast,
        });
        for child in &self.children {
            child.collect(batch);
        }
    }
}

/// A node without geometry, grouping children under a shared transform.
/// Composite scene files decode into trees of these with `ModelNode`
/// leaves, their glTF-embedded transforms preserved.
pub struct ContainerNode {
    pub children: Vec<Box<dyn SceneNode>>,
    local: Instance,
    world: Instance,
}

impl ContainerNode {
    pub fn new() -> Self {
        Self {
            children: vec![],
            local: Instance::default(),
            world: Instance::default(),
        }
    }
}

impl Default for ContainerNode {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneNode for ContainerNode {
    fn add_child(&mut self, child: Box<dyn SceneNode>) {
        self.children.push(child);
    }

    fn children(&self) -> &Vec<Box<dyn SceneNode>> {
        &self.children
    }

    fn local_transform(&self) -> Instance {
        self.local.clone()
    }

    fn set_local_transform(&mut self, instance: Instance) {
        self.local = instance;
    }

    fn world_transform(&self) -> Instance {
        self.world.clone()
    }

    fn set_shadow_flags(&mut self, flags: ShadowFlags) {
        for child in &mut self.children {
            child.set_shadow_flags(flags);
        }
    }

    fn update_world_transforms(&mut self, parent: &Instance) {
        self.world = parent * &self.local;
        for child in &mut self.children {
            child.update_world_transforms(&self.world);
        }
    }

    fn write_to_buffers(&mut self, queue: &wgpu::Queue) {
        for child in &mut self.children {
            child.write_to_buffers(queue);
        }
    }

    fn world_bounds(&self) -> Option<Aabb> {
        self.children
            .iter()
            .filter_map(|child| child.world_bounds())
            .reduce(|acc, aabb| acc.union(&aabb))
    }

    fn collect<'a>(&'a self, batch: &mut RenderBatch<'a>) {
        for child in &self.children {
            child.collect(batch);
        }
    }
}

/// The red wireframe box drawn around every loaded model. Corners are
/// baked in world space at construction, so the node ignores transforms.
pub struct OutlineNode {
    children: Vec<Box<dyn SceneNode>>,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    num_elements: u32,
}

impl OutlineNode {
    pub fn new(device: &wgpu::Device, aabb: &Aabb) -> Self {
        let vertices = aabb.corners().map(|position| LineVertex { position });
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Outline Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Outline Index Buffer"),
            contents: bytemuck::cast_slice(&OUTLINE_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            children: vec![],
            vertex_buffer,
            index_buffer,
            num_elements: OUTLINE_INDICES.len() as u32,
        }
    }
}

impl SceneNode for OutlineNode {
    fn add_child(&mut self, _child: Box<dyn SceneNode>) {
        warn!("outline nodes take no children");
    }

    fn children(&self) -> &Vec<Box<dyn SceneNode>> {
        &self.children
    }

    fn local_transform(&self) -> Instance {
        Instance::default()
    }

    fn set_local_transform(&mut self, _instance: Instance) {}

    fn world_transform(&self) -> Instance {
        Instance::default()
    }

    fn set_shadow_flags(&mut self, _flags: ShadowFlags) {}

    fn update_world_transforms(&mut self, _parent: &Instance) {}

    fn write_to_buffers(&mut self, _queue: &wgpu::Queue) {}

    fn world_bounds(&self) -> Option<Aabb> {
        None
    }

    fn collect<'a>(&'a self, batch: &mut RenderBatch<'a>) {
        batch.outlines.push(OutlineDraw {
            vertex: &self.vertex_buffer,
            index: &self.index_buffer,
            amount: self.num_elements,
        });
    }
}

/// A root-level scene entry with a diagnostic label.
pub struct SceneObject {
    pub label: String,
    pub node: Box<dyn SceneNode>,
}

/// The insert-only scene root.
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Append one object. Returns the new object count.
    pub fn adopt(&mut self, label: impl Into<String>, node: Box<dyn SceneNode>) -> usize {
        self.objects.push(SceneObject {
            label: label.into(),
            node,
        });
        self.objects.len()
    }

    /// Append a loaded model and its debug outline: exactly two objects.
    pub fn adopt_model(
        &mut self,
        label: &str,
        node: Box<dyn SceneNode>,
        outline: Box<dyn SceneNode>,
    ) -> usize {
        self.adopt(label, node);
        self.adopt(format!("{label} outline"), outline)
    }

    /// Append a pre-composed scene root: exactly one object, its embedded
    /// transforms trusted as-is.
    pub fn adopt_composite(&mut self, label: &str, node: Box<dyn SceneNode>) -> usize {
        self.adopt(label, node)
    }

    pub fn collect(&self) -> RenderBatch<'_> {
        let mut batch = RenderBatch::new();
        for object in &self.objects {
            object.node.collect(&mut batch);
        }
        batch
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
