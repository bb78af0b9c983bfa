use std::{
    convert::identity,
    io::{BufReader, Cursor},
};

use crate::{
    data_structures::{
        bounds::Aabb,
        model::{self, ModelVertex},
        scene_graph::{ContainerNode, ModelNode, SceneNode},
        texture::Texture,
    },
    resources::texture::{diffuse_layout, load_binary, load_texture},
};

/**
 * This module contains all logic for loading meshes/textures/etc. from external files.
 */
pub mod texture;

/// Decode a glTF/GLB file into a scene-node tree.
///
/// Node transforms embedded in the file become the local transforms of the
/// tree, so a pre-composed scene keeps its authored layout and a single
/// furniture model comes out at its authored origin, ready for a
/// placement on the root.
pub async fn load_model_gltf(
    file_name: &str,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<Box<dyn SceneNode>> {
    let gltf_bytes = load_binary(file_name).await?;
    let gltf_cursor = Cursor::new(gltf_bytes);
    let gltf_reader = BufReader::new(gltf_cursor);
    let gltf = gltf::Gltf::from_reader(gltf_reader)?;

    // Load buffers: the embedded binary chunk resolves locally, external
    // ones fetch concurrently.
    let blob = gltf.blob.as_deref();
    let buffer_data = futures::future::try_join_all(gltf.buffers().map(|buffer| async move {
        match buffer.source() {
            gltf::buffer::Source::Bin => blob
                .map(|blob| blob.to_vec())
                .ok_or_else(|| anyhow::anyhow!("{file_name} references a missing binary chunk")),
            gltf::buffer::Source::Uri(uri) => load_binary(uri).await,
        }
    }))
    .await?;

    // Load materials
    let layout = diffuse_layout(device);
    let mut materials = Vec::new();
    for material in gltf.materials() {
        let pbr = material.pbr_metallic_roughness();
        let diffuse_texture = match pbr
            .base_color_texture()
            .map(|tex| tex.texture().source().source())
        {
            Some(gltf::image::Source::View { view, mime_type }) => Texture::from_bytes(
                device,
                queue,
                &buffer_data[view.buffer().index()][view.offset()..view.offset() + view.length()],
                file_name,
                mime_type.split('/').last(),
            )?,
            Some(gltf::image::Source::Uri { uri, mime_type }) => {
                load_texture(
                    uri,
                    device,
                    queue,
                    mime_type.map(|mt| mt.split('/').last().map_or("jpg", identity)),
                )
                .await?
            }
            None => {
                log::warn!(
                    "material {:?} in {} has no base colour texture, substituting white",
                    material.name(),
                    file_name
                );
                Texture::create_solid([255, 255, 255, 255], device, queue, file_name)
            }
        };
        let name = material.name().unwrap_or(file_name);
        materials.push(model::Material::new(device, name, diffuse_texture, &layout));
    }
    if materials.is_empty() {
        let white = Texture::create_solid([255, 255, 255, 255], device, queue, file_name);
        materials.push(model::Material::new(device, file_name, white, &layout));
    }

    let mut roots = Vec::new();
    for scene in gltf.scenes() {
        for node in scene.nodes() {
            let root = to_scene_node(node, &buffer_data, device, &materials);
            roots.push(root);
        }
    }

    let root_node = if roots.len() == 1 {
        roots.into_iter().next().unwrap()
    } else {
        let mut root_node = ContainerNode::new();
        root_node.children = roots;
        Box::new(root_node)
    };

    Ok(root_node)
}

fn to_scene_node(
    node: gltf::scene::Node,
    buf: &Vec<Vec<u8>>,
    device: &wgpu::Device,
    materials: &[model::Material],
) -> Box<dyn SceneNode> {
    let mut scene_node: Box<dyn SceneNode> = match node.mesh() {
        Some(mesh) => {
            let mut meshes = Vec::new();
            let mut bounds: Option<Aabb> = None;

            for primitive in mesh.primitives() {
                let reader = primitive.reader(|buffer| Some(&buf[buffer.index()]));

                let mut vertices = Vec::new();
                if let Some(vertex_attribute) = reader.read_positions() {
                    vertex_attribute.for_each(|position| {
                        vertices.push(ModelVertex {
                            position,
                            tex_coords: Default::default(),
                            normal: Default::default(),
                        })
                    });
                }
                if let Some(normal_attribute) = reader.read_normals() {
                    let mut normal_index = 0;
                    normal_attribute.for_each(|normal| {
                        vertices[normal_index].normal = normal;
                        normal_index += 1;
                    });
                }
                if let Some(tex_coord_attribute) = reader.read_tex_coords(0).map(|v| v.into_f32()) {
                    let mut tex_coord_index = 0;
                    tex_coord_attribute.for_each(|tex_coord| {
                        vertices[tex_coord_index].tex_coords = tex_coord;
                        tex_coord_index += 1;
                    });
                }

                let mut indices = Vec::new();
                match reader.read_indices() {
                    Some(indices_raw) => {
                        indices.append(&mut indices_raw.into_u32().collect::<Vec<u32>>())
                    }
                    // Non-indexed primitives draw their vertices in order.
                    None => indices.extend(0..vertices.len() as u32),
                }

                let primitive_bounds = Aabb::from_points(vertices.iter().map(|v| v.position));
                bounds = match (bounds, primitive_bounds) {
                    (Some(a), Some(b)) => Some(a.union(&b)),
                    (a, b) => a.or(b),
                };

                use wgpu::util::DeviceExt;
                let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{:?} Vertex Buffer", mesh.name())),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{:?} Index Buffer", mesh.name())),
                    contents: bytemuck::cast_slice(&indices),
                    usage: wgpu::BufferUsages::INDEX,
                });

                let material = primitive
                    .material()
                    .index()
                    .filter(|idx| *idx < materials.len())
                    .unwrap_or(0);

                meshes.push(model::Mesh {
                    name: mesh.name().unwrap_or("unknown_mesh").to_string(),
                    vertex_buffer,
                    index_buffer,
                    num_elements: indices.len() as u32,
                    material,
                });
            }

            let model = model::Model {
                meshes,
                materials: materials.to_vec(),
            };
            Box::new(ModelNode::from_model(device, model, bounds))
        }
        None => Box::new(ContainerNode::new()),
    };

    let (translation, rotation, scale) = node.transform().decomposed();
    scene_node.set_local_transform(crate::data_structures::instance::Instance {
        position: translation.into(),
        rotation: rotation.into(),
        scale: scale.into(),
    });
    for child in node.children() {
        let child_node = to_scene_node(child, buf, device, materials);
        scene_node.add_child(child_node);
    }

    scene_node
}

/// Build the flat textured rectangle used for the floor and wall planes.
/// The quad spans `size` in the XY plane, faces +Z, and maps the texture
/// once across its extent.
pub fn mk_plane_model(
    device: &wgpu::Device,
    size: [f32; 2],
    diffuse_texture: Texture,
    label: &str,
) -> model::Model {
    use wgpu::util::DeviceExt;

    let (hw, hh) = (size[0] / 2.0, size[1] / 2.0);
    let vertices = [
        ModelVertex {
            position: [-hw, -hh, 0.0],
            tex_coords: [0.0, 1.0],
            normal: [0.0, 0.0, 1.0],
        },
        ModelVertex {
            position: [hw, -hh, 0.0],
            tex_coords: [1.0, 1.0],
            normal: [0.0, 0.0, 1.0],
        },
        ModelVertex {
            position: [-hw, hh, 0.0],
            tex_coords: [0.0, 0.0],
            normal: [0.0, 0.0, 1.0],
        },
        ModelVertex {
            position: [hw, hh, 0.0],
            tex_coords: [1.0, 0.0],
            normal: [0.0, 0.0, 1.0],
        },
    ];
    let indices: [u32; 6] = [0, 1, 2, 2, 1, 3];

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{label} Vertex Buffer")),
        contents: bytemuck::cast_slice(&vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{label} Index Buffer")),
        contents: bytemuck::cast_slice(&indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    let layout = diffuse_layout(device);
    let material = model::Material::new(device, label, diffuse_texture, &layout);

    model::Model {
        meshes: vec![model::Mesh {
            name: label.to_string(),
            vertex_buffer,
            index_buffer,
            num_elements: indices.len() as u32,
            material: 0,
        }],
        materials: vec![material],
    }
}
