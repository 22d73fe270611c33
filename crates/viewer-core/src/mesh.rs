//! Flattened triangle mesh decoded from a binary glTF (GLB) asset.

use glam::{Mat3, Mat4, Vec3, Vec4};

use crate::error::{Result, ViewerError};
use crate::fit::Bounds;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

/// All triangles of a scene, in world space, with node transforms baked in.
#[derive(Clone, Debug, Default)]
pub struct ModelMesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl ModelMesh {
    /// Decode the default scene (or the first one) of a GLB file.
    ///
    /// Only the embedded binary chunk is accepted as buffer storage, and only
    /// triangle-list primitives are kept.
    pub fn from_glb(bytes: &[u8]) -> Result<Self> {
        let gltf = gltf::Gltf::from_slice(bytes)?;
        for buffer in gltf.document.buffers() {
            if !matches!(buffer.source(), gltf::buffer::Source::Bin) {
                return Err(ViewerError::UnsupportedBuffer {
                    index: buffer.index(),
                });
            }
        }
        let blob = gltf.blob.as_deref();
        let scene = gltf
            .document
            .default_scene()
            .or_else(|| gltf.document.scenes().next())
            .ok_or(ViewerError::EmptyModel)?;

        let mut mesh = ModelMesh::default();
        mesh.append_scene(&scene, gltf.document.nodes().len(), blob)?;
        if mesh.indices.is_empty() {
            return Err(ViewerError::EmptyModel);
        }
        log::info!(
            "[load] decoded {} vertices, {} triangles",
            mesh.vertices.len(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }

    /// Decode `bytes` fetched from `reference`. Malformed files are reported
    /// as load failures of that reference; structural problems keep their kind.
    pub fn decode_asset(reference: &str, bytes: &[u8]) -> Result<Self> {
        Self::from_glb(bytes).map_err(|e| match e {
            ViewerError::Decode(inner) => ViewerError::asset_load(reference, inner),
            other => other,
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.vertices.iter().map(|v| Vec3::from(v.position)))
    }

    /// Walk the node forest with an explicit stack. Each node may be reached
    /// once; a second visit means a cycle or a shared child.
    fn append_scene(
        &mut self,
        scene: &gltf::Scene,
        node_count: usize,
        blob: Option<&[u8]>,
    ) -> Result<()> {
        let mut visited = vec![false; node_count];
        let mut stack: Vec<(gltf::Node, Mat4)> =
            scene.nodes().map(|n| (n, Mat4::IDENTITY)).collect();
        // Popped from the back; reverse to visit in document order
        stack.reverse();
        while let Some((node, parent)) = stack.pop() {
            let index = node.index();
            match visited.get_mut(index) {
                Some(seen) if !*seen => *seen = true,
                _ => return Err(ViewerError::CyclicNodes { index }),
            }
            let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
            if let Some(m) = node.mesh() {
                for primitive in m.primitives() {
                    if primitive.mode() != gltf::mesh::Mode::Triangles {
                        log::warn!(
                            "[load] skipping {:?} primitive in mesh {}",
                            primitive.mode(),
                            m.name().unwrap_or("<unnamed>")
                        );
                        continue;
                    }
                    self.append_primitive(&primitive, world, blob);
                }
            }
            let first_child = stack.len();
            stack.extend(node.children().map(|child| (child, world)));
            stack[first_child..].reverse();
        }
        Ok(())
    }

    fn append_primitive(&mut self, primitive: &gltf::Primitive, world: Mat4, blob: Option<&[u8]>) {
        let reader = primitive.reader(|buffer| match buffer.source() {
            gltf::buffer::Source::Bin => blob,
            gltf::buffer::Source::Uri(_) => None,
        });
        let positions: Vec<Vec3> = match reader.read_positions() {
            Some(iter) => iter.map(|p| world.transform_point3(Vec3::from(p))).collect(),
            None => return,
        };
        if positions.is_empty() {
            return;
        }

        let indices: Vec<u32> = match reader.read_indices() {
            Some(read) => read.into_u32().collect(),
            None => (0..positions.len() as u32).collect(),
        };
        let indices: Vec<u32> = indices
            .chunks_exact(3)
            .filter(|t| t.iter().all(|&i| (i as usize) < positions.len()))
            .flatten()
            .copied()
            .collect();

        let normal_matrix = Mat3::from_mat4(world).inverse().transpose();
        let normals: Vec<Vec3> = match reader.read_normals() {
            Some(iter) => iter
                .map(|n| (normal_matrix * Vec3::from(n)).normalize_or_zero())
                .collect(),
            None => face_normals(&positions, &indices),
        };

        let base = Vec4::from(primitive.material().pbr_metallic_roughness().base_color_factor());
        let colors: Option<Vec<Vec4>> = reader
            .read_colors(0)
            .map(|c| c.into_rgba_f32().map(Vec4::from).collect());

        let offset = self.vertices.len() as u32;
        for (i, p) in positions.iter().enumerate() {
            let n = match normals.get(i) {
                Some(n) if *n != Vec3::ZERO => *n,
                _ => Vec3::Y,
            };
            let c = colors
                .as_ref()
                .and_then(|cs| cs.get(i))
                .map_or(base, |c| base * *c);
            self.vertices.push(MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
                color: c.to_array(),
            });
        }
        self.indices.extend(indices.iter().map(|i| i + offset));
    }
}

// Area-weighted vertex normals for primitives that ship without them.
fn face_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let n = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += n;
        normals[b] += n;
        normals[c] += n;
    }
    normals.into_iter().map(Vec3::normalize_or_zero).collect()
}
