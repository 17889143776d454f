//! Scene descriptor tables and the builder that turns them into meshes.
//!
//! A scene is a list of surfaces (vertex buffer + wireframe edges) and a list
//! of mesh instances that place, rotate and color a surface. Instances that
//! share a surface draw the same buffer, so parallel planes such as the floor
//! and ceiling always show identical displacement.

use glam::{Mat4, Vec3};

use crate::error::{Error, Result};
use crate::params::{Rgb, VisualConfig};
use crate::terrain::{Geometry, VertexBuffer};

const QUARTER_TURN: f32 = 1.5708;

/// Parametric geometry for a surface
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryKind {
    Plane {
        width: f32,
        height: f32,
        width_segments: usize,
        height_segments: usize,
    },
    TorusKnot {
        radius: f32,
        tube: f32,
        tubular_segments: usize,
        radial_segments: usize,
        p: u32,
        q: u32,
    },
    Sphere {
        radius: f32,
        width_segments: usize,
        height_segments: usize,
    },
}

impl GeometryKind {
    pub fn build(&self) -> Geometry {
        match *self {
            GeometryKind::Plane {
                width,
                height,
                width_segments,
                height_segments,
            } => Geometry::plane(width, height, width_segments, height_segments),
            GeometryKind::TorusKnot {
                radius,
                tube,
                tubular_segments,
                radial_segments,
                p,
                q,
            } => Geometry::torus_knot(radius, tube, tubular_segments, radial_segments, p, q),
            GeometryKind::Sphere {
                radius,
                width_segments,
                height_segments,
            } => Geometry::sphere(radius, width_segments, height_segments),
        }
    }
}

/// Which user-configurable color a mesh draws with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialSlot {
    Object,
    Plane,
}

/// How a mesh responds to configuration and audio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshRole {
    /// Audio-scaled, spinning centrepiece
    Object,
    /// Plane whose X rotation follows `plane_rotation_deg`
    Floor,
    /// Placement never changes
    Fixed,
}

#[derive(Debug, Clone)]
pub struct SurfaceDef {
    pub label: &'static str,
    pub geometry: GeometryKind,
    /// Receives noise displacement every frame
    pub displaced: bool,
}

#[derive(Debug, Clone)]
pub struct MeshDef {
    pub label: &'static str,
    /// Index into `SceneDescriptor::surfaces`
    pub surface: usize,
    pub position: [f32; 3],
    /// Euler angles (radians), applied X then Y then Z
    pub rotation: [f32; 3],
    pub material: MaterialSlot,
    pub role: MeshRole,
}

/// Data table describing one scene layout
#[derive(Debug, Clone)]
pub struct SceneDescriptor {
    pub name: &'static str,
    pub surfaces: Vec<SurfaceDef>,
    pub meshes: Vec<MeshDef>,
}

impl SceneDescriptor {
    /// Look up a preset by name
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "arena" => Some(Self::arena()),
            "orb" => Some(Self::orb()),
            _ => None,
        }
    }

    /// Torus knot inside a room: floor, ceiling and four walls
    pub fn arena() -> Self {
        let surfaces = vec![
            SurfaceDef {
                label: "torus knot",
                geometry: GeometryKind::TorusKnot {
                    radius: 10.0,
                    tube: 3.0,
                    tubular_segments: 100,
                    radial_segments: 16,
                    p: 2,
                    q: 3,
                },
                displaced: false,
            },
            plane_surface(),
            SurfaceDef {
                label: "wall",
                geometry: GeometryKind::Plane {
                    width: 2000.0,
                    height: 500.0,
                    width_segments: 100,
                    height_segments: 50,
                },
                displaced: true,
            },
        ];

        let wall = |label, position, rotation| MeshDef {
            label,
            surface: 2,
            position,
            rotation,
            material: MaterialSlot::Plane,
            role: MeshRole::Fixed,
        };

        let mut meshes = vec![object_mesh(0)];
        meshes.extend(floor_and_ceiling(1));
        meshes.extend([
            wall("north wall", [0.0, 50.0, 900.0], [0.0; 3]),
            wall("south wall", [0.0, 50.0, -900.0], [0.0; 3]),
            wall("east wall", [900.0, 50.0, 0.0], [0.0, QUARTER_TURN, 0.0]),
            wall("west wall", [-900.0, 50.0, 0.0], [0.0, QUARTER_TURN, 0.0]),
        ]);

        Self {
            name: "arena",
            surfaces,
            meshes,
        }
    }

    /// Sphere between a floor and a ceiling
    pub fn orb() -> Self {
        let surfaces = vec![
            SurfaceDef {
                label: "sphere",
                geometry: GeometryKind::Sphere {
                    radius: 20.0,
                    width_segments: 32,
                    height_segments: 16,
                },
                displaced: false,
            },
            plane_surface(),
        ];

        let mut meshes = vec![object_mesh(0)];
        meshes.extend(floor_and_ceiling(1));

        Self {
            name: "orb",
            surfaces,
            meshes,
        }
    }

    /// Visual defaults matching this layout
    pub fn default_config(&self) -> VisualConfig {
        match self.name {
            "orb" => VisualConfig::orb(),
            _ => VisualConfig::default(),
        }
    }

    /// Check that every mesh references an existing surface
    pub fn validate(&self) -> Result<()> {
        if let Some(mesh) = self
            .meshes
            .iter()
            .find(|m| m.surface >= self.surfaces.len())
        {
            return Err(Error::InvalidScene(format!(
                "mesh '{}' references surface {} but only {} exist",
                mesh.label,
                mesh.surface,
                self.surfaces.len()
            )));
        }
        Ok(())
    }
}

fn plane_surface() -> SurfaceDef {
    SurfaceDef {
        label: "plane",
        geometry: GeometryKind::Plane {
            width: 2000.0,
            height: 2000.0,
            width_segments: 100,
            height_segments: 100,
        },
        displaced: true,
    }
}

fn object_mesh(surface: usize) -> MeshDef {
    MeshDef {
        label: "object",
        surface,
        position: [0.0; 3],
        rotation: [0.0; 3],
        material: MaterialSlot::Object,
        role: MeshRole::Object,
    }
}

fn floor_and_ceiling(surface: usize) -> [MeshDef; 2] {
    [
        MeshDef {
            label: "floor",
            surface,
            position: [0.0, -200.0, 0.0],
            rotation: [0.0; 3],
            material: MaterialSlot::Plane,
            role: MeshRole::Floor,
        },
        MeshDef {
            label: "ceiling",
            surface,
            position: [0.0, 300.0, 0.0],
            rotation: [QUARTER_TURN, 0.0, 0.0],
            material: MaterialSlot::Plane,
            role: MeshRole::Fixed,
        },
    ]
}

/// Geometry owned by the scene, drawn by one or more mesh instances
#[derive(Debug)]
pub struct Surface {
    pub label: String,
    pub buffer: VertexBuffer,
    /// Line-list indices into `buffer`
    pub edges: Vec<u32>,
    pub displaced: bool,
}

/// A placed, colored use of a surface
#[derive(Debug, Clone)]
pub struct MeshInstance {
    pub label: String,
    pub surface: usize,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
    pub color: Rgb,
    pub material: MaterialSlot,
    pub role: MeshRole,
}

impl MeshInstance {
    /// translation * rotation(X, Y, Z) * uniform scale
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_z(self.rotation.z)
            * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

/// Built scene: surfaces plus the mesh instances drawing them
#[derive(Debug)]
pub struct Scene {
    pub surfaces: Vec<Surface>,
    pub meshes: Vec<MeshInstance>,
}

impl Scene {
    /// Build geometry for every surface and apply the initial config
    pub fn build(descriptor: &SceneDescriptor, config: &VisualConfig) -> Result<Self> {
        descriptor.validate()?;

        let surfaces = descriptor
            .surfaces
            .iter()
            .map(|def| {
                let geometry = def.geometry.build();
                let edges = geometry.wireframe_edges();
                Surface {
                    label: def.label.to_string(),
                    buffer: VertexBuffer::new(geometry.vertices),
                    edges,
                    displaced: def.displaced,
                }
            })
            .collect::<Vec<_>>();

        let meshes = descriptor
            .meshes
            .iter()
            .map(|def| MeshInstance {
                label: def.label.to_string(),
                surface: def.surface,
                position: Vec3::from_array(def.position),
                rotation: Vec3::from_array(def.rotation),
                scale: 1.0,
                color: config.plane_color,
                material: def.material,
                role: def.role,
            })
            .collect();

        log::info!(
            "Scene '{}': {} surfaces, {} meshes, {} vertices",
            descriptor.name,
            surfaces.len(),
            descriptor.meshes.len(),
            surfaces.iter().map(|s| s.buffer.len()).sum::<usize>()
        );

        let mut scene = Self { surfaces, meshes };
        scene.apply_config(config);
        Ok(scene)
    }

    /// Push a (clamped) config into the scene: colors and floor rotation.
    ///
    /// Rotation is absolute, so applying the same config twice is a no-op.
    pub fn apply_config(&mut self, config: &VisualConfig) {
        let config = config.clamped();
        for mesh in &mut self.meshes {
            mesh.color = match mesh.material {
                MaterialSlot::Object => config.object_color,
                MaterialSlot::Plane => config.plane_color,
            };
            if mesh.role == MeshRole::Floor {
                mesh.rotation.x = config.plane_rotation_rad();
            }
        }
    }

    /// Set the uniform scale of the object mesh(es)
    pub fn set_object_scale(&mut self, scale: f32) {
        for mesh in self.meshes.iter_mut().filter(|m| m.role == MeshRole::Object) {
            mesh.scale = scale;
        }
    }

    /// Rotate the object mesh(es) about Y
    pub fn spin_object(&mut self, radians: f32) {
        for mesh in self.meshes.iter_mut().filter(|m| m.role == MeshRole::Object) {
            mesh.rotation.y = (mesh.rotation.y + radians) % std::f32::consts::TAU;
        }
    }

    /// Surfaces that receive noise displacement
    pub fn displaced_surfaces_mut(&mut self) -> impl Iterator<Item = &mut Surface> {
        self.surfaces.iter_mut().filter(|s| s.displaced)
    }

    pub fn object(&self) -> Option<&MeshInstance> {
        self.meshes.iter().find(|m| m.role == MeshRole::Object)
    }
}
