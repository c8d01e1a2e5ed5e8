//! HDS LOD demo
//!
//! Flies an orbit camera around a procedural sphere and logs what the
//! simplifier keeps each frame. Stands in for the interactive viewer: the
//! scripted steps below replay the viewer's key bindings (detail up/down,
//! silhouette detail, lock, flip) without a window.

use std::f32::consts::PI;
use std::process::ExitCode;
use glam::Vec3;
use hds_lod_engine::hds::{self, Engine};
use hds_lod_engine::hds::camera::ViewParams;
use hds_lod_engine::hds::log::LogSeverity;
use hds_lod_engine::hds::lod::{BoundaryPrimitive, LodConfig, Simplifier};
use hds_lod_engine::hds::mesh::Mesh;
use hds_lod_engine::{engine_debug, engine_error, engine_info, engine_warn};

const SOURCE: &str = "hds::Demo";

const FRAMES: u32 = 120;
const FOVY: f32 = 45.0;
const ASPECT: f32 = 4.0 / 3.0;
const ZNEAR: f32 = 0.1;
const ZFAR: f32 = 100.0;

/// Scripted input, keyed by frame number
#[derive(Debug, Clone, Copy)]
enum Action {
    IncreaseDetail,
    DecreaseDetail,
    IncreaseSilhouetteDetail,
    DecreaseSilhouetteDetail,
    ToggleLock,
    Flip,
}

const SCRIPT: &[(u32, Action)] = &[
    (20, Action::IncreaseDetail),
    (21, Action::IncreaseDetail),
    (22, Action::IncreaseDetail),
    (40, Action::IncreaseSilhouetteDetail),
    (50, Action::ToggleLock),
    (70, Action::ToggleLock),
    (80, Action::Flip),
    (90, Action::Flip),
    (100, Action::DecreaseDetail),
    (101, Action::DecreaseSilhouetteDetail),
];

/// Latitude/longitude sphere with single-vertex poles
fn uv_sphere(stacks: u32, slices: u32) -> hds::Result<Mesh> {
    let mut positions = vec![Vec3::Y];
    for i in 1..stacks {
        let phi = PI * i as f32 / stacks as f32;
        for j in 0..slices {
            let theta = 2.0 * PI * j as f32 / slices as f32;
            // A little relief so the octree has something to simplify
            let r = 1.0 + 0.05 * (5.0 * theta).sin() * (3.0 * phi).sin();
            positions.push(r * Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin()));
        }
    }
    positions.push(Vec3::NEG_Y);

    let ring = |i: u32, j: u32| 1 + (i - 1) * slices + j % slices;
    let bottom = positions.len() as u32 - 1;
    let mut triangles = Vec::with_capacity((2 * slices * (stacks - 1)) as usize);
    for j in 0..slices {
        triangles.push([0, ring(1, j + 1), ring(1, j)]);
    }
    for i in 1..stacks - 1 {
        for j in 0..slices {
            let (a, b) = (ring(i, j), ring(i, j + 1));
            let (c, d) = (ring(i + 1, j), ring(i + 1, j + 1));
            triangles.push([a, b, d]);
            triangles.push([a, d, c]);
        }
    }
    for j in 0..slices {
        triangles.push([bottom, ring(stacks - 1, j), ring(stacks - 1, j + 1)]);
    }

    Mesh::new(positions, None, triangles)
}

fn apply(simplifier: &mut Simplifier, action: Action) -> hds::Result<()> {
    match action {
        Action::IncreaseDetail => simplifier.increase_detail(),
        Action::DecreaseDetail => simplifier.decrease_detail(),
        Action::IncreaseSilhouetteDetail => simplifier.increase_silhouette_detail(),
        Action::DecreaseSilhouetteDetail => simplifier.decrease_silhouette_detail(),
        Action::ToggleLock => simplifier.set_locked(!simplifier.is_locked()),
        Action::Flip => simplifier.flip_orientation()?,
    }
    let thresholds = simplifier.thresholds();
    engine_info!(SOURCE, "{:?}: detail {:e}, silhouette {:e}, locked {}",
        action, thresholds.detail, thresholds.silhouette, simplifier.is_locked());
    Ok(())
}

fn run() -> hds::Result<()> {
    let mut mesh = uv_sphere(96, 192)?;
    mesh.normalize_to_unit_cube();

    let config = LodConfig {
        detail_threshold: 1e-6,
        silhouette_threshold: 5e-7,
        ..Default::default()
    };
    let mut simplifier = Simplifier::new(mesh, config)?;

    for frame in 0..FRAMES {
        for &(_, action) in SCRIPT.iter().filter(|(at, _)| *at == frame) {
            apply(&mut simplifier, action)?;
        }

        let t = frame as f32 / FRAMES as f32;
        let distance = 2.0 + 6.0 * (PI * t).sin();
        let view = ViewParams::orbit(distance, 360.0 * t, 30.0, FOVY, ASPECT, ZNEAR, ZFAR)?;

        let stats = simplifier.frame(&view);
        engine_info!(SOURCE, "frame {:3} d={:.2} boundary {:6} | {}",
            frame, distance, simplifier.boundary_len(), stats);

        if Engine::is_enabled(LogSeverity::Debug) {
            let boxes = simplifier
                .boundary_primitives()
                .iter()
                .filter(|p| matches!(p, BoundaryPrimitive::Box(_)))
                .count();
            engine_debug!(SOURCE, "{} boundary boxes, {} index bytes",
                boxes, simplifier.index_bytes().len());
        }
        if !simplifier.boundary().check_partition(simplifier.octree()) {
            engine_warn!(SOURCE, "boundary partition broken at frame {}", frame);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    if std::env::args().any(|arg| arg == "--debug") {
        Engine::set_min_severity(LogSeverity::Debug);
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            engine_error!(SOURCE, "{}", err);
            ExitCode::FAILURE
        }
    }
}
