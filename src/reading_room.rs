//! The reading-room scene.
//!
//! Every value in this table is a hand-authored literal: the placements
//! were tuned against the rendered result, not computed. The table is the
//! single source of truth the loader loop consumes.

use crate::scene::{
    AmbientLight, CameraPose, DirectionalLight, ModelPlacement, Placement, PlaneSurface,
    SceneDescriptor, ShadowFlags,
};

/// Warm lamp-glow ambient, 0xa86200 in the authoring tool's picker.
const AMBIENT: AmbientLight = AmbientLight {
    color: [0.659, 0.384, 0.0],
    intensity: 0.4,
};

/// Afternoon sun through the window, 0xfff2d6.
const SUN: DirectionalLight = DirectionalLight {
    color: [1.0, 0.949, 0.839],
    intensity: 4.0,
    position: [20.338, 13.493, 6.517],
    cast_shadow: true,
};

const CAMERA: CameraPose = CameraPose {
    position: [-1.767, 14.678, 10.923],
    rotation_deg: [-45.98, -2.11, -2.18],
    fovy_deg: 50.0,
    znear: 0.01,
    zfar: 1000.0,
};

pub fn descriptor() -> SceneDescriptor {
    let planes = vec![
        // Parquet floor
        PlaneSurface {
            size: [40.0, 40.0],
            texture: "111_herringbone_parquet.jpg",
            placement: Placement::new([0.0, 0.0, 0.0], [-90.0, 0.0, 0.0], [1.0, 1.0, 1.0]),
            shadows: ShadowFlags::NONE,
        },
        // Back wall
        PlaneSurface {
            size: [50.0, 20.0],
            texture: "93-floral-wallpaper-seamless.jpg",
            placement: Placement::new([0.0, 9.9, -14.2], [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]),
            shadows: ShadowFlags::NONE,
        },
    ];

    let models = vec![
        ModelPlacement {
            asset: "rattan_coffee_table.glb",
            placement: Placement::scaled([0.0, 0.18, 0.0], [0.0, 0.0, 0.0], 4.0),
            shadows: ShadowFlags::CAST_AND_RECEIVE,
        },
        ModelPlacement {
            asset: "rug.glb",
            placement: Placement::scaled([0.0, 0.08, 0.0], [0.2, 93.8, 0.6], 5.0),
            shadows: ShadowFlags::CAST_AND_RECEIVE,
        },
        ModelPlacement {
            asset: "standing_fan.glb",
            placement: Placement::scaled([-6.76, 4.66, -6.5], [0.0, 32.6, 0.0], 3.0),
            shadows: ShadowFlags::CAST_AND_RECEIVE,
        },
        ModelPlacement {
            asset: "book_stack.glb",
            placement: Placement::scaled([-4.74, 6.54, -7.86], [0.0, 32.6, 0.0], 1.6),
            shadows: ShadowFlags::CAST_AND_RECEIVE,
        },
        ModelPlacement {
            asset: "console_table.glb",
            placement: Placement::scaled([-4.06, 3.5, -13.18], [0.0, 0.0, 0.0], 0.1),
            shadows: ShadowFlags::CAST_AND_RECEIVE,
        },
        ModelPlacement {
            asset: "console_table.glb",
            placement: Placement::scaled([6.22, 3.5, -13.18], [0.0, 0.0, 0.0], 0.1),
            shadows: ShadowFlags::CAST_AND_RECEIVE,
        },
        ModelPlacement {
            asset: "old_book.glb",
            placement: Placement::scaled([0.0, 2.94, 0.0], [0.0, 11.4, 0.0], 1.0),
            shadows: ShadowFlags::CAST_AND_RECEIVE,
        },
        ModelPlacement {
            asset: "book_stack.glb",
            placement: Placement::scaled([5.54, 6.54, -13.0], [0.0, -26.4, 0.0], 1.6),
            shadows: ShadowFlags::CAST_AND_RECEIVE,
        },
        ModelPlacement {
            asset: "old_book.glb",
            placement: Placement::scaled([-4.06, 6.6, -13.18], [0.0, 78.2, 0.0], 1.0),
            shadows: ShadowFlags::CAST_AND_RECEIVE,
        },
    ];

    SceneDescriptor {
        ambient: AMBIENT,
        directional: SUN,
        planes,
        models,
        // The pre-composed export of the whole room stays switched off;
        // the individually placed models above are the active setup.
        composites: vec![],
        camera: CAMERA,
    }
}

/// Browser entry point: render the reading room into the page's canvas.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn run_reading_room() {
    use wasm_bindgen::UnwrapThrowExt;

    crate::app::run(descriptor()).unwrap_throw();
}
