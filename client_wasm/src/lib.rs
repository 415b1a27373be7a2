//! Browser shell for the ride
//!
//! The page owns the three.js scene, textures and GLTF loading. This crate
//! owns the simulation: the page forwards key events, calls `frame(dt)`
//! from `requestAnimationFrame`, then reads poses back to draw.

pub mod camera;
pub mod input;
pub mod models;

use camera::FollowCamera;
use game_core::{Config, ConfigError, Course, GameState};
use input::KeyState;
use models::{ModelKind, ModelSlots, Placeholder};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// WASM entry point - called when the module is instantiated
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    tracing::info!("Starting ride client (WASM)");
}

/// One ride plus the page-facing plumbing around it
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub struct RideClient {
    state: GameState,
    keys: KeyState,
    camera: FollowCamera,
    models: ModelSlots,
}

impl RideClient {
    pub fn from_config(config: Config, seed: u64) -> Result<Self, ConfigError> {
        let camera = FollowCamera::for_course(config.course);
        Ok(Self {
            state: GameState::new(config, seed)?,
            keys: KeyState::new(),
            camera,
            models: ModelSlots::new(),
        })
    }

    pub fn for_course(course: Course, seed: u64) -> Result<Self, ConfigError> {
        Self::from_config(Config::for_course(course), seed)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    fn parse_kind(kind: &str) -> Option<ModelKind> {
        match kind.parse() {
            Ok(kind) => Some(kind),
            Err(e) => {
                tracing::warn!("{e}");
                None
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn to_js(err: ConfigError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl RideClient {
    /// Start a ride on the named course ("trail" or "circuit")
    #[wasm_bindgen(constructor)]
    pub fn new(course: &str, seed: u32) -> Result<RideClient, JsValue> {
        let course: Course = course.parse().map_err(to_js)?;
        Self::for_course(course, seed as u64).map_err(to_js)
    }

    /// Start a ride from JSON overrides on top of a course preset
    pub fn with_config(json: &str, seed: u32) -> Result<RideClient, JsValue> {
        let config = Config::from_json(json).map_err(to_js)?;
        Self::from_config(config, seed as u64).map_err(to_js)
    }

    pub fn key_event(&mut self, event: &web_sys::KeyboardEvent, down: bool) {
        let key = input::get_key_from_event(event);
        if down {
            self.keys.key_down(&key);
        } else {
            self.keys.key_up(&key);
        }
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl RideClient {
    pub fn key_down(&mut self, key: &str) {
        self.keys.key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.key_up(key);
    }

    pub fn clear_keys(&mut self) {
        self.keys.clear();
    }

    /// Advance one rendered frame by `dt` seconds
    pub fn frame(&mut self, dt: f32) {
        let controls = self.keys.snapshot();
        self.state.step(dt, controls);
    }

    pub fn score(&self) -> u32 {
        self.state.score()
    }

    pub fn speed(&self) -> u32 {
        self.state.speed_readout()
    }

    pub fn boost_active(&self) -> bool {
        self.state.boost_active()
    }

    pub fn tip(&self) -> String {
        self.state.tip().to_string()
    }

    /// True when the last frame picked a new tip for the dialogue box
    pub fn tip_changed(&self) -> bool {
        self.state.events().new_tip.is_some()
    }

    /// `[x, y, z, heading]`
    pub fn rider_pose(&self) -> Vec<f32> {
        let pose = self.state.pose();
        vec![pose.pos.x, pose.pos.y, pose.pos.z, pose.heading]
    }

    /// `[x, y, z]` of the chase camera; it looks at the rider
    pub fn camera_eye(&self) -> Vec<f32> {
        self.camera.eye(&self.state.pose()).to_array().to_vec()
    }

    /// Column-major view matrix for the chase camera
    pub fn camera_view(&self) -> Vec<f32> {
        self.camera.view(&self.state.pose()).to_cols_array().to_vec()
    }

    /// Stride 6: `[x, y, z, spin_y, spin_z, visible]` per pickup
    pub fn pickup_transforms(&self) -> Vec<f32> {
        self.state
            .pickups()
            .iter()
            .flat_map(|p| [p.pos.x, p.pos.y, p.pos.z, p.spin_y, p.spin_z, p.visible as u8 as f32])
            .collect()
    }

    /// Stride 4: `[x, y, z, spin_y]` per obstacle
    pub fn obstacle_transforms(&self) -> Vec<f32> {
        self.state
            .obstacles()
            .iter()
            .flat_map(|o| [o.pos.x, o.pos.y, o.pos.z, o.spin_y])
            .collect()
    }

    pub fn model_loaded(&mut self, kind: &str) {
        if let Some(kind) = Self::parse_kind(kind) {
            self.models.loaded(kind);
        }
    }

    pub fn model_failed(&mut self, kind: &str) {
        if let Some(kind) = Self::parse_kind(kind) {
            self.models.failed(kind);
        }
    }

    pub fn uses_model(&self, kind: &str) -> bool {
        Self::parse_kind(kind).is_some_and(|kind| self.models.uses_model(kind))
    }

    pub fn placeholder_dims(&self, kind: &str) -> Vec<f32> {
        Self::parse_kind(kind)
            .map(|kind| Placeholder::for_kind(kind).dims())
            .unwrap_or_default()
    }
}
