/// Keyboard-driven model controller
///
/// Each frame the controller reads a snapshot of held actions, nudges the
/// model's position, angle and scale, and, while a reset is running,
/// decays them linearly back to the identity transform.
use tracing::{debug, info};

use crate::config::{
    RESET_EPSILON, RESET_RATE, ROTATION_RATE, SCALE_RATE, TARGET_FPS, TRANSLATION_RATE,
};
use crate::error::RenderError;
use crate::model::{Canvas, DisplayFlags, Drawable, Model};
use crate::transform::Angles;
use crate::vector::Vec3;

/// Logical inputs the controller responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    TranslateXPos,
    TranslateXNeg,
    TranslateYPos,
    TranslateYNeg,
    TranslateZPos,
    TranslateZNeg,
    RotateXyPos,
    RotateXyNeg,
    RotateXzPos,
    RotateXzNeg,
    RotateYzPos,
    RotateYzNeg,
    ScaleXPos,
    ScaleXNeg,
    ScaleYPos,
    ScaleYNeg,
    ScaleZPos,
    ScaleZNeg,
    Reset,
}

impl Action {
    pub const COUNT: usize = 19;

    pub const ALL: [Action; Action::COUNT] = [
        Action::TranslateXPos,
        Action::TranslateXNeg,
        Action::TranslateYPos,
        Action::TranslateYNeg,
        Action::TranslateZPos,
        Action::TranslateZNeg,
        Action::RotateXyPos,
        Action::RotateXyNeg,
        Action::RotateXzPos,
        Action::RotateXzNeg,
        Action::RotateYzPos,
        Action::RotateYzNeg,
        Action::ScaleXPos,
        Action::ScaleXNeg,
        Action::ScaleYPos,
        Action::ScaleYNeg,
        Action::ScaleZPos,
        Action::ScaleZNeg,
        Action::Reset,
    ];
}

/// Which actions are held during one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputState {
    held: [bool; Action::COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, action: Action) {
        self.held[action as usize] = true;
    }

    pub fn release(&mut self, action: Action) {
        self.held[action as usize] = false;
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held[action as usize]
    }

    /// `+1`, `-1` or `0` for a pair of opposing actions; both held cancel.
    pub fn axis(&self, positive: Action, negative: Action) -> f64 {
        let mut value = 0.0;
        if self.is_held(positive) {
            value += 1.0;
        }
        if self.is_held(negative) {
            value -= 1.0;
        }
        value
    }
}

impl FromIterator<Action> for InputState {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut state = Self::new();
        for action in iter {
            state.press(action);
        }
        state
    }
}

/// Per-second rates used by [`ModelController`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSettings {
    pub translation_rate: f64,
    pub rotation_rate: f64,
    pub scale_rate: f64,
    pub reset_rate: f64,
    /// Used in place of the measured frame rate until one is available
    pub fallback_fps: f64,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            translation_rate: TRANSLATION_RATE,
            rotation_rate: ROTATION_RATE,
            scale_rate: SCALE_RATE,
            reset_rate: RESET_RATE,
            fallback_fps: TARGET_FPS,
        }
    }
}

/// Reset progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResetState {
    Idle,
    Resetting {
        /// Offsets from identity captured when the reset started
        position: Vec3,
        scale: Vec3,
        angle: Angles,
        /// Fraction of the offsets removed so far
        elapsed: f64,
    },
}

/// Something that advances once per frame
pub trait Updatable {
    fn update(&mut self, input: &InputState, fps: f64);
}

/// Owns a [`Model`] and drives it from keyboard input
#[derive(Debug, Clone)]
pub struct ModelController {
    model: Model,
    settings: ControllerSettings,
    state: ResetState,
}

impl ModelController {
    pub fn new(model: Model) -> Self {
        Self::with_settings(model, ControllerSettings::default())
    }

    pub fn with_settings(model: Model, settings: ControllerSettings) -> Self {
        Self {
            model,
            settings,
            state: ResetState::Idle,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    pub fn state(&self) -> ResetState {
        self.state
    }

    pub fn is_resetting(&self) -> bool {
        matches!(self.state, ResetState::Resetting { .. })
    }

    fn apply_input(&mut self, input: &InputState, step: f64) {
        use Action::*;

        let s = &self.settings;
        let model = &mut self.model;

        let move_by = s.translation_rate * step;
        model.position += Vec3::new(
            input.axis(TranslateXPos, TranslateXNeg),
            input.axis(TranslateYPos, TranslateYNeg),
            input.axis(TranslateZPos, TranslateZNeg),
        ) * move_by;

        let turn_by = s.rotation_rate * step;
        model.angle.rotate(
            input.axis(RotateXyPos, RotateXyNeg) * turn_by,
            input.axis(RotateXzPos, RotateXzNeg) * turn_by,
            input.axis(RotateYzPos, RotateYzNeg) * turn_by,
        );

        let grow_by = s.scale_rate * step;
        model.scale += Vec3::new(
            input.axis(ScaleXPos, ScaleXNeg),
            input.axis(ScaleYPos, ScaleYNeg),
            input.axis(ScaleZPos, ScaleZNeg),
        ) * grow_by;

        model.angle.wrap();
    }

    fn start_reset(&mut self) {
        let model = &self.model;
        info!(
            position = %model.position,
            scale = %model.scale,
            angle = ?model.angle,
            "reset started"
        );
        self.state = ResetState::Resetting {
            position: model.position,
            scale: model.scale - 1.0,
            angle: model.angle,
            elapsed: 0.0,
        };
    }

    fn step_reset(&mut self, step: f64) {
        let ResetState::Resetting {
            position,
            scale,
            angle,
            elapsed,
        } = &mut self.state
        else {
            return;
        };

        let dt = self.settings.reset_rate * step;
        self.model.position -= *position * dt;
        self.model.scale -= *scale * dt;
        self.model.angle -= *angle * dt;
        self.model.angle.wrap();
        *elapsed += dt;

        if *elapsed >= 1.0 - RESET_EPSILON {
            self.model.reset_transform();
            self.state = ResetState::Idle;
            info!("reset finished");
        }
    }
}

impl Updatable for ModelController {
    /// Advance one frame at the measured frame rate `fps`.
    fn update(&mut self, input: &InputState, fps: f64) {
        let fps = if fps.is_finite() && fps > 0.0 {
            fps
        } else {
            debug!(fps, "no frame rate measured, using fallback");
            self.settings.fallback_fps
        };
        let step = 1.0 / fps;

        self.apply_input(input, step);

        if input.is_held(Action::Reset) && !self.is_resetting() && !self.model.is_identity() {
            self.start_reset();
        }

        self.step_reset(step);
    }
}

impl Drawable for ModelController {
    fn draw<C: Canvas>(&self, canvas: &mut C, flags: DisplayFlags) -> Result<(), RenderError> {
        self.model.draw(canvas, flags)
    }
}
