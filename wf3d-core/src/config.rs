// Tuning constants shared by the core and the front ends.
//
// Rates are expressed per second and converted to per-frame steps by
// dividing by the measured frame rate, so movement speed follows the
// actual frame rate rather than a fixed timestep.

// =============================================================================
// CANVAS
// =============================================================================

/// Default canvas width in pixels.
pub const CANVAS_WIDTH: u32 = 500;

/// Default canvas height in pixels.
pub const CANVAS_HEIGHT: u32 = 500;

/// Side of the square drawn for a vertex marker.
pub const POINT_SIZE: f64 = 4.0;

// =============================================================================
// TIMING
// =============================================================================

/// Target frame rate of the main loop.
pub const TARGET_FPS: f64 = 60.0;

/// Number of frames averaged by the frame rate counter.
pub const FPS_WINDOW: usize = 10;

// =============================================================================
// CONTROLLER
// =============================================================================

/// Depth the model is pushed away from the camera plane.
pub const ORIGIN_DEPTH: f64 = 10.0;

/// Translation speed in units per second.
pub const TRANSLATION_RATE: f64 = 2.0;

/// Scale change in units per second.
pub const SCALE_RATE: f64 = 2.0;

/// Rotation speed in degrees per second.
pub const ROTATION_RATE: f64 = 360.0;

/// Fraction of the captured offset removed per second while resetting.
///
/// A factor of 2 completes the reset in half a second.
pub const RESET_RATE: f64 = 2.0;

/// Slack on the accumulated reset fraction before snapping to identity.
pub const RESET_EPSILON: f64 = 1e-9;

// =============================================================================
// GEOMETRY
// =============================================================================

/// Decimal digits kept when rounding area intermediates.
pub const AREA_PRECISION: u32 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_in_front_of_camera() {
        assert!(ORIGIN_DEPTH >= 1.0);
    }

    #[test]
    fn test_reset_finishes_within_one_second() {
        assert!(RESET_RATE >= 1.0);
        assert!(RESET_EPSILON < 1.0 / TARGET_FPS);
    }
}
