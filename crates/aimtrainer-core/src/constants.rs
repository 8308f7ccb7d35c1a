//! Simulation constants. All distances in meters, times in seconds unless noted.
//!
//! The world is right-handed with Y up. The player stands at the origin and
//! looks down the negative Z axis.

// --- Timing ---

/// Frame rate the headless driver paces itself at.
pub const FRAME_RATE: u32 = 60;
/// Nominal frame delta at `FRAME_RATE` (seconds).
pub const FRAME_DT: f64 = 1.0 / FRAME_RATE as f64;
/// Period of the session countdown tick (seconds).
pub const CLOCK_PERIOD_SECS: f64 = 1.0;

// --- Target spawning ---

/// Half-width of the lateral spawn band (targets spawn at x in [-W, W]).
pub const SPAWN_HALF_WIDTH: f64 = 8.0;
/// Lower bound of the eye-level spawn band.
pub const SPAWN_HEIGHT_MIN: f64 = 1.0;
/// Upper bound of the eye-level spawn band.
pub const SPAWN_HEIGHT_MAX: f64 = 4.0;
/// Fixed spawn depth: every target sits on the plane z = SPAWN_DEPTH.
pub const SPAWN_DEPTH: f64 = -15.0;
/// Player eye height; the default firing origin used by the driver.
pub const EYE_HEIGHT: f64 = 1.6;

// --- Hit detection ---

/// Detection sphere radius as a multiple of the visual target radius.
pub const DETECTION_RADIUS_SCALE: f64 = 1.1;

// --- Scoring ---

/// Points awarded per hit. No distance or speed bonus.
pub const POINTS_PER_HIT: u32 = 100;

/// Grade thresholds, checked in order: (min accuracy %, max avg reaction ms).
/// Both bounds are strict.
pub const GRADE_S: (f64, f64) = (90.0, 350.0);
pub const GRADE_A: (f64, f64) = (85.0, 450.0);
pub const GRADE_B: (f64, f64) = (75.0, 550.0);
/// Accuracy above which a session earns at least a C.
pub const GRADE_C_ACCURACY: f64 = 60.0;

// --- Settings bounds ---

pub const TARGET_COUNT_MIN: u32 = 1;
pub const TARGET_COUNT_MAX: u32 = 10;
pub const TARGET_SIZE_MIN: f64 = 0.2;
pub const TARGET_SIZE_MAX: f64 = 1.5;
pub const DURATION_MIN_SECS: u32 = 1;
pub const SENSITIVITY_MIN: f64 = 0.1;
pub const SENSITIVITY_MAX: f64 = 10.0;
