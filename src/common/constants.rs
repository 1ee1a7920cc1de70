//! Application-wide constants: configuration defaults, validation limits,
//! colours and matrix geometry.

// # Configuration Defaults

/// Seconds between successful syncs before the clock asks the time service again.
/// 300 is gentler on the service for an unattended board.
pub const DEFAULT_RESYNC_INTERVAL: u64 = 60;
/// Seconds a failed sync pushes the next attempt back; 1800 pairs with a 300 s resync.
pub const DEFAULT_RETRY_BACKOFF: u64 = 60;
/// Seconds between frames.
pub const DEFAULT_RENDER_INTERVAL: u64 = 5;
/// Seconds before an HTTP request to the time service is abandoned.
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 15;
pub const DEFAULT_TWELVE_HOUR: bool = true;
pub const DEFAULT_DEMO: bool = false;
pub const DEFAULT_ROTATION: u32 = 0;
pub const DEFAULT_TIME_PROVIDER: &str = "worldtimeapi";
pub const DEFAULT_WORLDTIMEAPI_URL: &str = "http://worldtimeapi.org/api";
pub const DEFAULT_ADAFRUIT_IO_URL: &str = "https://io.adafruit.com/api/v2";

/// Resync interval used in demo mode, where every "sync" advances the demo day.
pub const DEMO_RESYNC_INTERVAL: u64 = 5;

// # Validation Limits

pub const MINIMUM_RESYNC_INTERVAL: u64 = 5;
pub const MAXIMUM_RESYNC_INTERVAL: u64 = 86_400;
pub const MINIMUM_RETRY_BACKOFF: u64 = 5;
pub const MAXIMUM_RETRY_BACKOFF: u64 = 86_400;
pub const MINIMUM_RENDER_INTERVAL: u64 = 1;
pub const MAXIMUM_RENDER_INTERVAL: u64 = 60;
pub const MINIMUM_REQUEST_TIMEOUT: u64 = 1;
pub const MAXIMUM_REQUEST_TIMEOUT: u64 = 120;
pub const VALID_ROTATIONS: [u32; 4] = [0, 90, 180, 270];

// # Night Mode
// The panel is too bright for a bedroom; nothing is drawn from 22:00 to 05:59.

pub const NIGHT_START_HOUR: u32 = 22;
pub const NIGHT_END_HOUR: u32 = 5;

// # Garbage Collection Schedule

/// Tuesday from this hour on, the bins should already be at the curb.
pub const TUESDAY_CURB_HOUR: u32 = 19;
/// Wednesday before this hour, collection has not happened yet.
pub const WEDNESDAY_PICKUP_DONE_HOUR: u32 = 8;

// # Colours (24-bit RGB)

pub const COLOR_GREEN: u32 = 0x33CC33;
pub const COLOR_YELLOW: u32 = 0xFFFF00;
pub const COLOR_RED: u32 = 0xFF0000;
pub const COLOR_GREY: u32 = 0x666666;
pub const COLOR_MORNING: u32 = 0xFF6600;
pub const COLOR_AFTERNOON: u32 = 0x3300CC;
pub const COLOR_DATE: u32 = 0x808080;
pub const COLOR_OUTLINE: u32 = 0x000000;

// # Matrix Geometry

pub const MATRIX_WIDTH: i32 = 64;
pub const MATRIX_HEIGHT: i32 = 32;
/// Horizontal centre of the 32 px wide garbage can bitmap.
pub const TRASH_CENTER_X: i32 = 16;
/// Vertical offset of the garbage label inside the can bitmap.
pub const TRASH_LABEL_OFFSET_Y: i32 = 16;
/// Offset of the date label below the time label.
pub const DATE_OFFSET_Y: i32 = 10;
/// Extra space reserved left of the weekday label.
pub const WEEKDAY_INDENT: i32 = 6;

// # Exit Codes

pub const EXIT_FAILURE: i32 = 1;
