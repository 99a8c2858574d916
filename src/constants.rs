pub const CASCADE_FILE_NAME: &str = "haarcascade_frontalface_default.xml";
pub const CASCADE_XML_FILE: &str = "models/haarcascade_frontalface_default.xml";
pub const CASCADE_SYSTEM_DIRS: &[&str] = &[
    "/usr/share/opencv4/haarcascades",
    "/usr/local/share/opencv4/haarcascades",
    "/usr/share/opencv/haarcascades",
];

pub const CAPTURE_WIDTH: i32 = 1280;
pub const CAPTURE_HEIGHT: i32 = 720;
// Assumed normalized 0-1 range; backends with device-native ranges may ignore these.
pub const CAPTURE_BRIGHTNESS: f64 = 0.6;
pub const CAPTURE_CONTRAST: f64 = 0.5;

pub const DETAIL_SIGMA_S: f32 = 10.0;
pub const DETAIL_SIGMA_R: f32 = 0.15;

pub const DETECT_SCALE_FACTOR: f64 = 1.1;
pub const DETECT_MIN_NEIGHBORS: i32 = 4;
pub const MIN_FACE_SIZE: i32 = 200;

pub const ANALYSIS_BLUR_KERNEL: i32 = 15;
pub const ANALYSIS_BLOCK_SIZE: i32 = 11;
pub const ANALYSIS_OFFSET: f64 = 2.0;

pub const SEVERE_RATIO: f64 = 0.15;
pub const MODERATE_RATIO: f64 = 0.10;
pub const MILD_RATIO: f64 = 0.07;

pub const WINDOW_NAME: &str = "Skin Analysis";
pub const WINDOW_WIDTH: i32 = 1000;
pub const WINDOW_HEIGHT: i32 = 700;

pub const PANEL_WIDTH: i32 = 300;
pub const PANEL_HEIGHT: i32 = 200;

pub const ESC_KEY_CODE: i32 = 27;
