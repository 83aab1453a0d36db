pub const AUDIO_CHANNELS: u32 = 1u32;
pub const AUDIO_SAMPLE_RATE: u32 = 48000u32;

// 720p default capture, full HD for screen capture
pub const VIDEO_HEIGHT: u32 = 720u32;
pub const VIDEO_WIDTH: u32 = 1280u32;
pub const VIDEO_FRAME_RATE: u32 = 30u32;
pub const SCREEN_HEIGHT: u32 = 1080u32;
pub const SCREEN_WIDTH: u32 = 1920u32;

pub static NO_CAMERA_HELP_URL: &str = "https://support.callmedia.dev/articles/no-camera";
