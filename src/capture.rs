use crate::constants::*;
use opencv::videoio::{self, VideoCapture};
use opencv::prelude::*;

type Result<T> = opencv::Result<T>;

pub(crate) struct Capture {
    capture: VideoCapture,
}

impl Capture {
    pub fn create(device: i32) -> Result<Self> {
        let capture = VideoCapture::new(device, videoio::CAP_ANY)?;
        let mut capture = Self { capture };
        capture.optimize()?;
        Ok(capture)
    }

    pub fn is_opened(&self) -> Result<bool> {
        self.capture.is_opened()
    }

    /// Best-effort device tuning; unsupported properties are refused by the
    /// backend without failing the call.
    fn optimize(&mut self) -> Result<()> {
        let settings = [
            (videoio::CAP_PROP_FRAME_WIDTH, f64::from(CAPTURE_WIDTH)),
            (videoio::CAP_PROP_FRAME_HEIGHT, f64::from(CAPTURE_HEIGHT)),
            (videoio::CAP_PROP_AUTOFOCUS, 1.0),
            (videoio::CAP_PROP_BRIGHTNESS, CAPTURE_BRIGHTNESS),
            (videoio::CAP_PROP_CONTRAST, CAPTURE_CONTRAST),
        ];
        for (prop, value) in settings {
            if !self.capture.set(prop, value)? {
                log::debug!("camera property {} rejected value {}", prop, value);
            }
        }
        Ok(())
    }

    /// Reads one frame. `None` means the device stopped delivering frames,
    /// which is terminal for the caller.
    pub fn grab_frame(&mut self) -> Result<Option<Mat>> {
        let mut frame = Mat::default();
        if !self.capture.read(&mut frame)? || frame.empty() {
            return Ok(None);
        }
        Ok(Some(frame))
    }
}

impl Drop for Capture {
    fn drop(&mut self) {
        let _ = self.capture.release();
    }
}
