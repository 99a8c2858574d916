mod analysis;
mod capture;
mod constants;
mod panel;
mod window;

use std::path::{Path, PathBuf};

use anyhow::{bail, ensure, Result};
use clap::Parser;
use log::{debug, error, info};
use opencv::core::{self, Mat, Point, Rect, Scalar, Size};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;
use opencv::types::VectorOfRect;
use opencv::{highgui, imgproc, photo};

use crate::capture::Capture;
use crate::constants::*;
use crate::window::Window;

/// Live skin condition analysis from a webcam feed.
#[derive(Parser)]
#[command(name = "skin-check")]
struct Cli {
    /// Capture device index.
    #[arg(long, default_value = "0")]
    device: i32,

    /// Path to a frontal-face Haar cascade XML file.
    #[arg(long)]
    cascade: Option<PathBuf>,
}

fn resolve_cascade(override_path: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        ensure!(path.exists(), "cascade file not found: {}", path.display());
        return Ok(path);
    }
    let local = Path::new(CASCADE_XML_FILE);
    if local.exists() {
        return Ok(local.to_path_buf());
    }
    for dir in CASCADE_SYSTEM_DIRS {
        let candidate = Path::new(dir).join(CASCADE_FILE_NAME);
        if candidate.exists() {
            return Ok(candidate);
        }
    }
    bail!("no frontal-face cascade found; pass one with --cascade");
}

fn mirror_and_enhance(frame: &Mat) -> Result<Mat> {
    let mut mirrored = Mat::default();
    core::flip(frame, &mut mirrored, 1)?;
    let mut enhanced = Mat::default();
    photo::detail_enhance(&mirrored, &mut enhanced, DETAIL_SIGMA_S, DETAIL_SIGMA_R)?;
    Ok(enhanced)
}

fn convert_to_grayscale(frame: &Mat) -> Result<Mat> {
    let mut gray = Mat::default();
    imgproc::cvt_color(frame, &mut gray, imgproc::COLOR_BGR2GRAY, 0)?;
    Ok(gray)
}

fn detect_faces(classifier: &mut CascadeClassifier, gray: &Mat) -> Result<VectorOfRect> {
    let mut faces = VectorOfRect::new();
    classifier.detect_multi_scale(
        gray,
        &mut faces,
        DETECT_SCALE_FACTOR,
        DETECT_MIN_NEIGHBORS,
        0,
        Size::new(MIN_FACE_SIZE, MIN_FACE_SIZE),
        Size::new(0, 0),
    )?;
    Ok(faces)
}

fn clamp_rect_to_frame(rect: Rect, frame: &Mat) -> Rect {
    let mut rect = rect;
    if rect.x < 0 {
        rect.x = 0;
    }
    if rect.y < 0 {
        rect.y = 0;
    }
    if rect.x + rect.width > frame.cols() {
        rect.width = frame.cols() - rect.x;
    }
    if rect.y + rect.height > frame.rows() {
        rect.height = frame.rows() - rect.y;
    }
    rect
}

fn draw_box_around_face(frame: &mut Mat, face: Rect) -> Result<()> {
    const THICKNESS: i32 = 2;
    const LINE_TYPE: i32 = 8;
    const SHIFT: i32 = 0;
    let color_blue = Scalar::new(255.0, 0.0, 0.0, 0.0);

    imgproc::rectangle(frame, face, color_blue, THICKNESS, LINE_TYPE, SHIFT)?;
    Ok(())
}

fn draw_status(frame: &mut Mat, message: &str, color: Scalar) -> Result<()> {
    imgproc::put_text(
        frame,
        message,
        Point::new(10, 30),
        imgproc::FONT_HERSHEY_SIMPLEX,
        0.8,
        color,
        2,
        imgproc::LINE_8,
        false,
    )?;
    let bottom = frame.rows() - 10;
    imgproc::put_text(
        frame,
        "Press ESC to exit",
        Point::new(10, bottom),
        imgproc::FONT_HERSHEY_SIMPLEX,
        0.6,
        Scalar::new(200.0, 200.0, 200.0, 0.0),
        1,
        imgproc::LINE_8,
        false,
    )?;
    Ok(())
}

/// The key poll reports modifier bits on some GUI backends; only the low
/// byte carries the key code.
fn is_exit_key(key: i32) -> bool {
    key & 0xff == ESC_KEY_CODE
}

fn frame_loop<F, D>(
    mut next_frame: F,
    classifier: &mut CascadeClassifier,
    mut display: D,
) -> Result<()>
where
    F: FnMut() -> opencv::Result<Option<Mat>>,
    D: FnMut(&Mat) -> opencv::Result<()>,
{
    loop {
        let frame = match next_frame()? {
            Some(frame) => frame,
            None => {
                error!("camera read failed, shutting down");
                break;
            }
        };

        let mut frame = mirror_and_enhance(&frame)?;
        let gray = convert_to_grayscale(&frame)?;
        let faces = detect_faces(classifier, &gray)?;

        let mut message = String::from("No face detected");
        let mut color = Scalar::new(255.0, 255.0, 255.0, 0.0);
        let mut panel = panel::blank()?;

        // Detection order is unspecified; with multiple faces the last one
        // processed wins the status line and the panel.
        for face in faces {
            let face = clamp_rect_to_frame(face, &frame);
            if face.width <= 0 || face.height <= 0 {
                continue;
            }
            // Own the crop before the outline lands on the shared buffer.
            let face_roi = Mat::roi(&frame, face)?.try_clone()?;
            draw_box_around_face(&mut frame, face)?;

            let report = analysis::analyze_skin(&face_roi)?;
            debug!(
                "face {:?}: {} (texture variance {:.1})",
                face,
                report.label(),
                report.texture_variance
            );
            message = report.label();
            color = report.condition.color();
            panel = panel::problem_areas(&report.mask)?;
        }

        draw_status(&mut frame, &message, color)?;
        let combined = panel::compose(&frame, &panel)?;
        display(&combined)?;

        if is_exit_key(highgui::wait_key(1)?) {
            break;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let cascade = resolve_cascade(cli.cascade)?;
    info!("loading face cascade from {}", cascade.display());
    let mut classifier = CascadeClassifier::new(&cascade.to_string_lossy())?;
    ensure!(
        !classifier.empty()?,
        "cascade {} loaded empty",
        cascade.display()
    );

    let mut capture = Capture::create(cli.device)?;
    ensure!(
        capture.is_opened()?,
        "failed to open capture device {}",
        cli.device
    );

    let window = Window::create(WINDOW_NAME, WINDOW_WIDTH, WINDOW_HEIGHT)?;
    frame_loop(
        || capture.grab_frame(),
        &mut classifier,
        |combined| window.show_image(combined),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_key_matches_low_byte_only() {
        assert!(is_exit_key(ESC_KEY_CODE));
        assert!(is_exit_key(ESC_KEY_CODE | 0x10_0000));
        assert!(!is_exit_key(-1));
        assert!(!is_exit_key('q' as i32));
    }

    #[test]
    fn read_failure_stops_after_single_attempt() {
        let mut classifier = CascadeClassifier::default().unwrap();
        let mut reads = 0;
        let mut shown = 0;
        let result = frame_loop(
            || {
                reads += 1;
                Ok(None)
            },
            &mut classifier,
            |_combined| {
                shown += 1;
                Ok(())
            },
        );
        assert!(result.is_ok());
        assert_eq!(reads, 1);
        assert_eq!(shown, 0);
    }
}
