use crate::constants::*;
use opencv::core::{self, Mat, Point, Scalar, Size};
use opencv::imgproc;
use opencv::prelude::*;

type Result<T> = opencv::Result<T>;

/// Black placeholder shown while no face is in view.
pub fn blank() -> Result<Mat> {
    Mat::zeros(PANEL_HEIGHT, PANEL_WIDTH, core::CV_8UC3)?.to_mat()
}

/// Renders the analyzer's binary mask as the "Problem Areas" panel.
/// Nearest-neighbor resize keeps the mask strictly two-valued.
pub fn problem_areas(mask: &Mat) -> Result<Mat> {
    let mut resized = Mat::default();
    imgproc::resize(
        mask,
        &mut resized,
        Size::new(PANEL_WIDTH, PANEL_HEIGHT),
        0.0,
        0.0,
        imgproc::INTER_NEAREST,
    )?;

    let mut panel = Mat::default();
    imgproc::cvt_color(&resized, &mut panel, imgproc::COLOR_GRAY2BGR, 0)?;

    imgproc::put_text(
        &mut panel,
        "Problem Areas",
        Point::new(10, 20),
        imgproc::FONT_HERSHEY_SIMPLEX,
        0.5,
        Scalar::new(0.0, 0.0, 255.0, 0.0),
        1,
        imgproc::LINE_8,
        false,
    )?;
    Ok(panel)
}

/// Stretches the panel to the main frame's height and glues it on the right.
pub fn compose(frame: &Mat, panel: &Mat) -> Result<Mat> {
    let mut fitted = Mat::default();
    imgproc::resize(
        panel,
        &mut fitted,
        Size::new(PANEL_WIDTH, frame.rows()),
        0.0,
        0.0,
        imgproc::INTER_LINEAR,
    )?;

    let mut combined = Mat::default();
    core::hconcat2(frame, &fitted, &mut combined)?;
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_panel_is_black_and_sized() {
        let panel = blank().unwrap();
        assert_eq!(panel.rows(), PANEL_HEIGHT);
        assert_eq!(panel.cols(), PANEL_WIDTH);
        assert_eq!(panel.channels(), 3);
        let total = core::sum_elems(&panel).unwrap();
        assert_eq!(total, Scalar::all(0.0));
    }

    #[test]
    fn composite_width_is_frame_plus_panel() {
        let frame =
            Mat::new_rows_cols_with_default(720, 1280, core::CV_8UC3, Scalar::all(10.0)).unwrap();
        let panel = blank().unwrap();
        let combined = compose(&frame, &panel).unwrap();
        assert_eq!(combined.rows(), 720);
        assert_eq!(combined.cols(), 1280 + PANEL_WIDTH);
    }

    #[test]
    fn problem_panel_has_fixed_size() {
        let mask =
            Mat::new_rows_cols_with_default(240, 240, core::CV_8UC1, Scalar::all(255.0)).unwrap();
        let panel = problem_areas(&mask).unwrap();
        assert_eq!(panel.rows(), PANEL_HEIGHT);
        assert_eq!(panel.cols(), PANEL_WIDTH);
        assert_eq!(panel.channels(), 3);
    }
}
