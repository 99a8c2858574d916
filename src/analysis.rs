use crate::constants::*;
use anyhow::{ensure, Result};
use opencv::core::{self, Mat, Scalar, Size};
use opencv::imgproc;
use opencv::prelude::*;

/// Skin condition classes, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Severe,
    Moderate,
    Mild,
    Healthy,
}

impl Condition {
    /// Boundaries are exclusive: a ratio of exactly 0.15 is Moderate.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > SEVERE_RATIO {
            Condition::Severe
        } else if ratio > MODERATE_RATIO {
            Condition::Moderate
        } else if ratio > MILD_RATIO {
            Condition::Mild
        } else {
            Condition::Healthy
        }
    }

    pub fn descriptor(&self) -> &'static str {
        match self {
            Condition::Severe => "Severe dryness/acne",
            Condition::Moderate => "Moderate issues",
            Condition::Mild => "Mild irritation",
            Condition::Healthy => "Healthy skin",
        }
    }

    pub fn color(&self) -> Scalar {
        match self {
            Condition::Severe => Scalar::new(0.0, 0.0, 255.0, 0.0),
            Condition::Moderate => Scalar::new(0.0, 165.0, 255.0, 0.0),
            Condition::Mild => Scalar::new(0.0, 255.0, 255.0, 0.0),
            Condition::Healthy => Scalar::new(0.0, 255.0, 0.0, 0.0),
        }
    }
}

pub struct SkinReport {
    pub condition: Condition,
    /// Affected pixels as a percentage of the region, rounded to one decimal.
    pub percentage: f64,
    /// Laplacian variance of the blurred brightness channel. Carried as a
    /// diagnostic only; it does not feed into the classification.
    pub texture_variance: f64,
    /// Binary 0/255 mask of affected pixels, same size as the input region.
    pub mask: Mat,
}

impl SkinReport {
    pub fn label(&self) -> String {
        format!("{} ({:.1}%)", self.condition.descriptor(), self.percentage)
    }
}

/// Classifies a cropped face region by the fraction of pixels darker than
/// their local neighborhood average in the brightness channel.
pub fn analyze_skin(face_roi: &Mat) -> Result<SkinReport> {
    ensure!(!face_roi.empty(), "face region has zero area");

    let mut hsv = Mat::default();
    imgproc::cvt_color(face_roi, &mut hsv, imgproc::COLOR_BGR2HSV, 0)?;
    let mut value = Mat::default();
    core::extract_channel(&hsv, &mut value, 2)?;

    let mut blurred = Mat::default();
    imgproc::gaussian_blur(
        &value,
        &mut blurred,
        Size::new(ANALYSIS_BLUR_KERNEL, ANALYSIS_BLUR_KERNEL),
        0.0,
        0.0,
        core::BORDER_DEFAULT,
    )?;

    let mut mask = Mat::default();
    imgproc::adaptive_threshold(
        &blurred,
        &mut mask,
        255.0,
        imgproc::ADAPTIVE_THRESH_GAUSSIAN_C,
        imgproc::THRESH_BINARY_INV,
        ANALYSIS_BLOCK_SIZE,
        ANALYSIS_OFFSET,
    )?;

    let affected = core::count_non_zero(&mask)? as f64;
    let total = f64::from(mask.rows() * mask.cols());
    let ratio = affected / total;
    let percentage = (ratio * 1000.0).round() / 10.0;

    let texture_variance = laplacian_variance(&blurred)?;

    Ok(SkinReport {
        condition: Condition::from_ratio(ratio),
        percentage,
        texture_variance,
        mask,
    })
}

fn laplacian_variance(blurred: &Mat) -> opencv::Result<f64> {
    let mut laplacian = Mat::default();
    imgproc::laplacian(
        blurred,
        &mut laplacian,
        core::CV_64F,
        1,
        1.0,
        0.0,
        core::BORDER_DEFAULT,
    )?;
    let mut mean = Mat::default();
    let mut stddev = Mat::default();
    core::mean_std_dev(&laplacian, &mut mean, &mut stddev, &core::no_array())?;
    let sd = *stddev.at::<f64>(0)?;
    Ok(sd * sd)
}
