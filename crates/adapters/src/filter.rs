use std::path::Path;

use image::io::Reader as ImageReader;
use image::RgbImage;
use photo_flow_application::ApplicationError;
use photo_flow_domain::{AdjustmentKind, AdjustmentStack};
use tracing::debug;

type ColorMatrix = [[f32; 3]; 3];

/// Local rendition of the adjustment filter chain, used for offline
/// previews. Operations run in stack order with clamping between stages.
#[derive(Debug, Default)]
pub struct ImageFilterRenderer;

impl ImageFilterRenderer {
    pub fn apply(&self, image: &mut RgbImage, stack: &AdjustmentStack) {
        let stages: Vec<ColorMatrix> = stack
            .values()
            .iter()
            .map(|(kind, value)| stage_matrix(*kind, *value))
            .collect();
        if stages.is_empty() {
            return;
        }

        for pixel in image.pixels_mut() {
            let mut rgb = pixel.0.map(|channel| channel as f32 / 255.0);
            for matrix in &stages {
                rgb = multiply(*matrix, rgb);
            }
            pixel.0 = rgb.map(|channel| (channel * 255.0).round() as u8);
        }
    }

    pub fn render_file(
        &self,
        input: &Path,
        output: &Path,
        stack: &AdjustmentStack,
    ) -> Result<(u32, u32), ApplicationError> {
        let mut image = ImageReader::open(input)
            .map_err(|error| ApplicationError::Io(error.to_string()))?
            .with_guessed_format()
            .map_err(|error| ApplicationError::Decode(error.to_string()))?
            .decode()
            .map_err(|error| ApplicationError::Decode(error.to_string()))?
            .to_rgb8();

        self.apply(&mut image, stack);
        image
            .save(output)
            .map_err(|error| ApplicationError::Io(error.to_string()))?;

        debug!(
            input = %input.display(),
            output = %output.display(),
            filter = %stack.css_filter(),
            "preview rendered"
        );
        Ok((image.width(), image.height()))
    }
}

fn stage_matrix(kind: AdjustmentKind, value: f32) -> ColorMatrix {
    match kind {
        AdjustmentKind::Hue => hue_rotate(value),
        AdjustmentKind::Saturation => saturate(value / 100.0),
    }
}

fn hue_rotate(degrees: f32) -> ColorMatrix {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ]
}

fn saturate(amount: f32) -> ColorMatrix {
    [
        [0.213 + 0.787 * amount, 0.715 - 0.715 * amount, 0.072 - 0.072 * amount],
        [0.213 - 0.213 * amount, 0.715 + 0.285 * amount, 0.072 - 0.072 * amount],
        [0.213 - 0.213 * amount, 0.715 - 0.715 * amount, 0.072 + 0.928 * amount],
    ]
}

fn multiply(matrix: ColorMatrix, rgb: [f32; 3]) -> [f32; 3] {
    matrix.map(|row| {
        (row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2]).clamp(0.0, 1.0)
    })
}
