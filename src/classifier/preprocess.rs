use image::{imageops::FilterType, DynamicImage, RgbImage};
use ndarray::Array4;

use super::error::ClassifierError;

/// Fixed-shape input tensor: (batch=1, channels=3, height, width), f32,
/// planar channel-major then row-major layout.
pub type InputTensor = Array4<f32>;

pub const INPUT_HEIGHT: u32 = 224;
pub const INPUT_WIDTH: u32 = 224;

/// ImageNet channel statistics, RGB order.
pub const CHANNEL_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
pub const CHANNEL_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Deterministic image-to-tensor transform.
///
/// Decodes encoded bytes, stretches to the 224x224 input plane with bilinear
/// resampling (no aspect preservation, no cropping; the model was trained on
/// stretched inputs), and normalizes each channel with the ImageNet mean and
/// standard deviation into an NCHW tensor. Identical pixel input always
/// yields bit-identical tensor output.
#[derive(Debug, Clone)]
pub struct ImagePreprocessor {
    input_shape: (u32, u32),
    resize_filter: FilterType,
    /// Per-channel scale (alpha = (1/255) / std)
    alpha: [f32; 3],
    /// Per-channel offset (beta = -mean / std)
    beta: [f32; 3],
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ImagePreprocessor {
    pub fn new() -> Self {
        let mut alpha = [0.0f32; 3];
        let mut beta = [0.0f32; 3];
        for c in 0..3 {
            alpha[c] = (1.0 / 255.0) / CHANNEL_STD[c];
            beta[c] = -CHANNEL_MEAN[c] / CHANNEL_STD[c];
        }
        Self {
            input_shape: (INPUT_HEIGHT, INPUT_WIDTH),
            resize_filter: FilterType::Triangle,
            alpha,
            beta,
        }
    }

    pub fn input_shape(&self) -> (u32, u32) {
        self.input_shape
    }

    /// Parses an encoded image (JPEG, PNG, or anything else the decoder
    /// supports). Malformed, truncated, or empty input is a `Decode` error,
    /// never a panic.
    pub fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, ClassifierError> {
        if bytes.is_empty() {
            return Err(ClassifierError::Decode("Input image is empty".into()));
        }
        image::load_from_memory(bytes).map_err(|e| {
            log::error!("Failed to decode image: {}", e);
            ClassifierError::Decode(format!("Failed to decode image: {}", e))
        })
    }

    /// Stretches the image to the model's input plane. Non-square sources
    /// are distorted rather than cropped.
    pub fn resize(&self, image: &DynamicImage) -> RgbImage {
        let (height, width) = self.input_shape;
        image::imageops::resize(&image.to_rgb8(), width, height, self.resize_filter)
    }

    /// Writes the resized pixels into a (1, 3, H, W) tensor: all red values,
    /// then all green, then all blue, each as a row-major H x W block.
    pub fn normalize(&self, image: &RgbImage) -> InputTensor {
        let (width, height) = image.dimensions();
        Array4::from_shape_fn(
            (1, 3, height as usize, width as usize),
            |(_, c, y, x)| {
                let pixel = image.get_pixel(x as u32, y as u32);
                pixel[c] as f32 * self.alpha[c] + self.beta[c]
            },
        )
    }

    /// Full transform: bytes in, (1, 3, 224, 224) tensor out.
    pub fn process(&self, bytes: &[u8]) -> Result<InputTensor, ClassifierError> {
        let decoded = self.decode(bytes)?;
        let resized = self.resize(&decoded);
        Ok(self.normalize(&resized))
    }
}
