// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image preprocessing for the MobileNetV2 classifier

use image::DynamicImage;
use ndarray::Array4;

/// Input size the classifier was trained on
pub const IMG_SIZE: u32 = 224;

/// Preprocess a decoded image into classifier input
///
/// Steps:
/// 1. Resize to IMG_SIZE x IMG_SIZE, ignoring aspect ratio
/// 2. Convert to RGB
/// 3. Scale pixel values from [0,255] to [0,1]
/// 4. Add a leading batch dimension: NHWC tensor [1, H, W, 3]
pub fn preprocess_image(image: &DynamicImage) -> Array4<f32> {
    let resized = image.resize_exact(IMG_SIZE, IMG_SIZE, image::imageops::FilterType::Lanczos3);
    let rgb = resized.to_rgb8();

    let size = IMG_SIZE as usize;
    let mut tensor = Array4::zeros((1, size, size, 3));

    for y in 0..size {
        for x in 0..size {
            let pixel = rgb.get_pixel(x as u32, y as u32);
            for c in 0..3 {
                tensor[[0, y, x, c]] = pixel[c] as f32 / 255.0;
            }
        }
    }

    tensor
}
