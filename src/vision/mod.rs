// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image decoding and preprocessing for classifier input
//!
//! Uploaded bytes are decoded here and turned into the fixed-shape
//! float tensor the MobileNetV2 classifier expects.

pub mod image_utils;
pub mod preprocess;

pub use image_utils::{decode_image_bytes, detect_format, ImageError, ImageInfo, MAX_IMAGE_SIZE};
pub use preprocess::{preprocess_image, IMG_SIZE};
