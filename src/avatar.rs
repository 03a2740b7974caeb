//! Avatar image preparation.
//!
//! Portraits come in as arbitrary square-ish captures and leave as fixed-size
//! circular avatars; players without a portrait get a flat placeholder disc.
//! Everything here works on CPU-side `Image` values, texture upload happens
//! at the call site.

use macroquad::prelude::*;

/// Resamples a portrait to `size` and applies a circular alpha mask.
pub fn circular(src: &Image, size: u16) -> Image {
    let mut out = resample(src, size);
    mask_circle(&mut out);
    out
}

/// A flat-color disc used when a player has no portrait.
pub fn placeholder(size: u16, color: Color) -> Image {
    let mut out = Image::gen_image_color(size, size, BLANK);
    let center = size as f32 / 2.0;
    let radius = size as f32 / 2.0;
    for y in 0..size as u32 {
        for x in 0..size as u32 {
            let dx = x as f32 + 0.5 - center;
            let dy = y as f32 + 0.5 - center;
            if dx * dx + dy * dy <= radius * radius {
                out.set_pixel(x, y, color);
            }
        }
    }
    out
}

// Nearest-neighbour resample to a square of the requested size.
fn resample(src: &Image, size: u16) -> Image {
    let mut out = Image::gen_image_color(size, size, BLANK);
    let src_w = src.width() as u32;
    let src_h = src.height() as u32;
    for y in 0..size as u32 {
        for x in 0..size as u32 {
            let sx = (x * src_w / size as u32).min(src_w.saturating_sub(1));
            let sy = (y * src_h / size as u32).min(src_h.saturating_sub(1));
            out.set_pixel(x, y, src.get_pixel(sx, sy));
        }
    }
    out
}

// Zeroes alpha outside the inscribed circle.
fn mask_circle(img: &mut Image) {
    let size = img.width() as u32;
    let center = size as f32 / 2.0;
    let radius = size as f32 / 2.0;
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 + 0.5 - center;
            let dy = y as f32 + 0.5 - center;
            if dx * dx + dy * dy > radius * radius {
                let mut pixel = img.get_pixel(x, y);
                pixel.a = 0.0;
                img.set_pixel(x, y, pixel);
            }
        }
    }
}
