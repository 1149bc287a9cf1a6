//! HSV conversions in the 8-bit convention used by the colour steps.
//!
//! Hue is expressed in half-degrees so a full turn spans [0, 180); saturation
//! and value span [0, 255]. Components are kept as `f32` between the two
//! conversions so adjustments don't quantise twice.

/// Units in one full hue turn.
pub const HUE_RANGE: f32 = 180.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

pub fn bgr_to_hsv(b: u8, g: u8, r: u8) -> Hsv {
    let (bf, gf, rf) = (b as f32, g as f32, r as f32);
    let max = bf.max(gf).max(rf);
    let min = bf.min(gf).min(rf);
    let delta = max - min;

    let s = if max > 0.0 { 255.0 * delta / max } else { 0.0 };

    let degrees = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (gf - bf) / delta
    } else if max == gf {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    let degrees = if degrees < 0.0 { degrees + 360.0 } else { degrees };

    Hsv {
        h: degrees / 2.0,
        s,
        v: max,
    }
}

/// Convert back to BGR, rounding each channel to the nearest level.
pub fn hsv_to_bgr(hsv: Hsv) -> [u8; 3] {
    let degrees = (hsv.h * 2.0).rem_euclid(360.0);
    let v = hsv.v.clamp(0.0, 255.0);
    let s = (hsv.s / 255.0).clamp(0.0, 1.0);

    let chroma = v * s;
    let sector_pos = degrees / 60.0;
    let x = chroma * (1.0 - (sector_pos % 2.0 - 1.0).abs());
    let m = v - chroma;

    let (r, g, b) = match (sector_pos as u32) % 6 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    [to_level(b + m), to_level(g + m), to_level(r + m)]
}

fn to_level(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
