//! Categorical and sequential color scales.

/// Ten-color categorical palette; groups cycle through it in order.
pub const CATEGORICAL: [&str; 10] = [
    "#4C72B0", "#DD8452", "#55A868", "#C44E52", "#8172B3", "#937860", "#DA8BC3", "#8C8C8C",
    "#CCB974", "#64B5CD",
];

/// Color stops of the yellow-orange-brown sequential scale, light to dark.
const YL_OR_BR: [(u8, u8, u8); 9] = [
    (0xff, 0xff, 0xe5),
    (0xff, 0xf7, 0xbc),
    (0xfe, 0xe3, 0x91),
    (0xfe, 0xc4, 0x4f),
    (0xfe, 0x99, 0x29),
    (0xec, 0x70, 0x14),
    (0xcc, 0x4c, 0x02),
    (0x99, 0x34, 0x04),
    (0x66, 0x25, 0x06),
];

/// Color for the `index`-th category.
pub fn categorical(index: usize) -> &'static str {
    CATEGORICAL[index % CATEGORICAL.len()]
}

/// Interpolated yellow-orange-brown color at `t` in [0, 1] (clamped).
pub fn yl_or_br(t: f64) -> String {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (YL_OR_BR.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(YL_OR_BR.len() - 2);
    let frac = scaled - i as f64;
    let (r0, g0, b0) = YL_OR_BR[i];
    let (r1, g1, b1) = YL_OR_BR[i + 1];
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    format!("#{:02x}{:02x}{:02x}", mix(r0, r1), mix(g0, g1), mix(b0, b1))
}

/// Sequential color for `year` within `[first, last]`; later years are darker.
pub fn year_color(year: i32, first: i32, last: i32) -> String {
    if last <= first {
        return yl_or_br(1.0);
    }
    yl_or_br((year - first) as f64 / (last - first) as f64)
}
