//! Length units of DrawingML.

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_PT: i64 = 12_700;

/// Font sizes (`@sz`) are stored in hundredths of a point.
pub const CENTIPOINTS_PER_PT: f64 = 100.0;

#[inline]
pub fn emu_to_pt_f64(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_PT as f64
}

#[inline]
pub fn emu_to_inch_f64(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_INCH as f64
}

#[inline]
pub fn centipoints_to_pt(centipoints: i32) -> f64 {
    centipoints as f64 / CENTIPOINTS_PER_PT
}
