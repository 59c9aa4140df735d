//! Unit conversion between millimetres and typographic points

/// Points per inch (PostScript point)
pub const POINTS_PER_INCH: f32 = 72.0;

/// Millimetres per inch
pub const MM_PER_INCH: f32 = 25.4;

/// Convert millimetres to points
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_INCH / MM_PER_INCH
}

/// Convert points to millimetres
pub fn pt_to_mm(pt: f32) -> f32 {
    pt * MM_PER_INCH / POINTS_PER_INCH
}
