//! Backend-native length units.
//!
//! All geometry produced by the engine is expressed in English Metric Units (EMU),
//! the integer unit used by presentation documents: 360 000 per centimetre and
//! 12 700 per point.

/// A length in EMU
pub type Length = i64;

/// EMU per centimetre
pub const EMU_PER_CM: f64 = 360_000.0;

/// EMU per typographic point
pub const EMU_PER_PT: f64 = 12_700.0;

/// Convert centimetres to EMU, rounding to the nearest unit
pub fn cm(value: f64) -> Length {
    (value * EMU_PER_CM).round() as Length
}

/// Convert points to EMU, rounding to the nearest unit
pub fn pt(value: f64) -> Length {
    (value * EMU_PER_PT).round() as Length
}

/// Convert EMU back to centimetres
pub fn to_cm(length: Length) -> f64 {
    length as f64 / EMU_PER_CM
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centimetres() {
        assert_eq!(cm(1.0), 360_000);
        assert_eq!(cm(0.4), 144_000);
        assert_eq!(cm(33.87), 12_193_200);
        assert_eq!(to_cm(720_000), 2.0);
    }

    #[test]
    fn points() {
        assert_eq!(pt(1.0), 12_700);
        assert_eq!(pt(8.0), 101_600);
    }
}
