use crate::Float;

/// Multiply the 3 by 3 matrix and 3-element vector with each other, producing
/// a new 3-element vector.
#[inline]
fn multiply(matrix: &[[Float; 3]; 3], vector: &[Float; 3]) -> [Float; 3] {
    let [row1, row2, row3] = matrix;

    [
        row1[0].mul_add(vector[0], row1[1].mul_add(vector[1], row1[2] * vector[2])),
        row2[0].mul_add(vector[0], row2[1].mul_add(vector[1], row2[2] * vector[2])),
        row3[0].mul_add(vector[0], row3[1].mul_add(vector[1], row3[2] * vector[2])),
    ]
}

// --------------------------------------------------------------------------------------------------------------------

/// Convert coordinates from gamma-corrected sRGB to linear sRGB. This is a
/// one-hop, direct conversion.
fn srgb_to_linear_srgb(value: &[Float; 3]) -> [Float; 3] {
    #[inline]
    fn convert(value: Float) -> Float {
        if value <= 0.04045 {
            value / 12.92
        } else {
            ((value + 0.055) / 1.055).powf(2.4)
        }
    }

    [convert(value[0]), convert(value[1]), convert(value[2])]
}

// --------------------------------------------------------------------------------------------------------------------

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const LINEAR_SRGB_TO_XYZ: [[Float; 3]; 3] = [
    [ 0.4124564, 0.3575761, 0.1804375 ],
    [ 0.2126729, 0.7151522, 0.0721750 ],
    [ 0.0193339, 0.1191920, 0.9503041 ],
];

/// Convert the given 24-bit sRGB coordinates to XYZ, scaled so that the D65
/// reference white has Y = 100. This is a two-hop conversion through linear
/// sRGB.
pub(crate) fn rgb_to_xyz(r: u8, g: u8, b: u8) -> [Float; 3] {
    let value = [
        r as Float / 255.0,
        g as Float / 255.0,
        b as Float / 255.0,
    ];
    let [lr, lg, lb] = srgb_to_linear_srgb(&value);
    multiply(&LINEAR_SRGB_TO_XYZ, &[100.0 * lr, 100.0 * lg, 100.0 * lb])
}

// --------------------------------------------------------------------------------------------------------------------

// D65 reference white, on the same 0..=100 scale as rgb_to_xyz.
const WHITE_POINT: [Float; 3] = [95.047, 100.0, 108.883];

const EPSILON: Float = 0.008856;
const KAPPA: Float = 7.787;

/// Convert coordinates for XYZ to CIELAB under the D65 illuminant. This is a
/// one-hop, direct conversion.
pub(crate) fn xyz_to_lab(value: &[Float; 3]) -> [Float; 3] {
    #[inline]
    fn f(t: Float) -> Float {
        if t > EPSILON {
            t.cbrt()
        } else {
            KAPPA.mul_add(t, 16.0 / 116.0)
        }
    }

    let fx = f(value[0] / WHITE_POINT[0]);
    let fy = f(value[1] / WHITE_POINT[1]);
    let fz = f(value[2] / WHITE_POINT[2]);

    [
        116.0 * fy - 16.0,
        500.0 * (fx - fy),
        200.0 * (fy - fz),
    ]
}

/// Convert the given 24-bit sRGB coordinates to CIELAB. This is a three-hop
/// conversion through linear sRGB and XYZ.
pub(crate) fn rgb_to_lab(r: u8, g: u8, b: u8) -> [Float; 3] {
    xyz_to_lab(&rgb_to_xyz(r, g, b))
}

// ====================================================================================================================
