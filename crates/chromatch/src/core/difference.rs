use crate::Float;

/// Compute Delta E 1976 for two CIELAB coordinates, i.e., their Euclidian
/// distance.
#[allow(non_snake_case)]
pub fn delta_e_76(coordinates1: &[Float; 3], coordinates2: &[Float; 3]) -> Float {
    let [L1, a1, b1] = coordinates1;
    let [L2, a2, b2] = coordinates2;

    let ΔL = L1 - L2;
    let Δa = a1 - a2;
    let Δb = b1 - b2;

    ΔL.mul_add(ΔL, Δa.mul_add(Δa, Δb * Δb)).sqrt()
}

// --------------------------------------------------------------------------------------------------------------------

const POW7_25: Float = 6_103_515_625.0; // 25^7

/// Compute the hue angle for the given chroma coordinates, in degrees within
/// `0..360`. The angle for the achromatic origin, where `atan2` would be
/// undefined, is zero.
fn hue_angle(a: Float, b: Float) -> Float {
    if a == 0.0 && b == 0.0 {
        return 0.0;
    }

    let h = b.atan2(a).to_degrees();
    if h.is_sign_negative() {
        h + 360.0
    } else {
        h
    }
}

/// Compute Delta E 2000 for two CIELAB coordinates.
///
/// This function implements the CIEDE2000 revision of the color difference,
/// which corrects the metric's perceptual non-uniformity with chroma- and
/// hue-dependent weights and a rotation term for the blue region. The
/// parametric factors kL, kC, and kH are all unity.
///
/// Unlike [`delta_e_76`], the result is not a metric in the mathematical
/// sense. It still is symmetric in its arguments, non-negative, and zero
/// exactly for identical coordinates.
#[allow(non_snake_case)]
pub fn delta_e_2000(coordinates1: &[Float; 3], coordinates2: &[Float; 3]) -> Float {
    let [L1, a1, b1] = *coordinates1;
    let [L2, a2, b2] = *coordinates2;

    // Chroma compensation for near-neutral colors
    let C1 = a1.hypot(b1);
    let C2 = a2.hypot(b2);
    let C_mean = 0.5 * (C1 + C2);
    let G = 0.5 * (1.0 - (C_mean.powi(7) / (C_mean.powi(7) + POW7_25)).sqrt());

    let a1p = (1.0 + G) * a1;
    let a2p = (1.0 + G) * a2;
    let C1p = a1p.hypot(b1);
    let C2p = a2p.hypot(b2);
    let Cp_mean = 0.5 * (C1p + C2p);
    let h1p = hue_angle(a1p, b1);
    let h2p = hue_angle(a2p, b2);

    // Lightness, chroma, and hue differences, the latter with wraparound
    let ΔL = L2 - L1;
    let ΔC = C2p - C1p;
    let mut Δh = h2p - h1p;
    if 180.0 < Δh.abs() {
        if Δh > 0.0 {
            Δh -= 360.0;
        } else {
            Δh += 360.0;
        }
    }
    let ΔH = 2.0 * (C1p * C2p).sqrt() * (0.5 * Δh).to_radians().sin();

    // Weighting functions
    let L_mean = 0.5 * (L1 + L2);
    let h_mean = 0.5 * (h1p + h2p);
    let T = 1.0 - 0.17 * (h_mean - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_mean).to_radians().cos()
        + 0.32 * (3.0 * h_mean + 6.0).to_radians().cos()
        - 0.20 * (4.0 * h_mean - 63.0).to_radians().cos();

    let L50 = (L_mean - 50.0) * (L_mean - 50.0);
    let SL = 1.0 + 0.015 * L50 / (20.0 + L50).sqrt();
    let SC = 1.0 + 0.045 * Cp_mean;
    let SH = 1.0 + 0.015 * Cp_mean * T;

    // Rotation term for the blue region
    let Δθ = 30.0 * (-((h_mean - 275.0) / 25.0) * ((h_mean - 275.0) / 25.0)).exp();
    let RC = 2.0 * (Cp_mean.powi(7) / (Cp_mean.powi(7) + POW7_25)).sqrt();
    let RT = -(2.0 * Δθ).to_radians().sin() * RC;

    let lightness = ΔL / SL;
    let chroma = ΔC / SC;
    let hue = ΔH / SH;

    lightness
        .mul_add(
            lightness,
            chroma.mul_add(chroma, hue.mul_add(hue, RT * chroma * hue)),
        )
        .sqrt()
}

// ====================================================================================================================
