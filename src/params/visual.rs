//! Live-tweakable visual parameters (amplitude, object scale, colors, rotation).

use std::fmt;
use std::str::FromStr;

/// Documented range for the plane amplitude multiplier
pub const MULTI_RANGE: (f32, f32) = (0.0, 20.0);

/// Documented range for the object scale multiplier
pub const OBJECT_SCALE_RANGE: (f32, f32) = (1.0, 10.0);

/// Documented range for the floor rotation (degrees)
pub const PLANE_ROTATION_RANGE: (f32, f32) = (0.0, 360.0);

/// 24-bit RGB color (0xRRGGBB)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

impl Rgb {
    pub fn new(hex: u32) -> Self {
        Self(hex & 0x00ff_ffff)
    }

    pub fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn b(self) -> u8 {
        self.0 as u8
    }

    /// Linear-space RGBA for an sRGB render target
    pub fn to_linear_rgba(self) -> [f32; 4] {
        fn to_linear(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        [to_linear(self.r()), to_linear(self.g()), to_linear(self.b()), 1.0]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl FromStr for Rgb {
    type Err = String;

    /// Accepts `#rrggbb`, `0xrrggbb` or bare `rrggbb`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.len() != 6 {
            return Err(format!("expected 6 hex digits, got '{}'", s));
        }
        u32::from_str_radix(digits, 16)
            .map(Rgb::new)
            .map_err(|e| format!("invalid color '{}': {}", s, e))
    }
}

/// User-adjustable visual parameters
#[derive(Debug, Clone, PartialEq)]
pub struct VisualConfig {
    /// Plane amplitude multiplier: amplitude = lower band fraction * multi
    /// Range: [0, 20]
    pub multi: f32,

    /// Object scale multiplier (idle scale, or gain on the lower band when driven)
    /// Range: [1, 10]
    pub object_scale: f32,

    /// Object (torus knot / sphere) wireframe color
    pub object_color: Rgb,

    /// Shared plane wireframe color
    pub plane_color: Rgb,

    /// Floor rotation about X (degrees)
    /// Range: [0, 360]
    pub plane_rotation_deg: f32,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            multi: 10.0,
            object_scale: 10.0,
            object_color: Rgb(0xff1100),
            plane_color: Rgb(0x12d4ff),
            plane_rotation_deg: 90.0,
        }
    }
}

impl VisualConfig {
    /// Defaults for the orb scene (sphere starts at unit scale)
    pub fn orb() -> Self {
        Self {
            object_scale: 1.0,
            ..Self::default()
        }
    }

    /// Copy of this config with every numeric field clamped into its range.
    ///
    /// NaN inputs fall back to the range minimum.
    pub fn clamped(&self) -> Self {
        Self {
            multi: clamp_range(self.multi, MULTI_RANGE),
            object_scale: clamp_range(self.object_scale, OBJECT_SCALE_RANGE),
            plane_rotation_deg: clamp_range(self.plane_rotation_deg, PLANE_ROTATION_RANGE),
            ..self.clone()
        }
    }

    pub fn plane_rotation_rad(&self) -> f32 {
        self.plane_rotation_deg.to_radians()
    }
}

fn clamp_range(value: f32, (min, max): (f32, f32)) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_within_ranges() {
        let config = VisualConfig::default();
        assert_eq!(config.clamped(), config);
        assert_eq!(VisualConfig::orb().object_scale, 1.0);
    }

    #[test]
    fn test_clamping() {
        let config = VisualConfig {
            multi: 35.0,
            object_scale: 0.0,
            plane_rotation_deg: -10.0,
            ..VisualConfig::default()
        }
        .clamped();

        assert_eq!(config.multi, 20.0);
        assert_eq!(config.object_scale, 1.0);
        assert_eq!(config.plane_rotation_deg, 0.0);

        let nan = VisualConfig {
            multi: f32::NAN,
            ..VisualConfig::default()
        };
        assert_eq!(nan.clamped().multi, 0.0);
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!("#ff1100".parse::<Rgb>(), Ok(Rgb(0xff1100)));
        assert_eq!("0x12d4ff".parse::<Rgb>(), Ok(Rgb(0x12d4ff)));
        assert_eq!("12D4FF".parse::<Rgb>(), Ok(Rgb(0x12d4ff)));
        assert!("#fff".parse::<Rgb>().is_err());
        assert!("zzzzzz".parse::<Rgb>().is_err());
        assert_eq!(Rgb(0x12d4ff).to_string(), "#12d4ff");
    }

    #[test]
    fn test_linear_color() {
        let rgba = Rgb(0xff0000).to_linear_rgba();
        assert!((rgba[0] - 1.0).abs() < 1e-6);
        assert_eq!(rgba[1], 0.0);
        assert_eq!(rgba[3], 1.0);
    }
}
