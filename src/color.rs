use crate::prelude::*;
use rayon::prelude::*;
use std::io::{self, Write};

pub type Color = Vec3;

#[inline]
pub fn linear_to_gamma(linear_component: f64) -> f64 {
    if linear_component > 0.0 {
        linear_component.sqrt()
    } else {
        0.0
    }
}

/// Gamma-2 correct, clamp and quantize a linear color to bytes.
pub fn to_bytes(pixel_color: Color) -> [u8; 3] {
    let r = linear_to_gamma(pixel_color.x);
    let g = linear_to_gamma(pixel_color.y);
    let b = linear_to_gamma(pixel_color.z);

    let intensity = Interval::INTENSITY;
    [
        (255.999 * intensity.clamp(r)) as u8,
        (255.999 * intensity.clamp(g)) as u8,
        (255.999 * intensity.clamp(b)) as u8,
    ]
}

pub fn write_color<W: Write>(out: &mut W, pixel_color: Color) -> io::Result<()> {
    write_bytes(out, to_bytes(pixel_color))
}

fn write_bytes<W: Write>(out: &mut W, [rbyte, gbyte, bbyte]: [u8; 3]) -> io::Result<()> {
    writeln!(out, "{} {} {}", rbyte, gbyte, bbyte)
}

/// Writes a plain-text PPM (P3) image from a row-major pixel buffer.
pub fn write_ppm<W: Write>(
    out: &mut W,
    width: usize,
    height: usize,
    pixels: &[Color],
) -> Result<(), RenderError> {
    if pixels.len() != width * height {
        return Err(RenderError::BufferSize {
            expected: width * height,
            actual: pixels.len(),
        });
    }

    writeln!(out, "P3")?;
    writeln!(out, "{} {}", width, height)?;
    writeln!(out, "255")?;

    let bytes: Vec<[u8; 3]> = pixels.par_iter().map(|&c| to_bytes(c)).collect();
    for rgb in bytes {
        write_bytes(out, rgb)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gamma_zeroes_negative_channels() {
        assert_eq!(linear_to_gamma(-0.5), 0.0);
        assert_eq!(linear_to_gamma(0.25), 0.5);
    }

    #[test]
    fn write_color_quantizes_like_the_ppm_encoder() {
        let mut out = Vec::new();
        write_color(&mut out, Color::new(0.25, 4.0, -1.0)).unwrap();
        // sqrt(0.25) = 0.5 -> 127; 4.0 clamps to 0.999 -> 255; negative -> 0
        assert_eq!(String::from_utf8(out).unwrap(), "127 255 0\n");
    }

    #[test]
    fn write_ppm_emits_header_and_one_line_per_pixel() {
        let pixels = vec![Color::zero(), Color::one(), Color::new(0.25, 0.25, 0.25)];
        let mut out = Vec::new();
        write_ppm(&mut out, 3, 1, &pixels).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "P3\n3 1\n255\n0 0 0\n255 255 255\n127 127 127\n"
        );
    }

    #[test]
    fn write_ppm_body_matches_write_color_per_pixel() {
        let pixels = vec![
            Color::new(0.1, 0.5, 0.9),
            Color::new(2.0, -3.0, 0.0004),
            Color::new(0.36, 0.64, 0.81),
            Color::new(0.999, 0.001, 0.5),
        ];
        let mut ppm = Vec::new();
        write_ppm(&mut ppm, 2, 2, &pixels).unwrap();

        let mut expected = b"P3\n2 2\n255\n".to_vec();
        for &c in &pixels {
            write_color(&mut expected, c).unwrap();
        }
        assert_eq!(ppm, expected);
    }

    #[test]
    fn write_ppm_rejects_mismatched_buffer() {
        let mut out = Vec::new();
        let err = write_ppm(&mut out, 2, 2, &[Color::zero()]).unwrap_err();
        assert!(matches!(
            err,
            RenderError::BufferSize {
                expected: 4,
                actual: 1
            }
        ));
        assert!(out.is_empty());
    }
}
