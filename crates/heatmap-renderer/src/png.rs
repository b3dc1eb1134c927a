//! PNG encoding for RGBA image data.
//!
//! The heatmap is a continuous gradient, so it almost always carries more
//! than 256 unique colors; we encode straight to truecolor-with-alpha
//! (color type 6) rather than bothering with a palette. The encoder is
//! deterministic: identical pixels produce identical bytes.

use std::io::Write;

/// Encode RGBA pixel data (4 bytes per pixel, row-major) as a PNG.
pub fn encode_rgba(pixels: &[u8], width: usize, height: usize) -> Result<Vec<u8>, String> {
    if pixels.len() != width * height * 4 {
        return Err(format!(
            "pixel buffer length {} does not match {}x{} RGBA",
            pixels.len(),
            width,
            height
        ));
    }

    let mut png = Vec::new();

    // PNG signature
    png.extend_from_slice(&[137, 80, 78, 71, 13, 10, 26, 10]);

    // IHDR chunk
    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr.push(8); // bit depth
    ihdr.push(6); // color type: RGBA
    ihdr.push(0); // compression method
    ihdr.push(0); // filter method
    ihdr.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr);

    // IDAT chunk
    let idat = deflate_scanlines(pixels, width, height)
        .map_err(|e| format!("IDAT compression failed: {}", e))?;
    write_chunk(&mut png, b"IDAT", &idat);

    // IEND chunk
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Prefix each scanline with a filter byte (0 = none) and zlib-compress.
fn deflate_scanlines(pixels: &[u8], width: usize, height: usize) -> std::io::Result<Vec<u8>> {
    let stride = width * 4;
    let mut raw = Vec::with_capacity(height * (1 + stride));

    for y in 0..height {
        raw.push(0); // filter type: none
        raw.extend_from_slice(&pixels[y * stride..(y + 1) * stride]);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(&raw)?;
    encoder.finish()
}

/// Write one PNG chunk: length, type, data, CRC32 over type + data.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_and_dimensions() {
        let pixels = vec![0u8; 3 * 2 * 4];
        let png = encode_rgba(&pixels, 3, 2).unwrap();

        assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
        // IHDR payload starts at byte 16: width then height, big-endian
        assert_eq!(&png[16..20], &3u32.to_be_bytes());
        assert_eq!(&png[20..24], &2u32.to_be_bytes());
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let pixels = vec![0u8; 7];
        assert!(encode_rgba(&pixels, 2, 2).is_err());
    }

    #[test]
    fn test_deterministic_output() {
        let pixels: Vec<u8> = (0..16 * 16 * 4).map(|i| (i % 251) as u8).collect();
        let a = encode_rgba(&pixels, 16, 16).unwrap();
        let b = encode_rgba(&pixels, 16, 16).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_round_trips_through_decoder() {
        let pixels: Vec<u8> = (0..8 * 8 * 4).map(|i| (i * 7 % 256) as u8).collect();
        let png = encode_rgba(&pixels, 8, 8).unwrap();

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!((decoded.width(), decoded.height()), (8, 8));
        assert_eq!(decoded.as_raw().as_slice(), pixels.as_slice());
    }
}
