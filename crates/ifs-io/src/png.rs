use std::{fs, fs::File, io::BufWriter, path::Path};

use ifs_image::{ImageSize, PixelBuffer};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};

use crate::error::IoError;

/// Read a PNG image as a four channel (rgba8) pixel buffer.
///
/// Palette, grayscale and RGB files are expanded to RGBA with an opaque alpha, and 16 bit
/// files are reduced to 8 bits.
///
/// # Arguments
///
/// * `file_path` - The path to the PNG file.
///
/// # Returns
///
/// A RGBA pixel buffer.
pub fn read_image_png_rgba8(file_path: impl AsRef<Path>) -> Result<PixelBuffer, IoError> {
    // verify the file exists
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // verify the file extension
    match file_path.extension() {
        Some(extension) if extension == "png" => {}
        _ => return Err(IoError::InvalidFileExtension(file_path.to_path_buf())),
    }

    let file = fs::File::open(file_path)?;
    let image = decode_png_impl(Decoder::new(file))?;

    log::debug!("read {} from {}", image.size(), file_path.display());

    Ok(image)
}

/// Decodes a PNG image from raw bytes as a four channel (rgba8) pixel buffer.
///
/// # Arguments
///
/// - `bytes` - Raw bytes of the png file
pub fn decode_image_png_rgba8(bytes: &[u8]) -> Result<PixelBuffer, IoError> {
    decode_png_impl(Decoder::new(bytes))
}

/// Writes the given pixel buffer as an 8 bit RGBA PNG to the given file path.
///
/// # Arguments
///
/// - `file_path` - The path to the PNG image.
/// - `image` - The pixel buffer to encode.
pub fn write_image_png_rgba8(
    file_path: impl AsRef<Path>,
    image: &PixelBuffer,
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    let file = File::create(file_path)?;
    let size = image.size();

    let mut encoder = Encoder::new(BufWriter::new(file), size.width as u32, size.height as u32);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .write_image_data(image.as_slice())
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;

    log::debug!("wrote {} to {}", size, file_path.display());

    Ok(())
}

// utility function to decode a png stream into rgba8
fn decode_png_impl<R: std::io::Read>(mut decoder: Decoder<R>) -> Result<PixelBuffer, IoError> {
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);

    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::PngDecodeError(e.to_string()))?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != BitDepth::Eight {
        return Err(IoError::PngDecodeError(format!(
            "unsupported bit depth {:?}",
            info.bit_depth
        )));
    }

    let rgba = match info.color_type {
        ColorType::Rgba => buf,
        ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        ColorType::Grayscale => buf.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        ColorType::Indexed => {
            return Err(IoError::PngDecodeError(
                "indexed color was not expanded".to_string(),
            ))
        }
    };

    let size = ImageSize {
        width: info.width as usize,
        height: info.height as usize,
    };

    Ok(PixelBuffer::new(size, rgba)?)
}
