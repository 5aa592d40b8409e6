/// Blend a non-premultiplied RGBA source pixel over a destination pixel in place.
pub(crate) fn source_over(dst: &mut [u8], src: &[u8]) {
    match src[3] {
        0 => {}
        255 => dst.copy_from_slice(&src[..4]),
        alpha => {
            let sa = alpha as f32 / 255.0;
            let da = dst[3] as f32 / 255.0 * (1.0 - sa);
            let out_alpha = sa + da;

            for k in 0..3 {
                let value = (src[k] as f32 * sa + dst[k] as f32 * da) / out_alpha;
                dst[k] = value.round().clamp(0.0, 255.0) as u8;
            }
            dst[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
        }
    }
}
