use facewarp_geometry::Rect;
use facewarp_image::Image;

/// Kernel for bilinear interpolation
///
/// Taps outside of `window` are replaced by the closest pixel of the window.
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `window` - The sampling window, non-empty and inside the image.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn bilinear_interpolation<const C: usize>(
    image: &Image<f32, C>,
    u: f32,
    v: f32,
    window: &Rect,
) -> [f32; C] {
    let cols = image.cols();

    let (min_u, max_u) = (window.x, window.right() - 1);
    let (min_v, max_v) = (window.y, window.bottom() - 1);

    let fu = u.floor();
    let fv = v.floor();

    let frac_u = u - fu;
    let frac_v = v - fv;

    let frac_uu = 1.0 - frac_u;
    let frac_vv = 1.0 - frac_v;

    let w00 = frac_uu * frac_vv;
    let w01 = frac_u * frac_vv;
    let w10 = frac_uu * frac_v;
    let w11 = frac_u * frac_v;

    let iu0 = (fu as i64).clamp(min_u, max_u) as usize;
    let iv0 = (fv as i64).clamp(min_v, max_v) as usize;
    let iu1 = (fu as i64 + 1).clamp(min_u, max_u) as usize;
    let iv1 = (fv as i64 + 1).clamp(min_v, max_v) as usize;

    let base00 = (iv0 * cols + iu0) * C;
    let base01 = (iv0 * cols + iu1) * C;
    let base10 = (iv1 * cols + iu0) * C;
    let base11 = (iv1 * cols + iu1) * C;

    let data = image.as_slice();

    let p00 = &data[base00..base00 + C];
    let p01 = &data[base01..base01 + C];
    let p10 = &data[base10..base10 + C];
    let p11 = &data[base11..base11 + C];

    let mut pixel = [0.0; C];
    for k in 0..C {
        pixel[k] = p00[k] * w00 + p01[k] * w01 + p10[k] * w10 + p11[k] * w11;
    }

    pixel
}
