use linemorph_image::{Image, ImageDtype};
use rayon::prelude::*;

use super::pair::FeatureLinePair;
use super::warp::{warp_image, MorphParams};
use crate::error::MorphError;

/// Number of frame intervals rendered when the caller does not choose one.
pub const DEFAULT_FRAME_COUNT: usize = 10;

/// Evenly spaced blend ratios `i / n` for `i = 0..=n`.
///
/// # Errors
///
/// Returns [`MorphError::InvalidFrameCount`] when `n` is zero.
///
/// # Example
///
/// ```
/// use linemorph_imgproc::morph::blend_ratios;
///
/// assert_eq!(blend_ratios(4).unwrap(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// ```
pub fn blend_ratios(n: usize) -> Result<Vec<f64>, MorphError> {
    if n == 0 {
        return Err(MorphError::InvalidFrameCount);
    }
    Ok((0..=n).map(|i| i as f64 / n as f64).collect())
}

/// Render one morph frame per blend ratio, in the order of `ratios`.
///
/// Ratios outside [0, 1] are clamped before rendering. Frames are computed in
/// parallel.
///
/// # Errors
///
/// * [`MorphError::DimensionMismatch`] if `src` and `dst` differ in size.
/// * [`MorphError::EmptyLinePairs`] if `pairs` is empty.
/// * [`MorphError::InvalidBlendRatio`] if a ratio is NaN.
pub fn morph_sequence<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &Image<T, C>,
    pairs: &[FeatureLinePair],
    ratios: &[f64],
    params: &MorphParams,
) -> Result<Vec<Image<T, C>>, MorphError> {
    if src.size() != dst.size() {
        return Err(MorphError::DimensionMismatch(src.size(), dst.size()));
    }

    if pairs.is_empty() {
        return Err(MorphError::EmptyLinePairs);
    }

    let ratios = ratios
        .iter()
        .map(|&alpha| {
            if alpha.is_nan() {
                return Err(MorphError::InvalidBlendRatio(alpha));
            }
            let clamped = alpha.clamp(0.0, 1.0);
            if clamped != alpha {
                log::warn!("blend ratio {alpha} clamped to {clamped}");
            }
            Ok(clamped)
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("rendering {} frames of {}", ratios.len(), src.size());

    ratios
        .into_par_iter()
        .map(|alpha| -> Result<Image<T, C>, MorphError> {
            let mut out = Image::from_size_val(src.size(), T::default())?;
            warp_image(src, dst, &mut out, pairs, alpha, params)?;
            Ok(out)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn pair() -> Result<FeatureLinePair, MorphError> {
        FeatureLinePair::from_endpoints(
            (DVec2::new(0.0, 0.0), DVec2::new(3.0, 3.0)),
            (DVec2::new(0.0, 1.0), DVec2::new(3.0, 2.0)),
        )
    }

    #[test]
    fn ratios_span_source_to_dest() -> Result<(), MorphError> {
        let ratios = blend_ratios(DEFAULT_FRAME_COUNT)?;
        assert_eq!(ratios.len(), DEFAULT_FRAME_COUNT + 1);
        assert_eq!(ratios[0], 0.0);
        assert_eq!(ratios[DEFAULT_FRAME_COUNT], 1.0);
        assert!(ratios.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(blend_ratios(1)?, vec![0.0, 1.0]);
        assert_eq!(blend_ratios(0), Err(MorphError::InvalidFrameCount));
        Ok(())
    }

    #[test]
    fn sequence_keeps_ratio_order() -> Result<(), MorphError> {
        let src = Image::<u8, 1>::from_size_val([4, 4].into(), 0)?;
        let dst = Image::<u8, 1>::from_size_val([4, 4].into(), 100)?;
        let frames = morph_sequence(
            &src,
            &dst,
            &[pair()?],
            &[1.0, 0.0, 0.5, 0.25],
            &MorphParams::default(),
        )?;
        let firsts: Vec<u8> = frames.iter().map(|f| f.as_slice()[0]).collect();
        assert_eq!(firsts, vec![100, 0, 50, 25]);
        Ok(())
    }

    #[test]
    fn sequence_clamps_out_of_range_ratios() -> Result<(), MorphError> {
        let src = Image::<u8, 1>::from_size_val([2, 2].into(), 10)?;
        let dst = Image::<u8, 1>::from_size_val([2, 2].into(), 90)?;
        let params = MorphParams::default();
        let frames = morph_sequence(&src, &dst, &[pair()?], &[-2.0, 7.0], &params)?;
        assert!(frames[0].as_slice().iter().all(|&v| v == 10));
        assert!(frames[1].as_slice().iter().all(|&v| v == 90));
        Ok(())
    }

    #[test]
    fn sequence_validates_inputs_first() -> Result<(), MorphError> {
        let src = Image::<u8, 1>::from_size_val([2, 2].into(), 0)?;
        let other = Image::<u8, 1>::from_size_val([3, 2].into(), 0)?;
        let params = MorphParams::default();
        assert_eq!(
            morph_sequence(&src, &src, &[], &[0.5], &params),
            Err(MorphError::EmptyLinePairs)
        );
        assert!(matches!(
            morph_sequence(&src, &other, &[pair()?], &[0.5], &params),
            Err(MorphError::DimensionMismatch(..))
        ));
        assert!(matches!(
            morph_sequence(&src, &src, &[pair()?], &[f64::NAN], &params),
            Err(MorphError::InvalidBlendRatio(_))
        ));
        assert_eq!(morph_sequence(&src, &src, &[pair()?], &[], &params)?.len(), 0);
        Ok(())
    }
}
