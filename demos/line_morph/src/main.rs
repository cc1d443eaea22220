use argh::FromArgs;
use glam::DVec2;
use std::path::PathBuf;
use std::str::FromStr;

use linemorph::{
    image::{Image, ImageSize},
    imgproc::{
        interpolation::InterpolationMode,
        morph::{self, FeatureLinePair, MorphParams},
    },
};

#[derive(FromArgs)]
/// Morph between two images guided by corresponding feature lines
struct Args {
    /// path to the source image
    #[argh(option, short = 's')]
    source: PathBuf,

    /// path to the destination image, resized to the source size if needed
    #[argh(option, short = 'd')]
    dest: PathBuf,

    /// a line pair as "px,py,qx,qy:px,py,qx,qy", source line first
    #[argh(option, short = 'l')]
    line: Vec<LineArg>,

    /// number of frame intervals
    #[argh(option, short = 'n', default = "morph::DEFAULT_FRAME_COUNT")]
    frames: usize,

    /// directory the frames are written to
    #[argh(option, short = 'o', default = "PathBuf::from(\"frames\")")]
    output_dir: PathBuf,

    /// use nearest neighbor sampling instead of bilinear
    #[argh(switch)]
    nearest: bool,
}

/// One `--line` argument.
struct LineArg(FeatureLinePair);

fn parse_segment(s: &str) -> Result<(DVec2, DVec2), String> {
    let coords = s
        .split(',')
        .map(|v| v.trim().parse::<f64>().map_err(|e| format!("{v:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;

    match coords.as_slice() {
        [px, py, qx, qy] => Ok((DVec2::new(*px, *py), DVec2::new(*qx, *qy))),
        _ => Err(format!("expected 4 coordinates, got {}", coords.len())),
    }
}

impl FromStr for LineArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (source, dest) = s
            .split_once(':')
            .ok_or_else(|| format!("missing ':' between the two lines in {s:?}"))?;

        let pair = FeatureLinePair::from_endpoints(parse_segment(source)?, parse_segment(dest)?)
            .map_err(|e| e.to_string())?;

        Ok(LineArg(pair))
    }
}

fn to_rgb8(img: image::RgbImage) -> Result<Image<u8, 3>, Box<dyn std::error::Error>> {
    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };
    Ok(Image::new(size, img.into_raw())?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    if args.line.is_empty() {
        return Err("at least one --line is required".into());
    }
    let pairs = args.line.into_iter().map(|l| l.0).collect::<Vec<_>>();

    // read the images
    let source = image::open(&args.source)?.into_rgb8();
    let mut dest = image::open(&args.dest)?.into_rgb8();

    if dest.dimensions() != source.dimensions() {
        log::info!(
            "resizing destination from {:?} to {:?}",
            dest.dimensions(),
            source.dimensions()
        );
        dest = image::imageops::resize(
            &dest,
            source.width(),
            source.height(),
            image::imageops::FilterType::Triangle,
        );
    }

    let source = to_rgb8(source)?;
    let dest = to_rgb8(dest)?;

    let params = MorphParams {
        interpolation: if args.nearest {
            InterpolationMode::Nearest
        } else {
            InterpolationMode::Bilinear
        },
        ..Default::default()
    };

    let ratios = morph::blend_ratios(args.frames)?;
    log::info!(
        "morphing {} with {} line pairs into {} frames",
        source.size(),
        pairs.len(),
        ratios.len()
    );

    let frames = morph::morph_sequence(&source, &dest, &pairs, &ratios, &params)?;

    std::fs::create_dir_all(&args.output_dir)?;
    for (i, frame) in frames.into_iter().enumerate() {
        let [width, height]: [u32; 2] = frame.size().into();
        let buffer = image::RgbImage::from_raw(width, height, frame.into_vec())
            .ok_or("frame buffer does not match its size")?;
        let path = args.output_dir.join(format!("frame_{i:03}.png"));
        buffer.save(&path)?;
        log::debug!("wrote {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_line_arg() -> Result<(), String> {
        let arg: LineArg = "0,0,4,0: 1, 1, 5, 2".parse()?;
        assert_eq!(arg.0.source.start(), DVec2::new(0.0, 0.0));
        assert_eq!(arg.0.source.end(), DVec2::new(4.0, 0.0));
        assert_eq!(arg.0.dest.end(), DVec2::new(5.0, 2.0));
        Ok(())
    }

    #[test]
    fn parse_line_arg_rejects_bad_input() {
        assert!("0,0,4,0".parse::<LineArg>().is_err());
        assert!("0,0,4:1,1,5,2".parse::<LineArg>().is_err());
        assert!("0,0,x,0:1,1,5,2".parse::<LineArg>().is_err());
        assert!("1,1,1,1:1,1,5,2".parse::<LineArg>().is_err());
    }
}
