use argh::FromArgs;
use std::path::PathBuf;

use facewarp::face::{
    Correspondence, FaceWarper, LandmarkDetector, PrecomputedLandmarks, WarpConfig,
};
use facewarp::image::Image;
use facewarp::imgproc::{
    blend::alpha_blend,
    draw::{draw_points, draw_triangulation},
    parallel::ExecutionStrategy,
};
use facewarp::io::{config::OverlayConfig, functional as F, points};

#[derive(FromArgs)]
/// Warp an overlay onto a face and composite it with its alpha channel
struct Args {
    /// path to the overlay configuration file
    #[argh(option, short = 'c')]
    config: PathBuf,

    /// path to the target image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path to the landmark file of the target face
    #[argh(option, short = 'l')]
    landmarks: PathBuf,

    /// path to the composited output image
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// optional path to save the warped overlay mask
    #[argh(option)]
    mask_output: Option<PathBuf>,

    /// optional path to save the triangulation of the overlay points
    #[argh(option)]
    triangulation_output: Option<PathBuf>,

    /// optional path to save the overlay annotated with its points and triangles
    #[argh(option)]
    debug_output: Option<PathBuf>,

    /// number of threads used by the warp, all cores when not set
    #[argh(option, short = 'j')]
    num_threads: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    // read the overlay and its landmarks
    let config = OverlayConfig::from_file(&args.config)?;
    let overlay = F::read_overlay_rgba(&config.overlay_image)?;
    let source = points::read_points(&config.overlay_points)?;

    // read the target image and its landmarks
    let target_image = F::read_image_rgb_f32(&args.image_path)?;
    let detector = PrecomputedLandmarks::from_file(&args.landmarks)?;
    let landmarks = detector.detect_first(&target_image)?;

    log::info!(
        "overlay {} with {} points, target {} with {} landmarks",
        overlay.color.size(),
        source.len(),
        target_image.size(),
        landmarks.len()
    );

    let correspondence = Correspondence::from_selection(
        source,
        &landmarks,
        &config.selected,
        target_image.size(),
    )?;

    let strategy = match args.num_threads {
        Some(n) => ExecutionStrategy::Fixed(n),
        None => ExecutionStrategy::ParallelElements,
    };

    let mut warper = FaceWarper::new(WarpConfig {
        interpolation: config.interpolation_mode(),
        strategy,
    });
    if let Some(path) = &config.triangulation {
        let triangulation = points::read_triangulation_checked(path, correspondence.len())?;
        warper = warper.with_triangulation(triangulation);
    }

    if let Some(path) = &args.triangulation_output {
        let triangulation = warper.triangulation_for(correspondence.source())?;
        points::write_triangulation(path, &triangulation)?;
    }

    if let Some(path) = &args.debug_output {
        let source = correspondence.source();
        let triangulation = warper.triangulation_for(source)?;

        let mut annotated = overlay.color.clone();
        draw_triangulation(&mut annotated, source, &triangulation, [0.0, 1.0, 0.0], 1)?;
        draw_points(&mut annotated, source, 2, [1.0, 0.0, 0.0]);

        F::write_image_rgb_f32(path, &annotated)?;
        log::info!("wrote {}", path.display());
    }

    // warp the overlay and its mask onto the target face
    let warped = warper.warp(
        &overlay.color,
        Some(&overlay.alpha),
        &correspondence,
        target_image.size(),
    )?;
    let mask = warped.mask.ok_or("the warp did not produce a mask")?;

    // composite the warped overlay over the target
    let mut composite = Image::<f32, 3>::from_size_val(target_image.size(), 0.0)?;
    alpha_blend(&target_image, &warped.image, &mask, &mut composite)?;

    F::write_image_rgb_f32(&args.output, &composite)?;
    log::info!("wrote {}", args.output.display());

    if let Some(path) = &args.mask_output {
        F::write_image_rgb_f32(path, &mask)?;
        log::info!("wrote {}", path.display());
    }

    Ok(())
}
