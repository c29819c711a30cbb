use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use facewarp_geometry::Point2d;
use facewarp_image::Image;
use facewarp_imgproc::{
    blend::alpha_blend,
    interpolation::InterpolationMode,
    warp::{warp_triangle, warp_triangle_patch},
};

fn bench_warp_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("WarpTriangle");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        // input image
        let image_size = [*width, *height].into();
        let image = Image::<u8, 3>::new(image_size, vec![0u8; width * height * 3]).unwrap();
        let image_f32 = image.cast_and_scale(1.0f32 / 255.0).unwrap();

        // output image
        let output = Image::<f32, 3>::from_size_val(image_size, 0.0).unwrap();

        let (w, h) = ((*width - 1) as f32, (*height - 1) as f32);
        let src_tri = [
            Point2d::new(0.0, 0.0),
            Point2d::new(w, 0.0),
            Point2d::new(0.0, h),
        ];
        let dst_tri = [
            Point2d::new(w * 0.1, h * 0.2),
            Point2d::new(w * 0.9, h * 0.05),
            Point2d::new(w * 0.3, h * 0.95),
        ];

        group.bench_with_input(
            BenchmarkId::new("bilinear_paste", &parameter_string),
            &(&image_f32, &output),
            |b, i| {
                let (src, mut dst) = (i.0.clone(), i.1.clone());
                b.iter(|| {
                    warp_triangle(
                        black_box(&src),
                        black_box(&mut dst),
                        black_box(&src_tri),
                        black_box(&dst_tri),
                        black_box(InterpolationMode::Bilinear),
                    )
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("nearest_patch", &parameter_string),
            &image_f32,
            |b, src| {
                b.iter(|| {
                    warp_triangle_patch(
                        black_box(src),
                        black_box(&src_tri),
                        black_box(image_size),
                        black_box(&dst_tri),
                        black_box(InterpolationMode::Nearest),
                    )
                })
            },
        );
    }
    group.finish();
}

fn bench_alpha_blend(c: &mut Criterion) {
    let mut group = c.benchmark_group("AlphaBlend");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let image_size = [*width, *height].into();
        let background = Image::<f32, 3>::from_size_val(image_size, 0.2).unwrap();
        let foreground = Image::<f32, 3>::from_size_val(image_size, 0.8).unwrap();
        let mask = Image::<f32, 3>::from_size_val(image_size, 0.5).unwrap();
        let output = Image::<f32, 3>::from_size_val(image_size, 0.0).unwrap();

        group.bench_with_input(
            BenchmarkId::new("par_rows", &parameter_string),
            &output,
            |b, output| {
                let mut dst = output.clone();
                b.iter(|| {
                    alpha_blend(
                        black_box(&background),
                        black_box(&foreground),
                        black_box(&mask),
                        black_box(&mut dst),
                    )
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_warp_triangle, bench_alpha_blend);
criterion_main!(benches);
