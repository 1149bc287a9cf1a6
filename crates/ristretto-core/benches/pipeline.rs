//! Run with: cargo bench -p ristretto-core

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use ristretto_core::pipeline::modules::BoxBlur;
use ristretto_core::{Invocation, Pipeline, Raster};

fn test_image(width: u32, height: u32) -> Raster {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            data.push((x * 255 / width) as u8);
            data.push((y * 255 / height) as u8);
            data.push(((x + y) * 127 / (width + height)) as u8);
        }
    }
    Raster::from_data(width, height, 3, data).unwrap()
}

/// Box blur cost should stay flat as the kernel grows.
fn bench_box_blur(c: &mut Criterion) {
    let mut group = c.benchmark_group("box_blur");
    let image = test_image(1024, 1024);
    group.throughput(Throughput::Elements(image.pixel_count() as u64));

    for kernel in [3u32, 15, 31] {
        for (label, blur) in [
            ("parallel", BoxBlur::default()),
            ("sequential", BoxBlur::sequential()),
        ] {
            group.bench_with_input(BenchmarkId::new(label, kernel), &kernel, |b, &k| {
                b.iter(|| blur.apply(black_box(&image), k).unwrap());
            });
        }
    }
    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let steps = vec![
        Invocation::new("brightness").param("factor", 1.2),
        Invocation::new("saturation").param("factor", 1.5),
        Invocation::new("box_blur").param("kernel_size", 7),
        Invocation::new("unsharp_mask")
            .param("strength", 1.5)
            .param("blur_size", 5),
    ];

    for size in [256u32, 1024] {
        let image = test_image(size, size);
        group.throughput(Throughput::Elements(image.pixel_count() as u64));
        group.bench_with_input(
            BenchmarkId::new("color_blur_sharpen", format!("{size}x{size}")),
            &image,
            |b, img| {
                let pipeline = Pipeline::default();
                b.iter(|| pipeline.process(black_box(img), &steps).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_box_blur, bench_full_pipeline);
criterion_main!(benches);
