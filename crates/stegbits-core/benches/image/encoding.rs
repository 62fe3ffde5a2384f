use criterion::{criterion_group, criterion_main, Criterion};
use image::{ImageBuffer, Rgb};
use stegbits_core::media::Raster;
use stegbits_core::payload::frame;
use stegbits_core::BitDepth;

pub fn image_encoding(c: &mut Criterion) {
    let plain = ImageBuffer::from_fn(512, 512, |x, y| Rgb([x as u8, y as u8, (x ^ y) as u8]));
    let secret = frame(&[0x5A; 4096]).expect("Cannot frame the secret");

    for depth in [1, 4, 8] {
        let depth = BitDepth::new(depth).expect("Invalid bit depth");
        c.bench_function(&format!("Image Encoding depth {depth}"), |b| {
            let mut raster = Raster::Rgb(plain.clone());

            b.iter(|| raster.hide(&secret, depth))
        });
    }
}

criterion_group!(benches, image_encoding);
criterion_main!(benches);
