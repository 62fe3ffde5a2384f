use criterion::{criterion_group, criterion_main, Criterion};
use image::{ImageBuffer, Rgb};
use stegbits_core::media::Raster;
use stegbits_core::payload::{frame, read_framed};
use stegbits_core::BitDepth;

pub fn image_decoding(c: &mut Criterion) {
    let depth = BitDepth::new(2).expect("Invalid bit depth");
    let mut raster = Raster::Rgb(ImageBuffer::from_fn(512, 512, |x, y| {
        Rgb([x as u8, y as u8, (x ^ y) as u8])
    }));
    raster.hide(&frame(&[0xA5; 4096]).expect("Cannot frame the secret"), depth);

    c.bench_function("Image Decoding", |b| {
        b.iter(|| read_framed(&mut raster.reader(depth)).expect("Cannot unveil the secret"))
    });
}

criterion_group!(benches, image_decoding);
criterion_main!(benches);
