use std::io::Cursor;

use criterion::{criterion_group, criterion_main, Criterion};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use stegbits_core::media::PcmAudio;
use stegbits_core::payload::frame;
use stegbits_core::BitDepth;

fn one_second_of_stereo() -> PcmAudio {
    let spec = WavSpec {
        channels: 2,
        sample_rate: 44_100,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec).expect("Cannot create writer");
        for i in 0..44_100 * 2 {
            let s = (i as f32 * 0.01).sin() * i16::MAX as f32;
            writer.write_sample(s as i16).expect("Cannot write sample");
        }
        writer.finalize().expect("Cannot finalize wav");
    }
    cursor.set_position(0);

    PcmAudio::from_reader(WavReader::new(cursor).expect("Cannot create reader"))
        .expect("Cannot read samples")
}

pub fn audio_encoding(c: &mut Criterion) {
    let depth = BitDepth::new(1).expect("Invalid bit depth");
    let secret = frame(b"Hello World!").expect("Cannot frame the secret");

    c.bench_function("Audio Encoding", |b| {
        let mut audio = one_second_of_stereo();

        b.iter(|| audio.hide(&secret, depth))
    });
}

criterion_group!(benches, audio_encoding);
criterion_main!(benches);
