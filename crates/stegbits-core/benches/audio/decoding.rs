use std::io::Cursor;

use criterion::{criterion_group, criterion_main, Criterion};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use stegbits_core::media::PcmAudio;
use stegbits_core::payload::{frame, read_framed};
use stegbits_core::BitDepth;

pub fn audio_decoding(c: &mut Criterion) {
    let depth = BitDepth::new(1).expect("Invalid bit depth");
    let spec = WavSpec {
        channels: 1,
        sample_rate: 22_050,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec).expect("Cannot create writer");
        for i in 0..22_050 {
            writer.write_sample((i % 4096) as i16).expect("Cannot write sample");
        }
        writer.finalize().expect("Cannot finalize wav");
    }
    cursor.set_position(0);
    let mut audio = PcmAudio::from_reader(WavReader::new(cursor).expect("Cannot create reader"))
        .expect("Cannot read samples");
    audio.hide(&frame(b"Hello World!").expect("Cannot frame the secret"), depth);

    c.bench_function("Audio Decoding", |b| {
        b.iter(|| read_framed(&mut audio.reader(depth)).expect("Cannot unveil 12 bytes"))
    });
}

criterion_group!(benches, audio_decoding);
criterion_main!(benches);
