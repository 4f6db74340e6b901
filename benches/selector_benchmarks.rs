use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mediaresolver::extractor::{FormatDescriptor, MediaRecord};
use mediaresolver::selector::select;

fn sample_record(count: usize) -> MediaRecord {
    let heights = [144, 240, 360, 480, 720, 1080];
    let formats = (0..count)
        .map(|i| FormatDescriptor {
            format_id: format!("dash-{}", i),
            ext: Some(if i % 3 == 0 { "m4a" } else { "mp4" }.to_string()),
            height: (i % 3 != 0).then(|| heights[i % heights.len()]),
            tbr: Some((i * 37 % 2000) as f64),
            url: (i % 5 != 0).then(|| format!("https://cdn.example.com/{}.mp4", i)),
            ..Default::default()
        })
        .collect();

    MediaRecord {
        id: Some("bench".to_string()),
        formats,
        ..Default::default()
    }
}

fn benchmark_best_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("Best Format Selection");

    for count in [4, 32, 256] {
        let record = sample_record(count);
        group.bench_function(format!("{} formats", count), |b| {
            b.iter(|| select(black_box(&record), None))
        });
    }

    group.finish();
}

fn benchmark_requested_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("Requested Format Selection");
    let record = sample_record(256);

    group.bench_function("match by id", |b| {
        b.iter(|| select(black_box(&record), Some(black_box("dash-200"))))
    });

    group.bench_function("no match", |b| {
        b.iter(|| select(black_box(&record), Some(black_box("missing"))))
    });

    group.bench_function("image fallback", |b| {
        let image_only = MediaRecord {
            thumbnail: Some("https://cdn.example.com/t.jpg".to_string()),
            ..Default::default()
        };
        b.iter(|| select(black_box(&image_only), None))
    });

    group.finish();
}

criterion_group!(benches, benchmark_best_format, benchmark_requested_format);
criterion_main!(benches);
