// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CineAssist-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of CineAssist and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use cineassist::markdown::{parse_transcript_markup, segment_response};

// Benchmark identity (keep stable):
// - Group names in this file: `markdown.segment`, `markdown.pipeline`
// - Case IDs must remain stable across refactors so results stay comparable
//   over time (`short_answer`, `fence_heavy`, `long_answer`).
fn benches_segment(c: &mut Criterion) {
    let cases = [
        ("short_answer", short_answer()),
        ("fence_heavy", fence_heavy()),
        ("long_answer", long_answer()),
    ];

    {
        let mut group = c.benchmark_group("markdown.segment");
        for (case_id, text) in &cases {
            group.throughput(Throughput::Bytes(text.len() as u64));
            group.bench_function(*case_id, |b| {
                b.iter(|| black_box(segment_response(black_box(text))).len())
            });
        }
        group.finish();
    }

    {
        // The full per-chunk re-render path: segment, classify, directive.
        let mut group = c.benchmark_group("markdown.pipeline");
        for (case_id, text) in &cases {
            group.throughput(Throughput::Bytes(text.len() as u64));
            group.bench_function(*case_id, |b| {
                b.iter(|| black_box(parse_transcript_markup(black_box(text))).len())
            });
        }
        group.finish();
    }
}

fn short_answer() -> String {
    "## Frame Rate\nOpen **Menu** then `FPS`.\n1. Pick the project rate.\n2. Confirm.\n".to_owned()
}

fn fence_heavy() -> String {
    let mut out = String::new();
    for n in 0..24 {
        out.push_str("Step notes.\n```layout\n{\"view\": \"rear\", \"highlight\": \"battery\", \"label\": \"Pack ");
        out.push_str(&n.to_string());
        out.push_str("\"}\n```\n");
    }
    out
}

fn long_answer() -> String {
    let mut out = String::new();
    for n in 0..400 {
        out.push_str("- Item ");
        out.push_str(&n.to_string());
        out.push_str(" uses **bold** and `code` spans in one line.\n");
    }
    out
}

criterion_group!(benches, benches_segment);
criterion_main!(benches);
