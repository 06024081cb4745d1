//! Decode throughput benchmark.
//!
//! Builds a synthetic corpus of records covering every major type, then times
//! decoding it in both dictionary modes. Extra arguments are CBOR files to
//! time as well.

use std::fs;
use std::time::{Duration, Instant};

use cbor_decode::{DecodeOptions, Identity, Value, decode_with};

const RECORDS: usize = 20_000;
const WARMUP_ITERS: u32 = 3;
const DECODE_ITERS: u32 = 10;

// =============================================================================
// CORPUS ENCODING
// =============================================================================

/// Minimal CBOR writer for building the corpus.
#[derive(Default)]
struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    fn head(&mut self, major: u8, n: u64) {
        let major = major << 5;
        if n < 24 {
            self.buf.push(major | n as u8);
        } else if n <= u8::MAX as u64 {
            self.buf.extend_from_slice(&[major | 24, n as u8]);
        } else if n <= u16::MAX as u64 {
            self.buf.push(major | 25);
            self.buf.extend_from_slice(&(n as u16).to_be_bytes());
        } else if n <= u32::MAX as u64 {
            self.buf.push(major | 26);
            self.buf.extend_from_slice(&(n as u32).to_be_bytes());
        } else {
            self.buf.push(major | 27);
            self.buf.extend_from_slice(&n.to_be_bytes());
        }
    }

    fn int(&mut self, n: i64) {
        if n >= 0 {
            self.head(0, n as u64);
        } else {
            self.head(1, (-1 - n) as u64);
        }
    }

    fn text(&mut self, s: &str) {
        self.head(3, s.len() as u64);
        self.buf.extend_from_slice(s.as_bytes());
    }

    fn bytes(&mut self, b: &[u8]) {
        self.head(2, b.len() as u64);
        self.buf.extend_from_slice(b);
    }

    fn f64(&mut self, x: f64) {
        self.buf.push(0xfb);
        self.buf.extend_from_slice(&x.to_be_bytes());
    }

    fn bool(&mut self, b: bool) {
        self.buf.push(if b { 0xf5 } else { 0xf4 });
    }
}

const WORDS: [&str; 8] = [
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "ηθικά", "日本語",
];

fn write_record(w: &mut Writer, i: usize) {
    w.head(5, 8);

    w.text("id");
    w.int(i as i64);

    w.text("name");
    w.text(&format!("{}-{}", WORDS[i % WORDS.len()], i));

    w.text("delta");
    w.int(-((i as i64) * 37));

    w.text("score");
    w.f64(i as f64 / 7.0);

    w.text("active");
    w.bool(i % 3 == 0);

    w.text("tags");
    // Indefinite array of chunked text.
    w.buf.push(0x9f);
    for j in 0..(i % 4) {
        w.buf.push(0x7f);
        w.text(WORDS[(i + j) % WORDS.len()]);
        w.text("-x");
        w.buf.push(0xff);
    }
    w.buf.push(0xff);

    w.text("digest");
    let digest: Vec<u8> = (0..16).map(|k| (i * 31 + k) as u8).collect();
    w.bytes(&digest);

    w.text("samples");
    // Tag 85: little-endian f32 typed array.
    w.head(6, 85);
    let samples: Vec<u8> = (0..8)
        .flat_map(|k| ((i + k) as f32 * 0.25).to_le_bytes())
        .collect();
    w.bytes(&samples);
}

fn build_corpus(records: usize) -> Vec<u8> {
    let mut w = Writer::default();
    w.head(4, records as u64);
    for i in 0..records {
        write_record(&mut w, i);
    }
    w.buf
}

// =============================================================================
// TIMING
// =============================================================================

fn time_decode(data: &[u8], options: DecodeOptions) -> (Duration, Value) {
    for _ in 0..WARMUP_ITERS {
        let _ = decode_with(data, Identity, options).expect("Failed to decode");
    }

    let start = Instant::now();
    let mut decoded = None;
    for _ in 0..DECODE_ITERS {
        decoded = Some(decode_with(data, Identity, options).expect("Failed to decode"));
    }
    let elapsed = start.elapsed() / DECODE_ITERS;
    (elapsed, decoded.expect("at least one iteration"))
}

fn report(label: &str, data: &[u8]) {
    println!("\n=== {} ({} bytes) ===", label, data.len());
    for (mode, options) in [
        ("object", DecodeOptions::default()),
        ("map", DecodeOptions::map()),
    ] {
        let (time, value) = time_decode(data, options);
        println!(
            "  {:<6} {:?} (avg of {} iterations), top-level {}",
            mode,
            time,
            DECODE_ITERS,
            value.kind_name()
        );
        println!(
            "         Throughput: {:.2} MB/s",
            (data.len() as f64 / 1_000_000.0) / time.as_secs_f64()
        );
    }
}

fn main() {
    let build_start = Instant::now();
    let corpus = build_corpus(RECORDS);
    println!(
        "Built corpus of {} records ({} bytes) in {:?}",
        RECORDS,
        corpus.len(),
        build_start.elapsed()
    );

    let value = decode_with(&corpus, Identity, DecodeOptions::default())
        .expect("Failed to decode corpus");
    assert_eq!(value.as_array().map(<[Value]>::len), Some(RECORDS));

    report("synthetic corpus", &corpus);

    for path in std::env::args().skip(1) {
        let data = fs::read(&path).expect("Failed to read file");
        report(&path, &data);
    }
}
