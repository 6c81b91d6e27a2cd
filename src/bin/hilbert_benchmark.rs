use std::time::Instant;

use peano_keys::hilbert::warm_up;
use peano_keys::{CurveConfig, HilbertCurve};
use rand::Rng;

/// Time point-wise, batch and parallel key encoding/decoding.
///
/// Usage: hilbert_benchmark [config.toml]
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => CurveConfig::load(path)?,
        None => CurveConfig::default(),
    };
    let curve = HilbertCurve::from_config(&config)?;

    const POINTS: usize = 1_000_000;
    const ITERATIONS: u32 = 10;

    println!("Peano-Hilbert Key Benchmarks");
    println!("============================\n");
    println!(
        "bits = {}, grid = {}^3, points = {}, parallel threshold = {}\n",
        curve.bits(),
        curve.side(),
        POINTS,
        curve.parallel_threshold()
    );

    let mut rng = rand::thread_rng();
    let side = curve.side();
    let xs: Vec<u32> = (0..POINTS).map(|_| rng.gen_range(0..side)).collect();
    let ys: Vec<u32> = (0..POINTS).map(|_| rng.gen_range(0..side)).collect();
    let zs: Vec<u32> = (0..POINTS).map(|_| rng.gen_range(0..side)).collect();

    warm_up();

    println!("1. Encoding");
    println!("-----------");

    let start = Instant::now();
    for _ in 0..ITERATIONS {
        let mut sum = 0u64;
        for i in 0..POINTS {
            sum = sum.wrapping_add(curve.encode(xs[i], ys[i], zs[i])?);
        }
        std::hint::black_box(sum);
    }
    let pointwise_time = start.elapsed() / ITERATIONS;

    let start = Instant::now();
    for _ in 0..ITERATIONS {
        std::hint::black_box(curve.encode_batch(&xs, &ys, &zs)?);
    }
    let batch_time = start.elapsed() / ITERATIONS;

    let start = Instant::now();
    for _ in 0..ITERATIONS {
        std::hint::black_box(peano_keys::par_encode_batch(&xs, &ys, &zs, curve.bits())?);
    }
    let par_time = start.elapsed() / ITERATIONS;

    println!("Point-wise: {:?}", pointwise_time);
    println!(
        "Batch:      {:?} ({:.2}x)",
        batch_time,
        pointwise_time.as_secs_f64() / batch_time.as_secs_f64()
    );
    println!(
        "Parallel:   {:?} ({:.2}x)",
        par_time,
        pointwise_time.as_secs_f64() / par_time.as_secs_f64()
    );

    println!("\n2. Decoding");
    println!("-----------");

    let keys = curve.encode_batch_auto(&xs, &ys, &zs)?;

    let start = Instant::now();
    for _ in 0..ITERATIONS {
        std::hint::black_box(curve.decode_batch(&keys)?);
    }
    let decode_time = start.elapsed() / ITERATIONS;

    let start = Instant::now();
    for _ in 0..ITERATIONS {
        std::hint::black_box(peano_keys::par_decode_batch(&keys, curve.bits())?);
    }
    let par_decode_time = start.elapsed() / ITERATIONS;

    println!("Batch:      {:?}", decode_time);
    println!(
        "Parallel:   {:?} ({:.2}x)",
        par_decode_time,
        decode_time.as_secs_f64() / par_decode_time.as_secs_f64()
    );

    println!("\n3. Round trip check");
    println!("-------------------");
    let (dx, dy, dz) = curve.decode_batch_auto(&keys)?;
    let mismatches = (0..POINTS)
        .filter(|&i| (dx[i], dy[i], dz[i]) != (xs[i], ys[i], zs[i]))
        .count();
    println!("Mismatches: {}", mismatches);
    if mismatches > 0 {
        anyhow::bail!("{} points did not survive the round trip", mismatches);
    }

    Ok(())
}
