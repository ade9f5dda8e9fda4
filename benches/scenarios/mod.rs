mod strum;

pub use strum::bench_strum;
