use chip::{chip8::ChipSet, devices::Keyboard};
use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::mock::StepRng;

/// Counts V0 up, draws the glyph of its low nibble and jumps back to the start.
const PROGRAM: [u8; 16] = [
    0x70, 0x01, // 0x200: V0 += 1
    0x81, 0x00, // 0x202: V1 = V0
    0x62, 0x0F, // 0x204: V2 = 0x0F
    0x81, 0x22, // 0x206: V1 &= V2
    0xF1, 0x29, // 0x208: I = glyph of V1
    0xC3, 0x3F, // 0x20A: V3 = rand & 0x3F
    0xD3, 0x35, // 0x20C: draw at (V3, V3)
    0x12, 0x00, // 0x20E: jump 0x200
];

/// will setup the default configured chip
fn get_default_chip() -> ChipSet<Keyboard> {
    let mut chip = ChipSet::new(Keyboard::new()).with_rng(StepRng::new(7, 13));
    chip.load_program(&PROGRAM)
        .expect("the benchmark program fits into memory");
    chip
}

pub fn cycle_bench(c: &mut Criterion) {
    let mut chip = get_default_chip();
    c.bench_function("cycle_bench", |b| {
        b.iter(|| {
            let _ = chip.cycle();
        });
    });
}

pub fn print_bench(c: &mut Criterion) {
    let mut chip = get_default_chip();
    for _ in 0..PROGRAM.len() {
        let _ = chip.cycle();
    }
    c.bench_function("print_bench", |b| {
        b.iter(|| {
            let _ = format!("{}", chip);
        });
    });
}

criterion_group!(benches, cycle_bench, print_bench);
criterion_main!(benches);
