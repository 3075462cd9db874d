//! Baseline and random test vectors.

use crate::layout::ColumnLayout;
use rand::Rng;
use tvgen_common::Logic;

/// How output columns are filled in random vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputPolicy {
    /// Every column, outputs included, gets a random `0`/`1`.
    #[default]
    Random,
    /// Output columns are `X`.
    DontCare,
}

/// One row of cell values: input columns followed by output columns.
pub type Vector = Vec<Logic>;

/// All inputs `0`, all outputs `X`.
pub fn baseline(layout: &ColumnLayout) -> Vector {
    let mut row = vec![Logic::Zero; layout.inputs.len()];
    row.resize(layout.width(), Logic::X);
    row
}

/// A vector of fair coin flips.
pub fn random_vector(layout: &ColumnLayout, policy: OutputPolicy, rng: &mut impl Rng) -> Vector {
    let mut row: Vector = (0..layout.inputs.len())
        .map(|_| Logic::from(rng.gen::<bool>()))
        .collect();
    for _ in 0..layout.outputs.len() {
        row.push(match policy {
            OutputPolicy::Random => Logic::from(rng.gen::<bool>()),
            OutputPolicy::DontCare => Logic::X,
        });
    }
    row
}

/// The baseline followed by `count` random vectors, produced lazily.
pub fn generate<'a, R>(
    layout: &'a ColumnLayout,
    count: u32,
    policy: OutputPolicy,
    rng: &'a mut R,
) -> impl Iterator<Item = Vector> + 'a
where
    R: Rng + 'a,
{
    std::iter::once(baseline(layout))
        .chain((0..count).map(move |_| random_vector(layout, policy, &mut *rng)))
}

/// Renders a row as one character per column.
pub fn format_vector(row: &[Logic]) -> String {
    row.iter().map(|cell| cell.to_char()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn layout(inputs: usize, outputs: usize) -> ColumnLayout {
        ColumnLayout {
            inputs: (0..inputs).map(|i| format!("i{i}")).collect(),
            outputs: (0..outputs).map(|i| format!("o{i}")).collect(),
        }
    }

    #[test]
    fn baseline_is_zeros_then_x() {
        assert_eq!(format_vector(&baseline(&layout(8, 5))), "00000000XXXXX");
    }

    #[test]
    fn baseline_without_inputs() {
        assert_eq!(format_vector(&baseline(&layout(0, 2))), "XX");
    }

    #[test]
    fn random_vectors_are_binary_and_full_width() {
        let layout = layout(8, 5);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let row = random_vector(&layout, OutputPolicy::Random, &mut rng);
            assert_eq!(row.len(), layout.width());
            assert!(row.iter().all(|cell| cell.is_driven()));
        }
    }

    #[test]
    fn dont_care_outputs() {
        let layout = layout(3, 2);
        let mut rng = StdRng::seed_from_u64(1);
        let row = random_vector(&layout, OutputPolicy::DontCare, &mut rng);
        assert!(row[..3].iter().all(|cell| cell.is_driven()));
        assert_eq!(&row[3..], &[Logic::X, Logic::X]);
    }

    #[test]
    fn draws_are_unbiased() {
        let layout = layout(1, 0);
        let mut rng = StdRng::seed_from_u64(0x7e57);
        let samples = 10_000;
        let ones = (0..samples)
            .filter(|_| random_vector(&layout, OutputPolicy::Random, &mut rng)[0] == Logic::One)
            .count();
        let ratio = ones as f64 / samples as f64;
        assert!((ratio - 0.5).abs() < 0.03, "ratio of ones was {ratio}");
    }

    #[test]
    fn generate_counts() {
        let layout = layout(2, 1);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(generate(&layout, 0, OutputPolicy::Random, &mut rng).count(), 1);
        let rows: Vec<Vector> = generate(&layout, 4, OutputPolicy::Random, &mut rng).collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], baseline(&layout));
    }

    #[test]
    fn same_seed_same_vectors() {
        let layout = layout(4, 4);
        let a: Vec<Vector> =
            generate(&layout, 10, OutputPolicy::Random, &mut StdRng::seed_from_u64(42)).collect();
        let b: Vec<Vector> =
            generate(&layout, 10, OutputPolicy::Random, &mut StdRng::seed_from_u64(42)).collect();
        assert_eq!(a, b);
    }
}
