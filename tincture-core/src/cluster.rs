use std::num::NonZeroU32;

use palette::Srgb;

use crate::{PaletteEntry, QuantizedBucket};

/// Candidates closer than this to an accepted color are dropped.
pub const MIN_DISTANCE: f64 = 45.0;

/// Euclidean distance in RGB space.
pub fn color_distance(a: Srgb<u8>, b: Srgb<u8>) -> f64 {
    let dr = f64::from(a.red) - f64::from(b.red);
    let dg = f64::from(a.green) - f64::from(b.green);
    let db = f64::from(a.blue) - f64::from(b.blue);
    (dr * dr + dg * dg + db * db).sqrt()
}

/// `count / total` as a whole percentage, rounded half-up.
pub fn percentage(count: u32, total: NonZeroU32) -> u8 {
    let share = f64::from(count) / f64::from(total.get()) * 100.0;
    share.round().min(100.0) as u8
}

#[derive(Debug, Default)]
pub struct Clustered {
    pub entries: Vec<PaletteEntry>,
    pub skipped: usize,
}

/// Greedy pass over `ranked` (most frequent first): keep a color only if it is
/// at least [`MIN_DISTANCE`] away from everything kept so far.
///
/// O(k * max_colors) for k candidates.
pub fn cluster(ranked: &[QuantizedBucket], max_colors: usize, total: NonZeroU32) -> Clustered {
    let mut clustered = Clustered::default();
    for bucket in ranked {
        if clustered.entries.len() >= max_colors {
            break;
        }

        let too_similar = clustered
            .entries
            .iter()
            .any(|kept| color_distance(kept.rgb, bucket.color) < MIN_DISTANCE);

        if too_similar {
            clustered.skipped += 1;
        } else {
            clustered.entries.push(PaletteEntry::new(bucket.color, bucket.count, total));
        }
    }
    clustered
}

/// Top `max_colors` buckets with no distance filtering.
pub fn fallback(ranked: &[QuantizedBucket], max_colors: usize, total: NonZeroU32) -> Vec<PaletteEntry> {
    ranked
        .iter()
        .take(max_colors)
        .map(|bucket| PaletteEntry::new(bucket.color, bucket.count, total))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(r: u8, g: u8, b: u8, count: u32) -> QuantizedBucket {
        QuantizedBucket {
            color: Srgb::new(r, g, b),
            count,
        }
    }

    fn total(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(color_distance(Srgb::new(0, 0, 0), Srgb::new(3, 4, 0)), 5.0);
        assert_eq!(color_distance(Srgb::new(10, 10, 10), Srgb::new(10, 10, 10)), 0.0);
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(1, total(3)), 33);
        assert_eq!(percentage(2, total(3)), 67);
        assert_eq!(percentage(1, total(200)), 1); // 0.5
        assert_eq!(percentage(1, total(201)), 0);
        assert_eq!(percentage(7, total(7)), 100);
    }

    #[test]
    fn drops_candidates_closer_than_threshold() {
        let ranked = [
            bucket(120, 0, 0, 50),
            bucket(156, 0, 0, 30), // 36 away
            bucket(0, 120, 0, 20),
        ];
        let clustered = cluster(&ranked, 5, total(100));
        let colors: Vec<_> = clustered.entries.iter().map(|e| e.rgb).collect();
        assert_eq!(colors, vec![Srgb::new(120, 0, 0), Srgb::new(0, 120, 0)]);
        assert_eq!(clustered.skipped, 1);
    }

    #[test]
    fn keeps_candidate_exactly_at_threshold() {
        // 27^2 + 36^2 = 45^2
        let ranked = [bucket(0, 0, 0, 2), bucket(0, 27, 36, 1)];
        let clustered = cluster(&ranked, 5, total(3));
        assert_eq!(clustered.entries.len(), 2);
    }

    #[test]
    fn stops_at_max_colors() {
        let ranked = [
            bucket(240, 0, 0, 4),
            bucket(0, 240, 0, 3),
            bucket(0, 0, 240, 2),
            bucket(240, 240, 0, 1),
        ];
        let clustered = cluster(&ranked, 2, total(10));
        assert_eq!(clustered.entries.len(), 2);
        assert_eq!(clustered.entries[0].count, 4);
        assert_eq!(clustered.entries[1].count, 3);
        assert_eq!(clustered.entries[0].percentage, 40);
    }

    #[test]
    fn fallback_ignores_distance() {
        // Rare path: only reachable when clustering keeps nothing.
        let ranked = [bucket(120, 0, 0, 3), bucket(132, 0, 0, 2), bucket(144, 0, 0, 1)];
        let entries = fallback(&ranked, 2, total(6));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].rgb, Srgb::new(120, 0, 0));
        assert_eq!(entries[1].rgb, Srgb::new(132, 0, 0));
        assert_eq!(entries[1].percentage, 33);
    }
}
