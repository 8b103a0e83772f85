use std::cmp::Reverse;

/// Labels ordered by score, split by sign.
///
/// Rows with a non-negative score come first, followed by rows with a negative
/// score. Both partitions are sorted in descending order, so the first rows
/// favor group A most strongly and the last rows favor group B most strongly.
/// A score of exactly zero belongs to the non-negative partition.
///
/// # Examples
///
/// ```
/// use tutorodds_stats::ranking::RankedScores;
///
/// let ranked = RankedScores::new([("a", -0.5), ("b", 2.0), ("c", 0.0), ("d", -3.0)]);
/// let labels = ranked.iter().map(|(label, _)| *label).collect::<Vec<_>>();
/// assert_eq!(labels, ["b", "c", "a", "d"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RankedScores<K> {
    rows: Vec<(K, f64)>,
    /// Index of the first negative row.
    split: usize,
}

impl<K> RankedScores<K> {
    #[must_use]
    pub fn new<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
    {
        let (mut non_negative, mut negative): (Vec<_>, Vec<_>) =
            scores.into_iter().partition(|(_, score)| *score >= 0.0);
        non_negative.sort_by_key(|(_, score)| Reverse(TotalOrd(*score)));
        negative.sort_by_key(|(_, score)| Reverse(TotalOrd(*score)));

        let split = non_negative.len();
        let mut rows = non_negative;
        rows.extend(negative);
        Self { rows, split }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.rows.iter().map(|(label, score)| (label, *score))
    }

    /// Rows with a non-negative score, strongest first.
    #[must_use]
    pub fn favoring_a(&self) -> &[(K, f64)] {
        &self.rows[..self.split]
    }

    /// Rows with a negative score, weakest first.
    #[must_use]
    pub fn favoring_b(&self) -> &[(K, f64)] {
        &self.rows[self.split..]
    }
}

impl<K> RankedScores<K>
where
    K: PartialEq,
{
    /// Returns the score of `label`, if it was ranked.
    #[must_use]
    pub fn get(&self, label: &K) -> Option<f64> {
        self.rows
            .iter()
            .find(|(row_label, _)| row_label == label)
            .map(|(_, score)| *score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TotalOrd(f64);

impl Eq for TotalOrd {}

impl PartialOrd for TotalOrd {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TotalOrd {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}
