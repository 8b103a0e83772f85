use std::collections::{BTreeMap, btree_map};

/// Occurrence counts of labels within a group.
///
/// Lookups of labels that were never observed return zero, so two groups with
/// different label sets can be compared label by label.
///
/// # Examples
///
/// ```
/// use tutorodds_stats::frequency::FrequencyCounts;
///
/// let counts = FrequencyCounts::tally(["a", "b", "a"]);
/// assert_eq!(counts.get(&"a"), 2);
/// assert_eq!(counts.get(&"z"), 0);
/// assert_eq!(counts.total(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyCounts<K> {
    counts: BTreeMap<K, u64>,
}

impl<K> Default for FrequencyCounts<K> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }
}

impl<K> FrequencyCounts<K>
where
    K: Ord,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts how many times each distinct label occurs.
    #[must_use]
    pub fn tally<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut counts = Self::new();
        for label in labels {
            counts.add(label, 1);
        }
        counts
    }

    /// Adds `count` occurrences of `label`.
    ///
    /// Adding zero still registers the label, which matters for priors.
    pub fn add(&mut self, label: K, count: u64) {
        *self.counts.entry(label).or_insert(0) += count;
    }

    /// Returns the count for `label`, or zero if it was never observed.
    #[must_use]
    pub fn get(&self, label: &K) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn contains(&self, label: &K) -> bool {
        self.counts.contains_key(label)
    }

    /// Total number of occurrences over all labels.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &K> {
        self.counts.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.counts.iter().map(|(label, count)| (label, *count))
    }
}

impl<K> FrequencyCounts<K>
where
    K: Ord + Clone,
{
    /// Sums two count mappings label by label over the union of their labels.
    ///
    /// This is the prior used when comparing two groups: every label observed in
    /// either group receives the combined count of both.
    ///
    /// ```
    /// use tutorodds_stats::frequency::FrequencyCounts;
    ///
    /// let a = FrequencyCounts::tally(["x", "x", "y"]);
    /// let b = FrequencyCounts::tally(["y", "z"]);
    /// let prior = FrequencyCounts::combined(&a, &b);
    /// assert_eq!(prior.get(&"x"), 2);
    /// assert_eq!(prior.get(&"y"), 2);
    /// assert_eq!(prior.get(&"z"), 1);
    /// ```
    #[must_use]
    pub fn combined(a: &Self, b: &Self) -> Self {
        let mut prior = a.clone();
        for (label, count) in b.iter() {
            prior.add(label.clone(), count);
        }
        prior
    }
}

impl<K> FromIterator<(K, u64)> for FrequencyCounts<K>
where
    K: Ord,
{
    fn from_iter<T: IntoIterator<Item = (K, u64)>>(iter: T) -> Self {
        let mut counts = Self::new();
        for (label, count) in iter {
            counts.add(label, count);
        }
        counts
    }
}

impl<K> IntoIterator for FrequencyCounts<K> {
    type Item = (K, u64);
    type IntoIter = btree_map::IntoIter<K, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}
