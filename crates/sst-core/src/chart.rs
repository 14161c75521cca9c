//! Chart series: parallel `labels[]` / `data[]` arrays.
//!
//! Drawing is left to the consumer. The CLI renders series as JSON or as
//! horizontal text bars.

use serde::{Deserialize, Serialize};

use crate::enums::RiskBand;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

impl ChartSeries {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Build a series from `(label, value)` pairs, keeping their order.
    #[must_use]
    pub fn from_pairs<L, I>(title: impl Into<String>, pairs: I) -> Self
    where
        L: Into<String>,
        I: IntoIterator<Item = (L, f64)>,
    {
        let (labels, data) = pairs
            .into_iter()
            .map(|(label, value)| (label.into(), value))
            .unzip();
        Self {
            title: title.into(),
            labels,
            data,
        }
    }

    /// Count occurrences of each key, labels in first-seen order.
    #[must_use]
    pub fn count_by<T, F>(title: impl Into<String>, items: &[T], key: F) -> Self
    where
        F: Fn(&T) -> String,
    {
        let mut series = Self::new(title);
        for item in items {
            series.bump(key(item), 1.0);
        }
        series
    }

    /// Mean of `value` per key, labels in first-seen order.
    #[must_use]
    pub fn mean_by<T, K, V>(title: impl Into<String>, items: &[T], key: K, value: V) -> Self
    where
        K: Fn(&T) -> String,
        V: Fn(&T) -> f64,
    {
        let mut sums = Self::new(title);
        let mut counts: Vec<f64> = Vec::new();
        for item in items {
            let label = key(item);
            let idx = sums.bump(label, value(item));
            if idx == counts.len() {
                counts.push(0.0);
            }
            counts[idx] += 1.0;
        }
        for (total, n) in sums.data.iter_mut().zip(&counts) {
            *total /= n;
        }
        sums
    }

    /// One bucket per NR-17 band, always all three in ascending order.
    #[must_use]
    pub fn band_profile<I>(title: impl Into<String>, bands: I) -> Self
    where
        I: IntoIterator<Item = RiskBand>,
    {
        let mut counts = [0.0_f64; 3];
        for band in bands {
            counts[band as usize] += 1.0;
        }
        Self::from_pairs(
            title,
            RiskBand::ALL
                .into_iter()
                .zip(counts)
                .map(|(band, n)| (band.label(), n)),
        )
    }

    /// Keep the `n` largest buckets, largest first. Ties keep their order.
    #[must_use]
    pub fn top(mut self, n: usize) -> Self {
        let mut pairs: Vec<(String, f64)> = self.labels.drain(..).zip(self.data.drain(..)).collect();
        pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
        pairs.truncate(n);
        let (labels, data) = pairs.into_iter().unzip();
        self.labels = labels;
        self.data = data;
        self
    }

    /// Sort buckets by label.
    #[must_use]
    pub fn sorted_by_label(mut self) -> Self {
        let mut pairs: Vec<(String, f64)> = self.labels.drain(..).zip(self.data.drain(..)).collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        let (labels, data) = pairs.into_iter().unzip();
        self.labels = labels;
        self.data = data;
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.data.iter().sum()
    }

    fn bump(&mut self, label: String, by: f64) -> usize {
        if let Some(idx) = self.labels.iter().position(|l| *l == label) {
            self.data[idx] += by;
            idx
        } else {
            self.labels.push(label);
            self.data.push(by);
            self.labels.len() - 1
        }
    }
}
