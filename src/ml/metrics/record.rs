//! Per-class metrics records and histories of them

use crate::core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Metric names carried by a [`MetricsRecord`], in drawing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Precision,
    Recall,
    F1,
    Auc,
}

impl Metric {
    /// Key used for the metric in a record ("precision", "recall", "f1", "auc")
    pub fn name(self) -> &'static str {
        match self {
            Metric::Precision => "precision",
            Metric::Recall => "recall",
            Metric::F1 => "f1",
            Metric::Auc => "auc",
        }
    }

    /// Legend label
    pub fn display_name(self) -> &'static str {
        match self {
            Metric::Precision => "Precision",
            Metric::Recall => "Recall",
            Metric::F1 => "F1-Score",
            Metric::Auc => "AUC",
        }
    }

    /// Look a metric up by its record key
    pub fn from_name(name: &str) -> Option<Metric> {
        match name {
            "precision" => Some(Metric::Precision),
            "recall" => Some(Metric::Recall),
            "f1" => Some(Metric::F1),
            "auc" => Some(Metric::Auc),
            _ => None,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-class classification metrics for one evaluation round
///
/// All sequences are indexed by class position and have the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    labels: Vec<usize>,
    precision: Vec<f64>,
    recall: Vec<f64>,
    f1: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    support: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auc: Option<Vec<f64>>,
}

impl MetricsRecord {
    /// Build a record for classes `0..n`
    pub fn new(
        precision: Vec<f64>,
        recall: Vec<f64>,
        f1: Vec<f64>,
        auc: Option<Vec<f64>>,
    ) -> Result<Self> {
        let labels = (0..precision.len()).collect();
        Self::with_labels(labels, precision, recall, f1, auc)
    }

    /// Build a record for an explicit list of class labels
    pub fn with_labels(
        labels: Vec<usize>,
        precision: Vec<f64>,
        recall: Vec<f64>,
        f1: Vec<f64>,
        auc: Option<Vec<f64>>,
    ) -> Result<Self> {
        let record = MetricsRecord {
            labels,
            precision,
            recall,
            f1,
            support: None,
            auc,
        };
        record.validate()?;
        Ok(record)
    }

    /// Attach per-class support counts
    pub fn with_support(mut self, support: Vec<usize>) -> Result<Self> {
        if support.len() != self.labels.len() {
            return Err(Error::InconsistentArrayLengths {
                expected: self.labels.len(),
                found: support.len(),
            });
        }
        self.support = Some(support);
        Ok(self)
    }

    /// Check that every per-class sequence has one value per class and
    /// every score lies in [0, 1]
    pub fn validate(&self) -> Result<()> {
        let expected = self.labels.len();
        if expected == 0 {
            return Err(Error::EmptyData(
                "Metrics record has no classes".to_string(),
            ));
        }

        let lengths = [
            self.precision.len(),
            self.recall.len(),
            self.f1.len(),
            self.auc.as_ref().map_or(expected, Vec::len),
            self.support.as_ref().map_or(expected, Vec::len),
        ];
        if let Some(&found) = lengths.iter().find(|&&len| len != expected) {
            return Err(Error::InconsistentArrayLengths { expected, found });
        }

        for metric in self.metrics() {
            let values = self.values(metric).unwrap_or(&[]);
            if let Some((i, value)) = values
                .iter()
                .enumerate()
                .find(|(_, v)| !(0.0..=1.0).contains(*v))
            {
                return Err(Error::InvalidValue(format!(
                    "{} of class {} is {}, expected a score in [0, 1]",
                    metric.display_name(),
                    self.labels[i],
                    value
                )));
            }
        }
        Ok(())
    }

    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn precision(&self) -> &[f64] {
        &self.precision
    }

    pub fn recall(&self) -> &[f64] {
        &self.recall
    }

    pub fn f1(&self) -> &[f64] {
        &self.f1
    }

    pub fn support(&self) -> Option<&[usize]> {
        self.support.as_deref()
    }

    pub fn auc(&self) -> Option<&[f64]> {
        self.auc.as_deref()
    }

    pub fn has_auc(&self) -> bool {
        self.auc.is_some()
    }

    /// Metrics present in this record, in drawing order
    pub fn metrics(&self) -> Vec<Metric> {
        let mut metrics = vec![Metric::Precision, Metric::Recall, Metric::F1];
        if self.has_auc() {
            metrics.push(Metric::Auc);
        }
        metrics
    }

    /// Per-class values of one metric, `None` when AUC was not computed
    pub fn values(&self, metric: Metric) -> Option<&[f64]> {
        match metric {
            Metric::Precision => Some(&self.precision),
            Metric::Recall => Some(&self.recall),
            Metric::F1 => Some(&self.f1),
            Metric::Auc => self.auc.as_deref(),
        }
    }

    /// Per-class values looked up by record key
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        Metric::from_name(name).and_then(|metric| self.values(metric))
    }
}

impl fmt::Display for MetricsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>10}", "class")?;
        for metric in self.metrics() {
            write!(f, " {:>10}", metric.display_name())?;
        }
        if self.support.is_some() {
            write!(f, " {:>10}", "Support")?;
        }
        writeln!(f)?;

        for (i, label) in self.labels.iter().enumerate() {
            write!(f, "{:>10}", label)?;
            for metric in self.metrics() {
                if let Some(values) = self.values(metric) {
                    write!(f, " {:>10.2}", values[i])?;
                }
            }
            if let Some(support) = &self.support {
                write!(f, " {:>10}", support[i])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Validate a metrics history and return its number of classes
///
/// Every round must carry the same number of classes as the first one, and
/// AUC must be present either in all rounds or in none.
pub fn validate_history(history: &[MetricsRecord]) -> Result<usize> {
    let first = history.first().ok_or_else(|| {
        Error::EmptyData("Metrics history has no rounds".to_string())
    })?;
    let n_classes = first.n_classes();

    for (round, record) in history.iter().enumerate() {
        record.validate()?;
        if record.n_classes() != n_classes {
            return Err(Error::InconsistentArrayLengths {
                expected: n_classes,
                found: record.n_classes(),
            });
        }
        if record.has_auc() != first.has_auc() {
            return Err(Error::InvalidInput(format!(
                "Round {} {} AUC but round 1 {}",
                round + 1,
                if record.has_auc() { "has" } else { "lacks" },
                if first.has_auc() { "has it" } else { "does not" },
            )));
        }
    }

    Ok(n_classes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(auc: Option<Vec<f64>>) -> MetricsRecord {
        MetricsRecord::new(vec![1.0, 0.5], vec![0.9, 0.4], vec![0.95, 0.45], auc).unwrap()
    }

    #[test]
    fn test_lookup_by_name() {
        let rec = record(Some(vec![0.8, 0.7]));
        assert_eq!(rec.get("precision"), Some(&[1.0, 0.5][..]));
        assert_eq!(rec.get("auc"), Some(&[0.8, 0.7][..]));
        assert_eq!(rec.get("accuracy"), None);
        assert_eq!(rec.labels(), &[0, 1]);
    }

    #[test]
    fn test_metric_order() {
        assert_eq!(
            record(None).metrics(),
            vec![Metric::Precision, Metric::Recall, Metric::F1]
        );
        assert_eq!(record(Some(vec![0.5, 0.5])).metrics().last(), Some(&Metric::Auc));
        assert_eq!(record(None).values(Metric::Auc), None);
    }

    #[test]
    fn test_ragged_record_rejected() {
        let result = MetricsRecord::new(vec![1.0, 0.5], vec![0.9], vec![0.95, 0.45], None);
        assert!(matches!(
            result,
            Err(Error::InconsistentArrayLengths {
                expected: 2,
                found: 1
            })
        ));

        let result = MetricsRecord::new(vec![], vec![], vec![], None);
        assert!(matches!(result, Err(Error::EmptyData(_))));

        assert!(record(None).with_support(vec![3]).is_err());
    }

    #[test]
    fn test_out_of_range_scores_rejected() {
        let result = MetricsRecord::new(vec![1.0, 1.2], vec![0.9, 0.4], vec![0.95, 0.45], None);
        assert!(matches!(result, Err(Error::InvalidValue(_))));

        let result = MetricsRecord::new(vec![1.0, 0.5], vec![0.9, 0.4], vec![0.95, f64::NAN], None);
        assert!(matches!(result, Err(Error::InvalidValue(_))));

        let result = MetricsRecord::new(
            vec![1.0, 0.5],
            vec![0.9, 0.4],
            vec![0.95, 0.45],
            Some(vec![-0.1, 0.5]),
        );
        assert!(matches!(result, Err(Error::InvalidValue(_))));
    }

    #[test]
    fn test_history_validation() {
        let history = vec![record(None), record(None), record(None)];
        assert_eq!(validate_history(&history).unwrap(), 2);

        assert!(validate_history(&[]).is_err());

        let mixed = vec![record(None), record(Some(vec![0.5, 0.5]))];
        assert!(matches!(validate_history(&mixed), Err(Error::InvalidInput(_))));

        let three = MetricsRecord::new(vec![0.1; 3], vec![0.1; 3], vec![0.1; 3], None).unwrap();
        let widths = vec![record(None), three];
        assert!(matches!(
            validate_history(&widths),
            Err(Error::InconsistentArrayLengths { .. })
        ));
    }

    #[test]
    fn test_display_table() {
        let rec = record(None).with_support(vec![4, 2]).unwrap();
        let text = rec.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Precision"));
        assert!(lines[0].contains("Support"));
        assert!(!lines[0].contains("AUC"));
        assert!(lines[1].contains("1.00"));
        assert!(lines[2].trim_end().ends_with('2'));
    }
}
