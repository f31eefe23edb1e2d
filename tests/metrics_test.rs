//! End-to-end tests for metric computation

use evalviz::{
    accuracy_score, binarize_labels, calculate_metrics, confusion_matrix, roc_curve,
    validate_history, Error, Metric, MetricsRecord, ZeroRowPolicy,
};

fn three_class_labels() -> (Vec<usize>, Vec<usize>) {
    (vec![0, 1, 2, 0, 1, 2], vec![0, 1, 1, 0, 2, 2])
}

fn three_class_scores() -> Vec<Vec<f64>> {
    vec![
        vec![0.8, 0.1, 0.1],
        vec![0.1, 0.6, 0.3],
        vec![0.1, 0.5, 0.4],
        vec![0.7, 0.2, 0.1],
        vec![0.2, 0.3, 0.5],
        vec![0.1, 0.2, 0.7],
    ]
}

#[test]
fn test_three_class_scenario() {
    let (y_true, y_pred) = three_class_labels();
    let record = calculate_metrics(&y_true, &y_pred, None, None).unwrap();

    assert_eq!(record.n_classes(), 3);
    assert_eq!(record.precision(), &[1.0, 0.5, 0.5]);
    assert_eq!(record.recall(), &[1.0, 0.5, 0.5]);
    assert_eq!(record.f1(), &[1.0, 0.5, 0.5]);
    assert_eq!(record.support(), Some(&[2, 2, 2][..]));
    assert!(!record.has_auc());
    assert_eq!(record.metrics(), vec![Metric::Precision, Metric::Recall, Metric::F1]);

    let accuracy = accuracy_score(&y_true, &y_pred).unwrap();
    assert!((accuracy - 4.0 / 6.0).abs() < 1e-12);
}

#[test]
fn test_scores_add_auc() {
    let (y_true, y_pred) = three_class_labels();
    let scores = three_class_scores();
    let record = calculate_metrics(&y_true, &y_pred, Some(&scores), None).unwrap();

    let auc = record.auc().unwrap();
    assert_eq!(auc.len(), 3);
    // Class 0 is perfectly separated by its score column
    assert!((auc[0] - 1.0).abs() < 1e-12);
    for value in auc {
        assert!((0.0..=1.0).contains(value));
    }
    assert_eq!(record.get("auc"), Some(auc));
}

#[test]
fn test_metric_values_are_bounded() {
    let y_true = vec![0, 0, 1, 3, 3, 3, 2, 1];
    let y_pred = vec![0, 1, 1, 3, 0, 3, 3, 2];
    let record = calculate_metrics(&y_true, &y_pred, None, None).unwrap();

    for metric in record.metrics() {
        for value in record.values(metric).unwrap() {
            assert!((0.0..=1.0).contains(value), "{} out of range", metric);
        }
    }
}

#[test]
fn test_binarization_compares_against_fixed_class() {
    let y_true = vec![2, 0, 1, 2, 2, 1];

    for class in 0..3 {
        let binary = binarize_labels(&y_true, class);
        for (sample, &label) in y_true.iter().enumerate() {
            assert_eq!(binary[sample], label == class);
        }
    }

    // Comparing each label to its own position would flag samples 1 and 3 here
    assert_eq!(
        binarize_labels(&y_true, 2),
        vec![true, false, false, true, true, false]
    );
}

#[test]
fn test_absent_class_gets_zero_auc() {
    // Class 2 never occurs in the ground truth
    let y_true = vec![0, 1, 0, 1];
    let y_pred = vec![0, 1, 1, 1];
    let scores = vec![
        vec![0.7, 0.2, 0.1],
        vec![0.2, 0.7, 0.1],
        vec![0.4, 0.5, 0.1],
        vec![0.1, 0.8, 0.1],
    ];

    let record = calculate_metrics(&y_true, &y_pred, Some(&scores), None).unwrap();
    assert_eq!(record.n_classes(), 3);
    assert_eq!(record.auc().unwrap()[2], 0.0);
    assert_eq!(record.precision()[2], 0.0);
    assert_eq!(record.recall()[2], 0.0);
    assert_eq!(record.f1()[2], 0.0);
}

#[test]
fn test_roc_curve_of_degenerate_class_is_error() {
    let result = roc_curve(&[true, true, true], &[0.1, 0.2, 0.3]);
    assert!(matches!(result, Err(Error::InsufficientData(_))));
}

#[test]
fn test_input_validation() {
    let scores = three_class_scores();

    // Label vectors of different lengths
    assert!(calculate_metrics(&[0, 1, 2], &[0, 1], None, None).is_err());

    // Score matrix rows not aligned with labels
    assert!(calculate_metrics(&[0, 1], &[0, 1], Some(&scores), None).is_err());

    // Label outside the score matrix columns
    let (_, y_pred) = three_class_labels();
    let y_true = vec![0, 1, 5, 0, 1, 2];
    assert!(calculate_metrics(&y_true, &y_pred, Some(&scores), None).is_err());

    // Empty input
    assert!(matches!(
        calculate_metrics(&[], &[], None, None),
        Err(Error::EmptyData(_))
    ));
}

#[test]
fn test_confusion_matrix_rows() {
    let (y_true, y_pred) = three_class_labels();
    let matrix = confusion_matrix(&y_true, &y_pred, None).unwrap();

    assert_eq!(matrix.counts(), &[vec![2, 0, 0], vec![0, 1, 1], vec![0, 1, 1]]);
    assert_eq!(matrix.total(), 6);

    for row in matrix.normalized(ZeroRowPolicy::Nan) {
        let sum: f64 = row.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }
}

#[test]
fn test_confusion_matrix_empty_row_policy() {
    let matrix = confusion_matrix(&[0, 0, 1], &[0, 2, 1], Some(&[0, 1, 2])).unwrap();

    let nan_rows = matrix.normalized(ZeroRowPolicy::Nan);
    assert!(nan_rows[2].iter().all(|v| v.is_nan()));

    let zero_rows = matrix.normalized(ZeroRowPolicy::Zero);
    assert_eq!(zero_rows[2], vec![0.0, 0.0, 0.0]);
}

#[test]
fn test_history_validation() {
    let round = |p: f64| {
        MetricsRecord::new(vec![p, p], vec![p, p], vec![p, p], None).unwrap()
    };
    let history: Vec<MetricsRecord> = (1..=5).map(|i| round(i as f64 / 10.0)).collect();
    assert_eq!(validate_history(&history).unwrap(), 2);

    let mut mixed = history.clone();
    mixed.push(MetricsRecord::new(vec![0.5], vec![0.5], vec![0.5], None).unwrap());
    assert!(validate_history(&mixed).is_err());

    assert!(validate_history(&[]).is_err());
}
