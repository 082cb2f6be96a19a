//! Integration test: full analysis pipeline end-to-end

use std::io::Write;
use tempfile::NamedTempFile;
use titanic_survival::analysis::{self, AnalysisConfig};

/// Write a Titanic-shaped CSV: 60 passengers, sex perfectly correlated with
/// survival, a few missing ages, one missing Embarked.
fn create_titanic_csv() -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(
        file,
        "PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked"
    )
    .unwrap();

    for i in 0..60u32 {
        let survived = i % 2;
        let pclass = 1 + (i % 3);
        let sex = if survived == 1 { "female" } else { "male" };
        let age = if i % 10 == 3 {
            String::new()
        } else {
            format!("{}", 20 + (i % 40))
        };
        let sibsp = i % 3;
        let parch = i % 2;
        let fare = 10.0 + i as f64;
        let embarked = if i == 7 {
            ""
        } else {
            ["S", "C", "Q"][(i % 3) as usize]
        };

        writeln!(
            file,
            "{},{},{},Passenger {},{},{},{},{},T{},{:.2},,{}",
            i + 1,
            survived,
            pclass,
            i + 1,
            sex,
            age,
            sibsp,
            parch,
            i + 1,
            fare,
            embarked
        )
        .unwrap();
    }

    file
}

fn test_config(file: &NamedTempFile) -> AnalysisConfig {
    AnalysisConfig {
        data_path: file.path().to_path_buf(),
        render_plots: false,
        ..AnalysisConfig::default()
    }
}

#[test]
fn test_full_pipeline_runs() {
    let file = create_titanic_csv();
    let outcome = analysis::run(&test_config(&file)).unwrap();
    let report = &outcome.report;

    assert_eq!(report.n_rows, 60);
    assert_eq!(report.n_rows_after_drop, 59, "one row lacks Embarked");
    assert_eq!(report.n_train + report.n_test, 59);

    assert!((0.0..=1.0).contains(&report.accuracy));
    assert!((0.0..=1.0).contains(&report.auc));
    assert!((0.0..=1.0).contains(&report.auc_proba));
}

#[test]
fn test_confusion_matrix_sums_to_test_set() {
    let file = create_titanic_csv();
    let outcome = analysis::run(&test_config(&file)).unwrap();

    let cm = outcome.report.confusion_matrix;
    let total: usize = cm.iter().flatten().sum();
    assert_eq!(total, outcome.report.n_test);
}

#[test]
fn test_pipeline_is_deterministic() {
    let file = create_titanic_csv();
    let config = test_config(&file);

    let a = analysis::run(&config).unwrap();
    let b = analysis::run(&config).unwrap();

    assert_eq!(a.report.accuracy, b.report.accuracy);
    assert_eq!(a.report.confusion_matrix, b.report.confusion_matrix);
    assert_eq!(a.report.auc, b.report.auc);
}

#[test]
fn test_sex_signal_is_learned() {
    // Survival is a deterministic function of Sex in the fixture, so the
    // model should do clearly better than chance.
    let file = create_titanic_csv();
    let outcome = analysis::run(&test_config(&file)).unwrap();
    assert!(
        outcome.report.accuracy > 0.6,
        "accuracy = {}",
        outcome.report.accuracy
    );
}

#[test]
fn test_roc_curve_endpoints() {
    let file = create_titanic_csv();
    let outcome = analysis::run(&test_config(&file)).unwrap();

    let roc = &outcome.roc;
    assert_eq!((roc.fpr[0], roc.tpr[0]), (0.0, 0.0));
    assert_eq!(
        (*roc.fpr.last().unwrap(), *roc.tpr.last().unwrap()),
        (1.0, 1.0)
    );
}

#[test]
fn test_missing_file_is_an_error() {
    let config = AnalysisConfig {
        data_path: "/nonexistent/titanic.csv".into(),
        render_plots: false,
        ..AnalysisConfig::default()
    };
    assert!(analysis::run(&config).is_err());
}

#[test]
fn test_report_serializes_to_json() {
    let file = create_titanic_csv();
    let outcome = analysis::run(&test_config(&file)).unwrap();

    let json = serde_json::to_string(&outcome.report).unwrap();
    assert!(json.contains("\"accuracy\""));
    assert!(json.contains("\"confusion_matrix\""));
}
