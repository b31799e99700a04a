use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tinycsv::{
    load_from_path, load_from_reader, LoadContext, LoadError, LoadObserver, LoadOptions, LoadSeverity, LoadStats,
    Orientation, TracingObserver,
};

tinycsv::record! {
    #[derive(Debug, Default)]
    struct Person {
        _no: i64,
        name: String,
        _sex: String,
        age: i64,
        height: f64,
        weight: f64,
        birth: chrono::NaiveDate,
    }
}

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<LoadStats>>,
    failures: Mutex<Vec<LoadSeverity>>,
    alerts: Mutex<Vec<LoadSeverity>>,
    paths: Mutex<Vec<Option<String>>>,
}

impl LoadObserver for RecordingObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        self.successes.lock().unwrap().push(stats);
        self.paths
            .lock()
            .unwrap()
            .push(ctx.path.as_ref().map(|p| p.display().to_string()));
    }

    fn on_failure(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &LoadError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &LoadError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

#[test]
fn observer_receives_failure_and_alert_on_critical_io_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions {
        observer: Some(obs.clone()),
        alert_at_or_above: LoadSeverity::Critical,
        ..Default::default()
    };

    // Missing file -> Io error -> Critical
    let mut people: Vec<Person> = Vec::new();
    let err = load_from_path("tests/fixtures/does_not_exist.csv", &mut people, &opts).unwrap_err();
    assert!(err.is_io());

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![LoadSeverity::Critical]);
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![LoadSeverity::Critical]);
    assert!(obs.successes.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_without_alert_for_non_critical_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions {
        top_margin: 100,
        observer: Some(obs.clone()),
        alert_at_or_above: LoadSeverity::Critical,
        ..Default::default()
    };

    // Margin past the end of the data -> Error severity (not Critical) -> no alert
    let mut people: Vec<Person> = Vec::new();
    let err = load_from_path("tests/fixtures/people.csv", &mut people, &opts).unwrap_err();
    assert!(matches!(err, LoadError::MarginTooLarge { .. }));

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![LoadSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn lower_alert_threshold_alerts_on_data_errors() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions {
        max_rows: 3,
        observer: Some(obs.clone()),
        alert_at_or_above: LoadSeverity::Warning,
        ..Default::default()
    };

    let mut people: Vec<Person> = Vec::new();
    let _ = load_from_reader(Some("1,a,M,1,1,1,2000.01.01\n".repeat(4).as_bytes()), &mut people, &opts)
        .unwrap_err();

    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![LoadSeverity::Error]);
}

#[test]
fn observer_receives_success_stats() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions {
        top_margin: 1,
        observer: Some(obs.clone()),
        ..Default::default()
    };

    let mut people: Vec<Person> = Vec::new();
    load_from_path("tests/fixtures/people.csv", &mut people, &opts).unwrap();

    let successes = obs.successes.lock().unwrap().clone();
    assert_eq!(
        successes,
        vec![LoadStats {
            records: 18,
            rows_read: 19,
            rejected_cells: 0,
        }]
    );
    assert_eq!(
        obs.paths.lock().unwrap().clone(),
        vec![Some("tests/fixtures/people.csv".to_string())]
    );
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CapturedLog {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

fn capture<T>(f: impl FnOnce() -> T) -> (T, CapturedLog) {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, log)
}

#[test]
fn tracing_observer_reports_vertical_success() {
    let opts = LoadOptions {
        orientation: Orientation::Vertical,
        top_margin: 1,
        left_margin: 1,
        observer: Some(Arc::new(TracingObserver)),
        ..Default::default()
    };

    let mut people: Vec<Box<Person>> = Vec::new();
    let (stats, log) = capture(|| load_from_path("tests/fixtures/people_vertical.csv", &mut people, &opts));
    assert_eq!(stats.unwrap().records, 18);

    let lines = log.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("INFO"));
    assert!(lines[0].contains("loaded"));
    assert!(lines[0].contains("orientation=Vertical"));
    assert!(lines[0].contains("source=tests/fixtures/people_vertical.csv"));
    assert!(lines[0].contains("records=18"));
}

#[test]
fn tracing_observer_warns_about_rejected_cells() {
    let opts = LoadOptions {
        observer: Some(Arc::new(TracingObserver)),
        ..Default::default()
    };

    let mut people: Vec<Person> = Vec::new();
    let (stats, log) = capture(|| {
        load_from_reader(Some("1,a,M,old,1,1,2000.01.01\n".as_bytes()), &mut people, &opts)
    });
    assert_eq!(stats.unwrap().rejected_cells, 1);

    let lines = log.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("WARN"));
    assert!(lines[0].contains("source=<reader>"));
    assert!(lines[0].contains("rejected_cells=1"));
}

#[test]
fn tracing_observer_raises_alerts_for_critical_failures() {
    let opts = LoadOptions {
        observer: Some(Arc::new(TracingObserver)),
        ..Default::default()
    };

    let mut people: Vec<Person> = Vec::new();
    let (result, log) = capture(|| load_from_path("tests/fixtures/does_not_exist.csv", &mut people, &opts));
    assert!(result.unwrap_err().is_io());

    let lines = log.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("ERROR") && lines[0].contains("load failed"));
    assert!(lines[1].contains("load alert") && lines[1].contains("alert=true"));
    assert!(lines[1].contains("severity=Critical"));
}

#[test]
fn tracing_observer_data_errors_do_not_alert() {
    let opts = LoadOptions {
        top_margin: 100,
        observer: Some(Arc::new(TracingObserver)),
        ..Default::default()
    };

    let mut people: Vec<Person> = Vec::new();
    let (result, log) = capture(|| load_from_path("tests/fixtures/people.csv", &mut people, &opts));
    assert!(result.is_err());

    let lines = log.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("WARN") && lines[0].contains("severity=Error"));
}

#[test]
fn no_observer_is_fine() {
    let mut people: Vec<Person> = Vec::new();
    let stats = load_from_reader(Some("1,a,M,1,1,1,2000.01.01\n".as_bytes()), &mut people, &LoadOptions::default())
        .unwrap();
    assert_eq!(stats.records, 1);
}
