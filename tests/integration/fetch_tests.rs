use std::sync::Arc;
use std::time::Duration;

use dupview::report::{FetchError, HttpReportSource, ReportEntry, ReportSource};
use dupview::tui::app::{FetchStatus, ReportView};

use super::http_stub::{refused_addr, serve_once};

const REPORT_JSON: &str = r#"[
    {"hash": "abc123", "files": ["/a/x.txt", "/b/x.txt"]},
    {"hash": "def456", "files": ["/c/y.png", "/d/y.png"]}
]"#;

fn wait_loaded(view: &mut ReportView) {
    for _ in 0..100 {
        if view.wait_fetch(Duration::from_millis(50)) {
            return;
        }
    }
    panic!("report fetch did not resolve");
}

#[test]
fn test_http_source_reads_report() {
    let (url, server) = serve_once(200, REPORT_JSON, Duration::ZERO);

    let report = HttpReportSource::new(url).fetch().unwrap();
    assert_eq!(
        report,
        vec![
            ReportEntry::new("abc123", vec!["/a/x.txt", "/b/x.txt"]),
            ReportEntry::new("def456", vec!["/c/y.png", "/d/y.png"]),
        ]
    );

    let request = server.join().unwrap();
    assert!(request.starts_with("GET /report HTTP/1.1"));
}

#[test]
fn test_http_source_empty_report() {
    let (url, server) = serve_once(200, "[]", Duration::ZERO);
    assert!(HttpReportSource::new(url).fetch().unwrap().is_empty());
    server.join().unwrap();
}

#[test]
fn test_http_source_error_status() {
    let (url, server) = serve_once(500, "internal error", Duration::ZERO);

    let err = HttpReportSource::new(url).fetch().unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 500 }));
    server.join().unwrap();
}

#[test]
fn test_http_source_malformed_payload() {
    let (url, server) = serve_once(200, r#"{"hash": "abc"}"#, Duration::ZERO);

    let err = HttpReportSource::new(url).fetch().unwrap_err();
    assert!(matches!(err, FetchError::Malformed(_)));
    server.join().unwrap();
}

#[test]
fn test_http_source_connection_refused() {
    let url = format!("http://{}/report", refused_addr());

    let err = HttpReportSource::new(url).fetch().unwrap_err();
    assert!(matches!(err, FetchError::Network(_)));
}

#[test]
fn test_http_source_timeout() {
    let (url, _server) = serve_once(200, REPORT_JSON, Duration::from_millis(800));

    let err = HttpReportSource::new(url)
        .with_timeout(Some(Duration::from_millis(100)))
        .fetch()
        .unwrap_err();
    assert!(matches!(err, FetchError::Network(_)));
}

#[test]
fn test_view_mount_loads_report() {
    let (url, server) = serve_once(200, REPORT_JSON, Duration::ZERO);
    let mut view = ReportView::new();

    assert!(view.mount(Arc::new(HttpReportSource::new(url))));
    wait_loaded(&mut view);

    assert!(!view.is_loading());
    assert_eq!(view.fetch_status(), &FetchStatus::Loaded);
    assert_eq!(view.report().len(), 2);
    server.join().unwrap();
}

#[test]
fn test_view_second_mount_does_not_fetch_again() {
    let (url, server) = serve_once(200, REPORT_JSON, Duration::ZERO);
    let source: Arc<dyn ReportSource> = Arc::new(HttpReportSource::new(url));
    let mut view = ReportView::new();

    assert!(view.mount(Arc::clone(&source)));
    assert!(!view.mount(source));
    wait_loaded(&mut view);
    assert_eq!(view.report().len(), 2);
    server.join().unwrap();
}

#[test]
fn test_view_degrades_to_empty_on_error_status() {
    let (url, server) = serve_once(404, "not found", Duration::ZERO);
    let mut view = ReportView::new();

    view.mount(Arc::new(HttpReportSource::new(url)));
    wait_loaded(&mut view);

    assert!(!view.is_loading());
    assert!(view.fetch_failed());
    assert!(view.report().is_empty());
    assert!(view.filtered_view().is_empty());
    server.join().unwrap();
}

#[test]
fn test_view_discards_result_after_teardown() {
    let (url, server) = serve_once(200, REPORT_JSON, Duration::from_millis(200));
    let mut view = ReportView::new();

    view.mount(Arc::new(HttpReportSource::new(url)));
    view.teardown();
    assert!(!view.liveness().is_alive());

    server.join().unwrap();
    std::thread::sleep(Duration::from_millis(100));

    assert!(!view.poll_fetch());
    assert!(view.is_loading());
    assert!(view.report().is_empty());
}
