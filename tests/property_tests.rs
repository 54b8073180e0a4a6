use dupview::report::{filter_entries, ReportEntry};
use dupview::tui::app::{Action, ReportView};
use proptest::prelude::*;

fn entry_strategy() -> impl Strategy<Value = ReportEntry> {
    ("[0-9a-f]{4,16}", prop::collection::vec("\\PC{0,24}", 0..5))
        .prop_map(|(hash, files)| ReportEntry { hash, files })
}

fn report_strategy() -> impl Strategy<Value = Vec<ReportEntry>> {
    prop::collection::vec(entry_strategy(), 0..20)
}

proptest! {
    #[test]
    fn test_empty_term_keeps_everything(report in report_strategy()) {
        let filtered = filter_entries(&report, "");
        prop_assert_eq!(filtered.len(), report.len());
        for (kept, original) in filtered.iter().zip(&report) {
            prop_assert_eq!(*kept, original);
        }
    }

    #[test]
    fn test_kept_iff_some_path_contains_term(report in report_strategy(), term in "\\PC{0,4}") {
        let filtered = filter_entries(&report, &term);
        let needle = term.to_lowercase();

        let expected: Vec<&ReportEntry> = report
            .iter()
            .filter(|entry| {
                needle.is_empty() || entry.files.iter().any(|f| f.to_lowercase().contains(&needle))
            })
            .collect();

        // Same rows, in report order
        prop_assert_eq!(filtered, expected);
    }

    #[test]
    fn test_ascii_case_does_not_matter(report in report_strategy(), term in "[a-zA-Z./_]{1,6}") {
        let lower = filter_entries(&report, &term.to_ascii_lowercase());
        let upper = filter_entries(&report, &term.to_ascii_uppercase());
        prop_assert_eq!(lower, upper);
    }

    #[test]
    fn test_hash_never_matches(hash in "[a-z]{6,12}", files in prop::collection::vec("[0-9/]{1,12}", 1..4)) {
        let report = vec![ReportEntry { hash: hash.clone(), files }];
        prop_assert!(filter_entries(&report, &hash).is_empty());
    }

    #[test]
    fn test_filtering_twice_is_stable(report in report_strategy(), term in "\\PC{0,4}") {
        let once: Vec<ReportEntry> = filter_entries(&report, &term).into_iter().cloned().collect();
        let twice: Vec<ReportEntry> = filter_entries(&once, &term).into_iter().cloned().collect();
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn test_search_term_is_stored_verbatim(report in report_strategy(), typed in "\\PC{0,12}") {
        let mut view = ReportView::new();
        view.apply_fetch_result(Ok(report.clone()));
        for c in typed.chars() {
            view.handle_action(Action::Input(c));
        }

        prop_assert_eq!(view.search_term(), typed.as_str());
        prop_assert_eq!(view.filtered_view(), filter_entries(&report, &typed));
        prop_assert_eq!(view.report(), report.as_slice());
    }
}
