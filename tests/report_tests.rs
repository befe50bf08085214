use std::io::Write;

use sqlscope::{read_query_file, AnalyzerConfig, AnalyzerError, HeaderStyle, Report, ReportKind};

const QUERY: &str = "WITH paid AS (SELECT o.id, o.customer_id FROM sales.orders o WHERE o.status = 'paid')\n\
                     SELECT c.name, paid.id\n\
                     FROM paid\n\
                     JOIN crm.customers c ON c.id = paid.customer_id";

#[test]
fn test_report_from_file_round_trip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let sql_path = dir.path().join("query.sql");
    std::fs::File::create(&sql_path)
        .and_then(|mut file| file.write_all(QUERY.as_bytes()))
        .expect("write query");

    let query = read_query_file(&sql_path).expect("query expected");
    let kind: ReportKind = "download_columns".parse().expect("valid action");
    let report = Report::build(&query, kind, &AnalyzerConfig::new()).expect("report expected");

    let out_path = dir.path().join(kind.file_name());
    report.write_to_file(&out_path).expect("report written");

    let saved: Report = serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(saved, report);
    assert_eq!(saved.title, "Table Columns");
    assert_eq!(
        saved.rows,
        vec![
            vec!["crm.customers", "id"],
            vec!["crm.customers", "name"],
            vec!["sales.orders", "customer_id"],
            vec!["sales.orders", "id"],
            vec!["sales.orders", "status"],
        ]
    );
}

#[test]
fn test_names_report_skips_cte_sources() {
    let report = Report::build(QUERY, ReportKind::TableNames, &AnalyzerConfig::new()).unwrap();
    assert_eq!(report.rows, vec![vec!["crm.customers"]]);

    let config = AnalyzerConfig::new().with_cte_sources_in_names(true);
    let report = Report::build(QUERY, ReportKind::TableNames, &config).unwrap();
    assert_eq!(report.rows, vec![vec!["crm.customers"], vec!["sales.orders"]]);
}

#[test]
fn test_simple_config_report() {
    let query = "WITH ids AS (SELECT id FROM sales.orders) SELECT ids.id, c.name FROM ids JOIN crm.customers c ON true";
    let config = AnalyzerConfig::simple().with_header_style(HeaderStyle::Short);
    let report = Report::build(query, ReportKind::TableColumns, &config).unwrap();

    assert_eq!(report.header, vec!["Table", "Column"]);
    assert_eq!(report.rows, vec![vec!["crm.customers", "name"]]);

    let report = Report::build(query, ReportKind::TableColumns, &AnalyzerConfig::new()).unwrap();
    assert_eq!(report.rows, vec![vec!["crm.customers", "name"], vec!["sales.orders", "id"]]);
}

#[test]
fn test_invalid_action() {
    let result = "download_pdf".parse::<ReportKind>();
    assert_eq!(result, Err(AnalyzerError::InvalidAction("download_pdf".to_string())));
}

#[test]
fn test_failures_are_distinguishable() {
    let config = AnalyzerConfig::from_json_str(r#"{"max_query_length": 16}"#).unwrap();

    assert_eq!(Report::build("", ReportKind::TableNames, &config), Err(AnalyzerError::EmptyQuery));
    assert!(matches!(
        Report::build(QUERY, ReportKind::TableColumns, &config),
        Err(AnalyzerError::QueryTooLarge { limit: 16, .. })
    ));
    assert!(Report::build("SELECT 1", ReportKind::TableNames, &config).unwrap().is_empty());
}

#[test]
fn test_write_to_missing_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    let report = Report::build("SELECT 1 FROM s.t", ReportKind::TableNames, &AnalyzerConfig::new()).unwrap();

    let result = report.write_to_file(dir.path().join("missing").join("out.json"));
    assert!(matches!(result, Err(AnalyzerError::Io { .. })));
}
