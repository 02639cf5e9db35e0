//! End-to-end tests for ddljson.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write a dump file into a temp directory.
fn create_dump_file(dir: &std::path::Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// A two-batch dump in the shape the converter expects.
const TWO_BATCH_DUMP: &str = "\
insert into [Users]
(id, name, city)
values
(1, 'Ann', 'Oslo')
(2, 'Bob', 'Kyiv')
go;
insert into [Orders]
(id, total)
values
(10, '99.50')
";

mod parser_tests {
    use super::*;
    use ddljson::{parse_ddl, read_parse_file};
    use serde_json::Value;

    #[test]
    fn test_one_record_per_batch_in_order() {
        let records = parse_ddl(TWO_BATCH_DUMP).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].endpoint, "Users");
        assert_eq!(records[1].endpoint, "Orders");
        assert_eq!(records[0].body.len(), 2);
        assert_eq!(records[1].body.len(), 1);
    }

    #[test]
    fn test_row_values_keyed_by_columns() {
        let records = parse_ddl(TWO_BATCH_DUMP).unwrap();

        let row = &records[0].body[1];
        assert_eq!(row["id"], Value::String("2".to_string()));
        assert_eq!(row["name"], Value::String("Bob".to_string()));
        assert_eq!(row["city"], Value::String("Kyiv".to_string()));
    }

    #[test]
    fn test_rows_within_a_record_share_the_column_set() {
        let records = parse_ddl(TWO_BATCH_DUMP).unwrap();

        let keys: Vec<Vec<&String>> = records[0]
            .body
            .iter()
            .map(|row| row.keys().collect())
            .collect();
        assert_eq!(keys[0], keys[1]);
    }

    #[test]
    fn test_quoted_comma_does_not_split_a_value() {
        let input = "insert into [T]\n(name, id)\nvalues\n('A, B', 2)\n";
        let records = parse_ddl(input).unwrap();

        let row = &records[0].body[0];
        assert_eq!(row["name"], Value::String("A, B".to_string()));
        assert_eq!(row["id"], Value::String("2".to_string()));
    }

    #[test]
    fn test_read_parse_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_dump_file(temp_dir.path(), "dump.sql", TWO_BATCH_DUMP);

        let records = read_parse_file(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].body[0]["total"], Value::String("99.50".to_string()));
    }

    #[test]
    fn test_read_parse_file_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.sql");

        let err = read_parse_file(&path).unwrap_err();
        assert!(matches!(err, ddljson::DdlJsonError::ReadError { .. }));
    }

    #[test]
    fn test_reparse_yields_identical_records() {
        let first = parse_ddl(TWO_BATCH_DUMP).unwrap();
        let second = parse_ddl(TWO_BATCH_DUMP).unwrap();
        assert_eq!(first, second);
    }
}

mod error_tests {
    use ddljson::{parse_ddl, DdlJsonError, ParseStage};

    fn parse_stage(input: &str) -> ParseStage {
        match parse_ddl(input).unwrap_err() {
            DdlJsonError::Parse { stage, .. } => stage,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_header_is_a_header_error() {
        assert_eq!(
            parse_stage("update [T] set x = 1\n"),
            ParseStage::Header
        );
    }

    #[test]
    fn test_empty_column_block_is_a_columns_error() {
        assert_eq!(
            parse_stage("insert into [T]\n()\nvalues\n(1)\n"),
            ParseStage::Columns
        );
    }

    #[test]
    fn test_malformed_row_is_an_entities_error() {
        assert_eq!(
            parse_stage("insert into [T]\n(a)\nvalues\nbroken row\n"),
            ParseStage::Entities
        );
    }

    #[test]
    fn test_empty_quoted_value_is_an_entity_error() {
        assert_eq!(
            parse_stage("insert into [T]\n(a, b)\nvalues\n(1, '')\n"),
            ParseStage::Entity
        );
    }

    #[test]
    fn test_error_in_second_batch_aborts_the_run() {
        let input = "insert into [A]\n(x)\nvalues\n(1)\ngo;\ngarbage\n";
        assert_eq!(parse_stage(input), ParseStage::Header);
    }
}

mod output_tests {
    use ddljson::parse_ddl;

    #[test]
    fn test_two_space_indented_array() {
        let input = "insert into [T]\n(a, b)\nvalues\n(1, 'x')\n";
        let records = parse_ddl(input).unwrap();
        let json = serde_json::to_string_pretty(&records).unwrap();

        assert!(json.starts_with("[\n  {"));
        assert!(json.contains("  \"endpoint\": \"T\""));
        assert!(json.contains("\"a\": \"1\""));
        assert!(json.contains("\"b\": \"x\""));
    }

    #[test]
    fn test_column_declaration_order_in_output() {
        let input = "insert into [T]\n(zeta, alpha)\nvalues\n(1, 2)\n";
        let records = parse_ddl(input).unwrap();
        let json = serde_json::to_string_pretty(&records).unwrap();

        assert!(json.find("zeta").unwrap() < json.find("alpha").unwrap());
        assert!(json.find("endpoint").unwrap() < json.find("body").unwrap());
    }

    #[test]
    fn test_values_stay_text() {
        let input = "insert into [T]\n(n)\nvalues\n(42)\n";
        let records = parse_ddl(input).unwrap();
        let json = serde_json::to_string(&records).unwrap();

        // No type coercion: numbers are emitted as strings.
        assert!(json.contains("\"n\":\"42\""));
    }
}

mod cli_tests {
    use clap::Parser;
    use ddljson::Args;

    #[test]
    fn test_positional_paths() {
        let args = Args::try_parse_from(["ddljson", "dump.sql", "out.json"]).unwrap();
        assert_eq!(args.input, std::path::PathBuf::from("dump.sql"));
        assert_eq!(args.output, std::path::PathBuf::from("out.json"));
        assert!(!args.print);
    }

    #[test]
    fn test_print_flag() {
        let args = Args::try_parse_from(["ddljson", "dump.sql", "out.json", "-P"]).unwrap();
        assert!(args.print);

        let args = Args::try_parse_from(["ddljson", "dump.sql", "out.json", "--print"]).unwrap();
        assert!(args.print);
    }

    #[test]
    fn test_output_is_required() {
        assert!(Args::try_parse_from(["ddljson", "dump.sql"]).is_err());
    }
}

mod stats_tests {
    use ddljson::{format_bytes, Statistics};

    #[test]
    fn test_batch_and_row_counts() {
        let mut stats = Statistics::new();
        stats.record_batch(4);
        stats.record_batch(1);

        assert_eq!(stats.batches, 2);
        assert_eq!(stats.rows, 5);
    }

    #[test]
    fn test_format_bytes_boundaries() {
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1024 * 1024), "1.00 MB");
    }
}
