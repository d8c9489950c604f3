//! Parsing of real `openstack server list --long` output

use fleet_lifecycle::inventory::{filter_by_status, parse_server_table};
use fleet_lifecycle::InstanceStatus;

const SERVER_LIST_LONG: &str = "\
+--------------------------------------+-----------+---------+------------+-------------+----------------------+------------+
| ID                                   | Name      | Status  | Task State | Power State | Networks             | Image Name |
+--------------------------------------+-----------+---------+------------+-------------+----------------------+------------+
| 2f1e6a2c-3d7b-4a8e-9c11-0a5c3f1b7e21 | web-1     | ACTIVE  | None       | Running     | private=10.0.0.11    | ubuntu-22  |
| 8b0c9d47-5e2f-4c6a-b1d3-7f4e2a9c6b58 | db-1      | PAUSED  | None       | Paused      | private=10.0.0.12    | ubuntu-22  |
| c4a7e913-1b6d-4f2e-8a0c-5d9b3e7f1a64 | batch-7   | ERROR   | None       | NOSTATE     |                      | centos-9   |
| e9d2b5f8-7c3a-4e1b-96f0-2a8c4d6e0b13 | web-2     | active  | None       | Running     | private=10.0.0.14    | ubuntu-22  |
+--------------------------------------+-----------+---------+------------+-------------+----------------------+------------+
";

#[test]
fn test_extracts_every_data_row_in_order() {
    let instances = parse_server_table(SERVER_LIST_LONG);

    let names: Vec<&str> = instances.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["web-1", "db-1", "batch-7", "web-2"]);
    assert_eq!(instances[0].id.as_str(), "2f1e6a2c-3d7b-4a8e-9c11-0a5c3f1b7e21");
    assert_eq!(instances[2].status, InstanceStatus::Other("ERROR".to_string()));
}

#[test]
fn test_delimiter_and_header_rows_anywhere_are_skipped() {
    // Same rows with the header and borders repeated between them
    let shuffled: String = SERVER_LIST_LONG
        .lines()
        .flat_map(|line| {
            if line.starts_with("| ") && !line.starts_with("| ID") {
                vec![
                    line.to_string(),
                    "+----+----+".to_string(),
                    "| ID | Name | Status |".to_string(),
                ]
            } else {
                vec![line.to_string()]
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    assert_eq!(parse_server_table(&shuffled), parse_server_table(SERVER_LIST_LONG));
}

#[test]
fn test_trigger_filters_match_case_insensitively() {
    let instances = parse_server_table(SERVER_LIST_LONG);

    let active: Vec<&str> = filter_by_status(&instances, &InstanceStatus::Active)
        .map(|i| i.name.as_str())
        .collect();
    assert_eq!(active, vec!["web-1", "web-2"]);

    let paused: Vec<&str> = filter_by_status(&instances, &InstanceStatus::Paused)
        .map(|i| i.name.as_str())
        .collect();
    assert_eq!(paused, vec!["db-1"]);
}
