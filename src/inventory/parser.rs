//! Parser for the bordered tables printed by `openstack server list --long`
//!
//! ```text
//! +--------------------------------------+--------+--------+
//! | ID                                   | Name   | Status |
//! +--------------------------------------+--------+--------+
//! | 0b1c...                              | web-1  | ACTIVE |
//! +--------------------------------------+--------+--------+
//! ```
//!
//! Border rows start with `+`, the header row starts with `| ID`. Columns are
//! positional: ID, Name, Status; anything after Status is ignored.

use super::types::{Instance, InstanceStatus};

const MIN_COLUMNS: usize = 3;

/// Split one data row into its trimmed cells, or `None` for border, header
/// and blank lines.
pub fn parse_row(line: &str) -> Option<Vec<&str>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('+') || is_header(line) {
        return None;
    }

    let cells: Vec<&str> = line.split('|').map(str::trim).collect();
    if cells.len() < 2 {
        return None;
    }
    Some(cells[1..cells.len() - 1].to_vec())
}

fn is_header(line: &str) -> bool {
    line.starts_with("| ID") || line.starts_with("|ID")
}

/// Parse the whole table into instances, in the order the platform printed them
pub fn parse_server_table(output: &str) -> Vec<Instance> {
    output
        .lines()
        .filter_map(parse_row)
        .filter(|cells| cells.len() >= MIN_COLUMNS)
        .map(|cells| Instance::new(cells[0], cells[1], InstanceStatus::from(cells[2])))
        .collect()
}

/// Keep the instances whose status equals `trigger` (case-insensitive)
pub fn filter_by_status<'a>(
    instances: &'a [Instance],
    trigger: &'a InstanceStatus,
) -> impl Iterator<Item = &'a Instance> + 'a {
    instances.iter().filter(move |instance| &instance.status == trigger)
}
