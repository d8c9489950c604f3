// Inventory Module - instance records and the server table parser

pub mod parser;
pub mod types;

pub use parser::{filter_by_status, parse_server_table};
pub use types::{parse_lock_flag, Instance, InstanceId, InstanceStatus, ParseValueError};
