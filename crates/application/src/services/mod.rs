mod mapping_table;
mod mapping_table_service;
mod policy_decider;

pub use mapping_table::MappingTable;
pub use mapping_table_service::MappingTableService;
pub use policy_decider::{PolicyDecider, PolicyDecision};
