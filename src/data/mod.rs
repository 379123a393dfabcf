mod demo;
mod records;
mod store;

pub use records::{
    ConnectionRecord, ConnectionType, CoreValue, Goal, Habit, Journal, Knowledge, NewConnection,
    Pillar, Project, Record, Snapshot, Task,
};
pub use store::{GraphSource, JsonWorkspace};
