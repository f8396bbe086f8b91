pub mod activities;
pub mod entries;
pub mod tags;
pub mod tracking;
mod registry;
mod render;

pub use activities::GetActivitiesTool;
pub use entries::{
    CreateTimeEntryTool, DeleteTimeEntryTool, GetTimeEntriesTool, UpdateTimeEntryTool,
};
pub use registry::{json_schema_object, json_schema_string, Tool, ToolRegistry};
pub use tags::{CreateTagTool, GetTagsTool};
pub use tracking::{
    EditCurrentTrackingTool, GetCurrentTrackingTool, StartTrackingTool, StopTrackingTool,
};
