//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the persisted tables behind the REST surface.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod activity_log;
pub mod price_history;
pub mod product;
pub mod schedule;
pub mod workspace;
pub mod workspace_member;

// Re-export specific types to avoid conflicts
pub use activity_log::{
    Column as ActivityLogColumn, Entity as ActivityLog, Model as ActivityLogModel,
};
pub use price_history::{
    Column as PriceHistoryColumn, Entity as PriceHistory, Model as PriceHistoryModel,
};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
pub use schedule::{Column as ScheduleColumn, Entity as Schedule, Model as ScheduleModel};
pub use workspace::{Column as WorkspaceColumn, Entity as Workspace, Model as WorkspaceModel};
pub use workspace_member::{
    Column as WorkspaceMemberColumn, Entity as WorkspaceMember, Model as WorkspaceMemberModel,
};
