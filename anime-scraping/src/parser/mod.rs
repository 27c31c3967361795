pub mod field;
pub mod page;
pub mod review;
pub mod sidebar;
