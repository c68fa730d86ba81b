pub mod conversation;
pub mod registry;
pub mod role;
