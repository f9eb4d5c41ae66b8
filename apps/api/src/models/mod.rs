pub mod learning_resource;
pub mod opportunity;
pub mod skill;
pub mod user;
