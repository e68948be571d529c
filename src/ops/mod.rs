pub mod idea_ops;
pub mod preference_ops;
pub mod rating;
pub mod share;
