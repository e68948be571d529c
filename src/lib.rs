//! Local startup-idea box: submit ideas, get a canned rating, upvote them
//! once per installation and rank them on a leaderboard.
//!
//! The [`ops::idea_ops::IdeaStore`] owns all reads and writes of the idea
//! collection and the voted-id set; it works over any
//! [`io::kv_store::KeyValueStore`].

pub mod cli;
pub mod io;
pub mod model;
pub mod ops;
