pub mod post;

pub use post::{Post, PostInput, PostUpdate};
