pub mod category;
pub mod defaults;
pub mod featured;
pub mod ids;
pub mod reconcile;

pub use category::{list_categories, matches_category, normalize_category};
pub use defaults::load_default_posts;
pub use featured::toggle_featured;
pub use ids::{generate_id, generate_id_at};
pub use reconcile::reconcile;
