pub mod health;
pub mod posts;

use actix_web::{web, Scope};

pub use health::health as health_handler;

// "/posts/featured" is registered before "/posts/{id}" so it is not taken as an id.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .service(health_handler)
        .service(posts::list_posts)
        .service(posts::featured_post)
        .service(posts::get_post)
        .service(posts::related_posts)
        .service(posts::categories)
        .service(posts::create_post)
        .service(posts::update_post)
        .service(posts::delete_post)
        .service(posts::restore_post)
        .service(posts::toggle_featured)
}
