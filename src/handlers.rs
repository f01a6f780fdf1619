mod categories;
mod health;
mod posts;
mod stats;

pub use categories::get_categories_handler;
pub use health::get_health_handler;
pub use posts::{get_post_handler, get_posts_handler, PostsQuery};
pub use stats::get_stats_handler;
