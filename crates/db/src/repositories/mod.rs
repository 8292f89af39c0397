//! Database repositories.

mod attraction;
mod blog_post;
mod group_tour;
mod group_tour_media;
mod include;
mod tour_day;
mod user;

pub use attraction::AttractionRepository;
pub use blog_post::{BlogListFilter, BlogPage, BlogPostRepository, BlogSortKey, SortOrder};
pub use group_tour::GroupTourRepository;
pub use group_tour_media::GroupTourMediaRepository;
pub use include::IncludeRepository;
pub use tour_day::TourDayRepository;
pub use user::UserRepository;
