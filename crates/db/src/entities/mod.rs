//! Database entities.

pub mod attraction;
pub mod blog_post;
pub mod group_tour;
pub mod group_tour_day;
pub mod group_tour_media;
pub mod include;
pub mod tour_day;
pub mod tour_day_attraction;
pub mod tour_day_include;
pub mod user;

pub use attraction::Entity as Attraction;
pub use blog_post::Entity as BlogPost;
pub use group_tour::Entity as GroupTour;
pub use group_tour_day::Entity as GroupTourDay;
pub use group_tour_media::Entity as GroupTourMedia;
pub use include::Entity as Include;
pub use tour_day::Entity as TourDay;
pub use tour_day_attraction::Entity as TourDayAttraction;
pub use tour_day_include::Entity as TourDayInclude;
pub use user::Entity as User;
