//! Business logic services.

pub mod attraction;
pub mod blog;
pub mod group_tour;
pub mod include;
pub mod journey;
pub mod tour_day;
pub mod tour_detail;

pub use attraction::{
    AttractionCard, AttractionDetail, AttractionListResponse, AttractionResponse,
    AttractionService, CreateAttractionInput,
};
pub use blog::{
    BlogCatalogResponse, BlogListParams, BlogPageResponse, BlogPostResponse, BlogService,
    CreateBlogPostInput,
};
pub use group_tour::{
    CreateGroupTourInput, GroupTourCard, GroupTourCardRow, GroupTourListResponse,
    GroupTourMediaResponse, GroupTourResponse, GroupTourService, MediaUpload,
};
pub use include::{CreateIncludeInput, IncludeListResponse, IncludeResponse, IncludeService};
pub use journey::{
    JourneyService, JourneyStage, JourneyStep2Response, JourneyStep3Response,
    JourneyStep4Response, JourneyStep5Response,
};
pub use tour_day::{
    CreateTourDayInput, TourDayListResponse, TourDayResponse, TourDayService,
};
pub use tour_detail::{HighlightEntry, IncludeEntry, ItineraryDay, TourDetail, TourDetailService};

use serde::Serialize;

/// Active/archived record counts of one catalog entity kind.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityCounts {
    /// Number of active records.
    pub active: u64,
    /// Number of archived records.
    pub archived: u64,
}
