//! Public tour detail aggregation.
//!
//! Builds the display payload for one group tour: gallery, itinerary,
//! highlights, includes and headline counts.

use std::collections::HashSet;

use potours_common::AppResult;
use potours_db::entities::{
    attraction, group_tour, group_tour_day, group_tour_media, group_tour_media::MediaKind,
    include, tour_day,
};
use potours_db::repositories::{GroupTourMediaRepository, GroupTourRepository, TourDayRepository};
use rust_decimal::Decimal;
use serde::Serialize;

/// Fallback image used when a tour has no image attachments.
pub(crate) const GALLERY_PLACEHOLDER: &str = "working/test1/I965-5797-449-1298-368-149.png";

/// Media subfolder include icons are served from, by filename only.
const ICON_DIR: &str = "working/icons/";

/// Upper bound of the highlight list.
const HIGHLIGHT_CAP: usize = 6;

/// Fixed rating shown on tour pages.
const RATING: &str = "4.8/5";

/// One attraction entry, shared by highlights and itinerary days.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightEntry {
    pub title: String,
    pub city: String,
    pub duration_hours: Decimal,
    pub photo_url: String,
}

/// One itinerary day of a tour.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    pub day_number: i32,
    pub title: String,
    pub description: String,
    pub city: String,
    pub duration_hours: Decimal,
    pub photo_url: String,
    pub attractions: Vec<HighlightEntry>,
}

/// One include line of a tour, icon resolved by filename.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludeEntry {
    pub description: String,
    pub icon_path: String,
    pub icon_url: String,
}

/// Display payload of one group tour.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourDetail {
    pub id: String,
    pub title: String,
    pub short_description: String,
    pub description: String,
    pub gallery: Vec<String>,
    pub cover_url: String,
    pub tour_days_count: usize,
    pub cities_count: usize,
    pub group_size: i32,
    pub rating: String,
    pub itinerary: Vec<ItineraryDay>,
    pub highlights: Vec<HighlightEntry>,
    pub includes: Vec<IncludeEntry>,
}

/// Loaded rows of one linked day.
struct DayRows {
    link: group_tour_day::Model,
    day: tour_day::Model,
    attractions: Vec<attraction::Model>,
    includes: Vec<include::Model>,
}

/// Resolve the icon URL of an include: the stored path's directory is
/// discarded and only the filename is looked up under the icon folder.
fn include_icon_url(icon_path: &str, media_url: &str) -> String {
    if icon_path.is_empty() {
        return String::new();
    }
    let file_name = icon_path.rsplit('/').next().unwrap_or(icon_path);
    format!("{media_url}{ICON_DIR}{file_name}")
}

/// Assemble the display payload from loaded rows.
fn assemble(
    tour: &group_tour::Model,
    media: &[group_tour_media::Model],
    days: &[DayRows],
    media_url: &str,
) -> TourDetail {
    let mut gallery: Vec<String> = media
        .iter()
        .filter(|m| m.media_kind == MediaKind::Image)
        .map(|m| m.url.clone())
        .collect();
    if gallery.is_empty() {
        gallery = vec![format!("{media_url}{GALLERY_PLACEHOLDER}")];
    }
    let cover_url = gallery[0].clone();

    let mut itinerary = Vec::with_capacity(days.len());
    let mut cities = HashSet::new();
    let mut highlights: Vec<HighlightEntry> = Vec::new();
    let mut seen_highlights = HashSet::new();
    let mut tour_includes: Vec<IncludeEntry> = Vec::new();
    let mut seen_includes = HashSet::new();

    for rows in days {
        let day = &rows.day;
        if !day.city.is_empty() {
            cities.insert(day.city.trim().to_lowercase());
        }

        for inc in &rows.includes {
            if seen_includes.insert(inc.id.clone()) {
                tour_includes.push(IncludeEntry {
                    description: inc.description.clone(),
                    icon_path: inc.icon_path.clone(),
                    icon_url: include_icon_url(&inc.icon_path, media_url),
                });
            }
        }

        let mut day_attractions = Vec::with_capacity(rows.attractions.len());
        for a in &rows.attractions {
            let photo_url = a
                .photo_url
                .clone()
                .or_else(|| day.photo_url.clone())
                .unwrap_or_else(|| cover_url.clone());
            let entry = HighlightEntry {
                title: a.title.clone(),
                city: a.city.clone(),
                duration_hours: a.duration_hours,
                photo_url,
            };
            day_attractions.push(entry.clone());

            if !seen_highlights.contains(&a.id) && highlights.len() < HIGHLIGHT_CAP {
                highlights.push(entry);
                seen_highlights.insert(a.id.clone());
            }
        }

        itinerary.push(ItineraryDay {
            day_number: rows.link.day_number,
            title: day.title.clone(),
            description: day.description.clone(),
            city: day.city.clone(),
            duration_hours: day.duration_hours,
            photo_url: day.photo_url.clone().unwrap_or_else(|| cover_url.clone()),
            attractions: day_attractions,
        });
    }

    TourDetail {
        id: tour.id.clone(),
        title: tour.title.clone(),
        short_description: tour.short_description.clone(),
        description: tour.description.clone(),
        gallery,
        cover_url,
        tour_days_count: itinerary.len(),
        cities_count: cities.len(),
        group_size: tour.group_size,
        rating: RATING.to_string(),
        itinerary,
        highlights,
        includes: tour_includes,
    }
}

/// Service building the public display payload of a group tour.
#[derive(Clone)]
pub struct TourDetailService {
    tour_repo: GroupTourRepository,
    day_repo: TourDayRepository,
    media_repo: GroupTourMediaRepository,
    media_url: String,
}

impl TourDetailService {
    /// Create a new tour detail service.
    #[must_use]
    pub fn new(
        tour_repo: GroupTourRepository,
        day_repo: TourDayRepository,
        media_repo: GroupTourMediaRepository,
        media_url: String,
    ) -> Self {
        Self {
            tour_repo,
            day_repo,
            media_repo,
            media_url,
        }
    }

    /// Build the display payload of an active group tour.
    pub async fn get(&self, id: &str) -> AppResult<TourDetail> {
        let tour = self.tour_repo.get_active_by_id(id).await?;
        let media = self.media_repo.find_by_tour(id).await?;
        let links = self.tour_repo.find_days(id).await?;

        let mut days = Vec::with_capacity(links.len());
        for (link, day) in links {
            let attractions = self.day_repo.find_attractions(&day.id).await?;
            let includes = self.day_repo.find_includes(&day.id).await?;
            days.push(DayRows {
                link,
                day,
                attractions,
                includes,
            });
        }

        Ok(assemble(&tour, &media, &days, &self.media_url))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    const MEDIA_URL: &str = "/media/";

    fn test_tour(id: &str) -> group_tour::Model {
        group_tour::Model {
            id: id.to_string(),
            title: "Baltic Coast Tour".to_string(),
            short_description: "Sea, sand and old towns".to_string(),
            description: "Full description".to_string(),
            group_size: 16,
            created_by: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
            is_archived: false,
            archived_at: None,
        }
    }

    fn test_day(id: &str, city: &str, photo_url: Option<&str>) -> tour_day::Model {
        tour_day::Model {
            id: id.to_string(),
            title: format!("Day in {city}"),
            description: "A full day".to_string(),
            city: city.to_string(),
            address: "Somewhere 1".to_string(),
            duration_hours: Decimal::new(80, 1),
            photo_url: photo_url.map(ToOwned::to_owned),
            created_by: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
            is_archived: false,
            archived_at: None,
        }
    }

    fn test_attraction(id: &str, title: &str, photo_url: Option<&str>) -> attraction::Model {
        attraction::Model {
            id: id.to_string(),
            title: title.to_string(),
            description: "desc".to_string(),
            city: "Gdansk".to_string(),
            address: "Main Square 1".to_string(),
            duration_hours: Decimal::new(15, 1),
            photo_url: photo_url.map(ToOwned::to_owned),
            created_by: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
            is_archived: false,
            archived_at: None,
        }
    }

    fn test_include(id: &str, icon_path: &str) -> include::Model {
        include::Model {
            id: id.to_string(),
            description: format!("Include {id}"),
            icon_path: icon_path.to_string(),
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
            is_archived: false,
            archived_at: None,
        }
    }

    fn test_link(day_number: i32) -> group_tour_day::Model {
        group_tour_day::Model {
            id: format!("l{day_number}"),
            group_tour_id: "t1".to_string(),
            tour_day_id: format!("d{day_number}"),
            day_number,
        }
    }

    fn test_image(id: &str) -> group_tour_media::Model {
        group_tour_media::Model {
            id: id.to_string(),
            group_tour_id: "t1".to_string(),
            file_path: format!("catalog/group_tours/media/{id}.png"),
            url: format!("/media/catalog/group_tours/media/{id}.png"),
            media_kind: MediaKind::Image,
            created_at: Utc::now().into(),
        }
    }

    fn day_rows(
        day_number: i32,
        day: tour_day::Model,
        attractions: Vec<attraction::Model>,
        includes: Vec<include::Model>,
    ) -> DayRows {
        DayRows {
            link: test_link(day_number),
            day,
            attractions,
            includes,
        }
    }

    #[test]
    fn test_empty_tour_yields_placeholder_and_zero_counts() {
        let tour = test_tour("t1");

        let detail = assemble(&tour, &[], &[], MEDIA_URL);

        assert_eq!(
            detail.gallery,
            vec!["/media/working/test1/I965-5797-449-1298-368-149.png".to_string()]
        );
        assert_eq!(detail.cover_url, detail.gallery[0]);
        assert_eq!(detail.cities_count, 0);
        assert_eq!(detail.tour_days_count, 0);
        assert!(detail.itinerary.is_empty());
        assert!(detail.highlights.is_empty());
        assert!(detail.includes.is_empty());
        assert_eq!(detail.rating, "4.8/5");
        assert_eq!(detail.group_size, 16);
    }

    #[test]
    fn test_gallery_keeps_only_images_in_order() {
        let tour = test_tour("t1");
        let mut video = test_image("m1");
        video.media_kind = MediaKind::Video;
        let media = vec![video, test_image("m2"), test_image("m3")];

        let detail = assemble(&tour, &media, &[], MEDIA_URL);

        assert_eq!(
            detail.gallery,
            vec![
                "/media/catalog/group_tours/media/m2.png".to_string(),
                "/media/catalog/group_tours/media/m3.png".to_string(),
            ]
        );
        assert_eq!(detail.cover_url, "/media/catalog/group_tours/media/m2.png");
    }

    #[test]
    fn test_city_count_normalizes_case_and_whitespace() {
        let tour = test_tour("t1");
        let days = vec![
            day_rows(1, test_day("d1", "Paris", None), vec![], vec![]),
            day_rows(2, test_day("d2", "paris ", None), vec![], vec![]),
        ];

        let detail = assemble(&tour, &[], &days, MEDIA_URL);

        assert_eq!(detail.cities_count, 1);
        assert_eq!(detail.tour_days_count, 2);
    }

    #[test]
    fn test_photo_fallback_chain() {
        let tour = test_tour("t1");
        let media = vec![test_image("m1")];
        let cover = "/media/catalog/group_tours/media/m1.png";

        let days = vec![day_rows(
            1,
            test_day("d1", "Gdansk", Some("/media/day.png")),
            vec![
                test_attraction("a1", "Crane", Some("/media/a1.png")),
                test_attraction("a2", "Old Town", None),
            ],
            vec![],
        ), day_rows(
            2,
            test_day("d2", "Sopot", None),
            vec![test_attraction("a3", "Pier", None)],
            vec![],
        )];

        let detail = assemble(&tour, &media, &days, MEDIA_URL);

        // own photo wins, then the day photo, then the gallery cover
        assert_eq!(detail.itinerary[0].attractions[0].photo_url, "/media/a1.png");
        assert_eq!(detail.itinerary[0].attractions[1].photo_url, "/media/day.png");
        assert_eq!(detail.itinerary[1].attractions[0].photo_url, cover);

        // same chain for the day entry itself, minus the attraction photo
        assert_eq!(detail.itinerary[0].photo_url, "/media/day.png");
        assert_eq!(detail.itinerary[1].photo_url, cover);
    }

    #[test]
    fn test_highlights_cap_at_six() {
        let tour = test_tour("t1");
        let attractions: Vec<attraction::Model> = (0..8)
            .map(|i| test_attraction(&format!("a{i}"), &format!("Attraction {i}"), None))
            .collect();
        let days = vec![day_rows(1, test_day("d1", "Gdansk", None), attractions, vec![])];

        let detail = assemble(&tour, &[], &days, MEDIA_URL);

        assert_eq!(detail.highlights.len(), 6);
        assert_eq!(detail.itinerary[0].attractions.len(), 8);
    }

    #[test]
    fn test_highlights_deduplicate_across_days() {
        let tour = test_tour("t1");
        let days = vec![
            day_rows(
                1,
                test_day("d1", "Gdansk", None),
                vec![test_attraction("a1", "Crane", None)],
                vec![],
            ),
            day_rows(
                2,
                test_day("d2", "Gdansk", None),
                vec![
                    test_attraction("a1", "Crane", None),
                    test_attraction("a2", "Old Town", None),
                ],
                vec![],
            ),
        ];

        let detail = assemble(&tour, &[], &days, MEDIA_URL);

        assert_eq!(detail.highlights.len(), 2);
        assert_eq!(detail.highlights[0].title, "Crane");
        assert_eq!(detail.highlights[1].title, "Old Town");
    }

    #[test]
    fn test_includes_deduplicate_preserving_first_seen_order() {
        let tour = test_tour("t1");
        let days = vec![
            day_rows(
                1,
                test_day("d1", "Gdansk", None),
                vec![],
                vec![test_include("i2", ""), test_include("i1", "")],
            ),
            day_rows(
                2,
                test_day("d2", "Sopot", None),
                vec![],
                vec![test_include("i1", ""), test_include("i3", "")],
            ),
        ];

        let detail = assemble(&tour, &[], &days, MEDIA_URL);

        let descriptions: Vec<&str> = detail
            .includes
            .iter()
            .map(|i| i.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["Include i2", "Include i1", "Include i3"]);
    }

    #[test]
    fn test_include_icon_resolved_by_filename_only() {
        assert_eq!(
            include_icon_url("catalog/includes/icons/bus.svg", MEDIA_URL),
            "/media/working/icons/bus.svg"
        );
        assert_eq!(
            include_icon_url("bus.svg", MEDIA_URL),
            "/media/working/icons/bus.svg"
        );
        assert_eq!(include_icon_url("", MEDIA_URL), "");
    }

    #[test]
    fn test_itinerary_keeps_day_numbers() {
        let tour = test_tour("t1");
        let days = vec![
            day_rows(1, test_day("d1", "Gdansk", None), vec![], vec![]),
            day_rows(2, test_day("d2", "Torun", None), vec![], vec![]),
            day_rows(3, test_day("d3", "Krakow", None), vec![], vec![]),
        ];

        let detail = assemble(&tour, &[], &days, MEDIA_URL);

        let numbers: Vec<i32> = detail.itinerary.iter().map(|d| d.day_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }
}
