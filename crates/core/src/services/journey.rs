//! Journey builder wizard payloads.
//!
//! The public "begin your journey" wizard walks a visitor through a few
//! steps; the later steps are fed from the attraction catalog. Steps are
//! keyed by a query-string stage with a forgiving fallback.

use potours_common::AppResult;
use potours_db::entities::attraction;
use potours_db::repositories::AttractionRepository;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeSet;

use super::attraction::ATTRACTION_PLACEHOLDER;

/// Fallback cover used when no attraction photo is available.
const JOURNEY_COVER_FALLBACK: &str = "working/tours/mountains-iceland.png";

/// Fallback slide shown when the catalog has no attractions yet.
const FALLBACK_SLIDE_TITLE: &str = "North-South Poland Tour";
const FALLBACK_SLIDE_DESCRIPTION: &str = "From Historic Cities to Mountain Peaks";

/// Wizard stage inside step two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JourneyStage {
    #[default]
    Preferences,
    Places,
    Details,
}

impl JourneyStage {
    /// Parse a raw stage parameter; unknown values fall back to preferences.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("places") => Self::Places,
            Some("details") => Self::Details,
            _ => Self::Preferences,
        }
    }
}

/// One slide of the step-two slider.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneySlide {
    pub title: String,
    pub description: String,
    pub photo_url: String,
}

/// Step-two payload: stage plus the attraction slider.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyStep2Response {
    pub stage: JourneyStage,
    pub slider_current: JourneySlide,
    pub slider_items: Vec<JourneySlide>,
}

/// An attraction enriched with a browse category for step three.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyAttraction {
    pub id: String,
    pub title: String,
    pub description: String,
    pub city: String,
    pub address: String,
    pub duration_hours: Decimal,
    pub photo_url: String,
    pub category: &'static str,
}

/// Step-three payload: categorized attractions for the map view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyStep3Response {
    pub attractions: Vec<JourneyAttraction>,
}

/// Step-four payload: cover image and the city choices.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyStep4Response {
    pub cover_url: String,
    pub city_choices: Vec<String>,
}

/// Step-five payload: the summary cover.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyStep5Response {
    pub cover_url: String,
}

const NATURE_WORDS: [&str; 6] = ["beach", "mountain", "lake", "park", "forest", "nature"];
const CITY_WORDS: [&str; 4] = ["city", "square", "center", "old town"];

/// Derive a browse category from an attraction's text.
fn attraction_category(a: &attraction::Model) -> &'static str {
    let text = format!("{} {} {}", a.title, a.description, a.city).to_lowercase();
    if NATURE_WORDS.iter().any(|w| text.contains(w)) {
        return "nature";
    }
    if CITY_WORDS.iter().any(|w| text.contains(w)) {
        return "city";
    }
    "historical"
}

fn photo_or_placeholder(a: &attraction::Model, media_url: &str) -> String {
    a.photo_url
        .clone()
        .unwrap_or_else(|| format!("{media_url}{ATTRACTION_PLACEHOLDER}"))
}

/// Pick the cover attraction: first title containing any keyword, else the
/// first attraction overall.
fn pick_cover<'a>(
    attractions: &'a [attraction::Model],
    keywords: &[&str],
) -> Option<&'a attraction::Model> {
    attractions
        .iter()
        .find(|a| {
            let title = a.title.to_lowercase();
            keywords.iter().any(|k| title.contains(k))
        })
        .or_else(|| attractions.first())
}

fn cover_url(cover: Option<&attraction::Model>, media_url: &str) -> String {
    cover
        .and_then(|a| a.photo_url.clone())
        .unwrap_or_else(|| format!("{media_url}{JOURNEY_COVER_FALLBACK}"))
}

/// Service feeding the journey builder wizard.
#[derive(Clone)]
pub struct JourneyService {
    repo: AttractionRepository,
    media_url: String,
}

impl JourneyService {
    /// Create a new journey service.
    #[must_use]
    pub const fn new(repo: AttractionRepository, media_url: String) -> Self {
        Self { repo, media_url }
    }

    /// Step two: the preference slider.
    pub async fn step2(&self, stage_raw: Option<&str>) -> AppResult<JourneyStep2Response> {
        let stage = JourneyStage::parse(stage_raw);
        let attractions = self.repo.find_active().await?;

        let slides: Vec<JourneySlide> = attractions
            .iter()
            .map(|a| JourneySlide {
                title: a.title.clone(),
                description: a.description.clone(),
                photo_url: photo_or_placeholder(a, &self.media_url),
            })
            .collect();

        let fallback = JourneySlide {
            title: FALLBACK_SLIDE_TITLE.to_string(),
            description: FALLBACK_SLIDE_DESCRIPTION.to_string(),
            photo_url: format!("{}{JOURNEY_COVER_FALLBACK}", self.media_url),
        };

        let slider_current = slides.first().cloned().unwrap_or_else(|| fallback.clone());
        let slider_items = if slides.is_empty() {
            vec![fallback]
        } else {
            slides
        };

        Ok(JourneyStep2Response {
            stage,
            slider_current,
            slider_items,
        })
    }

    /// Step three: categorized attractions.
    pub async fn step3(&self) -> AppResult<JourneyStep3Response> {
        let attractions = self.repo.find_active().await?;

        let attractions = attractions
            .iter()
            .map(|a| JourneyAttraction {
                id: a.id.clone(),
                title: a.title.clone(),
                description: a.description.clone(),
                city: a.city.clone(),
                address: a.address.clone(),
                duration_hours: a.duration_hours,
                photo_url: photo_or_placeholder(a, &self.media_url),
                category: attraction_category(a),
            })
            .collect();

        Ok(JourneyStep3Response { attractions })
    }

    /// Step four: cover image and city choices.
    pub async fn step4(&self) -> AppResult<JourneyStep4Response> {
        let attractions = self.repo.find_active().await?;

        let cities: BTreeSet<String> = attractions
            .iter()
            .map(|a| a.city.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();

        Ok(JourneyStep4Response {
            cover_url: cover_url(pick_cover(&attractions, &["malbork"]), &self.media_url),
            city_choices: cities.into_iter().collect(),
        })
    }

    /// Step five: the summary cover.
    pub async fn step5(&self) -> AppResult<JourneyStep5Response> {
        let attractions = self.repo.find_active().await?;

        Ok(JourneyStep5Response {
            cover_url: cover_url(
                pick_cover(&attractions, &["gdansk", "malbork"]),
                &self.media_url,
            ),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_attraction(id: &str, title: &str, city: &str) -> attraction::Model {
        attraction::Model {
            id: id.to_string(),
            title: title.to_string(),
            description: "desc".to_string(),
            city: city.to_string(),
            address: "addr".to_string(),
            duration_hours: Decimal::ONE,
            photo_url: None,
            created_by: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
            is_archived: false,
            archived_at: None,
        }
    }

    #[test]
    fn test_parse_stage_fallback() {
        assert_eq!(JourneyStage::parse(Some("places")), JourneyStage::Places);
        assert_eq!(JourneyStage::parse(Some("details")), JourneyStage::Details);
        assert_eq!(
            JourneyStage::parse(Some("payment")),
            JourneyStage::Preferences
        );
        assert_eq!(JourneyStage::parse(None), JourneyStage::Preferences);
    }

    #[test]
    fn test_attraction_category_keywords() {
        let nature = test_attraction("a1", "Mountain Trail", "Zakopane");
        assert_eq!(attraction_category(&nature), "nature");

        let city = test_attraction("a2", "Market Square", "Krakow");
        assert_eq!(attraction_category(&city), "city");

        let historical = test_attraction("a3", "Malbork Castle", "Malbork");
        assert_eq!(attraction_category(&historical), "historical");
    }

    #[test]
    fn test_pick_cover_prefers_keyword_match() {
        let attractions = vec![
            test_attraction("a1", "Gdansk Crane", "Gdansk"),
            test_attraction("a2", "Malbork Castle", "Malbork"),
        ];

        let cover = pick_cover(&attractions, &["malbork"]).unwrap();
        assert_eq!(cover.id, "a2");
    }

    #[test]
    fn test_pick_cover_falls_back_to_first() {
        let attractions = vec![
            test_attraction("a1", "Wawel Hill", "Krakow"),
            test_attraction("a2", "Lazienki", "Warsaw"),
        ];

        let cover = pick_cover(&attractions, &["malbork"]).unwrap();
        assert_eq!(cover.id, "a1");
    }

    #[test]
    fn test_cover_url_fallback_without_photo() {
        let attractions = vec![test_attraction("a1", "Wawel Hill", "Krakow")];
        assert_eq!(
            cover_url(pick_cover(&attractions, &["x"]), "/media/"),
            "/media/working/tours/mountains-iceland.png"
        );
        assert_eq!(
            cover_url(None, "/media/"),
            "/media/working/tours/mountains-iceland.png"
        );
    }
}
