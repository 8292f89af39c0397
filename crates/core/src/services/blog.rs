//! Blog catalog and public blog page service.

use chrono::NaiveDate;
use potours_common::{AppResult, IdGenerator};
use potours_db::entities::blog_post;
use potours_db::repositories::{
    BlogListFilter, BlogPostRepository, BlogSortKey, SortOrder, UserRepository,
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::EntityCounts;

/// Raw, unvalidated query parameters of the blog catalog listing.
///
/// Parsing is forgiving on purpose: malformed dates are ignored, unknown
/// sort keys fall back to the publication date, unknown orders to
/// descending.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogListParams {
    #[serde(default)]
    pub date_from: Option<String>,
    #[serde(default)]
    pub date_to: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
}

/// Input for creating or editing a blog post.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogPostInput {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub body: String,
    #[serde(default)]
    pub published_at: Option<NaiveDate>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Response for a blog post.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostResponse {
    pub id: String,
    pub title: String,
    pub body: String,
    pub published_at: Option<String>,
    pub image_url: Option<String>,
    pub created_by: Option<String>,
    pub author_username: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub is_archived: bool,
    pub archived_at: Option<String>,
}

impl From<blog_post::Model> for BlogPostResponse {
    fn from(p: blog_post::Model) -> Self {
        Self {
            id: p.id,
            title: p.title,
            body: p.body,
            published_at: p.published_at.map(|d| d.format("%Y-%m-%d").to_string()),
            image_url: p.image_url,
            created_by: p.created_by,
            author_username: None,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.to_rfc3339(),
            is_archived: p.is_archived,
            archived_at: p.archived_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Catalog listing of blog posts with the applied filter echoed back.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogCatalogResponse {
    pub items: Vec<BlogPostResponse>,
    pub archived_items: Vec<BlogPostResponse>,
    pub sort: String,
    pub order: String,
    pub date_from: String,
    pub date_to: String,
    pub search: String,
}

/// One page of the public blog listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPageResponse {
    pub posts: Vec<BlogPostResponse>,
    pub page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn parse_sort(raw: Option<&str>) -> BlogSortKey {
    match raw {
        Some("title") => BlogSortKey::Title,
        Some("author") => BlogSortKey::Author,
        _ => BlogSortKey::Date,
    }
}

fn parse_order(raw: Option<&str>) -> SortOrder {
    match raw {
        Some("asc") => SortOrder::Asc,
        _ => SortOrder::Desc,
    }
}

/// Parse raw listing parameters into a repository filter.
///
/// Unparseable dates are dropped silently so a bad filter never errors the
/// page.
fn parse_filter(params: &BlogListParams) -> BlogListFilter {
    let search = params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned);

    BlogListFilter {
        date_from: params.date_from.as_deref().and_then(parse_date),
        date_to: params.date_to.as_deref().and_then(parse_date),
        search,
        sort: parse_sort(params.sort.as_deref()),
        order: parse_order(params.order.as_deref()),
    }
}

/// Parse a raw page parameter: non-numeric or zero values serve page 1.
fn parse_page(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|&p| p >= 1)
        .unwrap_or(1)
}

const fn sort_echo(sort: BlogSortKey) -> &'static str {
    match sort {
        BlogSortKey::Title => "title",
        BlogSortKey::Date => "date",
        BlogSortKey::Author => "author",
    }
}

const fn order_echo(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Asc => "asc",
        SortOrder::Desc => "desc",
    }
}

/// Service for managing blog posts.
#[derive(Clone)]
pub struct BlogService {
    repo: BlogPostRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl BlogService {
    /// Create a new blog service.
    #[must_use]
    pub const fn new(repo: BlogPostRepository, user_repo: UserRepository) -> Self {
        Self {
            repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    async fn with_author(&self, post: blog_post::Model) -> AppResult<BlogPostResponse> {
        let mut response = BlogPostResponse::from(post);
        if let Some(ref author_id) = response.created_by {
            response.author_username = self
                .user_repo
                .find_by_id(author_id)
                .await?
                .map(|u| u.username);
        }
        Ok(response)
    }

    /// Catalog listing of active and archived posts, filtered and sorted.
    pub async fn catalog_list(&self, params: &BlogListParams) -> AppResult<BlogCatalogResponse> {
        let filter = parse_filter(params);
        let items = self.repo.find_filtered(&filter).await?;
        let archived_items = self.repo.find_archived_filtered(&filter).await?;

        Ok(BlogCatalogResponse {
            items: items.into_iter().map(Into::into).collect(),
            archived_items: archived_items.into_iter().map(Into::into).collect(),
            sort: sort_echo(filter.sort).to_string(),
            order: order_echo(filter.order).to_string(),
            date_from: params
                .date_from
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_string(),
            date_to: params
                .date_to
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_string(),
            search: params
                .search
                .as_deref()
                .unwrap_or_default()
                .trim()
                .to_string(),
        })
    }

    /// Get one post, archived or not (catalog edit form).
    pub async fn get(&self, id: &str) -> AppResult<BlogPostResponse> {
        let post = self.repo.get_by_id(id).await?;
        self.with_author(post).await
    }

    /// Create a new post, attributed to the acting editor if present.
    pub async fn create(
        &self,
        actor: Option<&str>,
        input: CreateBlogPostInput,
    ) -> AppResult<BlogPostResponse> {
        input.validate()?;

        let now = chrono::Utc::now();
        let model = blog_post::ActiveModel {
            id: Set(self.id_gen.generate()),
            title: Set(input.title),
            body: Set(input.body),
            published_at: Set(input.published_at),
            image_url: Set(input.image_url),
            created_by: Set(actor.map(ToOwned::to_owned)),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            is_archived: Set(false),
            archived_at: Set(None),
        };

        Ok(self.repo.create(model).await?.into())
    }

    /// Update a post. An existing author is kept; a post without one is
    /// attributed to the acting editor.
    pub async fn update(
        &self,
        id: &str,
        actor: Option<&str>,
        input: CreateBlogPostInput,
    ) -> AppResult<BlogPostResponse> {
        input.validate()?;

        let row = self.repo.get_by_id(id).await?;
        let created_by = row.created_by.clone().or_else(|| actor.map(ToOwned::to_owned));

        let mut model: blog_post::ActiveModel = row.into();
        model.title = Set(input.title);
        model.body = Set(input.body);
        model.published_at = Set(input.published_at);
        model.image_url = Set(input.image_url);
        model.created_by = Set(created_by);
        model.updated_at = Set(chrono::Utc::now().into());

        Ok(self.repo.update(model).await?.into())
    }

    /// Move a post to the archive.
    pub async fn archive(&self, id: &str) -> AppResult<BlogPostResponse> {
        Ok(self.repo.archive(id).await?.into())
    }

    /// Restore a post from the archive.
    pub async fn restore(&self, id: &str) -> AppResult<BlogPostResponse> {
        Ok(self.repo.restore(id).await?.into())
    }

    /// Active/archived counts for the catalog dashboard.
    pub async fn counts(&self) -> AppResult<EntityCounts> {
        Ok(EntityCounts {
            active: self.repo.count_active().await?,
            archived: self.repo.count_archived().await?,
        })
    }

    /// One page of the public blog, nine posts per page.
    pub async fn public_page(&self, page_raw: Option<&str>) -> AppResult<BlogPageResponse> {
        let page = parse_page(page_raw);
        let result = self.repo.find_page(page).await?;

        Ok(BlogPageResponse {
            posts: result.items.into_iter().map(Into::into).collect(),
            page: result.page,
            total_pages: result.total_pages,
            total_items: result.total_items,
            has_previous: result.page > 1,
            has_next: result.page < result.total_pages,
        })
    }

    /// Public detail page of an active post.
    pub async fn public_detail(&self, id: &str) -> AppResult<BlogPostResponse> {
        let post = self.repo.get_active_by_id(id).await?;
        self.with_author(post).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort_known_keys() {
        assert_eq!(parse_sort(Some("title")), BlogSortKey::Title);
        assert_eq!(parse_sort(Some("author")), BlogSortKey::Author);
        assert_eq!(parse_sort(Some("date")), BlogSortKey::Date);
    }

    #[test]
    fn test_parse_sort_unknown_falls_back_to_date() {
        assert_eq!(parse_sort(Some("views")), BlogSortKey::Date);
        assert_eq!(parse_sort(None), BlogSortKey::Date);
    }

    #[test]
    fn test_parse_order_unknown_falls_back_to_desc() {
        assert_eq!(parse_order(Some("asc")), SortOrder::Asc);
        assert_eq!(parse_order(Some("desc")), SortOrder::Desc);
        assert_eq!(parse_order(Some("sideways")), SortOrder::Desc);
        assert_eq!(parse_order(None), SortOrder::Desc);
    }

    #[test]
    fn test_parse_filter_ignores_bad_dates() {
        let params = BlogListParams {
            date_from: Some("not-a-date".to_string()),
            date_to: Some("2099-01-01".to_string()),
            search: None,
            sort: None,
            order: None,
        };

        let filter = parse_filter(&params);

        assert!(filter.date_from.is_none());
        assert_eq!(
            filter.date_to,
            Some(NaiveDate::from_ymd_opt(2099, 1, 1).unwrap())
        );
    }

    #[test]
    fn test_parse_filter_blank_search_dropped() {
        let params = BlogListParams {
            search: Some("   ".to_string()),
            ..Default::default()
        };

        let filter = parse_filter(&params);
        assert!(filter.search.is_none());
    }

    #[test]
    fn test_parse_filter_trims_search() {
        let params = BlogListParams {
            search: Some("  castles  ".to_string()),
            ..Default::default()
        };

        let filter = parse_filter(&params);
        assert_eq!(filter.search.as_deref(), Some("castles"));
    }

    #[test]
    fn test_parse_page_fallbacks() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-2")), 1);
        assert_eq!(parse_page(Some("3")), 3);
    }
}
