//! Blog post repository.

use std::sync::Arc;

use crate::entities::{BlogPost, blog_post, user};
use potours_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, JoinType, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
    sea_query::{Expr, extension::postgres::PgExpr},
};

/// Page size of the public blog listing.
pub const BLOG_PAGE_SIZE: u64 = 9;

/// Sort key of the blog catalog listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlogSortKey {
    /// Alphabetically by title.
    Title,
    /// By publication date.
    #[default]
    Date,
    /// By the author's username.
    Author,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    #[default]
    Desc,
}

impl SortOrder {
    const fn into_order(self) -> Order {
        match self {
            Self::Asc => Order::Asc,
            Self::Desc => Order::Desc,
        }
    }
}

/// Parsed filter parameters of the blog catalog listing.
///
/// Raw query-string parsing (including the silent fallback rules) lives in
/// the blog service; by the time a filter reaches the repository every field
/// is well formed.
#[derive(Debug, Clone, Default)]
pub struct BlogListFilter {
    /// Only posts published on or after this date.
    pub date_from: Option<chrono::NaiveDate>,
    /// Only posts published on or before this date.
    pub date_to: Option<chrono::NaiveDate>,
    /// Case-insensitive substring matched against title or body.
    pub search: Option<String>,
    /// Sort key.
    pub sort: BlogSortKey,
    /// Sort direction.
    pub order: SortOrder,
}

/// One page of the public blog listing.
#[derive(Debug, Clone)]
pub struct BlogPage {
    /// Posts on this page.
    pub items: Vec<blog_post::Model>,
    /// 1-based page number actually served.
    pub page: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Total number of posts.
    pub total_items: u64,
}

/// Escape `%` and `_` so user input is matched literally inside LIKE.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Blog post repository for database operations.
#[derive(Clone)]
pub struct BlogPostRepository {
    db: Arc<DatabaseConnection>,
}

impl BlogPostRepository {
    /// Create a new blog post repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a blog post by ID, archived or not.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<blog_post::Model>> {
        BlogPost::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a blog post by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<blog_post::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Blog post: {id}")))
    }

    /// Get an active blog post by ID (public detail page).
    pub async fn get_active_by_id(&self, id: &str) -> AppResult<blog_post::Model> {
        BlogPost::find_by_id(id)
            .filter(blog_post::Column::IsArchived.eq(false))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or_else(|| AppError::NotFound(format!("Blog post: {id}")))
    }

    fn apply_filter(mut query: Select<BlogPost>, filter: &BlogListFilter) -> Select<BlogPost> {
        if let Some(date_from) = filter.date_from {
            query = query.filter(blog_post::Column::PublishedAt.gte(date_from));
        }
        if let Some(date_to) = filter.date_to {
            query = query.filter(blog_post::Column::PublishedAt.lte(date_to));
        }
        if let Some(ref search) = filter.search {
            let pattern = format!("%{}%", escape_like(search));
            query = query.filter(
                Condition::any()
                    .add(
                        Expr::col((blog_post::Entity, blog_post::Column::Title))
                            .ilike(pattern.clone()),
                    )
                    .add(Expr::col((blog_post::Entity, blog_post::Column::Body)).ilike(pattern)),
            );
        }

        let order = filter.order.into_order();
        query = match filter.sort {
            BlogSortKey::Title => query.order_by(blog_post::Column::Title, order),
            BlogSortKey::Date => query.order_by(blog_post::Column::PublishedAt, order),
            BlogSortKey::Author => query
                .join(JoinType::LeftJoin, blog_post::Relation::Author.def())
                .order_by(user::Column::Username, order),
        };

        // Stable tie-break regardless of sort key
        query.order_by_desc(blog_post::Column::CreatedAt)
    }

    /// Find active blog posts matching a filter (catalog listing).
    pub async fn find_filtered(&self, filter: &BlogListFilter) -> AppResult<Vec<blog_post::Model>> {
        let query = BlogPost::find().filter(blog_post::Column::IsArchived.eq(false));
        Self::apply_filter(query, filter)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find archived blog posts matching a filter (catalog archive listing).
    pub async fn find_archived_filtered(
        &self,
        filter: &BlogListFilter,
    ) -> AppResult<Vec<blog_post::Model>> {
        let query = BlogPost::find().filter(blog_post::Column::IsArchived.eq(true));
        Self::apply_filter(query, filter)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Fetch one page of the public blog listing.
    ///
    /// Posts are ordered by publication date, then creation time, newest
    /// first. Page numbers are 1-based; a page past the end serves the last
    /// page.
    pub async fn find_page(&self, page: u64) -> AppResult<BlogPage> {
        let paginator = BlogPost::find()
            .filter(blog_post::Column::IsArchived.eq(false))
            .order_by_desc(blog_post::Column::PublishedAt)
            .order_by_desc(blog_post::Column::CreatedAt)
            .paginate(self.db.as_ref(), BLOG_PAGE_SIZE);

        let counts = paginator
            .num_items_and_pages()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let page = page.max(1).min(counts.number_of_pages.max(1));

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(BlogPage {
            items,
            page,
            total_pages: counts.number_of_pages,
            total_items: counts.number_of_items,
        })
    }

    /// Count active blog posts.
    pub async fn count_active(&self) -> AppResult<u64> {
        BlogPost::find()
            .filter(blog_post::Column::IsArchived.eq(false))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count archived blog posts.
    pub async fn count_archived(&self) -> AppResult<u64> {
        BlogPost::find()
            .filter(blog_post::Column::IsArchived.eq(true))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new blog post.
    pub async fn create(&self, model: blog_post::ActiveModel) -> AppResult<blog_post::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a blog post.
    pub async fn update(&self, model: blog_post::ActiveModel) -> AppResult<blog_post::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Archive a blog post. Reapplying keeps it archived.
    pub async fn archive(&self, id: &str) -> AppResult<blog_post::Model> {
        let row = self.get_by_id(id).await?;
        let now = chrono::Utc::now();
        let mut active: blog_post::ActiveModel = row.into();
        active.is_archived = Set(true);
        active.archived_at = Set(Some(now.into()));
        active.updated_at = Set(now.into());
        self.update(active).await
    }

    /// Restore an archived blog post.
    pub async fn restore(&self, id: &str) -> AppResult<blog_post::Model> {
        let row = self.get_by_id(id).await?;
        let now = chrono::Utc::now();
        let mut active: blog_post::ActiveModel = row.into();
        active.is_archived = Set(false);
        active.archived_at = Set(None);
        active.updated_at = Set(now.into());
        self.update(active).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("plain"), "plain");
    }
}
