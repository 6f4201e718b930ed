//! Render surface trait: the browser as seen by the scraper.

use async_trait::async_trait;

use crate::error::SurfaceResult;

/// A live, scriptable view of a web page.
///
/// The discovery loop and the field extractor only talk to the page through
/// this trait. Queries are CSS selectors; item handles are opaque and only
/// meaningful to the surface that produced them.
#[async_trait]
pub trait RenderSurface: Send + Sync {
    /// Handle to one discovered listing.
    type Item: Send + Sync;

    /// Load a URL in the current tab.
    async fn navigate(&self, url: &str) -> SurfaceResult<()>;

    /// Replace the contents of the search input with `term`.
    async fn fill_search(&self, term: &str) -> SurfaceResult<()>;

    /// Submit the search form.
    async fn submit_search(&self) -> SurfaceResult<()>;

    /// Scroll or paginate so that more results may load.
    async fn reveal_more(&self) -> SurfaceResult<()>;

    /// Number of elements on the page matching `query`.
    async fn count(&self, query: &str) -> SurfaceResult<usize>;

    /// Handles for every element matching `query`, in document order.
    async fn query_all(&self, query: &str) -> SurfaceResult<Vec<Self::Item>>;

    /// Inner text of every element matching `query` inside `item`.
    async fn scoped_texts(&self, item: &Self::Item, query: &str) -> SurfaceResult<Vec<String>>;

    /// Inner text of the first element matching `query` on the page, if any.
    async fn first_text(&self, query: &str) -> SurfaceResult<Option<String>>;

    /// Click / focus a listing so its detail view renders.
    async fn activate(&self, item: &Self::Item) -> SurfaceResult<()>;
}
