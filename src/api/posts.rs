use log::{debug, info};
use std::collections::BTreeSet;

use super::client::QueryClient;
use super::error::ApiError;
use super::request::RequestOptions;
use crate::common::constants::{RELATED_CANDIDATE_LIMIT, TAG_SAMPLE_SIZE};
use crate::filters::{filter_posts_by_tag, sort_posts, PostSort};
use crate::models::{total_pages, Envelope, PagedResult, Post, PostDraft, PostPatch, User};
use crate::query_state::{ListOptions, PostQueryState};

/// `skip` offset of a 1-based page. Page 0 is read as page 1.
pub(crate) fn skip_for(page: u32, limit: u32) -> u64 {
    u64::from(page.max(1) - 1) * u64::from(limit)
}

impl QueryClient {
    /// One page of posts, optionally searched, tag-filtered and sorted.
    ///
    /// The tag filter runs on the fetched page only, so `total` and `total_pages`
    /// still count the unfiltered listing.
    pub fn list_posts(
        &self,
        page: u32,
        limit: u32,
        options: &ListOptions<PostSort>,
    ) -> Result<PagedResult<Post>, ApiError> {
        let page = page.max(1);
        let skip = skip_for(page, limit);

        let (endpoint, request) = match options.search_term() {
            Some(search) => ("/posts/search", RequestOptions::get().query("q", search)),
            None => ("/posts", RequestOptions::get()),
        };
        let request = request.query("limit", limit).query("skip", skip);

        let data: Envelope<Post> = self.request(endpoint, request)?;
        debug!(
            "Fetched {} posts (total {}) for page {}",
            data.items.len(),
            data.total,
            page
        );

        let mut posts = filter_posts_by_tag(data.items, options.filter_term());
        sort_posts(&mut posts, options.sort_by);

        Ok(PagedResult {
            items: posts,
            total: data.total,
            limit: data.limit,
            skip: data.skip,
            current_page: page,
            total_pages: total_pages(data.total, limit),
        })
    }

    pub fn fetch_posts(&self, state: &PostQueryState) -> Result<PagedResult<Post>, ApiError> {
        self.list_posts(state.page(), state.page_size(), &state.list_options())
    }

    /// A post with its author attached. Fails if either lookup fails.
    pub fn get_post_by_id(&self, post_id: u64) -> Result<Post, ApiError> {
        let mut post: Post = self.request(&format!("/posts/{}", post_id), RequestOptions::get())?;
        let author: User = self.request(
            &format!("/users/{}", post.user_id),
            RequestOptions::get(),
        )?;
        post.author = Some(author);
        Ok(post)
    }

    /// Distinct tags of the first posts of the listing, sorted.
    ///
    /// Only a sample of posts is read, so tags that appear solely on later posts
    /// are missing.
    pub fn get_all_tags(&self) -> Result<Vec<String>, ApiError> {
        let data: Envelope<Post> =
            self.request("/posts", RequestOptions::get().query("limit", TAG_SAMPLE_SIZE))?;

        let tags: BTreeSet<String> = data
            .items
            .into_iter()
            .take(TAG_SAMPLE_SIZE)
            .flat_map(|post| post.tags)
            .collect();

        debug!("Collected {} distinct tags", tags.len());
        Ok(tags.into_iter().collect())
    }

    /// Up to `count` other posts sharing at least one of `tags`.
    /// No request is made when `tags` is empty.
    pub fn get_related_posts(
        &self,
        post_id: u64,
        tags: &[String],
        count: usize,
    ) -> Result<Vec<Post>, ApiError> {
        if tags.is_empty() {
            return Ok(Vec::new());
        }

        let request = tags.iter().fold(
            RequestOptions::get().query("limit", RELATED_CANDIDATE_LIMIT),
            |request, tag| request.query("tag", tag),
        );
        let data: Envelope<Post> = self.request("/posts", request)?;

        Ok(data
            .items
            .into_iter()
            .filter(|post| post.id != post_id)
            .take(count)
            .collect())
    }

    pub fn add_post(&self, draft: &PostDraft) -> Result<Post, ApiError> {
        let post: Post = self.request("/posts/add", RequestOptions::post().json(draft)?)?;
        info!("Created post {} '{}'", post.id, post.title);
        Ok(post)
    }

    pub fn update_post(&self, post_id: u64, patch: &PostPatch) -> Result<Post, ApiError> {
        self.request(
            &format!("/posts/{}", post_id),
            RequestOptions::put().json(patch)?,
        )
    }

    pub fn delete_post(&self, post_id: u64) -> Result<Post, ApiError> {
        let post: Post = self.request(&format!("/posts/{}", post_id), RequestOptions::delete())?;
        info!("Deleted post {}", post_id);
        Ok(post)
    }
}
