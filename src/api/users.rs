use log::{debug, info};

use super::client::QueryClient;
use super::error::ApiError;
use super::posts::skip_for;
use super::request::RequestOptions;
use crate::filters::{filter_users_by_gender, sort_users, UserSort};
use crate::models::{total_pages, Envelope, PagedResult, Post, User, UserDraft, UserPatch};
use crate::query_state::{ListOptions, UserQueryState};

impl QueryClient {
    /// One page of users, optionally searched, gender-filtered and sorted.
    ///
    /// As with posts, the gender filter does not change `total` or `total_pages`.
    pub fn list_users(
        &self,
        page: u32,
        limit: u32,
        options: &ListOptions<UserSort>,
    ) -> Result<PagedResult<User>, ApiError> {
        let page = page.max(1);
        let skip = skip_for(page, limit);

        let (endpoint, request) = match options.search_term() {
            Some(search) => ("/users/search", RequestOptions::get().query("q", search)),
            None => ("/users", RequestOptions::get()),
        };
        let request = request.query("limit", limit).query("skip", skip);

        let data: Envelope<User> = self.request(endpoint, request)?;
        debug!(
            "Fetched {} users (total {}) for page {}",
            data.items.len(),
            data.total,
            page
        );

        let mut users = filter_users_by_gender(data.items, options.filter_term());
        sort_users(&mut users, options.sort_by);

        Ok(PagedResult {
            items: users,
            total: data.total,
            limit: data.limit,
            skip: data.skip,
            current_page: page,
            total_pages: total_pages(data.total, limit),
        })
    }

    pub fn fetch_users(&self, state: &UserQueryState) -> Result<PagedResult<User>, ApiError> {
        self.list_users(state.page(), state.page_size(), &state.list_options())
    }

    /// A user with the posts they wrote. Fails if either lookup fails.
    pub fn get_user_by_id(&self, user_id: u64) -> Result<User, ApiError> {
        let mut user: User = self.request(&format!("/users/{}", user_id), RequestOptions::get())?;
        let posts: Envelope<Post> = self.request(
            &format!("/users/{}/posts", user_id),
            RequestOptions::get(),
        )?;
        user.posts = Some(posts.items);
        Ok(user)
    }

    pub fn add_user(&self, draft: &UserDraft) -> Result<User, ApiError> {
        let user: User = self.request("/users/add", RequestOptions::post().json(draft)?)?;
        info!("Created user {} ({})", user.id, user.username);
        Ok(user)
    }

    pub fn update_user(&self, user_id: u64, patch: &UserPatch) -> Result<User, ApiError> {
        self.request(
            &format!("/users/{}", user_id),
            RequestOptions::put().json(patch)?,
        )
    }

    pub fn delete_user(&self, user_id: u64) -> Result<User, ApiError> {
        let user: User = self.request(&format!("/users/{}", user_id), RequestOptions::delete())?;
        info!("Deleted user {}", user_id);
        Ok(user)
    }
}
