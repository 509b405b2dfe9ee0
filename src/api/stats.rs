use log::{debug, warn};
use serde::de::IgnoredAny;
use std::thread;

use super::client::QueryClient;
use super::error::ApiError;
use super::request::RequestOptions;
use crate::models::{DashboardStats, Envelope};

impl QueryClient {
    /// Upstream totals of posts, users and comments for the home page.
    ///
    /// The three counts are requested concurrently. If any of them fails the
    /// failure is logged and all counts are reported as zero.
    pub fn get_dashboard_stats(&self) -> DashboardStats {
        let totals = thread::scope(|scope| {
            let posts = scope.spawn(|| self.count("/posts"));
            let users = scope.spawn(|| self.count("/users"));
            let comments = scope.spawn(|| self.count("/comments"));
            [posts.join(), users.join(), comments.join()]
        });

        match totals {
            [Ok(Ok(total_posts)), Ok(Ok(total_users)), Ok(Ok(total_comments))] => {
                let stats = DashboardStats {
                    total_posts,
                    total_users,
                    total_comments,
                };
                debug!("Dashboard stats: {:?}", stats);
                stats
            }
            totals => {
                for total in totals.iter() {
                    if let Ok(Err(e)) = total {
                        warn!("Error fetching dashboard statistics: {}", e);
                    }
                }
                DashboardStats::default()
            }
        }
    }

    fn count(&self, endpoint: &str) -> Result<u64, ApiError> {
        let data: Envelope<IgnoredAny> =
            self.request(endpoint, RequestOptions::get().query("limit", 1))?;
        Ok(data.total)
    }
}
