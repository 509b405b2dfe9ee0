use log::debug;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::{Post, User};

/// Ordering applied to a fetched page of posts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PostSort {
    /// Server order
    #[default]
    Recent,
    Reactions,
    Title,
}

/// Ordering applied to a fetched page of users
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserSort {
    /// Server order
    #[default]
    Unsorted,
    Name,
    Age,
    AgeDesc,
}

impl FromStr for PostSort {
    type Err = std::convert::Infallible;

    /// Unknown keys keep the server order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "reactions" => PostSort::Reactions,
            "title" => PostSort::Title,
            _ => PostSort::Recent,
        })
    }
}

impl FromStr for UserSort {
    type Err = std::convert::Infallible;

    /// Unknown keys keep the server order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "name" => UserSort::Name,
            "age" => UserSort::Age,
            "age-desc" => UserSort::AgeDesc,
            _ => UserSort::Unsorted,
        })
    }
}

impl fmt::Display for PostSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PostSort::Recent => "recent",
            PostSort::Reactions => "reactions",
            PostSort::Title => "title",
        })
    }
}

impl fmt::Display for UserSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UserSort::Unsorted => "",
            UserSort::Name => "name",
            UserSort::Age => "age",
            UserSort::AgeDesc => "age-desc",
        })
    }
}

/// Case-insensitive comparison that falls back to code points for ties, so
/// "apple" sorts next to "Apple" and before "banana".
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Keep only posts carrying exactly `tag`. An empty tag keeps everything.
pub fn filter_posts_by_tag(posts: Vec<Post>, tag: &str) -> Vec<Post> {
    if tag.is_empty() {
        return posts;
    }

    let before = posts.len();
    let kept: Vec<Post> = posts
        .into_iter()
        .filter(|post| post.tags.iter().any(|t| t == tag))
        .collect();
    debug!(
        "Tag filter '{}' kept {} of {} posts on this page",
        tag,
        kept.len(),
        before
    );
    kept
}

/// Keep only users whose gender is exactly `gender`. An empty value keeps everything.
pub fn filter_users_by_gender(users: Vec<User>, gender: &str) -> Vec<User> {
    if gender.is_empty() {
        return users;
    }

    let before = users.len();
    let kept: Vec<User> = users.into_iter().filter(|user| user.gender == gender).collect();
    debug!(
        "Gender filter '{}' kept {} of {} users on this page",
        gender,
        kept.len(),
        before
    );
    kept
}

pub fn sort_posts(posts: &mut [Post], sort_by: PostSort) {
    match sort_by {
        PostSort::Recent => {}
        PostSort::Reactions => posts.sort_by(|a, b| b.reactions.cmp(&a.reactions)),
        PostSort::Title => posts.sort_by(|a, b| locale_compare(&a.title, &b.title)),
    }
}

pub fn sort_users(users: &mut [User], sort_by: UserSort) {
    match sort_by {
        UserSort::Unsorted => {}
        UserSort::Name => users.sort_by(|a, b| locale_compare(&a.full_name(), &b.full_name())),
        UserSort::Age => users.sort_by(|a, b| a.age.cmp(&b.age)),
        UserSort::AgeDesc => users.sort_by(|a, b| b.age.cmp(&a.age)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: u64, title: &str, reactions: u64, tags: &[&str]) -> Post {
        Post {
            id,
            title: title.to_string(),
            reactions,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Post::default()
        }
    }

    fn user(id: u64, first: &str, last: &str, age: u32, gender: &str) -> User {
        User {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            age,
            gender: gender.to_string(),
            ..User::default()
        }
    }

    fn ids_of_posts(posts: &[Post]) -> Vec<u64> {
        posts.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_sort_keys_from_str() {
        assert_eq!("reactions".parse::<PostSort>().unwrap(), PostSort::Reactions);
        assert_eq!("title".parse::<PostSort>().unwrap(), PostSort::Title);
        assert_eq!("recent".parse::<PostSort>().unwrap(), PostSort::Recent);
        assert_eq!("bogus".parse::<PostSort>().unwrap(), PostSort::Recent);
        assert_eq!("age-desc".parse::<UserSort>().unwrap(), UserSort::AgeDesc);
        assert_eq!("".parse::<UserSort>().unwrap(), UserSort::Unsorted);
    }

    #[test]
    fn test_sort_by_reactions_is_non_increasing() {
        let mut posts = vec![
            post(1, "a", 3, &[]),
            post(2, "b", 10, &[]),
            post(3, "c", 0, &[]),
            post(4, "d", 10, &[]),
            post(5, "e", 7, &[]),
        ];
        sort_posts(&mut posts, PostSort::Reactions);

        assert!(posts.windows(2).all(|w| w[0].reactions >= w[1].reactions));
        // stable for equal counts
        assert_eq!(ids_of_posts(&posts), vec![2, 4, 5, 1, 3]);
    }

    #[test]
    fn test_sort_by_title_ignores_case() {
        let mut posts = vec![
            post(1, "banana", 0, &[]),
            post(2, "Apple", 0, &[]),
            post(3, "cherry", 0, &[]),
            post(4, "apple pie", 0, &[]),
        ];
        sort_posts(&mut posts, PostSort::Title);
        assert_eq!(ids_of_posts(&posts), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_recent_keeps_server_order() {
        let mut posts = vec![post(3, "z", 1, &[]), post(1, "a", 9, &[])];
        sort_posts(&mut posts, PostSort::Recent);
        assert_eq!(ids_of_posts(&posts), vec![3, 1]);
    }

    #[test]
    fn test_sort_users() {
        let base = vec![
            user(1, "Zoe", "Adams", 30, "female"),
            user(2, "adam", "Smith", 25, "male"),
            user(3, "Adam", "Baker", 41, "male"),
        ];

        let mut by_name = base.clone();
        sort_users(&mut by_name, UserSort::Name);
        let names: Vec<u64> = by_name.iter().map(|u| u.id).collect();
        assert_eq!(names, vec![3, 2, 1]);

        let mut by_age = base.clone();
        sort_users(&mut by_age, UserSort::Age);
        assert_eq!(by_age.iter().map(|u| u.age).collect::<Vec<_>>(), vec![25, 30, 41]);

        let mut by_age_desc = base;
        sort_users(&mut by_age_desc, UserSort::AgeDesc);
        assert_eq!(
            by_age_desc.iter().map(|u| u.age).collect::<Vec<_>>(),
            vec![41, 30, 25]
        );
    }

    #[test]
    fn test_filter_posts_by_tag_exact_match() {
        let posts = vec![
            post(1, "a", 0, &["history", "love"]),
            post(2, "b", 0, &["historical"]),
            post(3, "c", 0, &["History"]),
        ];
        let kept = filter_posts_by_tag(posts.clone(), "history");
        assert_eq!(ids_of_posts(&kept), vec![1]);

        let all = filter_posts_by_tag(posts, "");
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_filter_users_by_gender() {
        let users = vec![
            user(1, "a", "b", 20, "female"),
            user(2, "c", "d", 20, "male"),
            user(3, "e", "f", 20, "female"),
        ];
        let kept = filter_users_by_gender(users.clone(), "female");
        assert_eq!(kept.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 3]);
        assert!(filter_users_by_gender(users, "other").is_empty());
    }
}
