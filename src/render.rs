use crate::common::constants::EXCERPT_LENGTH;
use crate::common::{format_date, truncate_text};
use crate::models::{Comment, CommentThread, DashboardStats, PagedResult, Post, User};
use crate::query_state::QueryState;
use crate::validation::ValidationResult;

pub fn format_reactions(reactions: u64) -> String {
    format!("❤️ {}", reactions)
}

pub fn format_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!("#{}", tag))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_stats(stats: &DashboardStats) -> String {
    format!(
        "Posts: {}  |  Users: {}  |  Comments: {}\n",
        stats.total_posts, stats.total_users, stats.total_comments
    )
}

pub fn render_post_card(post: &Post) -> String {
    let mut lines = Vec::with_capacity(4);
    lines.push(format!("[{}] {}\n", post.id, post.title));
    lines.push(format!("    {}\n", truncate_text(&post.body, EXCERPT_LENGTH)));
    if !post.tags.is_empty() {
        lines.push(format!("    {}\n", format_tags(&post.tags)));
    }
    lines.push(format!("    {}\n", format_reactions(post.reactions)));
    lines.join("")
}

pub fn render_post_page(page: &PagedResult<Post>) -> String {
    if page.items.is_empty() {
        return "No posts found.\n".to_string();
    }
    page.items
        .iter()
        .map(render_post_card)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_user_row(user: &User) -> String {
    format!(
        "[{}] {} (@{}) | {} | {} | age {}\n",
        user.id,
        user.full_name(),
        user.username,
        user.email,
        user.gender,
        user.age
    )
}

pub fn render_user_page(page: &PagedResult<User>) -> String {
    if page.items.is_empty() {
        return "No users found.\n".to_string();
    }
    page.items.iter().map(render_user_row).collect()
}

/// "Page 3 of 12" followed by the page links around the current page
pub fn render_pagination<S: Clone>(state: &QueryState<S>) -> String {
    if state.total_pages() <= 1 {
        return String::new();
    }

    let links: Vec<String> = state
        .page_window()
        .map(|page| {
            if page == state.page() {
                format!("[{}]", page)
            } else {
                page.to_string()
            }
        })
        .collect();

    format!(
        "Page {} of {}:  {}\n",
        state.page(),
        state.total_pages(),
        links.join(" ")
    )
}

fn render_comment(comment: &Comment) -> String {
    let date = comment
        .extra
        .get("createdAt")
        .and_then(|v| v.as_str())
        .map(format_date);

    let mut header = format!("  - {}", comment.display_name());
    if let Some(date) = date {
        header.push_str(&format!(" ({})", date));
    }
    format!("{}: {}\n", header, comment.body)
}

pub fn render_post_details(post: &Post, thread: &CommentThread, related: &[Post]) -> String {
    let mut lines = Vec::with_capacity(16);

    lines.push(format!("## {}\n", post.title));
    if let Some(author) = &post.author {
        lines.push(format!("By {} (@{})\n", author.full_name(), author.username));
    }
    lines.push(format!("{}\n\n", post.body));
    if !post.tags.is_empty() {
        lines.push(format!("{}\n", format_tags(&post.tags)));
    }
    lines.push(format!("{}\n\n", format_reactions(post.reactions)));

    lines.push(format!("### Comments ({})\n", thread.total));
    if thread.comments.is_empty() {
        lines.push("  No comments yet.\n".to_string());
    }
    lines.extend(thread.comments.iter().map(render_comment));

    if !related.is_empty() {
        lines.push("\n### Related posts\n".to_string());
        lines.extend(related.iter().map(render_post_card));
    }

    lines.join("")
}

pub fn render_user_details(user: &User) -> String {
    let mut lines = Vec::with_capacity(8);

    lines.push(format!("## {} (@{})\n", user.full_name(), user.username));
    lines.push(format!("Email: {}\n", user.email));
    if !user.phone.is_empty() {
        lines.push(format!("Phone: {}\n", user.phone));
    }
    lines.push(format!("Age: {}  Gender: {}\n", user.age, user.gender));
    if let Some(address) = &user.address {
        lines.push(format!(
            "Address: {}, {}, {} {}\n",
            address.address, address.city, address.state, address.postal_code
        ));
    }

    if let Some(posts) = &user.posts {
        lines.push(format!("\n### Posts ({})\n", posts.len()));
        lines.extend(posts.iter().map(render_post_card));
    }

    lines.join("")
}

pub fn render_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        return "No tags found.\n".to_string();
    }
    format!("{}\n", tags.join(", "))
}

pub fn render_validation_errors(result: &ValidationResult) -> String {
    let mut lines = vec!["Please fix the following errors:\n".to_string()];
    lines.extend(result.errors.values().map(|message| format!("  - {}\n", message)));
    lines.join("")
}
