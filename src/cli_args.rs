use clap::{Args, Parser, Subcommand};
use log::debug;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineArgs {
    #[arg(long, global = true, help = "Path to a settings.json file")]
    pub config: Option<String>,

    #[arg(long = "base-url", global = true, help = "Origin of the blog API")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Totals and the most reacted posts
    Stats,
    /// List posts
    Posts(PostListArgs),
    /// Show one post with its comments and related posts
    Post { id: u64 },
    /// List users
    Users(UserListArgs),
    /// Show one user with their posts
    User { id: u64 },
    /// List tags of the first hundred posts
    Tags,
    /// Add a reaction to a post
    Like { id: u64 },
    /// Comment on a post
    Comment {
        post_id: u64,
        #[arg(long = "user-id", help = "Id of the commenting user")]
        user_id: Option<u64>,
        #[arg(long, help = "Comment text")]
        body: String,
    },
    /// Create a post
    NewPost {
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        #[arg(long, value_delimiter = ',', help = "Comma-separated tags")]
        tags: Vec<String>,
        #[arg(long = "user-id", default_value_t = 1)]
        user_id: u64,
    },
    /// Create a user
    NewUser {
        #[arg(long = "first-name")]
        first_name: String,
        #[arg(long = "last-name")]
        last_name: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, help = "Age in years")]
        age: String,
        #[arg(long)]
        gender: String,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct PostListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long, help = "Posts per page (defaults to the configured page size)")]
    pub limit: Option<u32>,
    #[arg(long, default_value = "")]
    pub search: String,
    #[arg(long, default_value = "recent", help = "recent, reactions or title")]
    pub sort: String,
    #[arg(long, help = "Only show posts with this tag")]
    pub tag: Option<String>,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct UserListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    #[arg(long, help = "Users per page (defaults to the configured page size)")]
    pub limit: Option<u32>,
    #[arg(long, default_value = "")]
    pub search: String,
    #[arg(long, default_value = "", help = "name, age or age-desc")]
    pub sort: String,
    #[arg(long, help = "Only show users of this gender")]
    pub gender: Option<String>,
}

impl CommandLineArgs {
    pub fn parse_args() -> Self {
        let args = CommandLineArgs::parse();
        debug!("Parsed command: {:?}", args.command);
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posts_defaults() {
        let args = CommandLineArgs::try_parse_from(["blogview", "posts"]).unwrap();
        match args.command {
            Command::Posts(list) => {
                assert_eq!(list.page, 1);
                assert_eq!(list.limit, None);
                assert_eq!(list.sort, "recent");
                assert_eq!(list.tag, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_users_with_options() {
        let args = CommandLineArgs::try_parse_from([
            "blogview",
            "users",
            "--page",
            "3",
            "--sort",
            "age-desc",
            "--gender",
            "female",
            "--base-url",
            "http://localhost:1234",
        ])
        .unwrap();

        assert_eq!(args.base_url.as_deref(), Some("http://localhost:1234"));
        match args.command {
            Command::Users(list) => {
                assert_eq!(list.page, 3);
                assert_eq!(list.sort, "age-desc");
                assert_eq!(list.gender.as_deref(), Some("female"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_new_post_tags_split_on_commas() {
        let args = CommandLineArgs::try_parse_from([
            "blogview",
            "new-post",
            "--title",
            "Hello world",
            "--body",
            "Some text",
            "--tags",
            "rust,web",
        ])
        .unwrap();

        assert_eq!(
            args.command,
            Command::NewPost {
                title: "Hello world".to_string(),
                body: "Some text".to_string(),
                tags: vec!["rust".to_string(), "web".to_string()],
                user_id: 1,
            }
        );
    }

    #[test]
    fn test_comment_requires_body() {
        assert!(CommandLineArgs::try_parse_from(["blogview", "comment", "4"]).is_err());
    }
}
