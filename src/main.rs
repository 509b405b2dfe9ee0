mod cli_args;

use anyhow::{anyhow, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use serde_json::{json, Map, Value};
use std::time::{Duration, Instant};

use blogview::render;
use blogview::settings::Settings;
use blogview::validation::{as_number, presets, validate_form, FormRules};
use blogview::{
    CommentDraft, ListOptions, PostDraft, PostQueryState, PostSort, QueryAction, QueryClient,
    UserDraft, UserQueryState, UserSort,
};
use cli_args::{Command, CommandLineArgs, PostListArgs, UserListArgs};

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let start_time = Instant::now();
    debug!("BlogView v{} starting up...", env!("CARGO_PKG_VERSION"));

    let cli_args = CommandLineArgs::parse_args();

    let mut settings = Settings::resolve(cli_args.config.as_deref())?;
    if let Some(base_url) = &cli_args.base_url {
        settings.apply_base_url_override(base_url);
    }

    let client = QueryClient::from_settings(&settings.api)?;
    run(&client, &settings, cli_args.command)?;

    debug!(
        "Finished in {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

fn run(client: &QueryClient, settings: &Settings, command: Command) -> Result<()> {
    match command {
        Command::Stats => show_home(client, settings),
        Command::Posts(args) => show_posts(client, settings, args),
        Command::Post { id } => show_post(client, settings, id),
        Command::Users(args) => show_users(client, settings, args),
        Command::User { id } => show_user(client, id),
        Command::Tags => {
            let tags = with_spinner("Loading tags...", || client.get_all_tags())?;
            print!("{}", render::render_tags(&tags));
            Ok(())
        }
        Command::Like { id } => like(client, id),
        Command::Comment {
            post_id,
            user_id,
            body,
        } => comment(client, post_id, user_id, body),
        Command::NewPost {
            title,
            body,
            tags,
            user_id,
        } => new_post(client, title, body, tags, user_id),
        Command::NewUser {
            first_name,
            last_name,
            username,
            email,
            age,
            gender,
        } => new_user(
            client,
            json!({
                "firstName": first_name.trim(),
                "lastName": last_name.trim(),
                "username": username.trim(),
                "email": email.trim(),
                "age": age.trim(),
                "gender": gender.trim(),
            }),
        ),
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn with_spinner<T, F>(message: &str, work: F) -> T
where
    F: FnOnce() -> T,
{
    let pb = create_spinner(message);
    let result = work();
    pb.finish_and_clear();
    result
}

fn show_home(client: &QueryClient, settings: &Settings) -> Result<()> {
    let stats = with_spinner("Loading dashboard...", || client.get_dashboard_stats());
    print!("{}", render::render_stats(&stats));

    let featured = with_spinner("Loading featured posts...", || {
        client.list_posts(
            1,
            settings.display.featured_posts,
            &ListOptions::new().sort_by(PostSort::Reactions),
        )
    })?;

    println!("\n### Featured posts\n");
    print!("{}", render::render_post_page(&featured));
    Ok(())
}

fn show_posts(client: &QueryClient, settings: &Settings, args: PostListArgs) -> Result<()> {
    let sort_by: PostSort = args.sort.parse()?;
    let state = PostQueryState::new(args.limit.unwrap_or(settings.display.page_size))
        .reduce(QueryAction::Search(args.search))
        .reduce(QueryAction::Sort(sort_by))
        .reduce(QueryAction::Filter(args.tag))
        .starting_at(args.page);

    let page = with_spinner("Loading posts...", || client.fetch_posts(&state))?;
    let state = state
        .reduce(QueryAction::Loaded {
            total_pages: page.total_pages,
        })
        .reduce(QueryAction::GoToPage(page.current_page));

    print!("{}", render::render_post_page(&page));
    print!("{}", render::render_pagination(&state));
    Ok(())
}

fn show_post(client: &QueryClient, settings: &Settings, id: u64) -> Result<()> {
    let (post, thread, related) = with_spinner("Loading post...", || -> Result<_> {
        let post = client.get_post_by_id(id)?;
        let thread = client.get_post_comments(id)?;
        let related = client
            .get_related_posts(id, &post.tags, settings.display.related_posts)
            .unwrap_or_else(|e| {
                warn!("Could not load related posts: {}", e);
                Vec::new()
            });
        Ok((post, thread, related))
    })?;

    print!("{}", render::render_post_details(&post, &thread, &related));
    Ok(())
}

fn show_users(client: &QueryClient, settings: &Settings, args: UserListArgs) -> Result<()> {
    let sort_by: UserSort = args.sort.parse()?;
    let state = UserQueryState::new(args.limit.unwrap_or(settings.display.page_size))
        .reduce(QueryAction::Search(args.search))
        .reduce(QueryAction::Sort(sort_by))
        .reduce(QueryAction::Filter(args.gender))
        .starting_at(args.page);

    let page = with_spinner("Loading users...", || client.fetch_users(&state))?;
    let state = state
        .reduce(QueryAction::Loaded {
            total_pages: page.total_pages,
        })
        .reduce(QueryAction::GoToPage(page.current_page));

    print!("{}", render::render_user_page(&page));
    print!("{}", render::render_pagination(&state));
    Ok(())
}

fn show_user(client: &QueryClient, id: u64) -> Result<()> {
    let user = with_spinner("Loading user...", || client.get_user_by_id(id))?;
    print!("{}", render::render_user_details(&user));
    Ok(())
}

fn like(client: &QueryClient, id: u64) -> Result<()> {
    let mut post = client.get_post_by_id(id)?;
    let reconciled = client.like_post(&mut post)?;
    if !reconciled.agreed {
        info!("Server adjusted the reaction count");
    }
    println!("{} | {}", post.title, render::format_reactions(post.reactions));
    Ok(())
}

/// Validate `data` against `rules`, printing every message when it fails
fn check_form(data: &Value, rules: &FormRules) -> Result<()> {
    let empty = Map::new();
    let result = validate_form(data.as_object().unwrap_or(&empty), rules);
    if result.is_valid {
        return Ok(());
    }
    eprint!("{}", render::render_validation_errors(&result));
    Err(anyhow!("{} field(s) failed validation", result.errors.len()))
}

fn comment(client: &QueryClient, post_id: u64, user_id: Option<u64>, body: String) -> Result<()> {
    let body = body.trim().to_string();
    check_form(
        &json!({ "body": body, "userId": user_id }),
        &presets::comment_form(),
    )?;

    let draft = CommentDraft {
        body,
        user_id: user_id.ok_or_else(|| anyhow!("missing user id"))?,
    };
    let created = client.add_comment(post_id, &draft)?;
    println!("Comment {} added to post {}", created.id, post_id);
    Ok(())
}

fn new_post(
    client: &QueryClient,
    title: String,
    body: String,
    tags: Vec<String>,
    user_id: u64,
) -> Result<()> {
    let draft = PostDraft {
        title: title.trim().to_string(),
        body: body.trim().to_string(),
        tags: tags
            .into_iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect(),
        user_id,
    };
    check_form(&serde_json::to_value(&draft)?, &presets::post_form())?;

    let created = client.add_post(&draft)?;
    println!("Created post {}: {}", created.id, created.title);
    Ok(())
}

/// Whole years from a validated age field; infinite or out-of-range values are refused
fn age_in_years(value: &Value) -> Result<u32> {
    as_number(value)
        .filter(|age| age.is_finite() && *age >= 0.0 && *age <= f64::from(u32::MAX))
        .map(|age| age as u32)
        .ok_or_else(|| anyhow!("Age must be a whole number of years"))
}

fn new_user(client: &QueryClient, form: Value) -> Result<()> {
    check_form(&form, &presets::user_form())?;

    let text = |field: &str| form[field].as_str().unwrap_or_default().to_string();
    let draft = UserDraft {
        first_name: text("firstName"),
        last_name: text("lastName"),
        username: text("username"),
        email: text("email"),
        age: age_in_years(&form["age"])?,
        gender: text("gender"),
        phone: None,
    };

    let created = client.add_user(&draft)?;
    println!("Created user {}: {}", created.id, created.full_name());
    Ok(())
}
