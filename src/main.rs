use std::sync::Arc;

use idea_board::IdeaBoard;
use idea_board::config::Config;
use idea_board::models::{NewIdea, StaticUserDirectory, User, UserRole, UserStatus};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn demo_users() -> Vec<User> {
    let user = |user_id: i64, name: &str, email: &str, role: UserRole, department: &str| User {
        user_id,
        name: name.to_string(),
        email: email.to_string(),
        role,
        department: department.to_string(),
        status: UserStatus::Active,
        joined_date: chrono::Utc::now(),
        last_login_date: None,
    };

    vec![
        user(1, "Admin User", "admin@company.com", UserRole::Admin, "Executive"),
        user(2, "John Manager", "john.manager@company.com", UserRole::Manager, "Engineering"),
        user(4, "Alice Developer", "alice.dev@company.com", UserRole::Employee, "Engineering"),
    ]
}

fn seed_if_empty(board: &IdeaBoard, submitted_by: i64) {
    if !board.ideas.get_all().is_empty() {
        return;
    }

    board.ideas.create_idea(NewIdea {
        title: Some("Make meetings shorter".to_string()),
        description: Some("Try a standing 15 minute meeting to encourage concise updates.".to_string()),
        category_id: Some(1),
        category: Some("Process".to_string()),
        submitted_by_user_id: Some(submitted_by),
        ..Default::default()
    });
    board.ideas.create_idea(NewIdea {
        title: Some("Introduce flexible hours".to_string()),
        description: Some(
            "Allow employees to choose flexible start/end times to improve work-life balance."
                .to_string(),
        ),
        category_id: Some(2),
        category: Some("HR".to_string()),
        submitted_by_user_id: Some(submitted_by),
        ..Default::default()
    });
    tracing::info!("Seeded demo ideas");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "idea_board=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    let board = IdeaBoard::from_config(&config)?
        .with_directory(Arc::new(StaticUserDirectory::new(demo_users())));

    let subscription = board
        .ideas
        .subscribe(|ideas| tracing::info!("Idea snapshot now holds {} ideas", ideas.len()));

    if config.seed_demo_data {
        seed_if_empty(&board, 4);
    }

    board.ideas.unsubscribe(subscription);

    println!("{}", serde_json::to_string_pretty(board.ideas.get_all().as_ref())?);
    Ok(())
}
