//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open a blog database (file path argument or in-memory) and report its state.
//! - Optionally enable file logging via `BLOG_LOG_DIR` / `BLOG_LOG_LEVEL`.

use blog_core::db::migrations::current_user_version;
use blog_core::db::{open_db, open_db_in_memory};
use blog_core::{
    default_log_level, init_logging, AuthorRepository, PostRepository, SqliteAuthorRepository,
    SqlitePostRepository,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("blog_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    if let Ok(log_dir) = std::env::var("BLOG_LOG_DIR") {
        let level =
            std::env::var("BLOG_LOG_LEVEL").unwrap_or_else(|_| default_log_level().to_string());
        init_logging(&level, &log_dir)?;
    }

    let conn = match std::env::args().nth(1) {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };

    let authors = SqliteAuthorRepository::try_new(&conn)?.count_authors()?;
    let posts = SqlitePostRepository::try_new(&conn)?.count_posts()?;

    println!("blog_core ping={}", blog_core::ping());
    println!("blog_core version={}", blog_core::core_version());
    println!("schema_version={}", current_user_version(&conn)?);
    println!("authors={authors}");
    println!("posts={posts}");
    Ok(())
}
