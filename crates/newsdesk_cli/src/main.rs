//! CLI smoke entry point.
//!
//! # Responsibility
//! - Wire configuration, logging and an in-memory store into the core.
//! - Print a deterministic category/article report for quick sanity checks.

use log::warn;
use newsdesk_core::{
    core_version, init_logging, ContentCore, CoreConfig, InMemoryDocumentStore, Language,
    NewArticle,
};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match CoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("newsdesk config error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(log_dir) = config.log_dir.as_deref() {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("newsdesk logging disabled: {err}");
        }
    }

    println!("newsdesk_core version={}", core_version());

    let core = ContentCore::new(Arc::new(InMemoryDocumentStore::new()), &config);
    let seeded = core.start(&config).await;
    println!("seeded_categories={seeded}");

    let sample = NewArticle::draft(
        "Local team wins the regional final",
        "The home side held on in the last minutes to lift the trophy.",
        "Sports",
        Language::English,
    )
    .with_auto_summary();
    if let Err(err) = core.articles.create_article(&sample).await {
        warn!("event=cli_sample module=cli status=error error={err}");
        eprintln!("sample article not created: {err}");
    }

    match core.categories.list_with_counts().await {
        Ok(rows) => {
            for row in rows {
                println!(
                    "category={} hindi={} active={} articles={}",
                    row.category.name,
                    row.category.name_hindi,
                    row.category.is_active,
                    row.article_count
                );
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("listing categories failed: {err}");
            ExitCode::FAILURE
        }
    }
}
