use colored::*;
use futures::FutureExt;
use sea_orm_migration::prelude::*;
use std::io::{self, Write};
use std::time::Instant;

const STATUS_COLUMN: usize = 72;

/// Applies every migration in order, printing one status line per step.
///
/// Exits the process on the first failure so a half-built schema is obvious.
pub async fn run_all_migrations(url: &str) {
    let db = sea_orm::Database::connect(url)
        .await
        .expect("DB connection failed");

    let migrations = <migration::Migrator as MigratorTrait>::migrations();
    println!("Running {} migrations...", migrations.len());
    let schema_manager = SchemaManager::new(&db);

    let started = Instant::now();
    for migration in migrations {
        run_migration(&schema_manager, migration).await;
    }
    println!("{} {}", "Schema ready".green().bold(), format!("({:.2?})", started.elapsed()).dimmed());
}

async fn run_migration(schema_manager: &SchemaManager<'_>, migration: Box<dyn MigrationTrait>) {
    let label = format!("  {}", migration.name().bold());
    let dots = ".".repeat(STATUS_COLUMN.saturating_sub(label.len()));
    print!("{}{} ", label, dots);
    let _ = io::stdout().flush();

    let start = Instant::now();
    let result = std::panic::AssertUnwindSafe(migration.up(schema_manager))
        .catch_unwind()
        .await;

    match result {
        Ok(Ok(())) => {
            println!("{} {}", "done".green(), format!("({:.2?})", start.elapsed()).dimmed());
        }
        Ok(Err(err)) => {
            println!("{}", "failed".red());
            eprintln!("{err}");
            std::process::exit(1);
        }
        Err(_) => {
            println!("{}", "panicked".red());
            std::process::exit(1);
        }
    }
}
