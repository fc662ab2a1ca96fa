use anyhow::{anyhow, Result};

use crate::app::App;
use crate::cli::Command;
use crate::local_store::LocalStore;
use crate::types::User;

mod catalog;
mod electives;
mod payment;
mod profile;
mod review;

pub(crate) trait CommandRunner {
    async fn run(&self, app: &App) -> Result<()>;
}

impl Command {
    pub async fn run(&self, app: &App) -> Result<()> {
        match self {
            Command::Seed => {
                let count = crate::storage::seed(&app.storage)?;
                println!("Seeded {count} courses into {}", app.storage.path);
                Ok(())
            }
            Command::Courses {
                search,
                difficulty,
                eligible,
            } => catalog::list(app, search.as_deref(), *difficulty, *eligible).await,
            Command::Course { id } => catalog::show(app, id).await,
            Command::Recommend {
                cgpa,
                interests,
                top_k,
            } => catalog::recommend(app, *cgpa, interests, *top_k).await,
            Command::Electives { cmd } => cmd.run(app).await,
            Command::Profile { cmd } => cmd.run(app).await,
            Command::Review { cmd } => cmd.run(app).await,
            Command::Complete { course_id } => payment::complete(app, course_id).await,
            Command::Pay { course_id, payment } => payment::pay(app, course_id, payment).await,
        }
    }
}

/// Loads the saved profile or explains how to create one.
fn require_user(store: &LocalStore) -> Result<User> {
    store
        .get_user()?
        .ok_or_else(|| anyhow!("no profile saved; run `coursewise profile set` first"))
}

fn stars(avg: f64) -> String {
    format!("★ {avg:.1}")
}
