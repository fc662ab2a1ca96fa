use anyhow::Result;
use chrono::Utc;

use super::{require_user, CommandRunner};
use crate::app::App;
use crate::cli::ProfileCmd;
use crate::types::User;

fn print_user(user: &User) {
    println!("{} <{}>", user.name, user.email);
    println!("  id:        {}", user.user_id);
    println!("  CGPA:      {:.2}", user.cgpa);
    println!("  interests: {}", user.interests.join(", "));
}

impl CommandRunner for ProfileCmd {
    async fn run(&self, app: &App) -> Result<()> {
        match self {
            ProfileCmd::Set {
                name,
                email,
                cgpa,
                interests,
                user_id,
            } => {
                let existing = app.store.get_user()?;
                let user_id = match (user_id, existing) {
                    (Some(id), _) => id.clone(),
                    (None, Some(user)) => user.user_id,
                    (None, None) => Utc::now().timestamp_millis().to_string(),
                };
                let user = User {
                    user_id,
                    name: name.clone(),
                    email: email.clone(),
                    cgpa: *cgpa,
                    interests: interests
                        .iter()
                        .map(|i| i.trim().to_string())
                        .filter(|i| !i.is_empty())
                        .collect(),
                };
                app.store.set_user(&user)?;
                println!("Profile saved");
                print_user(&user);
                Ok(())
            }
            ProfileCmd::Show => {
                match app.store.get_user()? {
                    Some(user) => print_user(&user),
                    None => println!("No profile saved."),
                }
                Ok(())
            }
            ProfileCmd::ToggleInterest { interest } => {
                let mut user = require_user(&app.store)?;
                user.toggle_interest(interest.trim());
                app.store.set_user(&user)?;
                println!("Interests: {}", user.interests.join(", "));
                Ok(())
            }
            ProfileCmd::History => {
                let interactions = app.store.get_interactions()?;
                if interactions.is_empty() {
                    println!("No activity yet.");
                }
                for event in &interactions {
                    println!(
                        "{} {:<17} {:>6}  {}",
                        event.created_at.format("%Y-%m-%d %H:%M"),
                        event.event_type,
                        event.course_id,
                        event.details
                    );
                }
                Ok(())
            }
        }
    }
}
