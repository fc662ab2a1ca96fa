use clap::Parser;
use std::env;

use crate::cli::command::Command;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Course and elective discovery: catalog API, recommendations and reviews",
    long_about = "Serves the course catalog REST API (default) or runs one-shot commands that browse courses and electives, compute recommendations and manage a student's local reviews.",
    subcommand_required = false,
    arg_required_else_help = false
)]
pub struct Cli {
    #[arg(
        long,
        env = "COURSEWISE_DATA_DIR",
        default_value = ".coursewise/",
        value_name = "DIR",
        help = "Directory holding the SQLite database and the local store"
    )]
    pub data_dir: String,

    #[arg(
        long,
        env = "COURSEWISE_BUNDLED_DIR",
        default_value = "data/",
        value_name = "DIR",
        help = "Directory with the bundled courses.json and electives.json"
    )]
    pub bundled_dir: String,

    #[arg(
        long,
        env = "COURSEWISE_API_URL",
        default_value = "http://127.0.0.1:8000/",
        value_name = "URL",
        help = "Backend URL used by the client commands before falling back to bundled data"
    )]
    pub api_url: String,

    #[arg(
        long = "api-listen",
        env = "COURSEWISE_API_LISTEN",
        value_name = "ADDR",
        default_value = "127.0.0.1:8000",
        help = "REST API listen address (host:port)"
    )]
    pub api_listen: std::net::SocketAddr,

    #[arg(
        long = "log-file",
        env = "COURSEWISE_LOG_FILE",
        value_name = "PATH",
        help = "Write logs to PATH (in addition to stderr)"
    )]
    pub log_file: Option<String>,

    #[arg(
        long,
        default_value_t = false,
        help = "Reset all persisted state (delete the SQLite database) before starting"
    )]
    pub reset: bool,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

pub fn parse() -> Cli {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    dotenvy::from_filename(&dotenv_path).ok();
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Command, ReviewCmd};
    use crate::types::Difficulty;

    #[test]
    fn defaults_to_server_mode() {
        let cli = Cli::try_parse_from(["coursewise"]).unwrap();
        assert!(cli.cmd.is_none());
        assert_eq!(cli.api_listen.port(), 8000);
        assert!(!cli.reset);
    }

    #[test]
    fn parses_course_filters() {
        let cli = Cli::try_parse_from([
            "coursewise",
            "courses",
            "--search",
            "ml",
            "--difficulty",
            "advanced",
            "--eligible",
        ])
        .unwrap();
        match cli.cmd {
            Some(Command::Courses {
                search,
                difficulty,
                eligible,
            }) => {
                assert_eq!(search.as_deref(), Some("ml"));
                assert_eq!(difficulty, Some(Difficulty::Advanced));
                assert!(eligible);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_comma_separated_interests() {
        let cli = Cli::try_parse_from([
            "coursewise",
            "recommend",
            "--cgpa",
            "7.5",
            "--interests",
            "ml,cloud",
        ])
        .unwrap();
        match cli.cmd {
            Some(Command::Recommend {
                cgpa,
                interests,
                top_k,
            }) => {
                assert_eq!(cgpa, Some(7.5));
                assert_eq!(interests, vec!["ml", "cloud"]);
                assert_eq!(top_k, 10);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_nested_review_command() {
        let cli = Cli::try_parse_from([
            "coursewise",
            "review",
            "add",
            "--basket",
            "B1",
            "--subject",
            "S2",
            "--rating",
            "4",
        ])
        .unwrap();
        match cli.cmd {
            Some(Command::Review {
                cmd: ReviewCmd::Add { target, rating, .. },
            }) => {
                assert_eq!(target.basket.as_deref(), Some("B1"));
                assert_eq!(target.subject.as_deref(), Some("S2"));
                assert_eq!(rating, 4);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
