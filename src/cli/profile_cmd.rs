use clap::Subcommand;

#[derive(Subcommand, Debug, Clone)]
pub enum ProfileCmd {
    #[command(
        about = "Create or replace the saved profile",
        long_about = "Save the student's name, email, CGPA and interests. These drive eligibility filters and recommendations."
    )]
    Set {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, value_name = "CGPA")]
        cgpa: f64,
        #[arg(long, value_name = "TAGS", value_delimiter = ',')]
        interests: Vec<String>,
        #[arg(long, value_name = "ID", help = "Defaults to one derived from the email")]
        user_id: Option<String>,
    },
    #[command(about = "Print the saved profile")]
    Show,
    #[command(about = "Add the interest if missing, remove it otherwise")]
    ToggleInterest {
        #[arg(value_name = "TAG")]
        interest: String,
    },
    #[command(about = "List the saved interaction history")]
    History,
}
