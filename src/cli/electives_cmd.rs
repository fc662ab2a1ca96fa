use clap::Subcommand;

#[derive(Subcommand, Debug, Clone)]
pub enum ElectivesCmd {
    #[command(about = "List electives, optionally filtered")]
    List {
        #[arg(long, default_value = "", value_name = "TEXT", help = "Match name or department")]
        search: String,
        #[arg(long, value_name = "SEMESTER", help = "e.g. 6th or 7th")]
        semester: Option<String>,
    },
    #[command(about = "Show one elective with its reviews")]
    Show {
        #[arg(value_name = "ELECTIVE_ID")]
        elective_id: String,
    },
    #[command(about = "Show an elective basket, its subjects and reviews")]
    Basket {
        #[arg(value_name = "BASKET_ID")]
        basket_id: String,
    },
    #[command(about = "Show the syllabus and reviews of one subject in a basket")]
    Subject {
        #[arg(value_name = "BASKET_ID")]
        basket_id: String,
        #[arg(value_name = "SUBJECT_ID")]
        subject_id: String,
    },
}
