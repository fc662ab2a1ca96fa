use clap::{Args, Subcommand};

/// Which catalog entry a review is about.
#[derive(Args, Debug, Clone, Default)]
pub struct ReviewTargetArgs {
    #[arg(long, value_name = "COURSE_ID", conflicts_with_all = ["elective", "basket"])]
    pub course: Option<String>,
    #[arg(long, value_name = "ELECTIVE_ID", conflicts_with = "basket")]
    pub elective: Option<String>,
    #[arg(long, value_name = "BASKET_ID")]
    pub basket: Option<String>,
    #[arg(long, value_name = "SUBJECT_ID", requires = "basket")]
    pub subject: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ReviewCmd {
    #[command(about = "Submit a review and print the new average")]
    Add {
        #[command(flatten)]
        target: ReviewTargetArgs,
        #[arg(long, value_name = "1-5")]
        rating: i64,
        #[arg(long, default_value = "")]
        pros: String,
        #[arg(long, default_value = "")]
        cons: String,
        #[arg(long, default_value = "")]
        comment: String,
        #[arg(long, default_value_t = false, help = "Review written by a senior student")]
        senior: bool,
    },
    #[command(about = "Show all reviews for a course, elective, basket or subject")]
    Show {
        #[command(flatten)]
        target: ReviewTargetArgs,
    },
    #[command(about = "List reviews written under the saved profile's name")]
    Mine,
    #[command(about = "Edit one of your reviews")]
    Edit {
        #[arg(value_name = "REVIEW_ID")]
        review_id: String,
        #[arg(long, value_name = "1-5")]
        rating: Option<i64>,
        #[arg(long)]
        pros: Option<String>,
        #[arg(long)]
        cons: Option<String>,
        #[arg(long)]
        comment: Option<String>,
    },
    #[command(about = "Delete one of your reviews")]
    Delete {
        #[arg(value_name = "REVIEW_ID")]
        review_id: String,
    },
}
