use clap::{Args, Subcommand};

use crate::cli::{ElectivesCmd, ProfileCmd, ReviewCmd};
use crate::recommend::DEFAULT_TOP_K;
use crate::types::Difficulty;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(
        about = "Load the sample catalog into the database",
        long_about = "Clear every table of the backend database and insert the sample courses and college electives."
    )]
    Seed,
    #[command(
        about = "List and filter courses",
        long_about = "Fetch the course list from the backend (or the bundled data) and filter it by search text, difficulty and CGPA eligibility."
    )]
    Courses {
        #[arg(long, value_name = "TEXT", help = "Match title, provider or tag")]
        search: Option<String>,
        #[arg(long, value_name = "LEVEL", help = "Beginner, Intermediate or Advanced")]
        difficulty: Option<Difficulty>,
        #[arg(
            long,
            default_value_t = false,
            help = "Only courses whose minimum CGPA the saved profile meets"
        )]
        eligible: bool,
    },
    #[command(about = "Show one course with its reviews and average rating")]
    Course {
        #[arg(value_name = "COURSE_ID")]
        id: String,
    },
    #[command(
        about = "Recommend courses",
        long_about = "Ask the backend recommender for the best matches; falls back to a local filter over the course list. CGPA and interests default to the saved profile."
    )]
    Recommend {
        #[arg(long, value_name = "CGPA")]
        cgpa: Option<f64>,
        #[arg(long, value_name = "TAGS", value_delimiter = ',')]
        interests: Vec<String>,
        #[arg(long, default_value_t = DEFAULT_TOP_K, value_name = "N")]
        top_k: usize,
    },
    #[command(about = "Browse college electives and elective baskets")]
    Electives {
        #[command(subcommand)]
        cmd: ElectivesCmd,
    },
    #[command(about = "Manage the saved student profile")]
    Profile {
        #[command(subcommand)]
        cmd: ProfileCmd,
    },
    #[command(about = "Write, list, edit and delete reviews")]
    Review {
        #[command(subcommand)]
        cmd: ReviewCmd,
    },
    #[command(about = "Mark a course as completed")]
    Complete {
        #[arg(value_name = "COURSE_ID")]
        course_id: String,
    },
    #[command(
        about = "Run the simulated checkout for a course",
        long_about = "Validate the payment form for one of UPI, card or net banking and record the purchase. No money moves."
    )]
    Pay {
        #[arg(value_name = "COURSE_ID")]
        course_id: String,
        #[command(flatten)]
        payment: PaymentArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct PaymentArgs {
    #[arg(long, value_name = "VPA", help = "Pay with UPI")]
    pub upi: Option<String>,
    #[arg(long, value_name = "NAME", help = "Name on the card")]
    pub card_name: Option<String>,
    #[arg(long, value_name = "NUMBER", help = "Pay by card")]
    pub card_number: Option<String>,
    #[arg(long, value_name = "MM/YY")]
    pub expiry: Option<String>,
    #[arg(long, value_name = "CVV")]
    pub cvv: Option<String>,
    #[arg(long, value_name = "BANK", help = "Pay with net banking")]
    pub bank: Option<String>,
    #[arg(long, value_name = "NUMBER")]
    pub account_number: Option<String>,
    #[arg(long, value_name = "IFSC")]
    pub ifsc: Option<String>,
}
