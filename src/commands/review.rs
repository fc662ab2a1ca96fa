use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;

use super::{require_user, CommandRunner};
use crate::app::App;
use crate::cli::{ReviewCmd, ReviewTargetArgs};
use crate::reviews::{reviews_by_author, ReviewDraft, ReviewThread};
use crate::types::{validate_rating, BundledReview, Review};

/// The thing being reviewed, resolved against the catalog.
struct Target {
    id: String,
    label: String,
    bundled: Vec<BundledReview>,
    listed_avg: f64,
    /// Basket reviews are always shown as senior reviews.
    senior_only: bool,
}

impl Target {
    fn is_senior(&self, requested: bool) -> bool {
        requested || self.senior_only
    }
}

async fn resolve(app: &App, args: &ReviewTargetArgs) -> Result<Target> {
    if let Some(course_id) = &args.course {
        let course = app
            .client
            .get_course_by_id(course_id)
            .await
            .context("loading course")?
            .ok_or_else(|| anyhow!("course {course_id} not found"))?;
        return Ok(Target {
            id: course.course_id,
            label: course.title,
            bundled: Vec::new(),
            listed_avg: course.avg_rating,
            senior_only: false,
        });
    }

    let catalog = app
        .client
        .load_electives()
        .await
        .context("loading electives")?;

    match (&args.elective, &args.basket, &args.subject) {
        (Some(elective_id), _, _) => {
            let elective = catalog
                .find_elective(elective_id)
                .ok_or_else(|| anyhow!("elective {elective_id} not found"))?;
            Ok(Target {
                id: elective.elective_id.clone(),
                label: elective.name.clone(),
                bundled: elective.reviews.clone(),
                listed_avg: elective.avg_rating,
                senior_only: false,
            })
        }
        (None, Some(basket_id), Some(subject_id)) => {
            let (_, subject) = catalog
                .find_subject(basket_id, subject_id)
                .ok_or_else(|| anyhow!("subject {subject_id} not found in basket {basket_id}"))?;
            Ok(Target {
                id: subject.elective_id.clone(),
                label: subject.name.clone(),
                bundled: subject.reviews.clone(),
                listed_avg: subject.avg_rating,
                senior_only: false,
            })
        }
        (None, Some(basket_id), None) => {
            let basket = catalog
                .find_basket(basket_id)
                .ok_or_else(|| anyhow!("basket {basket_id} not found"))?;
            Ok(Target {
                id: basket.basket_id.clone(),
                label: basket.basket_name.clone(),
                bundled: basket.reviews.clone(),
                listed_avg: basket.avg_rating,
                senior_only: true,
            })
        }
        (None, None, _) => bail!("pick what to review with --course, --elective or --basket"),
    }
}

fn print_review(review: &Review) {
    let badge = if review.is_senior { " [senior]" } else { "" };
    println!(
        "{} {}/5 by {}{} on {}",
        review.review_id,
        review.rating,
        review.reviewer_name,
        badge,
        review.created_at.format("%Y-%m-%d")
    );
    if !review.pros.is_empty() {
        println!("    + {}", review.pros);
    }
    if !review.cons.is_empty() {
        println!("    - {}", review.cons);
    }
    if !review.comment.is_empty() {
        println!("    {}", review.comment);
    }
}

pub(super) fn print_thread(thread: &ReviewThread) {
    println!(
        "Reviews ({}), average {:.1}",
        thread.len(),
        thread.average()
    );
    for review in &thread.reviews {
        print_review(review);
    }
}

/// Finds one of the profile owner's reviews.
fn own_review(app: &App, review_id: &str) -> Result<Review> {
    let user = require_user(&app.store)?;
    let review = app
        .store
        .get_reviews()?
        .into_iter()
        .find(|r| r.review_id == review_id)
        .ok_or_else(|| anyhow!("review {review_id} not found"))?;
    if review.reviewer_name != user.name {
        bail!("review {review_id} was written by {}", review.reviewer_name);
    }
    Ok(review)
}

impl CommandRunner for ReviewCmd {
    async fn run(&self, app: &App) -> Result<()> {
        match self {
            ReviewCmd::Add {
                target,
                rating,
                pros,
                cons,
                comment,
                senior,
            } => {
                let user = require_user(&app.store)?;
                let target = resolve(app, target).await?;
                let local = app.store.get_reviews_by_course(&target.id)?;
                let now = Utc::now();
                let mut thread =
                    ReviewThread::merged(&target.id, &target.bundled, &local, target.listed_avg, now);

                let review = ReviewDraft {
                    rating: *rating,
                    pros: pros.clone(),
                    cons: cons.clone(),
                    comment: comment.clone(),
                    is_senior: target.is_senior(*senior),
                }
                .into_review(&user, &target.id, now)?;
                app.store.add_review(&review)?;
                let average = thread.add(review);

                log::info!("📝 Review saved for {}", target.id);
                println!(
                    "Reviewed {}: {} reviews, new average {:.1}",
                    target.label,
                    thread.len(),
                    average
                );
                Ok(())
            }
            ReviewCmd::Show { target } => {
                let target = resolve(app, target).await?;
                let local = app.store.get_reviews_by_course(&target.id)?;
                let thread = ReviewThread::merged(
                    &target.id,
                    &target.bundled,
                    &local,
                    target.listed_avg,
                    Utc::now(),
                );
                println!("{}", target.label);
                print_thread(&thread);
                Ok(())
            }
            ReviewCmd::Mine => {
                let user = require_user(&app.store)?;
                let mine = reviews_by_author(&app.store.get_reviews()?, &user.name);
                if mine.is_empty() {
                    println!("You have not written any reviews yet.");
                }
                for review in &mine {
                    println!("[{}]", review.course_id);
                    print_review(review);
                }
                Ok(())
            }
            ReviewCmd::Edit {
                review_id,
                rating,
                pros,
                cons,
                comment,
            } => {
                let mut review = own_review(app, review_id)?;
                if let Some(rating) = rating {
                    review.rating = validate_rating(*rating)?;
                }
                if let Some(pros) = pros {
                    review.pros = pros.clone();
                }
                if let Some(cons) = cons {
                    review.cons = cons.clone();
                }
                if let Some(comment) = comment {
                    review.comment = comment.clone();
                }
                if !app.store.update_review(&review)? {
                    bail!("review {review_id} not found");
                }
                println!("Updated review {review_id}");
                Ok(())
            }
            ReviewCmd::Delete { review_id } => {
                own_review(app, review_id)?;
                if !app.store.delete_review(review_id)? {
                    bail!("review {review_id} not found");
                }
                println!("Deleted review {review_id}");
                Ok(())
            }
        }
    }
}
