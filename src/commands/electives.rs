use anyhow::{anyhow, Context, Result};
use chrono::Utc;

use super::{review::print_thread, stars, CommandRunner};
use crate::app::App;
use crate::catalog::ElectiveFilter;
use crate::cli::ElectivesCmd;
use crate::reviews::ReviewThread;

fn print_section(title: &str, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    println!("{title}:");
    for line in lines {
        println!("  - {line}");
    }
}

impl CommandRunner for ElectivesCmd {
    async fn run(&self, app: &App) -> Result<()> {
        let catalog = app
            .client
            .load_electives()
            .await
            .context("loading electives")?;

        match self {
            ElectivesCmd::List { search, semester } => {
                let filter = ElectiveFilter {
                    search: search.clone(),
                    semester: semester.clone(),
                };
                let shown = filter.apply(&catalog.electives);
                for elective in &shown {
                    println!(
                        "{:>6}  {} ({}, {} semester) {} ({})",
                        elective.elective_id,
                        elective.name,
                        elective.department,
                        elective.semester,
                        stars(elective.avg_rating),
                        elective.rating_count
                    );
                }
                if !catalog.basket_electives.is_empty() {
                    println!();
                    println!("Baskets:");
                    for basket in &catalog.basket_electives {
                        println!(
                            "{:>6}  {} ({} subjects) {}",
                            basket.basket_id,
                            basket.basket_name,
                            basket.courses.len(),
                            stars(basket.avg_rating)
                        );
                    }
                }
                Ok(())
            }
            ElectivesCmd::Show { elective_id } => {
                let elective = catalog
                    .find_elective(elective_id)
                    .ok_or_else(|| anyhow!("elective {elective_id} not found"))?;
                let local = app.store.get_reviews_by_course(elective_id)?;
                let thread = ReviewThread::merged(
                    elective_id,
                    &elective.reviews,
                    &local,
                    elective.avg_rating,
                    Utc::now(),
                );

                println!("{} ({})", elective.name, elective.department);
                println!("  semester: {}", elective.semester);
                if !elective.description.is_empty() {
                    println!();
                    println!("{}", elective.description);
                }
                println!();
                print_thread(&thread);
                Ok(())
            }
            ElectivesCmd::Basket { basket_id } => {
                let basket = catalog
                    .find_basket(basket_id)
                    .ok_or_else(|| anyhow!("basket {basket_id} not found"))?;
                let local = app.store.get_reviews_by_course(basket_id)?;
                let thread = ReviewThread::merged(
                    basket_id,
                    &basket.reviews,
                    &local,
                    basket.avg_rating,
                    Utc::now(),
                );

                println!("{}", basket.basket_name);
                if !basket.description.is_empty() {
                    println!("{}", basket.description);
                }
                println!();
                for subject in &basket.courses {
                    println!(
                        "{:>6}  {} {} (L-T-P {}-{}-{}, {} credits) {}",
                        subject.elective_id,
                        subject.course_no,
                        subject.name,
                        subject.l,
                        subject.t,
                        subject.p,
                        subject.credits,
                        stars(subject.avg_rating)
                    );
                }
                println!();
                print_thread(&thread);
                Ok(())
            }
            ElectivesCmd::Subject {
                basket_id,
                subject_id,
            } => {
                let (basket, subject) = catalog
                    .find_subject(basket_id, subject_id)
                    .ok_or_else(|| anyhow!("subject {subject_id} not found in basket {basket_id}"))?;
                let local = app.store.get_reviews_by_course(subject_id)?;
                let thread = ReviewThread::merged(
                    subject_id,
                    &subject.reviews,
                    &local,
                    subject.avg_rating,
                    Utc::now(),
                );

                println!("{} {} ({})", subject.course_no, subject.name, basket.basket_name);
                println!(
                    "  L-T-P: {}-{}-{}  credits: {}",
                    subject.l, subject.t, subject.p, subject.credits
                );
                if let Some(evaluation) = &subject.evaluation {
                    println!("  evaluation: MST {} / EST {}", evaluation.mst, evaluation.est);
                }
                if !subject.description.is_empty() {
                    println!();
                    println!("{}", subject.description);
                }
                println!();
                print_section("Objectives", &subject.objectives);
                print_section("Topics", &subject.topics);
                print_section("Outcomes", &subject.outcomes);
                print_section("Books", &subject.books);
                if let Some(lab_work) = &subject.lab_work {
                    println!("Lab work: {lab_work}");
                }
                if let Some(self_learning) = &subject.self_learning {
                    println!("Self learning: {self_learning}");
                }
                println!();
                print_thread(&thread);
                Ok(())
            }
        }
    }
}
