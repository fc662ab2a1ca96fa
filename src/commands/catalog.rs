use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;

use super::{require_user, stars};
use crate::app::App;
use crate::catalog::CourseFilter;
use crate::reviews::ReviewThread;
use crate::types::{Course, Difficulty};

fn print_course_line(course: &Course) {
    println!(
        "{:>4}  {} ({}) [{}] {} ({}) min CGPA {:.1}",
        course.course_id,
        course.title,
        course.provider,
        course.difficulty,
        stars(course.avg_rating),
        course.rating_count,
        course.min_cgpa
    );
}

pub(super) async fn list(
    app: &App,
    search: Option<&str>,
    difficulty: Option<Difficulty>,
    eligible: bool,
) -> Result<()> {
    let courses = app
        .client
        .get_all_courses()
        .await
        .context("loading courses")?;
    app.store.set_courses(&courses)?;

    let mut filter = CourseFilter::default();
    if let Some(search) = search {
        filter = filter.with_search(search);
    }
    if let Some(difficulty) = difficulty {
        filter = filter.with_difficulty(difficulty);
    }
    if eligible {
        let user = require_user(&app.store)?;
        filter = filter.eligible_for(user.cgpa);
    }

    let shown = filter.apply(&courses);
    if shown.is_empty() {
        println!("No courses match.");
        return Ok(());
    }
    for course in &shown {
        print_course_line(course);
    }
    log::debug!("listed {} of {} courses", shown.len(), courses.len());
    Ok(())
}

pub(super) async fn show(app: &App, course_id: &str) -> Result<()> {
    let course = app
        .client
        .get_course_by_id(course_id)
        .await
        .context("loading course")?
        .ok_or_else(|| anyhow!("course {course_id} not found"))?;

    let local = app.store.get_reviews_by_course(&course.course_id)?;
    let thread = ReviewThread::merged(&course.course_id, &[], &local, course.avg_rating, Utc::now());

    println!("{} ({})", course.title, course.provider);
    println!("  difficulty: {}", course.difficulty);
    println!("  duration:   {} weeks", course.duration_weeks);
    println!("  min CGPA:   {:.1}", course.min_cgpa);
    println!("  tags:       {}", course.tags.join(", "));
    if !course.url.is_empty() {
        println!("  url:        {}", course.url);
    }
    if !course.description.is_empty() {
        println!();
        println!("{}", course.description);
    }
    println!();
    super::review::print_thread(&thread);
    Ok(())
}

pub(super) async fn recommend(
    app: &App,
    cgpa: Option<f64>,
    interests: &[String],
    top_k: usize,
) -> Result<()> {
    let profile = app.store.get_user()?;
    let cgpa = match (cgpa, profile.as_ref()) {
        (Some(cgpa), _) => cgpa,
        (None, Some(user)) => user.cgpa,
        (None, None) => bail!("pass --cgpa or save a profile first"),
    };
    let interests = match profile {
        Some(user) if interests.is_empty() => user.interests,
        _ => interests.to_vec(),
    };

    let results = app
        .client
        .get_recommended_courses(cgpa, &interests, top_k)
        .await
        .context("computing recommendations")?;
    if results.is_empty() {
        println!("No recommendations for CGPA {cgpa:.1}.");
        return Ok(());
    }
    for course in &results {
        print_course_line(course);
    }
    Ok(())
}
