use anyhow::{anyhow, bail, Context, Result};

use super::require_user;
use crate::app::App;
use crate::cli::PaymentArgs;
use crate::payment::{complete_payment, PaymentMethod};
use crate::types::{EventType, Interaction};

impl PaymentArgs {
    /// Picks the method from whichever group of flags was given.
    pub fn method(&self) -> Result<PaymentMethod> {
        let card = self.card_number.is_some() || self.card_name.is_some();
        let bank = self.bank.is_some() || self.account_number.is_some() || self.ifsc.is_some();
        match (&self.upi, card, bank) {
            (Some(upi_id), false, false) => Ok(PaymentMethod::Upi {
                upi_id: upi_id.clone(),
            }),
            (None, true, false) => Ok(PaymentMethod::Card {
                name: self.card_name.clone().unwrap_or_default(),
                number: self.card_number.clone().unwrap_or_default(),
                expiry: self.expiry.clone().unwrap_or_default(),
                cvv: self.cvv.clone().unwrap_or_default(),
            }),
            (None, false, true) => Ok(PaymentMethod::NetBanking {
                bank: self.bank.clone().unwrap_or_default(),
                account_number: self.account_number.clone().unwrap_or_default(),
                ifsc: self.ifsc.clone().unwrap_or_default(),
            }),
            (None, false, false) => bail!("choose a payment method: --upi, --card-number or --bank"),
            _ => bail!("give exactly one payment method"),
        }
    }
}

pub(super) async fn complete(app: &App, course_id: &str) -> Result<()> {
    let user = require_user(&app.store)?;
    let course = app
        .client
        .get_course_by_id(course_id)
        .await
        .context("loading course")?
        .ok_or_else(|| anyhow!("course {course_id} not found"))?;

    app.store.add_interaction(&Interaction::new(
        user.user_id,
        course.course_id,
        EventType::CourseCompleted,
        format!("Completed {}", course.title),
    ))?;
    println!("Course marked as complete: {}", course.title);
    Ok(())
}

pub(super) async fn pay(app: &App, course_id: &str, args: &PaymentArgs) -> Result<()> {
    let user = require_user(&app.store)?;
    let course = app
        .client
        .get_course_by_id(course_id)
        .await
        .context("loading course")?
        .ok_or_else(|| anyhow!("course {course_id} not found"))?;

    let method = args.method()?;
    let interaction = complete_payment(&user, &course.course_id, &course.title, &method)?;
    app.store.add_interaction(&interaction)?;
    log::info!("💳 Simulated {} payment for course {}", method.label(), course.course_id);
    println!("{}", interaction.details);
    Ok(())
}
