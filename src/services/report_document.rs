//! Rendering of the full report into a document artifact, and
//! composition of the report email around it. Typesetting fancier than
//! plain text and actual delivery both live outside this crate; the
//! [`MailSender`] trait is the delivery seam.

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::date_utils::{date_part, DateRange};
use crate::db::queries::users;
use crate::error::{AppError, AppResult};
use crate::models::expense::format_cents;
use crate::models::report::ReportData;
use crate::services::ai_client::{self, AiSettings};
use crate::services::reports;

pub struct EmailAttachment {
    pub filename: String,
    pub content: Vec<u8>,
}

pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body_html: String,
    pub attachments: Vec<EmailAttachment>,
}

/// Outbound delivery boundary. Implementations live with the transport
/// layer; tests substitute a recorder.
pub trait MailSender {
    fn send(&self, message: &EmailMessage) -> AppResult<()>;
}

pub fn document_filename(report: &ReportData) -> String {
    format!(
        "Expense_Report_{}_to_{}.txt",
        report.start_date, report.end_date
    )
}

/// Render the full report as a plain-text artifact: header, financial
/// summary, per-category breakdown with budget status, transaction
/// lists grouped by date, and a closing insights section.
pub fn render_document(report: &ReportData, insights: &str) -> Vec<u8> {
    let mut doc = String::new();

    render_header(&mut doc, report);
    render_summary(&mut doc, report);
    render_breakdown_table(&mut doc, report);

    let mut sorted_incomes = report.incomes.clone();
    sorted_incomes.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
    render_transaction_list(&mut doc, "All Income Records", sorted_incomes.iter(), |i| {
        format!(
            "[{}] {} - {}",
            display_date(&i.date),
            if i.source.is_empty() {
                "Income"
            } else {
                i.source.as_str()
            },
            format_cents(i.amount_cents)
        )
    });

    let mut sorted_expenses = report.expenses.clone();
    sorted_expenses.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
    render_transaction_list(
        &mut doc,
        "All Expense Records",
        sorted_expenses.iter(),
        |e| {
            format!(
                "[{}] {}: {} - {}",
                display_date(&e.date),
                e.category,
                e.description.as_deref().unwrap_or(""),
                format_cents(e.amount_cents)
            )
        },
    );

    render_section_title(&mut doc, "AI Insights & Suggestions");
    doc.push_str(insights);
    doc.push('\n');

    doc.into_bytes()
}

/// Build the document end to end: aggregate, fetch insights (degrading
/// to a placeholder on failure), render.
pub async fn generate_document(
    conn: &Connection,
    ai: Option<&AiSettings>,
    user_id: &str,
    range: &DateRange,
) -> AppResult<Vec<u8>> {
    let report = reports::build_report(conn, user_id, range)?;
    let insights = ai_client::fetch_insights(ai, &report).await;
    Ok(render_document(&report, &insights))
}

/// Compose and hand off the report email for a user: the document goes
/// out as an attachment to the profile's registered address.
pub async fn email_report(
    conn: &Connection,
    mailer: &dyn MailSender,
    ai: Option<&AiSettings>,
    user_id: &str,
    range: &DateRange,
) -> AppResult<()> {
    let profile = users::get_profile(conn, user_id)?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let report = reports::build_report(conn, user_id, range)?;
    let insights = ai_client::fetch_insights(ai, &report).await;
    let document = render_document(&report, &insights);

    let message = EmailMessage {
        to: profile.email.clone(),
        subject: format!(
            "Expense Report: {} to {}",
            report.start_date, report.end_date
        ),
        body_html: report_email_body(&profile.name, &report),
        attachments: vec![EmailAttachment {
            filename: document_filename(&report),
            content: document,
        }],
    };

    mailer.send(&message)?;
    tracing::info!(user_id, to = %message.to, "Report email handed to sender");
    Ok(())
}

pub fn report_email_body(name: &str, report: &ReportData) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
        <h2 style="text-align: center;">Your Expense Report</h2>
        <p>Hello {},</p>
        <p>Here is your requested expense report for the period <strong>{}</strong> to <strong>{}</strong>.</p>
        <p>Please find the report attached to this email.</p>
        <p style="text-align: center; font-style: italic;">Keep tracking, keep saving!</p>
    </div>"#,
        name, report.start_date, report.end_date
    )
}

fn render_header(doc: &mut String, report: &ReportData) {
    doc.push_str("Detailed Expense Report\n");
    doc.push_str("=======================\n\n");
    doc.push_str(&format!(
        "Period: {} to {}\n\n",
        report.start_date, report.end_date
    ));
}

fn render_section_title(doc: &mut String, title: &str) {
    doc.push_str(&format!("\n{}\n{}\n", title, "-".repeat(title.len())));
}

fn render_summary(doc: &mut String, report: &ReportData) {
    render_section_title(doc, "Financial Summary");
    doc.push_str(&format!(
        "Total Income: {}\n",
        format_cents(report.total_income_cents)
    ));
    doc.push_str(&format!(
        "Total Expenses: {}\n",
        format_cents(report.total_expenses_cents)
    ));
    doc.push_str(&format!(
        "Net Savings: {}\n",
        format_cents(report.net_savings_cents)
    ));

    if report.overspent_categories.is_empty() {
        doc.push_str("No overspending detected. Well done!\n");
    } else {
        doc.push_str(&format!(
            "Overspent Categories: {}\n",
            report.overspent_categories.join(", ")
        ));
    }
}

fn render_breakdown_table(doc: &mut String, report: &ReportData) {
    render_section_title(doc, "Expense Breakdown by Category");
    doc.push_str(&format!(
        "{:<24} {:>14} {:>14}   {}\n",
        "Category", "Total Spent", "Budget", "Status"
    ));

    for row in report.breakdown() {
        let budget_cell = match row.limit_cents {
            Some(limit) => format_cents(limit),
            None => "-".to_string(),
        };
        doc.push_str(&format!(
            "{:<24} {:>14} {:>14}   {}\n",
            row.category,
            format_cents(row.total_cents),
            budget_cell,
            row.status.label()
        ));
    }
}

fn render_transaction_list<'a, T: 'a>(
    doc: &mut String,
    title: &str,
    items: impl Iterator<Item = &'a T>,
    formatter: impl Fn(&T) -> String,
) where
    T: HasDate,
{
    render_section_title(doc, title);

    let mut last_date: Option<String> = None;
    for item in items {
        let current_date = date_part(item.date_field()).to_string();
        if let Some(last) = &last_date {
            if *last != current_date {
                doc.push('\n');
            }
        }
        doc.push_str(&formatter(item));
        doc.push('\n');
        last_date = Some(current_date);
    }
}

trait HasDate {
    fn date_field(&self) -> &str;
}

impl HasDate for crate::models::income::Income {
    fn date_field(&self) -> &str {
        &self.date
    }
}

impl HasDate for crate::models::expense::Expense {
    fn date_field(&self) -> &str {
        &self.date
    }
}

fn display_date(stored: &str) -> String {
    let day = date_part(stored);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_else(|_| day.to_string())
}
