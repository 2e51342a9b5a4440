//! Plain-text views for the terminal.

use common::Job;

use crate::listing::{JobListings, LoadState};
use crate::router::Page;

/// Characters of description shown on a listing card.
const PREVIEW_CHARS: usize = 90;

pub fn render_listing(listings: &JobListings) -> String {
    let mut out = format!("== {} ==\n", listings.mode().heading());

    match listings.state() {
        LoadState::Loading => out.push_str("⏳ Loading...\n"),
        _ if listings.jobs().is_empty() => out.push_str("No jobs to show.\n"),
        _ => {
            for job in listings.jobs() {
                out.push_str(&render_card(job));
            }
        }
    }
    out
}

/// Summary block for one job in a list.
pub fn render_card(job: &Job) -> String {
    let id = job.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
    format!(
        "\n[{}] {}\n    {} | {} | {}\n    {}\n",
        id,
        job.title,
        job.kind,
        job.location,
        job.salary,
        preview(&job.description)
    )
}

/// Full view of one job, company contact details included.
pub fn render_job(job: &Job) -> String {
    let mut out = format!("📋 {}\n", job.title);
    if let Some(id) = &job.id {
        out.push_str(&format!("ID:       {id}\n"));
    }
    out.push_str(&format!(
        "Type:     {}\nLocation: {}\nSalary:   {}\n\n{}\n",
        job.kind, job.location, job.salary, job.description
    ));

    let company = &job.company;
    out.push_str(&format!("\n🏢 {}\n", company.name));
    if !company.description.is_empty() {
        out.push_str(&format!("{}\n", company.description));
    }
    out.push_str(&format!(
        "Contact Email: {}\nContact Phone: {}\n",
        company.contact_email, company.contact_phone
    ));
    out
}

pub fn render_page(page: &Page) -> String {
    match page {
        Page::Home(listings) | Page::Jobs(listings) => render_listing(listings),
        Page::AddJob => "Add Job\n\nSubmit a job with `jobs add --file <job.json>`.\n".to_string(),
        Page::Job(job) => render_job(job),
        Page::EditJob(job) => format!("Edit Job\n\n{}", render_job(job)),
        Page::NotFound => "404 Page Not Found\n".to_string(),
    }
}

fn preview(description: &str) -> String {
    if description.chars().count() <= PREVIEW_CHARS {
        return description.to_string();
    }
    let mut cut: String = description.chars().take(PREVIEW_CHARS).collect();
    cut.push_str("...");
    cut
}
