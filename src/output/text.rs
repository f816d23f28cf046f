use crate::models::{CalendarEvent, Member, Project, Task};
use crate::stats::Dashboard;
use crate::store::SeedReport;

/// Plain-text rendering of a record for the CLI.
pub trait TextView {
    /// One-line summary used in listings.
    fn row(&self) -> String;
    /// Labelled fields shown by `show`.
    fn fields(&self) -> Vec<(&'static str, String)>;
}

pub fn print_detail<R: TextView>(record: &R) {
    println!("{}", record.row());
    for (label, value) in record.fields() {
        println!("  {label}: {value}");
    }
}

pub fn print_list<R: TextView>(records: &[R], empty: &str) {
    if records.is_empty() {
        println!("{empty}");
        return;
    }
    for r in records {
        println!("  {}", r.row());
    }
}

fn push_opt(fields: &mut Vec<(&'static str, String)>, label: &'static str, value: Option<impl ToString>) {
    if let Some(v) = value {
        fields.push((label, v.to_string()));
    }
}

impl TextView for Task {
    fn row(&self) -> String {
        let due = self.due_date.map(|d| format!(" due {d}")).unwrap_or_default();
        let assignee = self.assignee.as_deref().map(|a| format!(" @{a}")).unwrap_or_default();
        format!(
            "#{} [{}] {} ({}){due}{assignee}",
            self.id,
            self.status.as_str(),
            self.title,
            self.priority.as_str()
        )
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut f = Vec::new();
        push_opt(&mut f, "Description", self.description.as_deref());
        if !self.tags.is_empty() {
            f.push(("Tags", self.tags.join(", ")));
        }
        push_opt(&mut f, "Project", self.project_id);
        f.push(("Created", self.created_at.to_rfc3339()));
        f.push(("Updated", self.updated_at.to_rfc3339()));
        f
    }
}

impl TextView for Project {
    fn row(&self) -> String {
        format!(
            "#{} [{}] {} {}% ({})",
            self.id,
            self.status.as_str(),
            self.name,
            self.progress,
            self.priority.as_str()
        )
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut f = Vec::new();
        push_opt(&mut f, "Description", self.description.as_deref());
        push_opt(&mut f, "Start", self.start_date);
        push_opt(&mut f, "End", self.end_date);
        push_opt(&mut f, "Manager", self.manager.as_deref());
        if !self.team.is_empty() {
            f.push(("Team", self.team.join(", ")));
        }
        f.push(("Budget", self.budget.to_string()));
        f
    }
}

impl TextView for CalendarEvent {
    fn row(&self) -> String {
        let when = if self.all_day {
            self.start.date().to_string()
        } else {
            self.start.format("%Y-%m-%d %H:%M").to_string()
        };
        format!("#{} {when} {} [{}]", self.id, self.title, self.event_type.as_str())
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut f = vec![("End", self.end.format("%Y-%m-%d %H:%M").to_string())];
        push_opt(&mut f, "Location", self.location.as_deref());
        push_opt(&mut f, "Description", self.description.as_deref());
        f.push(("Color", self.color.clone()));
        f
    }
}

impl TextView for Member {
    fn row(&self) -> String {
        format!("#{} {} <{}> [{}]", self.id, self.name, self.email, self.status.as_str())
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut f = Vec::new();
        push_opt(&mut f, "Phone", self.phone.as_deref());
        push_opt(&mut f, "Department", self.department.as_deref());
        push_opt(&mut f, "Role", self.role.as_deref());
        push_opt(&mut f, "Joined", self.join_date);
        f
    }
}

pub fn print_dashboard(d: &Dashboard) {
    let t = &d.tasks;
    println!("Tasks: {} ({}% done, {} overdue)", t.total, t.completion, t.overdue);
    println!(
        "  pending={} in-progress={} done={}",
        t.by_status.pending, t.by_status.in_progress, t.by_status.done
    );
    println!(
        "  high={} medium={} low={}",
        t.by_priority.high, t.by_priority.medium, t.by_priority.low
    );
    if !d.upcoming.is_empty() {
        println!("Due within a week:");
        print_list(&d.upcoming, "");
    }
    if !d.projects.is_empty() {
        println!("Projects:");
        for p in &d.projects {
            println!("  #{} {} {}% [{}]", p.id, p.name, p.progress, p.status.as_str());
        }
    }
    println!("Events: {}  Members: {}", d.event_count, d.member_count);
}

pub fn print_seed_report(r: &SeedReport) {
    if r.total() == 0 {
        println!("No sample data added.");
    } else {
        println!(
            "Seeded {} tasks, {} projects, {} events, {} members.",
            r.tasks, r.projects, r.calendar, r.members
        );
    }
}
