use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};

use super::sticky_note::{NoteBoard, StickyNote};
use super::task::Task;

/// One cell of the month grid: the tasks due that day and the sticky notes
/// pinned to it.
#[derive(Debug, Clone)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub tasks: Vec<Task>,
    pub notes: Vec<StickyNote>,
    pub is_today: bool,
    pub has_overdue: bool,
}

impl CalendarDay {
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

/// A month of calendar days. `first_weekday` is the weekday of day 1, which
/// the grid uses for its leading offset.
#[derive(Debug, Clone)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub first_weekday: Weekday,
    pub days: Vec<CalendarDay>,
}

impl MonthView {
    /// Bucket tasks (by deadline) and sticky notes (by owning date) into the
    /// days of the given month. `None` when year/month do not name a real
    /// month.
    pub fn build(
        tasks: &[Task],
        notes: &NoteBoard,
        year: i32,
        month: u32,
        now: NaiveDateTime,
    ) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let today = now.date();

        let mut days = Vec::with_capacity(31);
        let mut date = first;
        while date.month() == month {
            let day_tasks: Vec<Task> = tasks
                .iter()
                .filter(|t| t.deadline == Some(date))
                .cloned()
                .collect();
            let has_overdue = day_tasks.iter().any(|t| t.is_overdue(now));
            days.push(CalendarDay {
                date,
                notes: notes.get(&date).cloned().unwrap_or_default(),
                is_today: date == today,
                has_overdue,
                tasks: day_tasks,
            });
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }

        Some(Self {
            year,
            month,
            first_weekday: first.weekday(),
            days,
        })
    }

    /// Heading for the month, e.g. "August 2026".
    pub fn label(&self) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first) => first.format("%B %Y").to_string(),
            None => format!("{}-{}", self.year, self.month),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn buckets_tasks_by_deadline_date() {
        let mut due_tenth = Task::new("Due on the 10th");
        due_tenth.deadline = NaiveDate::from_ymd_opt(2026, 3, 10);
        let undated = Task::new("No deadline");

        let view = MonthView::build(
            &[due_tenth, undated],
            &NoteBoard::new(),
            2026,
            3,
            noon(2026, 3, 5),
        )
        .unwrap();

        assert_eq!(view.days.len(), 31);
        assert_eq!(view.days[9].day(), 10);
        assert_eq!(view.days[9].tasks.len(), 1);
        let scheduled: usize = view.days.iter().map(|d| d.tasks.len()).sum();
        assert_eq!(scheduled, 1);
    }

    #[test]
    fn marks_today_and_overdue_days() {
        let mut missed = Task::new("Missed");
        missed.deadline = NaiveDate::from_ymd_opt(2026, 3, 2);

        let view = MonthView::build(
            &[missed],
            &NoteBoard::new(),
            2026,
            3,
            noon(2026, 3, 5),
        )
        .unwrap();

        assert!(view.days[4].is_today);
        assert!(view.days[1].has_overdue);
        assert!(!view.days[2].has_overdue);
    }

    #[test]
    fn carries_notes_for_their_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 12).unwrap();
        let mut notes = NoteBoard::new();
        notes.insert(date, vec![StickyNote::new("dentist", "#b0e0e6")]);

        let view = MonthView::build(&[], &notes, 2026, 3, noon(2026, 3, 5)).unwrap();
        assert_eq!(view.days[11].notes.len(), 1);
        assert_eq!(view.days[11].notes[0].text, "dentist");
    }

    #[test]
    fn month_metadata() {
        let view =
            MonthView::build(&[], &NoteBoard::new(), 2026, 2, noon(2026, 2, 1)).unwrap();
        assert_eq!(view.days.len(), 28);
        assert_eq!(view.first_weekday, Weekday::Sun);
        assert_eq!(view.label(), "February 2026");

        assert!(MonthView::build(&[], &NoteBoard::new(), 2026, 13, noon(2026, 2, 1)).is_none());
    }
}
