use serde::Serialize;

use super::Tooltip;
use crate::aggregate::{count_by, count_by_pair, totals_by_outer, Aggregate, GroupedCount, PairCount};
use crate::datasets::GraveyardProject;

// ---------------------------------------------------------------------------
// Discontinued products per year (bar chart)
// ---------------------------------------------------------------------------

/// Products shut down in one year.
pub type YearCount = GroupedCount<i32, String>;

/// One bar per shutdown year, oldest first, with the product names.
pub fn discontinued_per_year(projects: &[GraveyardProject]) -> Vec<YearCount> {
    let mut counts = count_by(projects, |p| p.end, |p| p.name.clone());
    counts.sort_by_key(|c| c.key);
    counts
}

impl Tooltip for YearCount {
    fn tooltip(&self) -> String {
        let mut text = format!("{}\n\nCasualties: {}\n", self.key, self.count);
        for name in &self.items {
            text.push('\n');
            text.push_str(name);
        }
        text
    }
}

// ---------------------------------------------------------------------------
// Products killed per category and year (dot timeline)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTimeline {
    /// One dot per (category, shutdown year).
    pub points: Vec<PairCount<String, i32>>,
    /// Products per category, first-seen order.
    pub totals: Vec<Aggregate<String, usize>>,
}

impl CategoryTimeline {
    /// Legend entries: `"Category (total)"`.
    pub fn legend(&self) -> Vec<String> {
        self.totals
            .iter()
            .map(|t| format!("{} ({})", t.key, t.value))
            .collect()
    }

    /// Shutdown year span covered by the dots.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        let min = self.points.iter().map(|p| p.inner).min()?;
        let max = self.points.iter().map(|p| p.inner).max()?;
        Some((min, max))
    }
}

pub fn killed_by_category(projects: &[GraveyardProject]) -> CategoryTimeline {
    let points = count_by_pair(projects, |p| p.category.clone(), |p| p.end);
    let totals = totals_by_outer(&points);
    CategoryTimeline { points, totals }
}

impl Tooltip for PairCount<String, i32> {
    fn tooltip(&self) -> String {
        format!("{} {}\nProjects killed: {}", self.outer, self.inner, self.count)
    }
}

// ---------------------------------------------------------------------------
// Product lifespans (timeline)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lifespan {
    pub name: String,
    pub start: i32,
    pub end: i32,
    /// Whole years between launch and shutdown.
    pub duration: i32,
    pub description: String,
}

/// Every product, ordered by launch year. Products launched the same year keep
/// file order.
pub fn lifespans(projects: &[GraveyardProject]) -> Vec<Lifespan> {
    let mut spans: Vec<Lifespan> = projects
        .iter()
        .map(|p| Lifespan {
            name: p.name.clone(),
            start: p.start,
            end: p.end,
            duration: p.end - p.start,
            description: p.description.clone(),
        })
        .collect();
    spans.sort_by_key(|s| s.start);
    spans
}

impl Tooltip for Lifespan {
    fn tooltip(&self) -> String {
        format!(
            "{}: {} - {} ({} years)\n\n{}",
            self.name, self.start, self.end, self.duration, self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(name: &str, start: i32, end: i32, category: &str) -> GraveyardProject {
        GraveyardProject {
            name: name.to_string(),
            start,
            end,
            total_years: (end - start) as f64,
            category: category.to_string(),
            description: format!("{name} description"),
        }
    }

    fn graveyard() -> Vec<GraveyardProject> {
        vec![
            project("Inbox", 2014, 2019, "App"),
            project("Reader", 2005, 2013, "Service"),
            project("Allo", 2016, 2019, "App"),
            project("Picasa", 2002, 2016, "Software"),
            project("Wave", 2009, 2012, "Service"),
        ]
    }

    #[test]
    fn bars_are_chronological() {
        let bars = discontinued_per_year(&graveyard());
        let keys: Vec<i32> = bars.iter().map(|b| b.key).collect();

        assert_eq!(keys, vec![2012, 2013, 2016, 2019]);
        assert_eq!(bars[3].items, vec!["Inbox", "Allo"]);
        assert_eq!(bars.iter().map(|b| b.count).sum::<usize>(), 5);
    }

    #[test]
    fn year_tooltip_lists_products() {
        let bars = discontinued_per_year(&graveyard());
        let text = bars[3].tooltip();
        assert!(text.starts_with("2019\n\nCasualties: 2"));
        assert!(text.ends_with("Inbox\nAllo"));
    }

    #[test]
    fn category_timeline_and_legend() {
        let timeline = killed_by_category(&graveyard());

        assert_eq!(timeline.points.len(), 4);
        assert_eq!(
            timeline.points[0],
            PairCount { outer: "App".to_string(), inner: 2019, count: 2 }
        );
        assert_eq!(timeline.legend(), vec!["App (2)", "Service (2)", "Software (1)"]);
        assert_eq!(timeline.year_range(), Some((2012, 2019)));
    }

    #[test]
    fn lifespans_sorted_by_start() {
        let spans = lifespans(&graveyard());
        let names: Vec<&str> = spans.iter().map(|s| s.name.as_str()).collect();

        assert_eq!(names, vec!["Picasa", "Reader", "Wave", "Inbox", "Allo"]);
        assert_eq!(spans[0].duration, 14);
        assert_eq!(spans[0].tooltip(), "Picasa: 2002 - 2016 (14 years)\n\nPicasa description");
    }
}
