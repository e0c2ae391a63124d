use serde::Serialize;

use super::Tooltip;
use crate::aggregate::{count_by_pair, group_by, mean_by, normalize_stack, order_rows, Aggregate, BoxStat, NanPolicy, StackRow};
use crate::config::{ExperienceMixConfig, LevelLabel, SalaryBoxConfig};
use crate::data::filter;
use crate::datasets::SalaryRecord;
use crate::format;

// ---------------------------------------------------------------------------
// Salary distribution per job title (box plots)
// ---------------------------------------------------------------------------

/// Box-plot summary of one job title plus the salaries it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryBox {
    pub job_title: String,
    pub stat: BoxStat,
    /// Parseable salaries in USD, file order; these are the jittered points.
    pub salaries: Vec<f64>,
}

impl Tooltip for SalaryBox {
    fn tooltip(&self) -> String {
        format!(
            "{}\nMedian {}\nQ1 {} - Q3 {}\n{} salaries",
            self.job_title,
            format::usd(self.stat.median),
            format::usd(self.stat.q1),
            format::usd(self.stat.q3),
            self.salaries.len()
        )
    }
}

/// Box plots of `salary_in_usd` per job title, for residents of
/// `config.residence` and job titles with more than `config.min_job_count`
/// such rows. Lower whiskers stop at 0; unparseable salaries are skipped.
pub fn salary_boxes(records: &[SalaryRecord], config: &SalaryBoxConfig) -> Vec<SalaryBox> {
    let residents = filter::matching(records, |r| r.employee_residence.as_str(), config.residence.as_str());
    let frequent = filter::frequent(&residents, |r| r.job_title.clone(), config.min_job_count);

    let boxes: Vec<SalaryBox> = group_by(frequent, |r| r.job_title.clone())
        .into_iter()
        .filter_map(|(job_title, rows)| {
            let sample: Vec<f64> = rows.iter().map(|r| r.salary_in_usd).collect();
            let stat = BoxStat::compute(&sample, Some(0.0), NanPolicy::Skip)?;
            Some(SalaryBox {
                job_title,
                stat,
                salaries: sample.into_iter().filter(|v| !v.is_nan()).collect(),
            })
        })
        .collect();

    log::debug!(
        "salary_boxes: {} job titles for residence {}",
        boxes.len(),
        config.residence
    );
    boxes
}

/// A single jittered point's hover text.
pub fn salary_point_tooltip(job_title: &str, salary: f64) -> String {
    format!("{job_title}\n{}", format::usd(salary))
}

// ---------------------------------------------------------------------------
// Average salary per residence (radial bars)
// ---------------------------------------------------------------------------

/// Mean `salary_in_usd` per employee residence, first-seen order.
/// Unparseable salaries are left out of the mean.
pub fn mean_salary_by_residence(records: &[SalaryRecord]) -> Vec<Aggregate<String, f64>> {
    mean_by(
        records,
        |r| r.employee_residence.clone(),
        |r| r.salary_in_usd,
        NanPolicy::Skip,
    )
}

impl Tooltip for Aggregate<String, f64> {
    fn tooltip(&self) -> String {
        format!("{}\nAvg Salary in USD\n{}", self.key, format::usd(self.value))
    }
}

// ---------------------------------------------------------------------------
// Experience level mix per company size (100% stacked bars)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceMix {
    /// One row per declared company size present in the data, axis order.
    pub rows: Vec<StackRow<String, String>>,
    pub levels: Vec<LevelLabel>,
}

impl ExperienceMix {
    /// Legend text for a level code, falling back to the code.
    pub fn label_for<'a>(&'a self, code: &'a str) -> &'a str {
        self.levels
            .iter()
            .find(|l| l.code == code)
            .map_or(code, |l| l.label.as_str())
    }
}

pub fn experience_mix(records: &[SalaryRecord], config: &ExperienceMixConfig) -> ExperienceMix {
    let counts = count_by_pair(
        records,
        |r| r.company_size.clone(),
        |r| r.experience_level.clone(),
    );
    let codes: Vec<String> = config.levels.iter().map(|l| l.code.clone()).collect();
    let rows = order_rows(normalize_stack(&counts, &codes), &config.company_sizes);

    ExperienceMix {
        rows,
        levels: config.levels.clone(),
    }
}

/// Hover text of one stacked segment.
pub fn percentage_tooltip(fraction: f64) -> String {
    format!("Percentage: {:.2}%", fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(title: &str, usd: f64, residence: &str, size: &str, level: &str) -> SalaryRecord {
        SalaryRecord {
            work_year: 2023.0,
            experience_level: level.to_string(),
            employment_type: "FT".to_string(),
            job_title: title.to_string(),
            salary: usd,
            salary_currency: "USD".to_string(),
            salary_in_usd: usd,
            employee_residence: residence.to_string(),
            remote_ratio: 0.0,
            company_location: residence.to_string(),
            company_size: size.to_string(),
        }
    }

    #[test]
    fn boxes_need_more_than_min_count_residents() {
        let mut rows = Vec::new();
        for i in 0..4 {
            rows.push(rec("Data Scientist", 100_000.0 + 10_000.0 * i as f64, "US", "M", "SE"));
        }
        // Three US analysts: not more than the threshold of 3.
        for _ in 0..3 {
            rows.push(rec("Data Analyst", 80_000.0, "US", "M", "MI"));
        }
        // Plenty of analysts elsewhere do not count towards the US threshold.
        for _ in 0..5 {
            rows.push(rec("Data Analyst", 50_000.0, "GB", "L", "EN"));
        }

        let config = SalaryBoxConfig { residence: "US".into(), min_job_count: 3 };
        let boxes = salary_boxes(&rows, &config);

        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].job_title, "Data Scientist");
        assert_eq!(boxes[0].salaries.len(), 4);
        assert_eq!(boxes[0].stat.median, 115_000.0);
        assert!(boxes[0].stat.whisker_min >= 0.0);
    }

    #[test]
    fn nan_salaries_do_not_poison_a_box() {
        let mut rows: Vec<SalaryRecord> = (0..4)
            .map(|i| rec("ML Engineer", 10.0 * (i + 1) as f64, "US", "S", "MI"))
            .collect();
        rows.push(rec("ML Engineer", f64::NAN, "US", "S", "MI"));

        let config = SalaryBoxConfig { residence: "US".into(), min_job_count: 0 };
        let boxes = salary_boxes(&rows, &config);

        assert_eq!(boxes[0].stat.q1, 17.5);
        assert_eq!(boxes[0].stat.whisker_max, 55.0);
        assert_eq!(boxes[0].salaries.len(), 4);
    }

    #[test]
    fn mean_per_residence() {
        let rows = vec![
            rec("A", 100.0, "US", "S", "EN"),
            rec("B", 60.0, "DE", "S", "EN"),
            rec("C", 200.0, "US", "S", "EN"),
            rec("D", f64::NAN, "DE", "S", "EN"),
        ];
        let means = mean_salary_by_residence(&rows);

        assert_eq!(means[0], Aggregate { key: "US".to_string(), value: 150.0 });
        assert_eq!(means[1], Aggregate { key: "DE".to_string(), value: 60.0 });
        assert_eq!(means[0].tooltip(), "US\nAvg Salary in USD\n$150.00");
    }

    #[test]
    fn experience_mix_follows_axis_order() {
        let rows = vec![
            rec("A", 1.0, "US", "L", "SE"),
            rec("B", 1.0, "US", "S", "EN"),
            rec("C", 1.0, "US", "L", "EX"),
            rec("D", 1.0, "US", "S", "SE"),
            rec("E", 1.0, "US", "L", "SE"),
            rec("F", 1.0, "US", "L", "MI"),
        ];
        let mix = experience_mix(&rows, &ExperienceMixConfig::default());
        let sizes: Vec<&str> = mix.rows.iter().map(|r| r.outer.as_str()).collect();

        assert_eq!(sizes, vec!["S", "L"]);
        assert_eq!(mix.rows[1].fraction(&"SE".to_string()), Some(0.5));
        assert_eq!(mix.rows[0].fraction(&"MI".to_string()), Some(0.0));
        assert_eq!(mix.label_for("EX"), "Executive Level");
        assert_eq!(mix.label_for("??"), "??");
        assert_eq!(percentage_tooltip(0.5), "Percentage: 50.00%");
    }
}
