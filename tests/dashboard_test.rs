use std::fs;
use std::path::Path;

use rusty_dash::charts::{graveyard, salaries, weather, Tooltip};
use rusty_dash::config::{DashboardConfig, CONFIG_FILE};
use rusty_dash::datasets::{Dataset, GraveyardProject, SalaryRecord, TypedRow, WeatherDay};

const GRAVEYARD_CSV: &str = "\
Name,Start,End,Total years,Category,Description
Google Reader,2005,2013,8,Service,Feed reader
Google Wave,2009,2012,3,Service,Realtime collaboration
Inbox by Gmail,2014,2019,5,App,Email client
Google Allo,2016,2019,3,App,Messaging app
";

const SALARIES_CSV: &str = "\
work_year,experience_level,employment_type,job_title,salary,salary_currency,salary_in_usd,employee_residence,remote_ratio,company_location,company_size
2023,SE,FT,Data Scientist,100000,USD,100000,US,100,US,M
2023,MI,FT,Data Scientist,120000,USD,120000,US,0,US,L
2023,SE,FT,Data Scientist,140000,USD,140000,US,50,US,L
2023,EN,FT,Data Scientist,oops,USD,oops,US,0,US,S
2022,EX,FT,Data Analyst,80000,EUR,86000,DE,100,DE,S
";

fn write_dataset(dir: &Path, file: &str, text: &str) {
    fs::write(dir.join(file), text).unwrap();
}

fn weather_csv(days: u32) -> String {
    let mut text = String::from("date,precipitation,temp_max,temp_min,wind,weather\n");
    for d in 1..=days {
        text.push_str(&format!("2015-12-{d:02},{}.0,{}.5,3.0,2.1,sun\n", d % 3, d));
    }
    text
}

#[test]
fn loads_all_three_datasets_from_a_folder() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), GraveyardProject::FILE_NAME, GRAVEYARD_CSV);
    write_dataset(dir.path(), SalaryRecord::FILE_NAME, SALARIES_CSV);
    write_dataset(dir.path(), WeatherDay::FILE_NAME, &weather_csv(15));

    let graves: Dataset<GraveyardProject> = Dataset::load(dir.path()).unwrap();
    let salaries: Dataset<SalaryRecord> = Dataset::load(dir.path()).unwrap();
    let days: Dataset<WeatherDay> = Dataset::load(dir.path()).unwrap();

    assert_eq!(graves.rows.len(), 4);
    assert_eq!(salaries.rows.len(), 5);
    assert_eq!(salaries.table.headers.len(), 11);
    assert_eq!(days.rows.len(), 15);
}

#[test]
fn malformed_salary_only_affects_its_own_value() {
    let salaries: Dataset<SalaryRecord> = Dataset::from_csv(SALARIES_CSV).unwrap();
    let config = DashboardConfig {
        salary_boxes: rusty_dash::config::SalaryBoxConfig {
            residence: "US".into(),
            min_job_count: 3,
        },
        ..DashboardConfig::default()
    };

    // The "oops" row still counts towards the job threshold and the mix.
    assert_eq!(salaries.skipped, 0);
    assert!(salaries.rows[3].salary_in_usd.is_nan());

    let boxes = salaries::salary_boxes(&salaries.rows, &config.salary_boxes);
    assert_eq!(boxes.len(), 1);
    assert_eq!(boxes[0].salaries, vec![100_000.0, 120_000.0, 140_000.0]);
    assert_eq!(boxes[0].stat.median, 120_000.0);

    let means = salaries::mean_salary_by_residence(&salaries.rows);
    assert_eq!(means[0].key, "US");
    assert_eq!(means[0].value, 120_000.0);
    assert_eq!(means[1].value, 86_000.0);

    let mix = salaries::experience_mix(&salaries.rows, &config.experience_mix);
    let small = &mix.rows[0];
    assert_eq!(small.outer, "S");
    assert_eq!(small.total, 2);
    assert_eq!(small.fraction(&"EN".to_string()), Some(0.5));
}

#[test]
fn graveyard_charts_from_csv() {
    let graves: Dataset<GraveyardProject> = Dataset::from_csv(GRAVEYARD_CSV).unwrap();

    let per_year = graveyard::discontinued_per_year(&graves.rows);
    let years: Vec<i32> = per_year.iter().map(|c| c.key).collect();
    assert_eq!(years, vec![2012, 2013, 2019]);
    assert_eq!(per_year[2].items, vec!["Inbox by Gmail", "Google Allo"]);

    let timeline = graveyard::killed_by_category(&graves.rows);
    assert_eq!(timeline.legend(), vec!["Service (2)", "App (2)"]);
    assert_eq!(timeline.points[2].tooltip(), "App 2019\nProjects killed: 2");

    let spans = graveyard::lifespans(&graves.rows);
    assert_eq!(spans[0].name, "Google Reader");
    assert_eq!(spans[3].name, "Google Allo");
}

#[test]
fn recent_weather_honours_config() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), WeatherDay::FILE_NAME, &weather_csv(20));
    fs::write(dir.path().join(CONFIG_FILE), r#"{ "weather": { "recent_days": 5 } }"#).unwrap();

    let config = DashboardConfig::load(dir.path()).unwrap();
    let days: Dataset<WeatherDay> = Dataset::load(dir.path()).unwrap();
    let recent = weather::recent_days(&days.rows, &config.weather);

    assert_eq!(recent.days.len(), 5);
    assert_eq!(recent.days[0].date.to_string(), "2015-12-16");
    assert_eq!(recent.days[4].temp_max, 20.5);
    assert_eq!(recent.temp_axis_max, 21.5);
}

#[test]
fn bad_weather_dates_are_skipped_not_fatal() {
    let text = "date,precipitation,temp_max,temp_min,wind,weather\n\
                2015-12-30,0.0,8.0,3.0,2.0,sun\n\
                yesterday,0.0,9.0,3.0,2.0,rain\n\
                2015-12-31,1.0,10.0,3.0,2.0,rain\n";
    let days: Dataset<WeatherDay> = Dataset::from_csv(text).unwrap();

    assert_eq!(days.rows.len(), 2);
    assert_eq!(days.skipped, 1);
    assert_eq!(days.table.len(), 3);
}

#[test]
fn missing_dataset_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result: anyhow::Result<Dataset<WeatherDay>> = Dataset::load(dir.path());
    assert!(result.is_err());
}
