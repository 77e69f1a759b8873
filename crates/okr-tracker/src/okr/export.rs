use std::io::Write;

use super::domain::MetricType;
use super::service::DepartmentScorecard;

const HEADERS: [&str; 14] = [
    "Department",
    "Objective",
    "Weight",
    "Key Result",
    "Metric Type",
    "Actual",
    "Unit",
    "Below",
    "Meets",
    "Good",
    "Very Good",
    "Exceptional",
    "Score",
    "Level",
];

/// Write scorecards as flat CSV rows, one row per key result. Qualitative
/// rows print the letter anchors E-A in the threshold columns.
pub fn write_scorecards<W: Write>(
    writer: W,
    scorecards: &[DepartmentScorecard],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADERS)?;

    for scorecard in scorecards {
        for objective in &scorecard.objectives {
            let weight = objective
                .weight
                .map(|weight| format!("{weight}%"))
                .unwrap_or_default();

            for kr in &objective.key_results {
                let thresholds: [String; 5] = if kr.metric_type == MetricType::Qualitative {
                    ["E", "D", "C", "B", "A"].map(str::to_string)
                } else {
                    [
                        kr.thresholds.below,
                        kr.thresholds.meets,
                        kr.thresholds.good,
                        kr.thresholds.very_good,
                        kr.thresholds.exceptional,
                    ]
                    .map(|value| value.to_string())
                };

                csv_writer.write_record([
                    scorecard.name.as_str(),
                    objective.name.as_str(),
                    weight.as_str(),
                    kr.name.as_str(),
                    kr.metric_type.label(),
                    kr.actual_value.as_deref().unwrap_or(""),
                    kr.unit.as_deref().unwrap_or(""),
                    thresholds[0].as_str(),
                    thresholds[1].as_str(),
                    thresholds[2].as_str(),
                    thresholds[3].as_str(),
                    thresholds[4].as_str(),
                    &format!("{:.2}", kr.score.score),
                    kr.score.level.as_str(),
                ])?;
            }
        }

        csv_writer.write_record([
            scorecard.name.as_str(),
            "TOTAL",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            &format!("{:.2}", scorecard.score.score),
            scorecard.score.level.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Render scorecards to an in-memory CSV string, for HTTP responses.
pub fn scorecards_to_string(scorecards: &[DepartmentScorecard]) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_scorecards(&mut buffer, scorecards)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
