use crate::infra::{
    InMemoryDepartmentRepository, InMemoryEvaluationRepository, InMemoryEvaluatorDirectory,
    InMemoryScoreLevelStore,
};
use clap::Args;
use okr_tracker::error::AppError;
use okr_tracker::okr::{
    export, Department, DepartmentId, EvaluationRequest, EvaluationService, EvaluationTarget,
    Evaluator, EvaluatorId, EvaluatorType, KeyResult, KeyResultId, LetterRating, MetricType,
    Objective, ObjectiveId, OkrScoringService, Role, Thresholds,
};
use std::path::PathBuf;
use std::sync::Arc;

pub(crate) type DemoScoringService = OkrScoringService<
    InMemoryDepartmentRepository,
    InMemoryScoreLevelStore,
    InMemoryEvaluationRepository,
>;
pub(crate) type DemoEvaluationService =
    EvaluationService<InMemoryEvaluationRepository, InMemoryEvaluatorDirectory>;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Department to run the evaluation blending portion against.
    #[arg(long, default_value = "dept-sales")]
    pub(crate) department: String,
    /// Skip the evaluation blending portion of the demo.
    #[arg(long)]
    pub(crate) skip_evaluations: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ScorecardArgs {
    /// Write the CSV to a file instead of stdout.
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

/// Departments, objectives, and key results used by the demo commands and as
/// the initial dataset for the in-memory HTTP service.
pub(crate) fn sample_departments() -> Vec<Department> {
    vec![
        Department {
            id: DepartmentId("dept-sales".to_string()),
            name: "Sales".to_string(),
            objectives: vec![
                Objective {
                    id: ObjectiveId("obj-revenue".to_string()),
                    name: "Grow quarterly revenue".to_string(),
                    weight: Some(60.0),
                    key_results: vec![
                        KeyResult {
                            id: KeyResultId("kr-revenue".to_string()),
                            name: "Quarterly revenue".to_string(),
                            description: Some("Recognized revenue for the quarter".to_string()),
                            metric_type: MetricType::HigherBetter,
                            unit: Some("kUSD".to_string()),
                            weight: None,
                            thresholds: Thresholds {
                                below: 800.0,
                                meets: 900.0,
                                good: 950.0,
                                very_good: 1000.0,
                                exceptional: 1100.0,
                            },
                            actual_value: Some("1025".to_string()),
                        },
                        KeyResult {
                            id: KeyResultId("kr-accounts".to_string()),
                            name: "New enterprise accounts".to_string(),
                            description: None,
                            metric_type: MetricType::HigherBetter,
                            unit: Some("accounts".to_string()),
                            weight: None,
                            thresholds: Thresholds {
                                below: 4.0,
                                meets: 6.0,
                                good: 8.0,
                                very_good: 10.0,
                                exceptional: 12.0,
                            },
                            actual_value: Some("9".to_string()),
                        },
                    ],
                },
                Objective {
                    id: ObjectiveId("obj-retention".to_string()),
                    name: "Improve customer retention".to_string(),
                    weight: Some(40.0),
                    key_results: vec![
                        KeyResult {
                            id: KeyResultId("kr-churn".to_string()),
                            name: "Quarterly churn".to_string(),
                            description: None,
                            metric_type: MetricType::LowerBetter,
                            unit: Some("%".to_string()),
                            weight: None,
                            thresholds: Thresholds {
                                below: 8.0,
                                meets: 6.0,
                                good: 5.0,
                                very_good: 4.0,
                                exceptional: 3.0,
                            },
                            actual_value: Some("4.5".to_string()),
                        },
                        KeyResult {
                            id: KeyResultId("kr-reviews".to_string()),
                            name: "Account review grade".to_string(),
                            description: None,
                            metric_type: MetricType::Qualitative,
                            unit: None,
                            weight: None,
                            thresholds: Thresholds::default(),
                            actual_value: Some("B".to_string()),
                        },
                    ],
                },
            ],
        },
        Department {
            id: DepartmentId("dept-engineering".to_string()),
            name: "Engineering".to_string(),
            objectives: vec![
                Objective {
                    id: ObjectiveId("obj-delivery".to_string()),
                    name: "Ship reliably".to_string(),
                    weight: None,
                    key_results: vec![
                        KeyResult {
                            id: KeyResultId("kr-deploys".to_string()),
                            name: "Deploys per week".to_string(),
                            description: None,
                            metric_type: MetricType::HigherBetter,
                            unit: Some("deploys".to_string()),
                            weight: None,
                            thresholds: Thresholds {
                                below: 1.0,
                                meets: 2.0,
                                good: 3.0,
                                very_good: 4.0,
                                exceptional: 5.0,
                            },
                            actual_value: Some("3.5".to_string()),
                        },
                        KeyResult {
                            id: KeyResultId("kr-incidents".to_string()),
                            name: "Production incidents".to_string(),
                            description: None,
                            metric_type: MetricType::LowerBetter,
                            unit: Some("incidents".to_string()),
                            weight: None,
                            thresholds: Thresholds {
                                below: 12.0,
                                meets: 9.0,
                                good: 6.0,
                                very_good: 4.0,
                                exceptional: 2.0,
                            },
                            actual_value: Some("5".to_string()),
                        },
                    ],
                },
                Objective {
                    id: ObjectiveId("obj-quality".to_string()),
                    name: "Raise the quality bar".to_string(),
                    weight: None,
                    key_results: vec![KeyResult {
                        id: KeyResultId("kr-review-grade".to_string()),
                        name: "Code review grade".to_string(),
                        description: None,
                        metric_type: MetricType::Qualitative,
                        unit: None,
                        weight: None,
                        thresholds: Thresholds::default(),
                        actual_value: Some("A".to_string()),
                    }],
                },
            ],
        },
    ]
}

pub(crate) fn sample_evaluators() -> Vec<Evaluator> {
    [
        ("dir-1", "Maria Ionescu", Role::Director),
        ("hr-1", "Pavel Dumitru", Role::Hr),
        ("bb-1", "Ana Stancu", Role::BusinessBlock),
        ("admin-1", "Radu Petrescu", Role::Admin),
    ]
    .into_iter()
    .map(|(id, name, role)| Evaluator {
        id: EvaluatorId(id.to_string()),
        full_name: name.to_string(),
        role,
    })
    .collect()
}

pub(crate) fn build_demo_services() -> (Arc<DemoScoringService>, Arc<DemoEvaluationService>) {
    let departments = Arc::new(InMemoryDepartmentRepository::seeded(sample_departments()));
    let levels = Arc::new(InMemoryScoreLevelStore::default());
    let evaluations = Arc::new(InMemoryEvaluationRepository::default());
    let evaluators = Arc::new(InMemoryEvaluatorDirectory::seeded(sample_evaluators()));

    let scoring = Arc::new(OkrScoringService::new(
        departments,
        levels,
        evaluations.clone(),
    ));
    let evaluation_service = Arc::new(EvaluationService::new(evaluations, evaluators));
    (scoring, evaluation_service)
}

pub(crate) fn run_scorecard_export(args: ScorecardArgs) -> Result<(), AppError> {
    let (scoring, _) = build_demo_services();
    let scorecards = scoring.scorecards()?;

    match args.output {
        Some(path) => {
            let file = std::fs::File::create(&path)?;
            export::write_scorecards(file, &scorecards)?;
            println!("scorecard written to {}", path.display());
        }
        None => {
            let csv = export::scorecards_to_string(&scorecards)?;
            print!("{csv}");
        }
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let (scoring, evaluations) = build_demo_services();

    println!("OKR scoring demo");
    for scorecard in scoring.scorecards()? {
        println!("\n{}: {:.2} ({})", scorecard.name, scorecard.score.score, scorecard.score.level);
        for objective in &scorecard.objectives {
            let weight = objective
                .weight
                .map(|weight| format!("{weight}%"))
                .unwrap_or_else(|| "equal share".to_string());
            println!("  {} [{}]: {:.2}", objective.name, weight, objective.score.score);
            for kr in &objective.key_results {
                println!(
                    "    {} ({}) actual={} -> {:.2} ({}, {:.1}%)",
                    kr.name,
                    kr.metric_type.label(),
                    kr.actual_value.as_deref().unwrap_or("-"),
                    kr.score.score,
                    kr.score.level,
                    kr.score.percentage,
                );
            }
        }
    }

    if args.skip_evaluations {
        return Ok(());
    }

    println!("\nEvaluation blending for {}", args.department);
    let director = EvaluatorId("dir-1".to_string());
    let hr = EvaluatorId("hr-1".to_string());
    let business_block = EvaluatorId("bb-1".to_string());

    let director_draft = evaluations.create(
        EvaluationRequest {
            evaluator_type: EvaluatorType::Director,
            target: EvaluationTarget::Department,
            target_id: args.department.clone(),
            numeric_rating: None,
            star_rating: Some(4),
            letter_rating: None,
            comment: Some("Strong quarter, ahead of plan".to_string()),
        },
        &director,
    )?;
    let hr_draft = evaluations.create(
        EvaluationRequest {
            evaluator_type: EvaluatorType::Hr,
            target: EvaluationTarget::Department,
            target_id: args.department.clone(),
            numeric_rating: None,
            star_rating: None,
            letter_rating: Some(LetterRating::B),
            comment: Some("Healthy team, low attrition".to_string()),
        },
        &hr,
    )?;
    let business_block_draft = evaluations.create(
        EvaluationRequest {
            evaluator_type: EvaluatorType::BusinessBlock,
            target: EvaluationTarget::Department,
            target_id: args.department.clone(),
            numeric_rating: Some(4.2),
            star_rating: None,
            letter_rating: None,
            comment: None,
        },
        &business_block,
    )?;

    evaluations.submit(&director_draft.id, &director)?;
    evaluations.submit(&hr_draft.id, &hr)?;
    evaluations.submit(&business_block_draft.id, &business_block)?;

    let combined =
        scoring.department_score_with_evaluations(&DepartmentId(args.department.clone()))?;
    println!(
        "  automatic: {:.2} ({:.1}%)",
        combined.automatic_okr_score, combined.automatic_okr_percentage
    );
    if let Some(rating) = combined.director_evaluation {
        let stars = combined
            .director_stars
            .map(|stars| format!(", {stars} stars"))
            .unwrap_or_default();
        println!("  director:  {rating:.2}{stars}");
    }
    if let (Some(letter), Some(numeric)) =
        (combined.hr_evaluation_letter, combined.hr_evaluation_numeric)
    {
        println!("  hr:        {} ({numeric:.2})", letter.as_str());
    }
    if let Some(rating) = combined.business_block_evaluation {
        println!("  business:  {rating:.2} (reported, not blended)");
    }
    match (combined.final_combined_score, combined.final_percentage) {
        (Some(score), Some(percentage)) => println!(
            "  final:     {score:.2} ({percentage:.1}%) - {} {}",
            combined.score_level, combined.color
        ),
        _ => println!("  final:     not available (missing director or HR rating)"),
    }

    Ok(())
}
