use super::domain::{EvaluationTarget, EvaluatorType, LetterRating, Role};
use super::service::EvaluationError;

/// One row of the capability table: who may create evaluations of a type,
/// and whether the type is restricted to a particular target kind.
pub(crate) struct Capability {
    pub(crate) evaluator_type: EvaluatorType,
    pub(crate) allowed_roles: &'static [Role],
    pub(crate) target_restriction: Option<EvaluationTarget>,
}

/// Data-driven permission policy; adding a channel means adding a row, not a
/// branch.
pub(crate) const CAPABILITIES: [Capability; 3] = [
    Capability {
        evaluator_type: EvaluatorType::Director,
        allowed_roles: &[Role::Director, Role::Admin],
        target_restriction: None,
    },
    Capability {
        evaluator_type: EvaluatorType::Hr,
        allowed_roles: &[Role::Hr, Role::Admin],
        target_restriction: None,
    },
    Capability {
        evaluator_type: EvaluatorType::BusinessBlock,
        allowed_roles: &[Role::BusinessBlock, Role::Admin],
        target_restriction: Some(EvaluationTarget::Department),
    },
];

pub(crate) fn authorize(
    role: Role,
    evaluator_type: EvaluatorType,
    target: EvaluationTarget,
) -> Result<(), EvaluationError> {
    let capability = CAPABILITIES
        .iter()
        .find(|capability| capability.evaluator_type == evaluator_type)
        .expect("capability table covers every evaluator type");

    if !capability.allowed_roles.contains(&role) {
        return Err(EvaluationError::PermissionDenied(format!(
            "only {} may create {} evaluations",
            describe_roles(capability.allowed_roles),
            evaluator_type.label(),
        )));
    }

    if let Some(required) = capability.target_restriction {
        if required != target {
            return Err(EvaluationError::PermissionDenied(format!(
                "{} evaluations may only target a {}",
                evaluator_type.label(),
                required.label(),
            )));
        }
    }

    Ok(())
}

fn describe_roles(roles: &[Role]) -> String {
    let names: Vec<&str> = roles
        .iter()
        .map(|role| match role {
            Role::Admin => "admins",
            Role::Director => "directors",
            Role::Hr => "HR",
            Role::BusinessBlock => "business block leaders",
            Role::Employee => "employees",
        })
        .collect();
    names.join(" or ")
}

/// Convert a 1-5 star rating to the director numeric scale.
pub(crate) fn stars_to_numeric(stars: u8) -> Result<f64, EvaluationError> {
    if !(1..=5).contains(&stars) {
        return Err(EvaluationError::Validation(
            "star rating must be between 1 and 5".to_string(),
        ));
    }
    Ok(4.25 + f64::from(stars - 1) * 0.1875)
}

/// Per-channel rating rules: director numeric in [4.25, 5.0], HR letter in
/// {A, B, C, D}, business block numeric in [1, 5].
pub(crate) fn validate_rating(
    evaluator_type: EvaluatorType,
    numeric: Option<f64>,
    letter: Option<LetterRating>,
) -> Result<(), EvaluationError> {
    match evaluator_type {
        EvaluatorType::Director => match numeric {
            Some(rating) if (4.25..=5.0).contains(&rating) => Ok(()),
            _ => Err(EvaluationError::Validation(
                "director rating must be between 4.25 and 5.0".to_string(),
            )),
        },
        EvaluatorType::Hr => {
            if letter.is_some() {
                Ok(())
            } else {
                Err(EvaluationError::Validation(
                    "HR rating must be A, B, C, or D".to_string(),
                ))
            }
        }
        EvaluatorType::BusinessBlock => match numeric {
            Some(rating) if (1.0..=5.0).contains(&rating) => Ok(()),
            _ => Err(EvaluationError::Validation(
                "business block rating must be between 1 and 5".to_string(),
            )),
        },
    }
}
