use crate::ChemistryService::ChemistryError;
use thiserror::Error;

/// Fatal setup errors. They are detected before the first evaluation of the equations and
/// abort the construction of the equation object.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("inlet mass fractions have {found} entries but the chemistry service reports {expected} gas species")]
    InletLengthMismatch { expected: usize, found: usize },
    #[error("reaction '{reaction}': species '{species}' is not known to the chemistry service")]
    UnknownSpecies { reaction: String, species: String },
    #[error("reaction '{reaction}': species index {index} is out of range for {species_count} gas species")]
    SpeciesIndexOutOfRange {
        reaction: String,
        index: usize,
        species_count: usize,
    },
    #[error("reaction '{reaction}': species '{species}' has index {resolved} in the chemistry service, but index {given} was supplied")]
    SpeciesIndexMismatch {
        reaction: String,
        species: String,
        given: usize,
        resolved: usize,
    },
    #[error("custom kinetic column '{column}' has {found} entries, expected {expected}")]
    ColumnLengthMismatch {
        column: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("user-defined kinetics selected but no custom kinetic scheme was registered")]
    MissingCustomScheme,
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("number of sample points must be at least 2, got {0}")]
    TooFewPoints(usize),
    #[error("species counts are not available: the chemistry service reports no gas species")]
    SpeciesCountUnknown,
    #[error("heterogeneous reactions are enabled but the chemistry service has no surface phase")]
    MissingSurfacePhase,
    #[error("configured species {configured:?} differ from the chemistry service species {service:?}")]
    ConfiguredSpeciesMismatch {
        configured: Vec<String>,
        service: Vec<String>,
    },
    #[error("{0} requires a chemistry service")]
    ChemistryServiceRequired(&'static str),
    #[error("chemistry service failed during setup: {0}")]
    Chemistry(#[from] ChemistryError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Non-fatal errors of one evaluation of the equations. The solver is expected to reject the
/// trial state and retry with a smaller step.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("state vector has {found} entries, expected {expected}")]
    StateLength { expected: usize, found: usize },
    #[error("non-positive temperature {0} K")]
    NonPositiveTemperature(f64),
    #[error("non-positive mixture density {0} kg/m3")]
    NonPositiveDensity(f64),
    #[error("non-positive mean molecular weight {0} kg/kmol")]
    NonPositiveMolecularWeight(f64),
    #[error("undefined rate of custom reaction #{reaction}")]
    UndefinedReactionRate { reaction: usize },
    #[error("undefined production rate of species #{species}")]
    UndefinedProductionRate { species: usize },
    #[error("chemistry service failure: {0}")]
    Chemistry(#[from] ChemistryError),
}

impl EvaluationError {
    /// nonzero status returned to the external solver
    pub fn status_code(&self) -> i32 {
        match self {
            EvaluationError::StateLength { .. } => 1,
            EvaluationError::NonPositiveTemperature(_) => 2,
            EvaluationError::NonPositiveDensity(_) => 3,
            EvaluationError::NonPositiveMolecularWeight(_) => 4,
            EvaluationError::UndefinedReactionRate { .. }
            | EvaluationError::UndefinedProductionRate { .. } => 5,
            EvaluationError::Chemistry(_) => 6,
        }
    }
}
