use crate::core::catalog::{Catalog, EntityKind};
use crate::core::response::{DoseResponsePrediction, HillCurve};
use crate::engine::config::DoseResponseConfig;
use crate::engine::error::EngineError;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A drug-efficacy request as received from a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugEfficacyRequest {
    pub cell_line_name: String,
    pub drug_class: String,
    /// Concentration in µM.
    pub concentration: f64,
}

impl DrugEfficacyRequest {
    pub fn new(
        cell_line_name: impl Into<String>,
        drug_class: impl Into<String>,
        concentration: f64,
    ) -> Self {
        Self {
            cell_line_name: cell_line_name.into(),
            drug_class: drug_class.into(),
            concentration,
        }
    }
}

fn resolve_curve(
    catalog: &Catalog,
    cell_line: &str,
    drug_class: &str,
    config: &DoseResponseConfig,
) -> Result<HillCurve, EngineError> {
    let profile = catalog.cell_line(cell_line)?;
    let ic50 = profile.ic50(drug_class).ok_or_else(|| EngineError::NotFound {
        kind: EntityKind::DrugClass,
        id: drug_class.to_string(),
    })?;
    Ok(HillCurve::new(ic50, config.hill_coefficient)?)
}

fn evaluate(
    curve: &HillCurve,
    cell_line: &str,
    drug_class: &str,
    concentration: f64,
) -> Result<DoseResponsePrediction, EngineError> {
    Ok(DoseResponsePrediction {
        cell_line: cell_line.to_string(),
        drug_class: drug_class.to_string(),
        concentration,
        ic50: curve.ic50(),
        hill_coefficient: curve.hill_coefficient(),
        efficacy: curve.efficacy(concentration)?,
        viability: curve.viability(concentration)?,
    })
}

/// Predicts the efficacy of a drug class against a cell line at one concentration.
///
/// # Errors
///
/// Returns [`EngineError::NotFound`] for an unknown cell line or a drug class missing
/// from the line's sensitivity table, and [`EngineError::InvalidParameter`] for a
/// negative or non-finite concentration.
#[instrument(skip_all, name = "prediction_workflow", fields(cell_line = %request.cell_line_name, drug = %request.drug_class))]
pub fn run(
    catalog: &Catalog,
    request: &DrugEfficacyRequest,
    config: &DoseResponseConfig,
) -> Result<DoseResponsePrediction, EngineError> {
    let curve = resolve_curve(
        catalog,
        &request.cell_line_name,
        &request.drug_class,
        config,
    )?;
    let prediction = evaluate(
        &curve,
        &request.cell_line_name,
        &request.drug_class,
        request.concentration,
    )?;
    debug!(
        ic50 = prediction.ic50,
        efficacy = prediction.efficacy,
        "Dose response evaluated."
    );
    Ok(prediction)
}

/// Evaluates the dose-response curve at `points` log-spaced concentrations between
/// `min_concentration` and `max_concentration` (inclusive).
#[instrument(skip_all, name = "prediction_curve_workflow", fields(points))]
pub fn curve(
    catalog: &Catalog,
    cell_line: &str,
    drug_class: &str,
    (min_concentration, max_concentration): (f64, f64),
    points: usize,
    config: &DoseResponseConfig,
) -> Result<Vec<DoseResponsePrediction>, EngineError> {
    if !(min_concentration.is_finite() && min_concentration > 0.0) {
        return Err(EngineError::invalid(
            "min_concentration",
            min_concentration,
            "must be positive for a logarithmic scale",
        ));
    }
    if !(max_concentration.is_finite() && max_concentration >= min_concentration) {
        return Err(EngineError::invalid(
            "max_concentration",
            max_concentration,
            format!("must be finite and at least {min_concentration}"),
        ));
    }
    if points < 2 {
        return Err(EngineError::invalid("points", points, "at least two points are required"));
    }

    let curve = resolve_curve(catalog, cell_line, drug_class, config)?;
    let (log_min, log_max) = (min_concentration.log10(), max_concentration.log10());
    let step = (log_max - log_min) / (points - 1) as f64;

    (0..points)
        .map(|i| {
            let concentration = if i == points - 1 {
                max_concentration
            } else {
                10f64.powf(log_min + step * i as f64)
            };
            evaluate(&curve, cell_line, drug_class, concentration)
        })
        .collect()
}
