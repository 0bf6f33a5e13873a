use party_scheduling::Weight;

use crate::sched::*;

/// Parses a comma-separated list of answers: `0`, `0.5`, `1` or `no`, `maybe`, `yes`.
///
/// Numbers are passed through as-is; the scheduler checks that they are valid weights.
pub fn parse_weights(s: &str) -> SchedResult<Vec<f64>> {
    let mut res: Vec<f64> = Vec::new();
    for elt in s.split(',') {
        let elt = elt.trim();
        let x = match Weight::from_label(elt) {
            Some(w) => w.value(),
            None => elt
                .parse::<f64>()
                .ok()
                .context(InvalidWeightSnafu { value: elt })?,
        };
        res.push(x);
    }
    Ok(res)
}

pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}
