//! Compact string codes for light-curve models.
//!
//! Two textual forms share the same trait payload:
//!
//! - display form `Kind(k=v,...)`, for humans and log lines (`Display`)
//! - storage form `Kind|k=v,...`, for catalog table columns (`code`)
//!
//! Traits serialize in each kind's canonical declaration order. Decoding
//! accepts traits in any order but requires exactly the canonical set; the
//! kind name is validated against the closed registry.

use std::fmt;

use crate::domain::VariabilityKind;
use crate::error::Error;

use super::Lightcurve;

impl Lightcurve {
    /// Trait values in the kind's canonical order.
    fn trait_values(&self) -> Vec<f64> {
        match *self {
            Lightcurve::Constant => vec![],
            Lightcurve::Sinusoid {
                period,
                epoch,
                amplitude,
            } => vec![period, epoch, amplitude],
            Lightcurve::Trapezoid {
                period,
                epoch,
                depth,
                t23,
                t14,
            } => vec![period, epoch, depth, t23, t14],
        }
    }

    fn trait_text(&self) -> String {
        self.kind()
            .trait_names()
            .iter()
            .zip(self.trait_values())
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Storage code, e.g. `Sinusoid|P=3,E=1,A=0.05`. A constant model
    /// serializes as `Constant|` with an empty trait payload.
    pub fn code(&self) -> String {
        format!("{}|{}", self.kind().display_name(), self.trait_text())
    }

    /// Decode a storage code back into an equivalent model.
    ///
    /// The default float formatting is shortest-round-trip, so
    /// `from_code(&lc.code())` reproduces trait values exactly.
    pub fn from_code(code: &str) -> Result<Self, Error> {
        let (kind_name, trait_text) = code
            .split_once('|')
            .ok_or_else(|| Error::MalformedCode(format!("missing '|' separator in {code:?}")))?;

        let kind = match kind_name {
            "Constant" => VariabilityKind::Constant,
            "Sinusoid" => VariabilityKind::Sinusoid,
            "Trapezoid" => VariabilityKind::Trapezoid,
            other => {
                return Err(Error::MalformedCode(format!(
                    "unknown light-curve kind {other:?} in {code:?}"
                )));
            }
        };

        let mut pairs: Vec<(&str, f64)> = Vec::new();
        for piece in trait_text.split(',').filter(|p| !p.is_empty()) {
            let (name, text) = piece.split_once('=').ok_or_else(|| {
                Error::MalformedCode(format!("trait {piece:?} in {code:?} is not name=value"))
            })?;
            let value: f64 = text.parse().map_err(|_| {
                Error::MalformedCode(format!("trait {name} in {code:?} has non-numeric value {text:?}"))
            })?;
            if pairs.iter().any(|&(seen, _)| seen == name) {
                return Err(Error::MalformedCode(format!(
                    "trait {name} repeated in {code:?}"
                )));
            }
            pairs.push((name, value));
        }

        let expected = kind.trait_names();
        if pairs.len() != expected.len() {
            return Err(Error::MalformedCode(format!(
                "{} expects traits {:?}, got {} in {code:?}",
                kind.display_name(),
                expected,
                pairs.len()
            )));
        }
        let mut values = Vec::with_capacity(expected.len());
        for &name in expected {
            let value = pairs
                .iter()
                .find(|&&(seen, _)| seen == name)
                .map(|&(_, v)| v)
                .ok_or_else(|| {
                    Error::MalformedCode(format!("trait {name} missing from {code:?}"))
                })?;
            values.push(value);
        }

        match kind {
            VariabilityKind::Constant => Ok(Lightcurve::Constant),
            VariabilityKind::Sinusoid => Lightcurve::sinusoid(values[0], values[1], values[2]),
            VariabilityKind::Trapezoid => {
                Lightcurve::trapezoid(values[0], values[1], values[2], values[3], values[4])
            }
        }
    }
}

impl fmt::Display for Lightcurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind().display_name(), self.trait_text())
    }
}
