use std::fmt;

/// Classification accuracy, printed as `<correct>/<total> = <ratio>` with the
/// ratio in `%g` form (six significant digits, trailing zeros dropped).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accuracy {
    pub correct: usize,
    pub total: usize,
}

impl Accuracy {
    pub fn compute(predicted: &[usize], expected: &[usize]) -> Accuracy {
        assert_eq!(predicted.len(), expected.len(), "prediction and label counts differ");
        let correct = predicted.iter().zip(expected.iter()).filter(|(p, e)| p == e).count();
        Accuracy { correct, total: expected.len() }
    }

    /// Fraction correct; NaN when there were no samples.
    pub fn ratio(&self) -> f64 {
        self.correct as f64 / self.total as f64
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} = {}", self.correct, self.total, general(self.ratio()))
    }
}

/// `%g` with precision 6: fixed notation unless the decimal exponent is below
/// -4 or at least 6.
fn general(x: f64) -> String {
    const PRECISION: i32 = 6;
    if !x.is_finite() {
        return if x.is_nan() { "nan".into() } else if x > 0.0 { "inf".into() } else { "-inf".into() };
    }
    if x == 0.0 {
        return "0".into();
    }

    // The exponent after rounding to PRECISION significant digits.
    let sci = format!("{:.*e}", (PRECISION - 1) as usize, x);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((&sci, "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= PRECISION {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_zeros(mantissa), exp.abs())
    } else {
        let decimals = (PRECISION - 1 - exp) as usize;
        trim_zeros(&format!("{x:.decimals$}")).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
