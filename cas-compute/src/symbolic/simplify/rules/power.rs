//! Simplification rules for powers, including exact evaluation of rational powers and extraction
//! of perfect roots.

use crate::primitive::{float, int, rational};
use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{rules::do_power, step::Step},
    step_collector::StepCollector,
};
use rug::{ops::Pow, Float, Integer, Rational};

/// Integer exponents larger than this are not evaluated exactly.
const MAX_EXACT_EXPONENT: i32 = 10_000;

/// Trial division stops at this divisor; whatever is left is treated as prime.
const MAX_TRIAL_DIVISOR: u32 = 100_000;

/// `a^0 = 1`
pub fn power_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |_, exp| {
        exp.as_number()?
            .cmp0()
            .is_eq()
            .then(|| SymExpr::int(1))
    })?;

    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        (*exp.as_number()? == 1).then(|| base.clone())
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `1^a = 1`
pub fn one_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, _| {
        (*base.as_number()? == 1).then(|| SymExpr::int(1))
    })?;

    step_collector.push(Step::OnePower);
    Some(opt)
}

/// `0^a = 0`, if `a` is a positive number
pub fn zero_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        let positive = exp.is_numeric() && !exp.is_zero() && !exp.is_negative_number();
        (base.is_zero() && positive).then(|| base.clone())
    })?;

    step_collector.push(Step::ZeroPower);
    Some(opt)
}

/// `0^a = zoo`, if `a` is a negative number
///
/// `zoo^a = zoo`, if `a` is a positive number
pub fn divide_by_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        let zero_base = base.is_zero() && exp.is_negative_number();
        let infinite_base = *base == SymExpr::zoo()
            && exp.is_numeric()
            && !exp.is_zero()
            && !exp.is_negative_number();
        (zero_base || infinite_base).then(SymExpr::zoo)
    })?;

    step_collector.push(Step::DivideByZero);
    Some(opt)
}

/// Evaluates a numeric power if the result is exact, or if either side is a float.
///
/// `2^3 = 8`
/// `(2/3)^-2 = 9/4`
/// `2.0^0.5 = 1.414...`
pub fn evaluate_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        match (base, exp) {
            (SymExpr::Primary(Primary::Number(base)), SymExpr::Primary(Primary::Number(exp))) => {
                if *exp.denom() != 1 {
                    return None;
                }
                let n = exp.numer().to_i32().filter(|n| n.abs() <= MAX_EXACT_EXPONENT)?;
                if base.cmp0().is_eq() && n < 0 {
                    return None;
                }
                Some(SymExpr::rational(base.clone().pow(n)))
            },
            (SymExpr::Primary(base @ (Primary::Number(_) | Primary::Float(_))), SymExpr::Primary(exp @ (Primary::Number(_) | Primary::Float(_))))
                if matches!(base, Primary::Float(_)) || matches!(exp, Primary::Float(_)) =>
            {
                let base = to_float(base);
                let exp = to_float(exp);
                if base.is_sign_negative() && !exp.is_integer() {
                    return None;
                }
                let result = base.pow(&exp);
                result.is_finite().then(|| SymExpr::float(result))
            },
            _ => None,
        }
    })?;

    step_collector.push(Step::EvaluatePower);
    Some(opt)
}

/// Converts a numeric [`Primary`] to a [`Float`].
fn to_float(primary: &Primary) -> Float {
    match primary {
        Primary::Number(num) => float(num),
        Primary::Float(num) => num.clone(),
        _ => float(0),
    }
}

/// Factors a positive integer into primes and their multiplicities, by trial division.
fn prime_factors(n: &Integer) -> Vec<(Integer, u32)> {
    let mut factors = Vec::new();
    let mut rest = n.clone();
    let mut divisor = 2u32;
    while divisor <= MAX_TRIAL_DIVISOR && Integer::from(divisor) * divisor <= rest {
        if rest.is_divisible_u(divisor) {
            let mut multiplicity = 0;
            while rest.is_divisible_u(divisor) {
                rest /= divisor;
                multiplicity += 1;
            }
            factors.push((int(divisor), multiplicity));
        }
        divisor += if divisor == 2 { 1 } else { 2 };
    }
    if rest > 1 {
        factors.push((rest, 1));
    }
    factors
}

/// Rewrites `n^(p/q)` for a positive integer `n` as `c * m^(g/q)`, where `c` is rational and
/// `m^(g/q)` has no perfect `q`-th power left inside.
fn extract_integer_root(n: &Integer, exp: &Rational) -> Option<SymExpr> {
    let q = exp.denom().clone();
    let (whole, r) = exp.numer().clone().div_rem_floor(q.clone());
    let whole = whole.to_i32().filter(|n| n.abs() <= MAX_EXACT_EXPONENT)?;
    if q > MAX_EXACT_EXPONENT {
        return None;
    }

    let mut coeff = rational(n).pow(whole);
    let mut leftover = Vec::new();
    for (prime, multiplicity) in prime_factors(n) {
        let total = Integer::from(multiplicity) * &r;
        let (out, inside) = total.div_rem_floor(q.clone());
        coeff *= rational(prime.clone().pow(out.to_u32()?));
        if inside != 0 {
            leftover.push((prime, inside));
        }
    }

    let Some(g) = leftover.iter()
        .map(|(_, e)| e.clone())
        .reduce(|a, b| a.gcd(&b))
    else {
        return Some(SymExpr::rational(coeff));
    };

    let mut base = int(1);
    for (prime, e) in leftover {
        base *= prime.pow((e / &g).to_u32()?);
    }
    let root = SymExpr::pow(SymExpr::int(base), SymExpr::rational(Rational::from((g, q))));
    if coeff == 1 {
        Some(root)
    } else {
        Some(SymExpr::Mul(vec![SymExpr::rational(coeff), root]))
    }
}

/// Extracts perfect roots from rational powers of numbers.
///
/// `12^(1/2) = 2*3^(1/2)`
/// `8^(2/3) = 4`
/// `2^(-1/2) = 1/2*2^(1/2)`
/// `(1/4)^(1/2) = 1/2`
pub fn extract_root(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        let base_num = base.as_number()?;
        let exp_num = exp.as_number()?;
        if *exp_num.denom() == 1 || base_num.cmp0().is_le() {
            return None;
        }

        let result = if *base_num.denom() != 1 {
            let numer = SymExpr::pow(SymExpr::int(base_num.numer().clone()), exp.clone());
            let denom = SymExpr::pow(SymExpr::int(base_num.denom().clone()), -exp.clone());
            if *base_num.numer() == 1 {
                denom
            } else {
                SymExpr::Mul(vec![numer, denom])
            }
        } else {
            extract_integer_root(base_num.numer(), exp_num)?
        };

        (result != *expr).then_some(result)
    })?;

    step_collector.push(Step::ExtractRoot);
    Some(opt)
}

/// `(-a)^(p/2) = i^p*a^(p/2)`, for a positive number `a`
pub fn negative_root(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        let base_num = base.as_number()?;
        let exp_num = exp.as_number()?;
        if *exp_num.denom() != 2 || base_num.cmp0().is_ge() {
            return None;
        }

        Some(SymExpr::Mul(vec![
            SymExpr::pow(SymExpr::i(), SymExpr::int(exp_num.numer().clone())),
            SymExpr::pow(SymExpr::rational(-base_num.clone()), exp.clone()),
        ]))
    })?;

    step_collector.push(Step::NegativeRoot);
    Some(opt)
}

/// `(a^b)^c = a^(b*c)`, if `c` is an integer
pub fn power_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        exp.as_integer()?;
        match base {
            SymExpr::Exp(inner_base, inner_exp) => Some(SymExpr::pow(
                (**inner_base).clone(),
                (**inner_exp).clone() * exp.clone(),
            )),
            _ => None,
        }
    })?;

    step_collector.push(Step::PowerPower);
    Some(opt)
}

/// `(ab)^c = a^c*b^c`, if `c` is an integer
///
/// For other exponents, only positive numeric factors are taken out: `(4a)^(1/2) = 2*a^(1/2)`
pub fn distribute_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        let SymExpr::Mul(factors) = base else {
            return None;
        };

        if exp.as_integer().is_some() {
            return Some(SymExpr::Mul(
                factors.iter()
                    .map(|factor| SymExpr::pow(factor.clone(), exp.clone()))
                    .collect(),
            ));
        }

        let (positive, rest): (Vec<_>, Vec<_>) = factors.iter()
            .cloned()
            .partition(|factor| factor.is_numeric() && !factor.is_zero() && !factor.is_negative_number());
        if positive.is_empty() {
            return None;
        }

        let mut new_factors = positive.into_iter()
            .map(|factor| SymExpr::pow(factor, exp.clone()))
            .collect::<Vec<_>>();
        new_factors.push(SymExpr::pow(SymExpr::Mul(rest).downgrade(), exp.clone()));
        Some(SymExpr::Mul(new_factors))
    })?;

    step_collector.push(Step::DistributePower);
    Some(opt)
}

/// `e^(log(a)) = a`
/// `e^(n*log(a)) = a^n`, for a number `n`
pub fn exp_log(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |base, exp| {
        if *base != SymExpr::e() {
            return None;
        }

        if let Some(arg) = exp.as_unary_call(&["log"]) {
            return Some(arg.clone());
        }

        let (coeff, rest) = exp.coeff_and_rest();
        if coeff.is_one() {
            return None;
        }
        rest.as_unary_call(&["log"])
            .map(|arg| SymExpr::pow(arg.clone(), coeff))
    })?;

    step_collector.push(Step::ExpLog);
    Some(opt)
}

/// Applies all power rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    power_zero(expr, step_collector)
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| one_power(expr, step_collector))
        .or_else(|| zero_power(expr, step_collector))
        .or_else(|| divide_by_zero(expr, step_collector))
        .or_else(|| evaluate_power(expr, step_collector))
        .or_else(|| extract_root(expr, step_collector))
        .or_else(|| negative_root(expr, step_collector))
        .or_else(|| power_power(expr, step_collector))
        .or_else(|| distribute_power(expr, step_collector))
        .or_else(|| exp_log(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn factor_small_integers() {
        assert_eq!(prime_factors(&int(360)), vec![(int(2), 3), (int(3), 2), (int(5), 1)]);
        assert_eq!(prime_factors(&int(97)), vec![(int(97), 1)]);
    }

    #[test]
    fn cube_root_keeps_prime_base() {
        // 4^(1/3) = 2^(2/3)
        let expr = SymExpr::pow(SymExpr::int(4), SymExpr::rational((1, 3)));
        assert_eq!(
            extract_root(&expr, &mut ()),
            Some(SymExpr::pow(SymExpr::int(2), SymExpr::rational((2, 3)))),
        );

        // already canonical
        let expr = SymExpr::pow(SymExpr::int(2), SymExpr::rational((2, 3)));
        assert_eq!(extract_root(&expr, &mut ()), None);
    }

    #[test]
    fn mixed_root() {
        // 72^(1/3) = 2*3^(2/3)
        let expr = SymExpr::pow(SymExpr::int(72), SymExpr::rational((1, 3)));
        assert_eq!(
            extract_root(&expr, &mut ()),
            Some(SymExpr::Mul(vec![
                SymExpr::int(2),
                SymExpr::pow(SymExpr::int(3), SymExpr::rational((2, 3))),
            ])),
        );
    }
}
