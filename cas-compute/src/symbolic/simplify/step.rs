/// A step taken by the simplifier, named after the rule that was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `a+(b+c) = a+b+c`
    FlattenAdd,

    /// `a+0 = a`
    AddZero,

    /// `2a+3a = 5a`, `2+3 = 5`
    CombineLikeTerms,

    /// Any sum containing complex infinity is complex infinity.
    AddInfinity,

    /// `a*(b*c) = a*b*c`
    FlattenMultiply,

    /// `a*0 = 0`
    MultiplyZero,

    /// `2*a*3 = 6*a`, `a*1 = a`
    CombineNumbers,

    /// `a*a = a^2`, `a^b*a^c = a^(b+c)`
    CombineLikeFactors,

    /// `2*(a+b) = 2a+2b`
    DistributeCoefficient,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `1^a = 1`
    OnePower,

    /// `0^a = 0` for positive `a`
    ZeroPower,

    /// `0^a = zoo` for negative `a`
    DivideByZero,

    /// `2^3 = 8`, `(2/3)^-1 = 3/2`
    EvaluatePower,

    /// `12^(1/2) = 2*3^(1/2)`
    ExtractRoot,

    /// `(-4)^(1/2) = 2i`
    NegativeRoot,

    /// `(a^b)^c = a^(bc)` for integer `c`
    PowerPower,

    /// `(ab)^c = a^c*b^c`
    DistributePower,

    /// `i^2 = -1`, `i^3 = -i`, `i^4 = 1`
    ImaginaryPower,

    /// `e^(log(a)) = a`
    ExpLog,

    /// `sqrt(a) = a^(1/2)`, `exp(a) = e^a`
    RewriteFunction,

    /// `sin(pi/6) = 1/2`, `log(1) = 0`, `asin(1) = pi/2`
    SpecialValue,

    /// `sin(-a) = -sin(a)`, `cos(-a) = cos(a)`
    Symmetry,

    /// `sin(0.5) = 0.479...`
    EvaluateFloat,
}

impl Step {
    /// A short lowercase description of the rule, for walkthroughs.
    pub fn description(&self) -> &'static str {
        match self {
            Self::FlattenAdd => "flatten sums",
            Self::AddZero => "drop zero terms",
            Self::CombineLikeTerms => "combine like terms",
            Self::AddInfinity => "absorb into complex infinity",
            Self::FlattenMultiply => "flatten products",
            Self::MultiplyZero => "multiply by zero",
            Self::CombineNumbers => "multiply numbers",
            Self::CombineLikeFactors => "combine like factors",
            Self::DistributeCoefficient => "distribute the coefficient",
            Self::PowerZero => "raise to the power zero",
            Self::PowerOne => "raise to the power one",
            Self::OnePower => "raise one to a power",
            Self::ZeroPower => "raise zero to a power",
            Self::DivideByZero => "divide by zero",
            Self::EvaluatePower => "evaluate powers",
            Self::ExtractRoot => "extract perfect powers from roots",
            Self::NegativeRoot => "take roots of negative numbers",
            Self::PowerPower => "combine nested powers",
            Self::DistributePower => "distribute powers over products",
            Self::ImaginaryPower => "reduce powers of i",
            Self::ExpLog => "cancel exp and log",
            Self::RewriteFunction => "rewrite roots and exponentials as powers",
            Self::SpecialValue => "use known function values",
            Self::Symmetry => "use function symmetry",
            Self::EvaluateFloat => "evaluate functions of decimals",
        }
    }
}
