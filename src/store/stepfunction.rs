/// An integer-valued function over the whole number line, constant between
/// breakpoints.
pub trait StepFunction {
    fn value_at(&self, x: i64) -> i64;
}
