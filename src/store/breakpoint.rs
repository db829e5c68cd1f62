/// A point where the intensity function changes value. The new value holds
/// from `start` until the next breakpoint, or forever if there is none.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Breakpoint {
    start: i64,
    value: i64
}

impl Breakpoint {
    pub fn new(start: i64, value: i64) -> Breakpoint {
        Breakpoint { start, value }
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}
