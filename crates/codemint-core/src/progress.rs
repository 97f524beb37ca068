/// Observer for long-running loops.
///
/// `fraction` is in `0.0..=1.0`. Reports are fire-and-forget; an observer
/// cannot slow down or cancel the work it watches.
pub trait Progress {
    fn report(&self, fraction: f64, message: &str);
}

impl<F> Progress for F
where
    F: Fn(f64, &str),
{
    fn report(&self, fraction: f64, message: &str) {
        self(fraction, message)
    }
}
