/// Result of one generation request.
///
/// `Empty` means the call succeeded but nothing usable came back, which is
/// reported as "no result" rather than as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation<T> {
    Success(T),
    Empty,
    Failure(String),
}

impl<T> Generation<T> {
    pub fn success(self) -> Option<T> {
        match self {
            Generation::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Generation<U> {
        match self {
            Generation::Success(data) => Generation::Success(f(data)),
            Generation::Empty => Generation::Empty,
            Generation::Failure(message) => Generation::Failure(message),
        }
    }
}
