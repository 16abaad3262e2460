/// Stable stand-in for `!`, for application entry points that only return on error.
#[derive(Debug)]
pub enum Never {}
