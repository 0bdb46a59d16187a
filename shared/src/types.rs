/// Result alias shared by every layer; failures surface as one generic error type.
pub type Result<T> = anyhow::Result<T>;
