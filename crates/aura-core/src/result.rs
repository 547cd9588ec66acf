use crate::error::AuraError;

pub type AuraResult<T> = Result<T, AuraError>;
