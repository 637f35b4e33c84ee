use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Can not evaluate expressions containing '{variant}'")]
    UnsupportedVariant { variant: &'static str },
    #[error("Rule '{rule}' does not fit '{expression}'")]
    RuleMisuse {
        rule: &'static str,
        expression: String,
    },
    #[error("Syntax error: {0}")]
    Syntax(String),
    #[error("Unknown function '{0}'")]
    UnknownFunction(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Bincode(#[from] bincode::Error),
}

impl Error {
    pub(crate) fn misuse(rule: &'static str, expression: &crate::Expression) -> Error {
        Error::RuleMisuse {
            rule,
            expression: expression.to_string(),
        }
    }
}
