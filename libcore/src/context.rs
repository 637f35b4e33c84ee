use crate::expression::Kind;
use std::collections::HashMap;

/// Names the parser knows as functions.
pub struct Context {
    pub functions: HashMap<String, Kind>,
}

impl Context {
    /// `sin`, `cos`, `exp` and `log`
    pub fn standard() -> Context {
        Context {
            functions: hashmap! {
                String::from("sin") => Kind::Sin,
                String::from("cos") => Kind::Cos,
                String::from("exp") => Kind::Exp,
                String::from("log") => Kind::Log,
            },
        }
    }

    pub fn function(&self, ident: &str) -> Option<&Kind> {
        self.functions.get(ident)
    }

    pub fn is_function(&self, ident: &str) -> bool {
        self.functions.contains_key(ident)
    }
}

impl Default for Context {
    fn default() -> Context {
        Context::standard()
    }
}

#[cfg(test)]
mod specs {
    use super::*;

    #[test]
    fn standard_functions() {
        let context = Context::standard();
        assert_eq!(context.function("log"), Some(&Kind::Log));
        assert!(context.is_function("sin"));
        assert!(!context.is_function("tan"));
    }

    #[test]
    fn aliases() {
        let mut context = Context::standard();
        context.functions.insert(String::from("ln"), Kind::Log);
        assert_eq!(context.function("ln"), Some(&Kind::Log));
    }
}
