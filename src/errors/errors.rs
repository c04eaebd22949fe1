use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// Which stage of the taxonomy an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A token was missing or of the wrong kind at a fixed grammar position.
    Syntax,
    /// Names, modifiers, types or placement are invalid.
    Semantic,
    /// The analyzer contradicted its own assumptions.
    Internal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    hints: Vec<String>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
            hints: vec![],
        }
    }

    /// Attaches a remediation hint on top of the ones the error kind implies.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::ExpectedToken { .. }
            | ErrorImpl::NumberParseError { .. } => ErrorKind::Syntax,
            ErrorImpl::Internal { .. } => ErrorKind::Internal,
            _ => ErrorKind::Semantic,
        }
    }

    pub fn is_internal(&self) -> bool {
        self.kind() == ErrorKind::Internal
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::NameConflict { .. } => "NameConflict",
            ErrorImpl::SignatureConflict { .. } => "SignatureConflict",
            ErrorImpl::DuplicateModifier { .. } => "DuplicateModifier",
            ErrorImpl::ConflictingModifier { .. } => "ConflictingModifier",
            ErrorImpl::InvalidModifier { .. } => "InvalidModifier",
            ErrorImpl::IllegalPlacement { .. } => "IllegalPlacement",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::ConditionNotBoolean { .. } => "ConditionNotBoolean",
            ErrorImpl::OperatorTypeError { .. } => "OperatorTypeError",
            ErrorImpl::UninitializedConstant { .. } => "UninitializedConstant",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::VariableNotInitialized { .. } => "VariableNotInitialized",
            ErrorImpl::ConstantReassignment { .. } => "ConstantReassignment",
            ErrorImpl::AccessViolation { .. } => "AccessViolation",
            ErrorImpl::ModuleNotFound { .. } => "ModuleNotFound",
            ErrorImpl::FunctionNotFound { .. } => "FunctionNotFound",
            ErrorImpl::NoImplementation { .. } => "NoImplementation",
            ErrorImpl::AmbiguousCall { .. } => "AmbiguousCall",
            ErrorImpl::NativeBindingNotFound { .. } => "NativeBindingNotFound",
            ErrorImpl::InvalidReturn { .. } => "InvalidReturn",
            ErrorImpl::Internal { .. } => "Internal",
        }
    }

    /// Remediation hints: the one implied by the error kind, then any attached ones.
    pub fn get_tips(&self) -> Vec<ErrorTip> {
        let implied = match &self.internal_error {
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::NameConflict { .. } => {
                ErrorTip::Suggestion(String::from("Rename the declaration to fix this issue"))
            }
            ErrorImpl::SignatureConflict { .. } => ErrorTip::Suggestion(String::from(
                "Rename your function, change up the parameters or move the function to another module",
            )),
            ErrorImpl::DuplicateModifier { .. } => {
                ErrorTip::Suggestion(String::from("Remove the duplicate modifier"))
            }
            ErrorImpl::ConflictingModifier { .. } => ErrorTip::Suggestion(String::from(
                "Remove the conflicting modifier and keep the one you really need",
            )),
            ErrorImpl::ConditionNotBoolean { .. } => ErrorTip::Suggestion(String::from(
                "Cast the condition to `bool` or change the condition to be a bool on its own",
            )),
            ErrorImpl::UninitializedConstant { .. } => ErrorTip::Suggestion(String::from(
                "Make the variable mutable by adding the `mut` modifier, or give it an initial value",
            )),
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Declare `{}` before using it", variable))
            }
            ErrorImpl::ConstantReassignment { .. } => {
                ErrorTip::Suggestion(String::from("Add the `mut` modifier to the variable"))
            }
            _ => ErrorTip::None,
        };

        let mut tips = vec![];
        if let ErrorTip::Suggestion(_) = implied {
            tips.push(implied);
        }
        tips.extend(self.hints.iter().cloned().map(ErrorTip::Suggestion));
        tips
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}:{}", self.internal_error, self.position.1, self.position.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("expected {expected}, found {found:?}")]
    ExpectedToken { expected: String, found: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("{kind} {name:?} already exists {location}")]
    NameConflict { kind: String, name: String, location: String },
    #[error("function already exists in this module: {signature}")]
    SignatureConflict { signature: String },
    #[error("duplicate {target} modifier {modifier:?}")]
    DuplicateModifier { target: String, modifier: String },
    #[error("conflicting {target} modifier {modifier:?}")]
    ConflictingModifier { target: String, modifier: String },
    #[error("invalid {target} modifier {modifier:?}")]
    InvalidModifier { target: String, modifier: String },
    #[error("{message}")]
    IllegalPlacement { message: String },
    #[error("types do not match: expected {expected}, received {received}")]
    TypeMatchError { expected: String, received: String },
    #[error("expected boolean condition after {statement:?}, found {received}")]
    ConditionNotBoolean { statement: String, received: String },
    #[error("operator {operator:?} cannot be applied to {operands}")]
    OperatorTypeError { operator: String, operands: String },
    #[error("global constant {variable:?} has no initial value")]
    UninitializedConstant { variable: String },
    #[error("cannot find any variable called {variable:?}")]
    VariableNotDeclared { variable: String },
    #[error("variable {variable:?} is used before it is initialized")]
    VariableNotInitialized { variable: String },
    #[error("cannot change the value of constant {variable:?}")]
    ConstantReassignment { variable: String },
    #[error("{kind} {name:?} is not accessible from module {from:?}")]
    AccessViolation { kind: String, name: String, from: String },
    #[error("cannot find module {module:?}")]
    ModuleNotFound { module: String },
    #[error("cannot find any function called {function:?} in module {module:?}")]
    FunctionNotFound { function: String, module: String },
    #[error("cannot find any implementation for function {function:?} with {arguments}")]
    NoImplementation { function: String, arguments: String },
    #[error("call to {function:?} with {arguments} matches more than one implementation")]
    AmbiguousCall { function: String, arguments: String },
    #[error("cannot find native binding {name}({parameters})")]
    NativeBindingNotFound { name: String, parameters: String },
    #[error("{message}")]
    InvalidReturn { message: String },
    #[error("unexpected parsing error: {message}")]
    Internal { message: String },
}
